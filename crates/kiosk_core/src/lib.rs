pub mod error;
pub mod source;
pub mod storage;
pub mod types;

pub use error::Error;
pub use source::ArticleSource;
pub use storage::CacheStore;
pub use types::{Article, CacheEntry};

pub type Result<T> = std::result::Result<T, Error>;
