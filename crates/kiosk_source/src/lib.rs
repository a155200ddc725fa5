pub mod fixture;
pub mod http;

pub use fixture::StaticArticleSource;
pub use http::HttpArticleSource;

pub mod prelude {
    pub use super::{HttpArticleSource, StaticArticleSource};
    pub use kiosk_core::{Article, ArticleSource, Error, Result};
}
