pub mod controller;
pub mod freshness;
pub mod ranking;

pub use controller::{FeedController, FeedState};
pub use freshness::{classify, Classification, FreshnessAction};
pub use ranking::rank;

pub mod prelude {
    pub use super::controller::{FeedController, FeedState};
    pub use super::freshness::{classify, FreshnessAction};
    pub use super::ranking::rank;
    pub use kiosk_core::{Article, ArticleSource, CacheEntry, CacheStore, Error, Result};
}
