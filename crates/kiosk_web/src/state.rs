use kiosk_feed::FeedController;
use std::sync::Arc;

pub struct AppState {
    pub controller: Arc<FeedController>,
}
