use std::sync::Arc;

use crate::config::WebOptions;
use crate::db::DocumentStore;
use crate::storage::ObjectStore;
use crate::web::security::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub rate_limiter: Arc<RateLimiter>,
    pub options: WebOptions,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        options: WebOptions,
    ) -> Self {
        Self {
            store,
            objects,
            rate_limiter: Arc::new(RateLimiter::new()),
            options,
        }
    }
}
