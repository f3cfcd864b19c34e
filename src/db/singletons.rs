use chrono::Utc;

use super::{get_singleton, save_singleton, DocumentStore};
use crate::common::StoreError;
use crate::models::{HistoryContent, WebsiteSettings};

pub async fn get_website_settings(store: &dyn DocumentStore) -> Result<WebsiteSettings, StoreError> {
    get_singleton(store).await
}

/// Overwrites the settings document; last writer wins.
pub async fn save_website_settings(
    store: &dyn DocumentStore,
    data: &WebsiteSettings,
) -> Result<WebsiteSettings, StoreError> {
    let settings = WebsiteSettings {
        updated_at: Some(Utc::now()),
        ..data.clone()
    };
    save_singleton(store, &settings).await?;

    Ok(settings)
}

pub async fn get_history_content(store: &dyn DocumentStore) -> Result<HistoryContent, StoreError> {
    get_singleton(store).await
}

pub async fn save_history_content(
    store: &dyn DocumentStore,
    data: &HistoryContent,
) -> Result<HistoryContent, StoreError> {
    let history = HistoryContent {
        updated_at: Some(Utc::now()),
        ..data.clone()
    };
    save_singleton(store, &history).await?;

    Ok(history)
}
