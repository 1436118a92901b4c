//! HTTP client for the persistence API
//!
//! The batch job talks to the API server with a static shared-secret header;
//! writes are upserts keyed by the snapshot's period descriptor.

use reqwest::Client;
use tracing::{debug, instrument};

use newsbrief_core::{DailyNewsData, WeeklyNewsData};

use crate::error::StorageError;

/// Header carrying the shared secret
const API_KEY_HEADER: &str = "x-api-key";

/// Persistence API client
#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    /// Create a new client for the API at `base_url`
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Upsert the daily snapshot for its date
    #[instrument(skip(self, data))]
    pub async fn post_daily(&self, data: &DailyNewsData) -> Result<(), StorageError> {
        self.post("/news/daily", data).await
    }

    /// Upsert the weekly snapshot for its (start, end) pair
    #[instrument(skip(self, data))]
    pub async fn post_weekly(&self, data: &WeeklyNewsData) -> Result<(), StorageError> {
        self.post("/news/weekly", data).await
    }

    /// Most recent daily snapshot, or None when nothing is stored yet
    pub async fn latest_daily(&self) -> Result<Option<DailyNewsData>, StorageError> {
        self.get("/news/daily").await
    }

    /// Most recent weekly snapshot, or None when nothing is stored yet
    pub async fn latest_weekly(&self) -> Result<Option<WeeklyNewsData>, StorageError> {
        self.get("/news/weekly").await
    }

    async fn post<T: serde::Serialize>(&self, path: &str, data: &T) -> Result<(), StorageError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(data)
            .send()
            .await
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, StorageError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // The API returns JSON null when no snapshot exists
        response
            .json::<Option<T>>()
            .await
            .map_err(|e| StorageError::Serialize(e.to_string()))
    }
}
