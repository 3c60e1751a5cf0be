//! Provider catalog and ambient widget routes (`/providers`, `/weather`, `/news`).

use std::collections::BTreeMap;

use scout_core::ProviderInfo;
use serde::{Deserialize, Serialize};

use crate::http::{ensure_success, read_json};
use crate::{ApiError, BackendClient};

/// Current conditions from `GET /weather`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    pub temp: String,
    pub condition: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,
}

/// A headline from `GET /news`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Backend ids are numeric today; kept loose so string ids also parse.
    pub id: serde_json::Value,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    status: String,
    data: Option<T>,
    message: Option<String>,
}

impl<T> DataEnvelope<T> {
    fn into_data(self, route: &str) -> Result<T, ApiError> {
        ensure_success(&self.status, self.message)?;
        self.data
            .ok_or_else(|| ApiError::Parse(format!("{route} response has no 'data'")))
    }
}

impl BackendClient {
    /// List providers and their models, keyed by provider id.
    ///
    /// Uses the shorter `providers_timeout` so a slow backend does not block
    /// start-up; callers usually fall back to [`scout_core::builtin_catalog`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or times out.
    pub async fn providers(&self) -> Result<BTreeMap<String, ProviderInfo>, ApiError> {
        let resp = self
            .http
            .get(self.url("providers"))
            .timeout(self.providers_timeout)
            .send()
            .await?;
        read_json(resp).await
    }

    /// Fetch the weather widget data.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the envelope is not a success.
    pub async fn weather(&self) -> Result<Weather, ApiError> {
        let resp = self.http.get(self.url("weather")).send().await?;
        let envelope: DataEnvelope<Weather> = read_json(resp).await?;
        envelope.into_data("weather")
    }

    /// Fetch up to `limit` headlines.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the envelope is not a success.
    pub async fn news(&self, limit: u32) -> Result<Vec<NewsItem>, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("news?limit={limit}")))
            .send()
            .await?;
        let envelope: DataEnvelope<Vec<NewsItem>> = read_json(resp).await?;
        envelope.into_data("news")
    }
}
