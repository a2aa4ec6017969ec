// HTTP conditions client implementation
use crate::application::conditions_api::ConditionsApi;
use crate::domain::chart::{ChartKind, ChartSpec, ChartSpecError};
use crate::domain::conditions::{AllData, LegacyConditions};
use crate::domain::destination::Destination;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid chart from {url}: {source}")]
    ChartSpec {
        url: String,
        #[source]
        source: ChartSpecError,
    },
}

#[derive(Debug, Clone)]
pub struct HttpConditionsApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpConditionsApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_url(&self, path: &str, query: &[(&str, String)]) -> String {
        let params: Vec<String> = query
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();
        format!("{}{}?{}", self.base_url, path, params.join("&"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { url, status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl ConditionsApi for HttpConditionsApi {
    async fn fetch_all_data(
        &self,
        destination: &Destination,
        tz_offset_minutes: i32,
    ) -> Result<AllData> {
        let url = self.build_url(
            "/all_data",
            &[
                ("destination", destination.to_string()),
                ("tz_offset", tz_offset_minutes.to_string()),
            ],
        );
        Ok(self.get_json(url).await?)
    }

    async fn fetch_current_conditions(
        &self,
        destination: &Destination,
    ) -> Result<LegacyConditions> {
        let url = self.build_url(
            "/current_conditions",
            &[("destination", destination.to_string())],
        );
        Ok(self.get_json(url).await?)
    }

    async fn fetch_chart(&self, kind: ChartKind, destination: &Destination) -> Result<ChartSpec> {
        let url = self.build_url(kind.legacy_path(), &[("destination", destination.to_string())]);
        let value: serde_json::Value = self.get_json(url.clone()).await?;
        let spec = ChartSpec::from_value(value)
            .map_err(|source| ApiError::ChartSpec { url, source })?;
        Ok(spec)
    }
}
