//! Client for the station's telemetry routes.
//!
//! The station serves plain JSON over HTTP:
//!
//! - `GET /{page}/data/{window}` - windowed chart records for a page
//! - `GET /api/alerts?limit&offset` - paged alert log
//! - `GET /api/search_alerts?limit&offset&start&end&level&source` - filtered
//!   alert log
//! - `GET /cellular` - modem metrics with a precomputed quality label
//!
//! ## Example
//!
//! ```rust,no_run
//! use voltwatch_client::{AlertQuery, StationClient};
//! use voltwatch_types::{Page, Window};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StationClient::builder()
//!         .endpoint("http://station.local:8000")
//!         .build()?;
//!
//!     let records = client.fetch_window(Page::Network, Window::H6).await?;
//!     println!("{} network records", records.len());
//!
//!     let page = client.fetch_alerts(&AlertQuery::default()).await?;
//!     println!("{} alerts, more: {}", page.alerts.len(), page.has_more);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use voltwatch_types::{
    AlertRecord, AlertsPayload, Page, SignalReport, TelemetryRecord, Window, WindowPayload,
};

use crate::ClientError;

const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Client for the station's HTTP API.
#[derive(Debug, Clone)]
pub struct StationClient {
    client: Client,
    endpoint: String,
}

impl StationClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> StationClientBuilder {
        StationClientBuilder::default()
    }

    /// The base endpoint this client talks to, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch one window of chart records for a page.
    ///
    /// The records come back oldest first, exactly as served. A payload
    /// carrying an `error` field or missing its `data` list maps to
    /// [`ClientError::Payload`]; an empty `data` list is a valid empty
    /// batch.
    pub async fn fetch_window(
        &self,
        page: Page,
        window: Window,
    ) -> Result<Vec<TelemetryRecord>, ClientError> {
        let url = format!("{}/{}/data/{}", self.endpoint, page.route(), window.token());

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let payload: WindowPayload = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        payload.into_records().map_err(ClientError::from)
    }

    /// Fetch one page of the alert log.
    ///
    /// Plain paging hits `/api/alerts`; any filter switches to
    /// `/api/search_alerts`. The station's "no alerts" body maps to an
    /// empty page, not an error.
    pub async fn fetch_alerts(&self, query: &AlertQuery) -> Result<AlertsPage, ClientError> {
        let url = format!("{}{}", self.endpoint, query.route());

        let response = self
            .client
            .get(&url)
            .query(&query.params())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let payload: AlertsPayload = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        Ok(AlertsPage {
            alerts: payload.alerts,
            has_more: payload.has_more,
        })
    }

    /// Fetch the cellular signal report.
    ///
    /// The station answers failures in-band with `{"status": "ERROR: ..."}`;
    /// those come back as [`ClientError::Payload`].
    pub async fn fetch_signal(&self) -> Result<SignalReport, ClientError> {
        let url = format!("{}/cellular", self.endpoint);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let report: SignalReport = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        if let Some(status) = &report.status {
            return Err(ClientError::Payload(status.clone()));
        }

        Ok(report)
    }
}

/// Builder for [`StationClient`].
#[derive(Debug, Default)]
pub struct StationClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl StationClientBuilder {
    /// Set the station endpoint (e.g., "http://station.local:8000").
    ///
    /// A trailing slash is trimmed.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<StationClient, ClientError> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();

        if endpoint.is_empty() {
            return Err(ClientError::InvalidEndpoint("endpoint is empty".into()));
        }

        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Ok(StationClient { client, endpoint })
    }
}

/// Parameters of an alert-log fetch.
///
/// `limit`/`offset` page through the log; the optional fields filter it.
/// Dates use the form the station expects, `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertQuery {
    pub limit: u32,
    pub offset: u32,
    pub start: Option<String>,
    pub end: Option<String>,
    pub level: Option<String>,
    pub source: Option<String>,
}

impl Default for AlertQuery {
    /// First page of ten, no filters. Matches the station's own default
    /// page size.
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            start: None,
            end: None,
            level: None,
            source: None,
        }
    }
}

impl AlertQuery {
    /// A query for one page of `limit` rows from `offset`.
    pub fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            ..Default::default()
        }
    }

    /// Restrict to alerts between two dates (inclusive), `YYYY-MM-DD`.
    pub fn between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    /// Restrict to one severity level.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Restrict to one alert source.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether any search filter is set.
    pub fn has_filters(&self) -> bool {
        self.start.is_some() || self.end.is_some() || self.level.is_some() || self.source.is_some()
    }

    /// Which route this query must hit.
    pub fn route(&self) -> &'static str {
        if self.has_filters() {
            "/api/search_alerts"
        } else {
            "/api/alerts"
        }
    }

    /// The query string pairs, filters only when set.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(start) = &self.start {
            params.push(("start", start.clone()));
        }
        if let Some(end) = &self.end {
            params.push(("end", end.clone()));
        }
        if let Some(level) = &self.level {
            params.push(("level", level.clone()));
        }
        if let Some(source) = &self.source {
            params.push(("source", source.clone()));
        }
        params
    }
}

/// One fetched page of the alert log.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertsPage {
    /// The rows of this page, newest first.
    pub alerts: Vec<AlertRecord>,
    /// Whether the station has more rows past this page.
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = StationClient::builder().build().unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = StationClient::builder()
            .endpoint("http://station.local:8000/")
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://station.local:8000");
    }

    #[test]
    fn test_builder_rejects_empty_endpoint() {
        let result = StationClient::builder().endpoint("   ").build();
        assert!(matches!(result, Err(ClientError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_builder_custom_timeout() {
        let client = StationClient::builder()
            .endpoint("http://station.local:8000")
            .timeout(Duration::from_secs(3))
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn alert_query_default_is_first_page_of_ten() {
        let query = AlertQuery::default();
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
        assert!(!query.has_filters());
        assert_eq!(query.route(), "/api/alerts");
    }

    #[test]
    fn alert_query_plain_paging_params() {
        let query = AlertQuery::page(10, 30);
        assert_eq!(
            query.params(),
            vec![("limit", "10".to_string()), ("offset", "30".to_string())]
        );
    }

    #[test]
    fn alert_query_filters_switch_route() {
        let query = AlertQuery::default().level("critical");
        assert_eq!(query.route(), "/api/search_alerts");

        let query = AlertQuery::default().between("2024-01-01", "2024-01-31");
        assert_eq!(query.route(), "/api/search_alerts");
    }

    #[test]
    fn alert_query_filter_params_in_order() {
        let query = AlertQuery::page(20, 0)
            .between("2024-01-01", "2024-01-31")
            .level("warning")
            .source("camera");

        assert_eq!(
            query.params(),
            vec![
                ("limit", "20".to_string()),
                ("offset", "0".to_string()),
                ("start", "2024-01-01".to_string()),
                ("end", "2024-01-31".to_string()),
                ("level", "warning".to_string()),
                ("source", "camera".to_string()),
            ]
        );
    }

    #[test]
    fn alerts_page_from_no_alerts_payload() {
        let payload: AlertsPayload =
            serde_json::from_str(r#"{"message": "No alerts available", "has_more": false}"#)
                .unwrap();
        let page = AlertsPage {
            alerts: payload.alerts,
            has_more: payload.has_more,
        };
        assert!(page.alerts.is_empty());
        assert!(!page.has_more);
    }
}
