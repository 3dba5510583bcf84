//! Station HTTP data source.

use async_trait::async_trait;
use voltwatch_client::StationClient;
use voltwatch_types::{Page, TelemetryRecord, Window};

use super::{SourceError, WindowSource};

/// Fetches window data from a live station over HTTP.
#[derive(Debug)]
pub struct HttpSource {
    client: StationClient,
    description: String,
}

impl HttpSource {
    pub fn new(client: StationClient) -> Self {
        let description = format!("station: {}", client.endpoint());
        Self {
            client,
            description,
        }
    }
}

#[async_trait]
impl WindowSource for HttpSource {
    async fn fetch_window(
        &self,
        page: Page,
        window: Window,
    ) -> Result<Vec<TelemetryRecord>, SourceError> {
        let records = self.client.fetch_window(page, window).await?;
        tracing::debug!(
            page = %page,
            window = %window,
            records = records.len(),
            "window fetched"
        );
        Ok(records)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_names_the_endpoint() {
        let client = StationClient::builder()
            .endpoint("http://station.local:8000")
            .build()
            .unwrap();
        let source = HttpSource::new(client);
        assert_eq!(source.description(), "station: http://station.local:8000");
    }
}
