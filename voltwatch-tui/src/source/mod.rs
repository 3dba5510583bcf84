//! Acquisition sources for window data and live readings.
//!
//! The chart pipeline does not care where records come from. This module
//! provides the async trait the app fetches through, plus the station
//! HTTP source, a file source for offline use, and the streamed live
//! reading source.

mod file;
mod http;
mod live;

pub use file::FileSource;
pub use http::HttpSource;
pub use live::LiveSource;

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;
use voltwatch_client::ClientError;
use voltwatch_types::{Page, TelemetryRecord, Window};

/// Why a fetch produced no records.
///
/// Transport failures are about reaching the station; payload failures
/// mean the station answered with something unusable. The distinction
/// matters for the operator reading the error line.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The station could not be reached or did not answer in time.
    #[error("{0}")]
    Transport(String),

    /// The station answered, but the body was an error or malformed.
    #[error("{0}")]
    Payload(String),
}

impl From<ClientError> for SourceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Parse(msg) | ClientError::Payload(msg) => SourceError::Payload(msg),
            other => SourceError::Transport(other.to_string()),
        }
    }
}

/// Trait for fetching a window of telemetry records for a page.
///
/// Implementations are shared across spawned fetch tasks, so they take
/// `&self` and must be `Send + Sync`.
///
/// # Example
///
/// ```no_run
/// use voltwatch_tui::source::{FileSource, WindowSource};
/// use voltwatch_types::{Page, Window};
///
/// # tokio_test::block_on(async {
/// let source = FileSource::new("captures");
/// let records = source.fetch_window(Page::System, Window::H1).await;
/// # });
/// ```
#[async_trait]
pub trait WindowSource: Send + Sync + Debug {
    /// Fetch all records for one page and window.
    async fn fetch_window(
        &self,
        page: Page,
        window: Window,
    ) -> Result<Vec<TelemetryRecord>, SourceError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_parse_errors_become_payload_errors() {
        let err = SourceError::from(ClientError::Parse("bad json".to_string()));
        assert!(matches!(err, SourceError::Payload(_)));
    }

    #[test]
    fn client_payload_errors_become_payload_errors() {
        let err = SourceError::from(ClientError::Payload("no data for range".to_string()));
        assert!(matches!(err, SourceError::Payload(_)));
        assert_eq!(err.to_string(), "no data for range");
    }

    #[test]
    fn connection_and_timeout_become_transport_errors() {
        let err = SourceError::from(ClientError::Connection("refused".to_string()));
        assert!(matches!(err, SourceError::Transport(_)));

        let err = SourceError::from(ClientError::Timeout);
        assert!(matches!(err, SourceError::Transport(_)));
    }
}
