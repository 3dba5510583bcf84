//! File-based data source.
//!
//! Serves captured window payloads from a directory, for demos and for
//! working on the dashboard without a reachable station. One JSON file
//! per page and window, named `<route>_<window>.json` (for example
//! `system_1h.json`), each holding a window payload exactly as the
//! station would send it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use voltwatch_types::{Page, TelemetryRecord, Window, WindowPayload};

use super::{SourceError, WindowSource};

/// A data source that reads window payloads from capture files.
#[derive(Debug)]
pub struct FileSource {
    dir: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source over the given capture directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let description = format!("capture: {}", dir.display());
        Self { dir, description }
    }

    /// The capture file path for one page and window.
    pub fn capture_path(&self, page: Page, window: Window) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", page.route(), window.token()))
    }
}

#[async_trait]
impl WindowSource for FileSource {
    async fn fetch_window(
        &self,
        page: Page,
        window: Window,
    ) -> Result<Vec<TelemetryRecord>, SourceError> {
        let path = self.capture_path(page, window);

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SourceError::Transport(format!("{}: {}", path.display(), e)))?;

        let payload: WindowPayload = serde_json::from_str(&content)
            .map_err(|e| SourceError::Payload(format!("{}: {}", path.display(), e)))?;

        payload
            .into_records()
            .map_err(|e| SourceError::Payload(e.to_string()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
