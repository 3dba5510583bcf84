//! # voltwatch-client
//!
//! HTTP client for the power station's telemetry API.
//!
//! The station exposes a small set of unauthenticated JSON routes:
//! windowed chart data per page, a paged alert log with optional search
//! filters, and a cellular signal report. This crate wraps them behind
//! [`StationClient`] and converts transport and payload failures into
//! [`ClientError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voltwatch_client::StationClient;
//! use voltwatch_types::{Page, Window};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StationClient::builder()
//!         .endpoint("http://station.local:8000")
//!         .build()?;
//!
//!     let records = client.fetch_window(Page::System, Window::H1).await?;
//!     println!("{} records in the last hour", records.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod station;

pub use error::ClientError;
pub use station::{AlertQuery, AlertsPage, StationClient, StationClientBuilder};

// Re-export types for convenience
pub use voltwatch_types::{
    AlertRecord, Page, SignalReport, TelemetryRecord, Window, WindowPayload,
};
