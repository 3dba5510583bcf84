//! # voltwatch-types
//!
//! Core types for power-station telemetry. This crate defines the wire
//! schema spoken by the station's HTTP API and the static field manifests
//! that describe what each dashboard page measures.
//!
//! ## Design Goals
//!
//! - **Faithful to the wire**: Types deserialize the station's JSON exactly
//!   as served, including its looser corners (numeric strings, absent keys)
//! - **Explicit manifests**: Pages carry their field lists as plain data;
//!   consumers pass manifest slices around instead of consulting a registry
//! - **Tolerant records**: A malformed field never poisons its neighbours;
//!   coercion returns `Option` and the caller decides what to skip
//!
//! ## Example
//!
//! ```rust
//! use voltwatch_types::{Page, TelemetryRecord, Window};
//!
//! let record: TelemetryRecord = serde_json::from_str(
//!     r#"{"timestamp": "2024-01-15T10:30:00Z", "volts": 13.2, "watts": "18.5"}"#,
//! ).unwrap();
//!
//! assert_eq!(record.numeric_value("volts"), Some(13.2));
//! assert_eq!(record.numeric_value("WATTS"), Some(18.5));
//! assert_eq!(record.numeric_value("amps"), None);
//!
//! let page = Page::System;
//! assert_eq!(page.fields().len(), 3);
//! assert_eq!(Window::H1.token(), "1h");
//! ```

mod alert;
mod live;
mod manifest;
mod record;
mod signal;
mod window;

pub use alert::*;
pub use live::*;
pub use manifest::*;
pub use record::*;
pub use signal::*;
pub use window::*;
