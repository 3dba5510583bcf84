//! Chart data pipeline: timestamps in, sink calls out.

pub mod controller;
pub mod range;
pub mod series;
pub mod sink;
pub mod timestamp;

pub use controller::{ChartController, ChartPhase, FetchTicket, Resolution};
pub use range::{compute_range, DisplayRange};
pub use series::{build_series, build_series_in, Series, SeriesPoint};
pub use sink::ChartSink;
