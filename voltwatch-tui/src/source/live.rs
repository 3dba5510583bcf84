//! Streamed live readings.
//!
//! The station pushes instantaneous gauge values as one JSON object per
//! line. This source spawns a background task that reads the stream and
//! makes the readings available to the synchronous render loop via a
//! non-blocking `poll()`.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use voltwatch_types::LiveReading;

/// A source of live gauge readings from an async byte stream.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use voltwatch_tui::source::LiveSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{\"volts\": 13.2}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = LiveSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct LiveSource {
    receiver: mpsc::Receiver<LiveReading>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl LiveSource {
    /// Spawn a background task that reads newline-delimited readings.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        set_error(&error_handle, Some("live feed closed".to_string()));
                        break;
                    }
                    Ok(_) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<LiveReading>(line.trim()) {
                            Ok(reading) => {
                                set_error(&error_handle, None);
                                if tx.send(reading).await.is_err() {
                                    // Receiver dropped
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "unreadable live message");
                                set_error(&error_handle, Some(format!("parse error: {}", e)));
                            }
                        }
                    }
                    Err(e) => {
                        set_error(&error_handle, Some(format!("read error: {}", e)));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("live: {}", description),
            last_error,
        }
    }

    /// Take the newest buffered reading, if any, without blocking.
    ///
    /// Drains the channel so a slow render loop always sees the latest
    /// reading rather than working through a backlog.
    pub fn poll(&mut self) -> Option<LiveReading> {
        let mut latest = None;
        loop {
            match self.receiver.try_recv() {
                Ok(reading) => latest = Some(reading),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    if latest.is_none() {
                        set_error(&self.last_error, Some("live feed disconnected".to_string()));
                    }
                    break;
                }
            }
        }
        latest
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the last error message, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|guard| guard.clone())
    }
}

fn set_error(slot: &Arc<Mutex<Option<String>>>, message: Option<String>) {
    if let Ok(mut guard) = slot.lock() {
        *guard = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_reading() -> &'static str {
        r#"{"timestamp":"2024-01-15T10:30:00Z","volts":13.2,"watts":18.5,"amps":1.4}"#
    }

    #[tokio::test]
    async fn receives_a_streamed_reading() {
        let data = format!("{}\n", sample_reading());
        let cursor = Cursor::new(data);

        let mut source = LiveSource::spawn(cursor, "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let reading = source.poll().unwrap();
        assert_eq!(reading.numeric_value("volts"), Some(13.2));
    }

    #[tokio::test]
    async fn poll_keeps_only_the_newest_reading() {
        let data = format!(
            "{}\n{}\n",
            r#"{"volts": 12.9}"#,
            r#"{"volts": 13.2}"#
        );
        let cursor = Cursor::new(data);

        let mut source = LiveSource::spawn(cursor, "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let reading = source.poll().unwrap();
        assert_eq!(reading.numeric_value("volts"), Some(13.2));
        assert!(source.poll().is_none());
    }

    #[tokio::test]
    async fn invalid_lines_are_skipped() {
        let data = format!("not valid json\n{}\n", sample_reading());
        let cursor = Cursor::new(data);

        let mut source = LiveSource::spawn(cursor, "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let reading = source.poll();
        assert!(reading.is_some());
    }

    #[tokio::test]
    async fn empty_stream_yields_nothing() {
        let cursor = Cursor::new("");
        let mut source = LiveSource::spawn(cursor, "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(source.poll().is_none());
        assert_eq!(source.last_error(), Some("live feed closed".to_string()));
    }

    #[tokio::test]
    async fn description_names_the_feed() {
        let cursor = Cursor::new("");
        let source = LiveSource::spawn(cursor, "tcp://station:9000");
        assert_eq!(source.description(), "live: tcp://station:9000");
    }

    #[tokio::test]
    async fn error_body_still_delivers() {
        let data = "{\"error\": \"No data available\"}\n";
        let cursor = Cursor::new(data.to_string());

        let mut source = LiveSource::spawn(cursor, "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let reading = source.poll().unwrap();
        assert!(!reading.has_data());
        assert_eq!(reading.error.as_deref(), Some("No data available"));
    }
}
