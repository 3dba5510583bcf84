//! Time windows selectable for a chart fetch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far back a window fetch reaches.
///
/// The station accepts exactly these six spans; wider spans come back
/// pre-aggregated server-side, so the client never needs to downsample.
///
/// # Example
///
/// ```rust
/// use voltwatch_types::Window;
///
/// assert_eq!(Window::H1.token(), "1h");
/// assert_eq!(Window::H1.next(), Window::H3);
/// assert_eq!("2d".parse::<Window>().unwrap(), Window::D2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Window {
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "3h")]
    H3,
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "2d")]
    D2,
}

impl Window {
    /// All windows, narrowest first.
    pub const ALL: [Window; 6] = [
        Window::H1,
        Window::H3,
        Window::H6,
        Window::H12,
        Window::D1,
        Window::D2,
    ];

    /// Path token the station's data routes expect.
    pub fn token(&self) -> &'static str {
        match self {
            Window::H1 => "1h",
            Window::H3 => "3h",
            Window::H6 => "6h",
            Window::H12 => "12h",
            Window::D1 => "1d",
            Window::D2 => "2d",
        }
    }

    /// Label for the window selector.
    pub fn label(&self) -> &'static str {
        match self {
            Window::H1 => "1 hour",
            Window::H3 => "3 hours",
            Window::H6 => "6 hours",
            Window::H12 => "12 hours",
            Window::D1 => "1 day",
            Window::D2 => "2 days",
        }
    }

    /// Position of this window in [`Window::ALL`].
    pub fn index(&self) -> usize {
        Window::ALL.iter().position(|w| w == self).unwrap_or(0)
    }

    /// The next wider window, wrapping to the narrowest.
    pub fn next(&self) -> Window {
        Window::ALL[(self.index() + 1) % Window::ALL.len()]
    }

    /// The next narrower window, wrapping to the widest.
    pub fn previous(&self) -> Window {
        Window::ALL[(self.index() + Window::ALL.len() - 1) % Window::ALL.len()]
    }
}

impl Default for Window {
    /// The dashboard opens on the 1 hour window.
    fn default() -> Self {
        Window::H1
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error returned when a window token does not match any window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown window: {0} (expected one of 1h, 3h, 6h, 12h, 1d, 2d)")]
pub struct UnknownWindow(pub String);

impl FromStr for Window {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1h" => Ok(Window::H1),
            "3h" => Ok(Window::H3),
            "6h" => Ok(Window::H6),
            "12h" => Ok(Window::H12),
            "1d" => Ok(Window::D1),
            "2d" => Ok(Window::D2),
            other => Err(UnknownWindow(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_cover_the_station_routes() {
        let tokens: Vec<&str> = Window::ALL.iter().map(|w| w.token()).collect();
        assert_eq!(tokens, ["1h", "3h", "6h", "12h", "1d", "2d"]);
    }

    #[test]
    fn window_cycling_wraps() {
        assert_eq!(Window::H1.next(), Window::H3);
        assert_eq!(Window::D2.next(), Window::H1);
        assert_eq!(Window::H1.previous(), Window::D2);
        assert_eq!(Window::D1.previous(), Window::H12);
    }

    #[test]
    fn window_from_token_round_trip() {
        for window in Window::ALL {
            assert_eq!(window.token().parse::<Window>().unwrap(), window);
        }
        assert!("5m".parse::<Window>().is_err());
        assert!("".parse::<Window>().is_err());
    }

    #[test]
    fn default_window_is_one_hour() {
        assert_eq!(Window::default(), Window::H1);
    }

    #[test]
    fn window_display_uses_token() {
        assert_eq!(Window::H12.to_string(), "12h");
    }

    #[test]
    fn window_serde_uses_tokens() {
        assert_eq!(serde_json::to_string(&Window::H12).unwrap(), "\"12h\"");
        let parsed: Window = serde_json::from_str("\"2d\"").unwrap();
        assert_eq!(parsed, Window::D2);
    }
}
