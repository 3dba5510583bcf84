//! Keyboard handling.
//!
//! Raw terminal events map to typed [`Command`]s here; [`App::handle`]
//! applies them. Keeping the mapping pure makes the key bindings testable
//! without a terminal.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use voltwatch_types::Page;

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Everything a keystroke can ask the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleHelp,
    SelectPage(Page),
    ShowAlerts,
    NextView,
    PrevView,
    NextWindow,
    PrevWindow,
    Refresh,
    CycleAlertSort,
    FlipAlertSort,
    LoadMoreAlerts,
    ResetAlerts,
}

/// Map a key press to a command given the current application state.
pub fn map_key(app: &App, key: KeyEvent) -> Option<Command> {
    // If help is shown, any key closes it
    if app.show_help {
        return Some(Command::ToggleHelp);
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                Some(Command::PrevView)
            } else {
                Some(Command::NextView)
            }
        }
        KeyCode::BackTab => Some(Command::PrevView),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::PrevView),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::NextView),

        // Direct page access
        KeyCode::Char('1') => Some(Command::SelectPage(Page::System)),
        KeyCode::Char('2') => Some(Command::SelectPage(Page::Router)),
        KeyCode::Char('3') => Some(Command::SelectPage(Page::Camera)),
        KeyCode::Char('4') => Some(Command::SelectPage(Page::Network)),
        KeyCode::Char('5') | KeyCode::Char('a') => Some(Command::ShowAlerts),

        // Window cycling (telemetry view only)
        KeyCode::Char(']') | KeyCode::PageDown => {
            if app.view == View::Telemetry {
                Some(Command::NextWindow)
            } else {
                None
            }
        }
        KeyCode::Char('[') | KeyCode::PageUp => {
            if app.view == View::Telemetry {
                Some(Command::PrevWindow)
            } else {
                None
            }
        }

        // Refetch the active view
        KeyCode::Char('r') => Some(Command::Refresh),

        // Help
        KeyCode::Char('?') => Some(Command::ToggleHelp),

        // Alert table (alerts view only)
        KeyCode::Char('s') => {
            if app.view == View::Alerts {
                Some(Command::CycleAlertSort)
            } else {
                None
            }
        }
        KeyCode::Char('S') => {
            if app.view == View::Alerts {
                Some(Command::FlipAlertSort)
            } else {
                None
            }
        }
        KeyCode::Char('n') => {
            if app.view == View::Alerts {
                Some(Command::LoadMoreAlerts)
            } else {
                None
            }
        }
        KeyCode::Char('0') => {
            if app.view == View::Alerts {
                Some(Command::ResetAlerts)
            } else {
                None
            }
        }

        _ => None,
    }
}
