//! Test doubles for the runtime's injected ports.
//!
//! Used by this crate's own tests and available to downstream crates
//! testing feature modules against the runtime.

use crate::ShellPort;
use parking_lot::Mutex;

/// One recorded shell interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// `redirect_to_login` was called.
    RedirectToLogin,
    /// `set_admin_visible` was called.
    AdminVisible(bool),
    /// `apply_theme` was called.
    Theme(String),
    /// `set_sidebar_collapsed` was called.
    Sidebar(bool),
    /// `show_panel` was called.
    Panel(String),
    /// `notify` was called.
    Notify {
        /// The notification level.
        level: String,
        /// The notification message.
        message: String,
    },
}

/// Shell port that records every interaction for assertions.
#[derive(Default)]
pub struct RecordingShell {
    events: Mutex<Vec<ShellEvent>>,
}

impl RecordingShell {
    /// Creates an empty recording shell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<ShellEvent> {
        self.events.lock().clone()
    }

    /// Returns `true` if a login redirect was recorded.
    #[must_use]
    pub fn redirected(&self) -> bool {
        self.events
            .lock()
            .iter()
            .any(|e| *e == ShellEvent::RedirectToLogin)
    }

    /// Returns the notifications recorded so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<(String, String)> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ShellEvent::Notify { level, message } => {
                    Some((level.clone(), message.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

impl ShellPort for RecordingShell {
    fn redirect_to_login(&self) {
        self.events.lock().push(ShellEvent::RedirectToLogin);
    }

    fn set_admin_visible(&self, visible: bool) {
        self.events.lock().push(ShellEvent::AdminVisible(visible));
    }

    fn apply_theme(&self, theme: &str) {
        self.events.lock().push(ShellEvent::Theme(theme.to_string()));
    }

    fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.events.lock().push(ShellEvent::Sidebar(collapsed));
    }

    fn show_panel(&self, panel: &str) {
        self.events.lock().push(ShellEvent::Panel(panel.to_string()));
    }

    fn notify(&self, level: &str, message: &str) {
        self.events.lock().push(ShellEvent::Notify {
            level: level.to_string(),
            message: message.to_string(),
        });
    }
}
