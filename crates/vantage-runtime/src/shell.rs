//! Shell port - the runtime's view of the surrounding UI shell.
//!
//! The runtime never touches the document directly. Navigation, role-gated
//! visibility, theme application, and user-visible notifications all go
//! through this injected port, so the whole runtime runs under test against
//! a recording implementation (see [`crate::testing::RecordingShell`]).

/// UI shell operations consumed by the session manager and orchestrator.
///
/// Implementations must be `Send + Sync`; the port is shared behind an
/// `Arc` for the lifetime of the page session. All operations are
/// fire-and-forget from the runtime's perspective.
pub trait ShellPort: Send + Sync {
    /// Hard-navigates to the login surface. Terminal for this page load.
    fn redirect_to_login(&self);

    /// Shows or hides the admin-only UI elements.
    fn set_admin_visible(&self, visible: bool);

    /// Applies a theme.
    fn apply_theme(&self, theme: &str);

    /// Collapses or expands the sidebar.
    fn set_sidebar_collapsed(&self, collapsed: bool);

    /// Makes a panel the visible one.
    fn show_panel(&self, panel: &str);

    /// Surfaces a user-visible notification.
    fn notify(&self, level: &str, message: &str);
}
