//! Logical storage key names.
//!
//! All keys live under the storage adapter's single fixed namespace prefix;
//! the names here are the *logical* (unprefixed) keys callers use. The
//! [`LEGACY`] list names the historical unprefixed records migrated into
//! namespaced form once per load.

/// Bearer token for the current session.
pub const AUTH_TOKEN: &str = "auth_token";

/// Verified user record (JSON).
pub const AUTH_USER: &str = "auth_user";

/// User theme preference.
pub const THEME: &str = "theme";

/// Sidebar collapsed flag.
pub const SIDEBAR_COLLAPSED: &str = "sidebar_collapsed";

/// List-panel paging state.
pub const PAGINATION: &str = "pagination";

/// Historical unprefixed keys migrated into the namespace once per load.
pub const LEGACY: &[&str] = &[AUTH_TOKEN, AUTH_USER, THEME, SIDEBAR_COLLAPSED, PAGINATION];
