//! Well-known event bus topic names.
//!
//! Cross-module notifications flow through these topics for the lifetime of
//! a page session. Payloads are `serde_json::Value`; the shapes below are a
//! convention, not a schema.
//!
//! | Topic | Payload | Emitted by |
//! |-------|---------|------------|
//! | [`AUTH_LOGIN`] | user record | session manager on verification success |
//! | [`AUTH_LOGOUT`] | `null` | session manager before clearing the session |
//! | [`THEME_CHANGED`] | theme name string | session manager / settings panel |
//! | [`DATA_REFRESHED`] | `{ "source": string }` | feature modules after a reload |
//! | [`NOTIFICATION_SHOW`] | `{ "level": string, "message": string }` | anyone |

/// A user has been verified and the session is live.
pub const AUTH_LOGIN: &str = "auth:login";

/// The session is about to be cleared. Emitted *before* storage is cleared
/// and navigation occurs, so listeners can release in-memory caches.
pub const AUTH_LOGOUT: &str = "auth:logout";

/// The active theme changed.
pub const THEME_CHANGED: &str = "theme:changed";

/// A feature module finished refreshing its data.
pub const DATA_REFRESHED: &str = "data:refreshed";

/// Request to surface a user-visible notification.
pub const NOTIFICATION_SHOW: &str = "notification:show";
