//! Verified user record.
//!
//! The [`UserRecord`] is the envelope returned by the session verification
//! endpoint and persisted by the session layer. Role-gated UI decisions are
//! derived from this record only - never from the raw token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The admin role flag alias used by [`UserRecord::has_role`].
pub const ROLE_ADMIN: &str = "admin";

/// A verified user as returned by the session verification endpoint.
///
/// # Forward Compatibility
///
/// The verification envelope may carry extra fields the runtime does not
/// know about; all fields here use `#[serde(default)]` so older runtimes
/// keep deserializing newer envelopes.
///
/// # Example
///
/// ```
/// use vantage_types::UserRecord;
///
/// let user: UserRecord = serde_json::from_value(serde_json::json!({
///     "id": 7,
///     "username": "analyst",
///     "is_admin": false,
///     "roles": ["viewer"]
/// })).unwrap();
///
/// assert!(user.has_role("viewer"));
/// assert!(!user.is_admin());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    /// Backend user id.
    pub id: u64,

    /// Login name.
    pub username: String,

    /// Admin flag. Gates administrative panels.
    pub is_admin: bool,

    /// Additional role names beyond the admin flag.
    pub roles: Vec<String>,

    /// Last successful login, if the backend reports it.
    pub last_login: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Returns `true` if the user carries the given role.
    ///
    /// The admin flag is treated as the `"admin"` role, so
    /// `has_role("admin")` and [`is_admin`](Self::is_admin) agree.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        if role == ROLE_ADMIN && self.is_admin {
            return true;
        }
        self.roles.iter().any(|r| r == role)
    }

    /// Returns `true` if the user is an administrator.
    ///
    /// Convenience alias for `has_role("admin")`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_flag_implies_admin_role() {
        let user = UserRecord {
            username: "root".into(),
            is_admin: true,
            ..Default::default()
        };

        assert!(user.is_admin());
        assert!(user.has_role(ROLE_ADMIN));
        assert!(!user.has_role("viewer"));
    }

    #[test]
    fn explicit_admin_role_counts() {
        let user = UserRecord {
            username: "ops".into(),
            roles: vec!["admin".into()],
            ..Default::default()
        };

        assert!(user.is_admin());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let user: UserRecord =
            serde_json::from_value(serde_json::json!({ "username": "partial" }))
                .expect("partial envelope should deserialize");

        assert_eq!(user.username, "partial");
        assert_eq!(user.id, 0);
        assert!(!user.is_admin());
        assert!(user.last_login.is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let user = UserRecord {
            id: 42,
            username: "analyst".into(),
            is_admin: false,
            roles: vec!["viewer".into(), "exporter".into()],
            last_login: None,
        };

        let json = serde_json::to_string(&user).unwrap();
        let back: UserRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
