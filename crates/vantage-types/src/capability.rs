//! Required feature-module capability names.
//!
//! A capability name is the key a feature module registers its provider
//! under. The orchestrator verifies that every name in [`REQUIRED`] has a
//! registered provider before constructing anything, so a missing panel
//! aborts startup instead of leaving the UI half-wired.

/// Notification surface. Constructed before every other module so that
/// failures during startup have somewhere to be reported.
pub const NOTIFICATIONS: &str = "notifications";

/// User administration panel.
pub const USERS: &str = "users";

/// Vulnerability record panel.
pub const VULNERABILITIES: &str = "vulnerabilities";

/// Exploit database panel.
pub const EXPLOITS: &str = "exploits";

/// Settings panel.
pub const SETTINGS: &str = "settings";

/// The fixed list of capabilities the orchestrator requires at boot, in
/// construction order. [`NOTIFICATIONS`] must stay first.
pub const REQUIRED: &[&str] = &[NOTIFICATIONS, USERS, VULNERABILITIES, EXPLOITS, SETTINGS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_is_constructed_first() {
        assert_eq!(REQUIRED[0], NOTIFICATIONS);
    }

    #[test]
    fn required_names_are_unique() {
        let mut names: Vec<_> = REQUIRED.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), REQUIRED.len());
    }
}
