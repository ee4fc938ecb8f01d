//! Environment-sensitive base path resolution.
//!
//! The console is deployed two ways: standalone at the origin root, and
//! embedded under a parent application's mount point. The API lives at a
//! different prefix in each case; [`BasePaths::resolve`] inspects the
//! current location path so the same client code works under both roots.

use serde::{Deserialize, Serialize};

/// The two API mount prefixes and the embedded deployment root.
///
/// # Example
///
/// ```
/// use vantage_client::BasePaths;
///
/// let paths = BasePaths::default();
/// assert_eq!(paths.resolve("/"), "/api");
/// assert_eq!(paths.resolve("/dashboard"), "/api");
/// assert_eq!(paths.resolve("/console"), "/console/api");
/// assert_eq!(paths.resolve("/console/users"), "/console/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasePaths {
    /// API prefix for the standalone deployment.
    pub primary: String,

    /// Location prefix that identifies the embedded deployment.
    pub embedded_root: String,

    /// API prefix for the embedded deployment.
    pub embedded: String,
}

impl Default for BasePaths {
    fn default() -> Self {
        Self {
            primary: "/api".into(),
            embedded_root: "/console".into(),
            embedded: "/console/api".into(),
        }
    }
}

impl BasePaths {
    /// Chooses the API prefix for the given location path.
    ///
    /// The embedded prefix is selected when the location is the embedded
    /// root itself or sits under it; everything else resolves to the
    /// primary prefix. A prefix match alone is not enough -
    /// `/consoles/x` does not count as embedded.
    #[must_use]
    pub fn resolve(&self, location_path: &str) -> &str {
        let root = self.embedded_root.as_str();
        let embedded = location_path == root
            || location_path
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('/'));

        if embedded {
            &self.embedded
        } else {
            &self.primary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_resolves_to_primary() {
        let paths = BasePaths::default();
        assert_eq!(paths.resolve("/"), "/api");
        assert_eq!(paths.resolve(""), "/api");
    }

    #[test]
    fn embedded_root_and_children_resolve_to_embedded() {
        let paths = BasePaths::default();
        assert_eq!(paths.resolve("/console"), "/console/api");
        assert_eq!(paths.resolve("/console/vulnerabilities"), "/console/api");
    }

    #[test]
    fn sibling_prefix_is_not_embedded() {
        let paths = BasePaths::default();
        assert_eq!(paths.resolve("/consoles/other"), "/api");
    }

    #[test]
    fn custom_mounts() {
        let paths = BasePaths {
            primary: "/v1".into(),
            embedded_root: "/admin".into(),
            embedded: "/admin/v1".into(),
        };
        assert_eq!(paths.resolve("/admin/settings"), "/admin/v1");
        assert_eq!(paths.resolve("/public"), "/v1");
    }
}
