//! Session lifecycle.
//!
//! # State Machine
//!
//! ```text
//! ┌─────────┐  no token   ┌──────────────────────────────┐
//! │ NoToken │ ──────────► │ redirect to login (terminal) │
//! └─────────┘             └──────────────────────────────┘
//!      │ token present
//!      ▼
//! ┌─────────┐  POST /auth/verify (bearer)
//! │ Pending │ ─────────────┬───────────────────────────────
//! └─────────┘              │
//!          2xx user envelope│            any failure
//!              ▼            │                ▼
//! ┌──────────────────────┐  │  ┌─────────────────────────────┐
//! │ Verified             │  │  │ Rejected                    │
//! │ - user persisted     │  │  │ - token AND user cleared    │
//! │ - admin UI toggled   │  │  │ - redirect to login         │
//! │ - auth:login emitted │  │  │ - boot stops                │
//! │ - settings applied   │  │  └─────────────────────────────┘
//! └──────────────────────┘
//! ```
//!
//! A non-null token without a verified user is the *pending* state;
//! verification is mandatory before any role-gated UI decision. On
//! rejection both session records are cleared together - never a stale
//! token with a stale user, never a stale user with a cleared token.

use crate::ShellPort;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};
use vantage_client::ApiClient;
use vantage_event::EventBus;
use vantage_store::StorageAdapter;
use vantage_types::{events, keys, UserRecord};

/// Session verification endpoint, relative to the resolved base path.
pub const VERIFY_PATH: &str = "/auth/verify";

/// Per-user settings endpoint, relative to the resolved base path.
pub const SETTINGS_PATH: &str = "/settings/me";

/// Outcome of a session verification round-trip.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// No token in storage; the shell has been redirected.
    NoToken,

    /// Token present, verification not yet settled.
    Pending,

    /// Verification succeeded; the user record is persisted.
    Verified(UserRecord),

    /// Verification failed; session records cleared, shell redirected.
    Rejected,
}

impl AuthState {
    /// Returns `true` for [`AuthState::Verified`].
    #[must_use]
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }
}

/// Session/authentication manager.
///
/// Consumes a token and a verification endpoint; never implements
/// credential checking or token issuance itself.
pub struct SessionManager {
    store: Arc<StorageAdapter>,
    api: Arc<ApiClient>,
    bus: Arc<EventBus>,
    shell: Arc<dyn ShellPort>,
}

impl SessionManager {
    /// Creates a session manager over the shared services.
    #[must_use]
    pub fn new(
        store: Arc<StorageAdapter>,
        api: Arc<ApiClient>,
        bus: Arc<EventBus>,
        shell: Arc<dyn ShellPort>,
    ) -> Self {
        Self {
            store,
            api,
            bus,
            shell,
        }
    }

    /// Runs the verification round-trip.
    ///
    /// No token: redirects to the login surface immediately, without a
    /// network call. Token present: verifies it against the backend;
    /// success persists the user and applies their settings, failure
    /// clears the session and redirects.
    pub async fn check_auth(&self) -> AuthState {
        let token: String = self.store.get(keys::AUTH_TOKEN, String::new());
        if token.is_empty() {
            info!("no session token, redirecting to login");
            self.shell.redirect_to_login();
            return AuthState::NoToken;
        }

        debug!("session token present, verifying");
        self.api.set_bearer(Some(token));

        match self.api.post(VERIFY_PATH, json!({})).await {
            Ok(body) => match serde_json::from_value::<UserRecord>(body["user"].clone()) {
                Ok(user) if !user.username.is_empty() => self.handle_auth_success(user).await,
                _ => {
                    warn!("verification response carried no usable user record");
                    self.handle_auth_error();
                    AuthState::Rejected
                }
            },
            Err(err) => {
                warn!(%err, "session verification failed");
                self.handle_auth_error();
                AuthState::Rejected
            }
        }
    }

    /// Completes a successful verification: persists the user record,
    /// toggles role-gated UI, announces the login, and applies the user's
    /// settings.
    pub async fn handle_auth_success(&self, user: UserRecord) -> AuthState {
        info!(username = %user.username, admin = user.is_admin(), "session verified");

        self.store.set(keys::AUTH_USER, &user);
        self.shell.set_admin_visible(user.is_admin());
        self.bus.emit(
            events::AUTH_LOGIN,
            &json!({ "username": user.username.clone(), "is_admin": user.is_admin() }),
        );

        self.load_user_settings().await;

        AuthState::Verified(user)
    }

    /// Completes a failed verification: clears both session records
    /// together and redirects to the login surface.
    pub fn handle_auth_error(&self) {
        self.store.remove(keys::AUTH_TOKEN);
        self.store.remove(keys::AUTH_USER);
        self.api.set_bearer(None);
        self.shell.redirect_to_login();
    }

    /// Fetches the user's settings and applies them.
    ///
    /// Settings failures degrade to a logged warning - a console with
    /// default settings still runs.
    pub async fn load_user_settings(&self) {
        match self.api.get(SETTINGS_PATH, &[]).await {
            Ok(settings) => self.apply_user_settings(&settings),
            Err(err) => warn!(%err, "failed to load user settings"),
        }
    }

    /// Applies a settings payload: theme and sidebar state are persisted
    /// and pushed to the shell; a theme change is announced on the bus.
    pub fn apply_user_settings(&self, settings: &Value) {
        if let Some(theme) = settings["theme"].as_str() {
            let current: String = self.store.get(keys::THEME, String::new());
            self.store.set(keys::THEME, theme);
            self.shell.apply_theme(theme);
            if current != theme {
                self.bus.emit(events::THEME_CHANGED, &json!(theme));
            }
        }

        if let Some(collapsed) = settings["sidebar_collapsed"].as_bool() {
            self.store.set(keys::SIDEBAR_COLLAPSED, &collapsed);
            self.shell.set_sidebar_collapsed(collapsed);
        }
    }

    /// Manually ends a verified session.
    ///
    /// The logout event is emitted synchronously *before* storage is
    /// cleared and navigation occurs, so other modules can release
    /// in-memory caches first.
    pub fn logout(&self) {
        info!("logging out");
        self.bus.emit(events::AUTH_LOGOUT, &Value::Null);
        self.api.clear_cache();
        self.handle_auth_error();
    }

    /// Returns the persisted user record, if any.
    #[must_use]
    pub fn get_current_user(&self) -> Option<UserRecord> {
        let value = self.store.get_value(keys::AUTH_USER)?;
        serde_json::from_value(value).ok()
    }

    /// Returns `true` if the persisted user carries the role.
    ///
    /// Role checks derive from the persisted record only; with no verified
    /// user every check is `false`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.get_current_user()
            .is_some_and(|user| user.has_role(role))
    }

    /// Returns `true` if the persisted user is an administrator.
    ///
    /// Convenience alias for an admin-flag role check.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(vantage_types::ROLE_ADMIN)
    }
}
