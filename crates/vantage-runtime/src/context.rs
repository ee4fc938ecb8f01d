//! Application context - the explicit root object of the runtime.

use crate::{RuntimeConfig, RuntimeError, SessionManager, ShellPort};
use std::sync::Arc;
use tracing::info;
use vantage_client::{ApiClient, HttpTransport, ReqwestTransport};
use vantage_event::EventBus;
use vantage_module::ModuleServices;
use vantage_store::{default_storage_path, FileBackend, StorageAdapter, StorageBackend};

/// The runtime's shared service graph.
///
/// Constructed exactly once at the designated entry point and passed by
/// reference (`Arc`) to every component that needs it - no ambient global
/// lookup happens anywhere inside the runtime.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vantage_runtime::{AppContext, RuntimeConfig, ShellPort};
///
/// # struct MyShell;
/// # impl ShellPort for MyShell {
/// #     fn redirect_to_login(&self) {}
/// #     fn set_admin_visible(&self, _: bool) {}
/// #     fn apply_theme(&self, _: &str) {}
/// #     fn set_sidebar_collapsed(&self, _: bool) {}
/// #     fn show_panel(&self, _: &str) {}
/// #     fn notify(&self, _: &str, _: &str) {}
/// # }
/// let ctx = AppContext::builder(RuntimeConfig::default())
///     .at_location("/console/vulnerabilities")
///     .with_shell(Arc::new(MyShell))
///     .build()?;
/// # Ok::<(), vantage_runtime::RuntimeError>(())
/// ```
pub struct AppContext {
    /// Resolved configuration.
    pub config: RuntimeConfig,

    /// Cross-module notification bus.
    pub bus: Arc<EventBus>,

    /// Namespaced persistent storage.
    pub store: Arc<StorageAdapter>,

    /// Caching, retrying HTTP client.
    pub api: Arc<ApiClient>,

    /// Session lifecycle manager.
    pub session: Arc<SessionManager>,

    /// The surrounding UI shell.
    pub shell: Arc<dyn ShellPort>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Starts building a context.
    #[must_use]
    pub fn builder(config: RuntimeConfig) -> AppContextBuilder {
        AppContextBuilder {
            config,
            location_path: "/".into(),
            shell: None,
            backend: None,
            transport: None,
        }
    }

    /// The service bundle handed to feature modules at construction.
    #[must_use]
    pub fn services(&self) -> ModuleServices {
        ModuleServices {
            bus: Arc::clone(&self.bus),
            store: Arc::clone(&self.store),
            api: Arc::clone(&self.api),
        }
    }
}

/// Builder for [`AppContext`].
///
/// The shell port is required; the storage backend and HTTP transport
/// default to the durable/production implementations and are swappable for
/// tests.
pub struct AppContextBuilder {
    config: RuntimeConfig,
    location_path: String,
    shell: Option<Arc<dyn ShellPort>>,
    backend: Option<Box<dyn StorageBackend>>,
    transport: Option<Box<dyn HttpTransport>>,
}

impl AppContextBuilder {
    /// Sets the current location path used for base path resolution.
    #[must_use]
    pub fn at_location(mut self, path: impl Into<String>) -> Self {
        self.location_path = path.into();
        self
    }

    /// Sets the shell port. Required before [`build`](Self::build).
    #[must_use]
    pub fn with_shell(mut self, shell: Arc<dyn ShellPort>) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Substitutes the storage backend (defaults to [`FileBackend`]).
    #[must_use]
    pub fn with_backend(mut self, backend: Box<dyn StorageBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Substitutes the HTTP transport (defaults to [`ReqwestTransport`]).
    #[must_use]
    pub fn with_transport(mut self, transport: Box<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Constructs the service graph.
    ///
    /// Construction is side-effect free beyond internal state setup, with
    /// one deliberate exception: the one-per-load legacy storage key
    /// migration runs here, before anything reads the session token.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::MissingShell`] - no shell port was provided
    /// - [`RuntimeError::Storage`] - the default file backend could not be
    ///   created
    pub fn build(self) -> Result<AppContext, RuntimeError> {
        let shell = self.shell.ok_or(RuntimeError::MissingShell)?;

        let backend = match self.backend {
            Some(backend) => backend,
            None => {
                let path = self
                    .config
                    .storage
                    .path
                    .clone()
                    .unwrap_or_else(default_storage_path);
                Box::new(FileBackend::new(path)?)
            }
        };

        let store = Arc::new(StorageAdapter::new(backend));
        store.migrate_legacy_keys();

        let base = format!(
            "{}{}",
            self.config.api.origin,
            self.config.api.paths.resolve(&self.location_path)
        );
        info!(%base, "api base path resolved");

        let transport = self
            .transport
            .unwrap_or_else(|| Box::new(ReqwestTransport::new()));
        let api = Arc::new(ApiClient::new(
            transport,
            base,
            self.config.api.client_options(),
        ));

        let bus = Arc::new(EventBus::new());

        let session = Arc::new(SessionManager::new(
            Arc::clone(&store),
            Arc::clone(&api),
            Arc::clone(&bus),
            Arc::clone(&shell),
        ));

        Ok(AppContext {
            config: self.config,
            bus,
            store,
            api,
            session,
            shell,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingShell;
    use vantage_store::MemoryBackend;

    #[test]
    fn build_requires_a_shell() {
        let err = AppContext::builder(RuntimeConfig::default())
            .with_backend(Box::new(MemoryBackend::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, RuntimeError::MissingShell));
    }

    #[test]
    fn base_path_follows_location() {
        let ctx = AppContext::builder(RuntimeConfig::default())
            .with_backend(Box::new(MemoryBackend::new()))
            .with_shell(Arc::new(RecordingShell::new()))
            .at_location("/console/users")
            .build()
            .unwrap();

        assert_eq!(ctx.api.base(), "/console/api");
    }

    #[test]
    fn build_migrates_legacy_keys() {
        let backend = MemoryBackend::with_records([("auth_token", "\"tok\"")]);
        let ctx = AppContext::builder(RuntimeConfig::default())
            .with_backend(Box::new(backend))
            .with_shell(Arc::new(RecordingShell::new()))
            .build()
            .unwrap();

        assert_eq!(
            ctx.store.get("auth_token", String::new()),
            "tok".to_string()
        );
    }
}
