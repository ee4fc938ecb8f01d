//! The Module trait and the services handed to every module.

use crate::ModuleError;
use futures::future::BoxFuture;
use std::sync::Arc;
use vantage_client::ApiClient;
use vantage_event::EventBus;
use vantage_store::StorageAdapter;
use vantage_types::capability;

/// The shared services every feature module is constructed with.
///
/// Modules reach the runtime only through these injected handles - there is
/// no ambient global to look up, and no way to reach another module except
/// over the event bus.
#[derive(Clone)]
pub struct ModuleServices {
    /// Cross-module notification bus.
    pub bus: Arc<EventBus>,

    /// Namespaced persistent storage.
    pub store: Arc<StorageAdapter>,

    /// Caching, retrying HTTP client.
    pub api: Arc<ApiClient>,
}

/// A feature panel participating in the runtime.
///
/// Implementations are constructed by their [`crate::ModuleProvider`]
/// (see [`crate::ModuleRegistry`]) after the orchestrator's capability
/// check passes. Beyond construction the orchestrator only relies on the
/// optional hooks below.
///
/// # Hooks
///
/// | Hook | When | Concurrency | Failure policy |
/// |------|------|-------------|----------------|
/// | [`refresh_status`](Self::refresh_status) | startup data load | all modules concurrently | notification, never fatal |
/// | [`follow_up`](Self::follow_up) | after every refresh settled | sequential, declared order | notification, never fatal |
pub trait Module: Send + Sync {
    /// The capability name this module was registered under.
    fn capability(&self) -> &str;

    /// Optional status-refresh hook, invoked concurrently with every other
    /// module's hook during the initial data load.
    ///
    /// Returns `None` when the module has nothing to refresh - the
    /// orchestrator skips it without error.
    fn refresh_status(&self) -> Option<BoxFuture<'_, Result<(), ModuleError>>> {
        None
    }

    /// Optional follow-up hook (background-job status, settings load),
    /// invoked sequentially after all refresh hooks settled.
    fn follow_up(&self) -> Option<BoxFuture<'_, Result<(), ModuleError>>> {
        None
    }
}

impl std::fmt::Debug for dyn Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("capability", &self.capability())
            .finish_non_exhaustive()
    }
}

/// One entry of the orchestrator's boot plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// The capability name the module must be registered under.
    pub capability: String,

    /// Whether boot aborts when the capability is absent.
    pub required: bool,
}

impl ModuleDescriptor {
    /// Creates a required descriptor.
    #[must_use]
    pub fn required(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            required: true,
        }
    }

    /// The fixed boot plan: every required capability, construction order
    /// preserved (notifications first).
    #[must_use]
    pub fn boot_plan() -> Vec<Self> {
        capability::REQUIRED
            .iter()
            .map(|name| Self::required(*name))
            .collect()
    }
}
