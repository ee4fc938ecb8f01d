//! Orchestrator - the fail-stop boot sequence.

use crate::{AppContext, RuntimeError};
use futures::future::join_all;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use vantage_module::{Module, ModuleDescriptor, ModuleRegistry};
use vantage_types::{events, keys};

/// Discovers required feature modules, constructs them in dependency
/// order, and drives the startup sequence.
///
/// Each boot step is a gate feeding the next; the first four are
/// fail-stop, the data load degrades to notifications:
///
/// 1. **Capability check** - every required capability must have a
///    registered provider, or boot aborts before anything is constructed.
/// 2. **Construction** - modules are built in declared order
///    (notifications first), each receiving the shared services.
/// 3. **Session verification** - `NoToken`/`Rejected` stops boot; the
///    shell has already been redirected.
/// 4. **UI bootstrap** - persisted theme/sidebar state applied, initial
///    panel shown.
/// 5. **Initial data load** - refresh hooks run concurrently to settled
///    completion, follow-up hooks sequentially; failures are reported via
///    notification and never abort the application.
pub struct Orchestrator {
    ctx: Arc<AppContext>,
    registry: ModuleRegistry,
    plan: Vec<ModuleDescriptor>,
    modules: Vec<Box<dyn Module>>,
}

impl Orchestrator {
    /// Creates an orchestrator with the fixed boot plan.
    #[must_use]
    pub fn new(ctx: Arc<AppContext>, registry: ModuleRegistry) -> Self {
        Self::with_plan(ctx, registry, ModuleDescriptor::boot_plan())
    }

    /// Creates an orchestrator with a custom boot plan.
    #[must_use]
    pub fn with_plan(
        ctx: Arc<AppContext>,
        registry: ModuleRegistry,
        plan: Vec<ModuleDescriptor>,
    ) -> Self {
        Self {
            ctx,
            registry,
            plan,
            modules: Vec::new(),
        }
    }

    /// Returns the constructed modules (empty before [`init`](Self::init)).
    #[must_use]
    pub fn modules(&self) -> &[Box<dyn Module>] {
        &self.modules
    }

    /// Returns the shared context.
    #[must_use]
    pub fn context(&self) -> &Arc<AppContext> {
        &self.ctx
    }

    /// Runs the boot sequence.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::Module`] - a required capability is missing or a
    ///   provider failed; nothing was constructed in the missing case,
    ///   nothing is left half-wired in either.
    /// - [`RuntimeError::AuthRejected`] - verification did not end in
    ///   `Verified`; the shell has been redirected to the login surface.
    pub async fn init(&mut self) -> Result<(), RuntimeError> {
        self.check_capabilities()?;
        self.construct_modules()?;

        let auth = self.ctx.session.check_auth().await;
        if !auth.is_verified() {
            warn!("session not verified, stopping boot");
            return Err(RuntimeError::AuthRejected);
        }

        self.bootstrap_ui();
        self.initial_data_load().await;

        info!(modules = self.modules.len(), "runtime initialized");
        Ok(())
    }

    /// Gate 1: verify every required capability has a provider.
    fn check_capabilities(&self) -> Result<(), RuntimeError> {
        let required: Vec<&str> = self
            .plan
            .iter()
            .filter(|d| d.required)
            .map(|d| d.capability.as_str())
            .collect();

        if let Err(err) = self.registry.verify(&required) {
            error!(%err, "capability check failed, aborting startup");
            return Err(err.into());
        }

        info!(count = required.len(), "all required capabilities present");
        Ok(())
    }

    /// Gate 2: construct modules in declared order, notifications first.
    fn construct_modules(&mut self) -> Result<(), RuntimeError> {
        for descriptor in &self.plan {
            let module = self
                .registry
                .build(&descriptor.capability, self.ctx.services())?;
            info!(capability = %descriptor.capability, "module constructed");
            self.modules.push(module);
        }
        Ok(())
    }

    /// Gate 4: apply persisted UI state and show the initial panel.
    fn bootstrap_ui(&self) {
        let ui = &self.ctx.config.ui;

        let theme: String = self.ctx.store.get(keys::THEME, ui.default_theme.clone());
        self.ctx.shell.apply_theme(&theme);

        let collapsed: bool = self
            .ctx
            .store
            .get(keys::SIDEBAR_COLLAPSED, ui.sidebar_collapsed);
        self.ctx.shell.set_sidebar_collapsed(collapsed);

        self.ctx.shell.show_panel(&ui.initial_panel);
    }

    /// Gate 5: run refresh hooks concurrently, then follow-up hooks
    /// sequentially. Failures notify and never abort.
    async fn initial_data_load(&self) {
        let refreshes = self.modules.iter().filter_map(|module| {
            module.refresh_status().map(|fut| {
                let capability = module.capability().to_string();
                async move { (capability, fut.await) }
            })
        });

        for (capability, result) in join_all(refreshes).await {
            if let Err(err) = result {
                self.report_load_failure(&capability, &err.to_string());
            }
        }

        for module in &self.modules {
            if let Some(fut) = module.follow_up() {
                if let Err(err) = fut.await {
                    self.report_load_failure(module.capability(), &err.to_string());
                }
            }
        }
    }

    /// Reports a data-load failure through the shell and the bus.
    fn report_load_failure(&self, capability: &str, message: &str) {
        warn!(capability, message, "initial data load failure");
        self.ctx.shell.notify("error", message);
        self.ctx.bus.emit(
            events::NOTIFICATION_SHOW,
            &json!({ "level": "error", "message": message, "source": capability }),
        );
    }
}
