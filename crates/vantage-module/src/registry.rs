//! Typed capability registry (dependency-injection container).

use crate::{Module, ModuleError, ModuleServices};
use std::collections::HashMap;
use tracing::debug;

/// Constructs a module once the orchestrator resolves its capability.
///
/// Construction must be side-effect free beyond internal state setup; the
/// orchestrator drives I/O later through the module's hooks.
pub trait ModuleProvider: Send + Sync {
    /// Builds the module with the shared services.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError`] if construction fails; the orchestrator
    /// treats this as fatal.
    fn build(&self, services: ModuleServices) -> Result<Box<dyn Module>, ModuleError>;
}

impl<F> ModuleProvider for F
where
    F: Fn(ModuleServices) -> Box<dyn Module> + Send + Sync,
{
    fn build(&self, services: ModuleServices) -> Result<Box<dyn Module>, ModuleError> {
        Ok(self(services))
    }
}

/// Capability-keyed provider registry.
///
/// Feature modules register their provider under a capability name at
/// startup; the orchestrator verifies the required set and resolves by key.
///
/// # Example
///
/// ```
/// use vantage_module::{Module, ModuleRegistry, ModuleServices};
///
/// struct Notifications;
/// impl Module for Notifications {
///     fn capability(&self) -> &str { "notifications" }
/// }
///
/// let mut registry = ModuleRegistry::new();
/// registry
///     .register("notifications", |_services: ModuleServices| {
///         Box::new(Notifications) as Box<dyn Module>
///     })
///     .unwrap();
///
/// assert!(registry.contains("notifications"));
/// assert!(registry.verify(&["notifications"]).is_ok());
/// assert!(registry.verify(&["notifications", "users"]).is_err());
/// ```
#[derive(Default)]
pub struct ModuleRegistry {
    providers: HashMap<String, Box<dyn ModuleProvider>>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under a capability key.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::AlreadyRegistered`] if the key is taken -
    /// two panels claiming one capability is a wiring bug, not a race to
    /// win.
    pub fn register(
        &mut self,
        capability: impl Into<String>,
        provider: impl ModuleProvider + 'static,
    ) -> Result<(), ModuleError> {
        let capability = capability.into();
        if self.providers.contains_key(&capability) {
            return Err(ModuleError::AlreadyRegistered(capability));
        }
        debug!(capability, "module provider registered");
        self.providers.insert(capability, Box::new(provider));
        Ok(())
    }

    /// Returns `true` if a provider is registered for the capability.
    #[must_use]
    pub fn contains(&self, capability: &str) -> bool {
        self.providers.contains_key(capability)
    }

    /// Lists the registered capability names.
    #[must_use]
    pub fn capabilities(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Verifies that every required capability has a provider.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::MissingCapabilities`] naming *all* absent
    /// capabilities, so one boot failure reports the complete gap.
    pub fn verify(&self, required: &[&str]) -> Result<(), ModuleError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|cap| !self.contains(cap))
            .map(|cap| (*cap).to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ModuleError::MissingCapabilities(missing))
        }
    }

    /// Resolves and constructs the module for a capability.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::NotRegistered`] for an unknown key, or the
    /// provider's own failure.
    pub fn build(
        &self,
        capability: &str,
        services: ModuleServices,
    ) -> Result<Box<dyn Module>, ModuleError> {
        let provider = self
            .providers
            .get(capability)
            .ok_or_else(|| ModuleError::NotRegistered(capability.to_string()))?;
        provider.build(services)
    }
}
