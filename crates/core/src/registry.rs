//! Registry of control factories.

use crate::control::BoxedControl;
use anyhow::{anyhow, Result};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

/// Function that creates a control instance.
pub type ControlFactory = fn() -> BoxedControl;

/// Registry mapping control ids to factories.
///
/// Built-in controls register at startup; the host instantiates by id.
/// Factories are plain `fn` pointers, so the registry itself is shareable
/// even though the controls it creates live on the UI thread.
pub struct Registry {
    controls: HashMap<String, ControlFactory>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            controls: HashMap::new(),
        }
    }

    /// Register a control factory under an id. Re-registering an id
    /// replaces the previous factory.
    pub fn register_control(&mut self, id: &str, factory: ControlFactory) {
        debug!("registered control {}", id);
        self.controls.insert(id.to_string(), factory);
    }

    /// Create a control by id.
    pub fn create_control(&self, id: &str) -> Result<BoxedControl> {
        let factory = self
            .controls
            .get(id)
            .ok_or_else(|| anyhow!("Unknown control: {}", id))?;
        Ok(factory())
    }

    /// List all registered control ids, sorted.
    pub fn list_controls(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.controls.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry instance.
static GLOBAL_REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

/// Run `f` with the global registry locked for writing.
pub fn with_registry_mut<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut registry = GLOBAL_REGISTRY.write().expect("registry lock poisoned");
    f(&mut registry)
}

/// Run `f` with the global registry locked for reading.
pub fn with_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    let registry = GLOBAL_REGISTRY.read().expect("registry lock poisoned");
    f(&registry)
}

/// Macro to register a control type under an id.
#[macro_export]
macro_rules! register_control {
    ($id:expr, $type:ty) => {
        $crate::with_registry_mut(|registry| {
            registry.register_control($id, || Box::new(<$type>::default()))
        });
    };
}
