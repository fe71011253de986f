//! locstamp registry: proof plugins keyed by name
//!
//! The host registers one plugin per evidence source and looks them up by
//! name, capability or runtime.

use locstamp_core::{Capability, LocstampError, ProofPlugin, Runtime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Serializable description of a registered plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,
    pub version: String,
    pub runtimes: Vec<Runtime>,
    pub capabilities: Vec<Capability>,
}

impl RegistryEntry {
    fn describe(plugin: &dyn ProofPlugin) -> Self {
        Self {
            name: plugin.name().to_string(),
            version: plugin.version().to_string(),
            runtimes: plugin.runtimes().to_vec(),
            capabilities: plugin.capabilities().to_vec(),
        }
    }
}

#[derive(Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, Arc<dyn ProofPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if a plugin with the same name is already registered.
    pub fn register(&mut self, plugin: Arc<dyn ProofPlugin>) -> Result<(), LocstampError> {
        let name = plugin.name();
        if self.plugins.contains_key(name) {
            return Err(LocstampError::DuplicatePlugin(name.to_string()));
        }
        info!(plugin = name, version = plugin.version(), "plugin registered");
        self.plugins.insert(name.to_string(), plugin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ProofPlugin>> {
        self.plugins.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.keys().map(String::as_str).collect()
    }

    /// Plugins providing `capability`, in name order
    pub fn supporting(&self, capability: Capability) -> Vec<Arc<dyn ProofPlugin>> {
        self.plugins
            .values()
            .filter(|plugin| plugin.supports(capability))
            .cloned()
            .collect()
    }

    pub fn for_runtime(&self, runtime: Runtime) -> Vec<Arc<dyn ProofPlugin>> {
        self.plugins
            .values()
            .filter(|plugin| plugin.runtimes().contains(&runtime))
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> Vec<RegistryEntry> {
        self.plugins
            .values()
            .map(|plugin| RegistryEntry::describe(plugin.as_ref()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
