// src/loader/registry.rs
//! In-memory module table
//!
//! Maps identifiers to module values. Loading clones the registered value,
//! so every pass-through load hands back an equal, independent copy.

use crate::loader::Loader;
use crate::utils::errors::{Result, ThunkError};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, info};

/// Module registry
pub struct ModuleRegistry<T> {
    modules: RwLock<HashMap<String, T>>,
}

impl<T: Clone + Send + Sync> ModuleRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Builder-style registration
    pub fn with_module(self, id: impl Into<String>, value: T) -> Self {
        self.register(id, value);
        self
    }

    /// Register (or replace) a module
    pub fn register(&self, id: impl Into<String>, value: T) {
        let id = id.into();
        info!("Registering module: {}", id);
        self.modules.write().insert(id, value);
    }

    /// Remove a module
    pub fn unregister(&self, id: &str) -> Result<()> {
        if self.modules.write().remove(id).is_some() {
            info!("Unregistered module: {}", id);
            Ok(())
        } else {
            Err(ThunkError::ModuleNotFound(id.to_string()))
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.read().contains_key(id)
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.modules.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}

impl<T: Clone + Send + Sync + DeserializeOwned> ModuleRegistry<T> {
    /// Build a registry from a JSON object of `id -> exports`
    pub fn from_json(json: &str) -> Result<Self> {
        let modules: HashMap<String, T> = serde_json::from_str(json)?;
        info!("Loaded {} modules from JSON", modules.len());
        Ok(Self {
            modules: RwLock::new(modules),
        })
    }
}

impl<T: Clone + Send + Sync> Loader<T> for ModuleRegistry<T> {
    fn load(&self, id: &str) -> Result<T> {
        match self.modules.read().get(id) {
            Some(value) => Ok(value.clone()),
            None => {
                debug!("No module registered for {}", id);
                Err(ThunkError::ModuleNotFound(id.to_string()))
            }
        }
    }
}

impl<T: Clone + Send + Sync> Default for ModuleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
