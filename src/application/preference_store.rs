// Preference store trait - the widget's persistent client-side state
use crate::domain::destination::Destination;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const SELECTED_DESTINATION_KEY: &str = "selectedDestination";

/// String key/value storage that outlives a page load
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Volatile store, used for tests and when no preferences path is configured
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The selected destination, backed by a preference store
#[derive(Clone)]
pub struct DestinationPreference {
    store: Arc<dyn PreferenceStore>,
    fallback: Destination,
}

impl DestinationPreference {
    pub fn new(store: Arc<dyn PreferenceStore>, fallback: Destination) -> Self {
        Self { store, fallback }
    }

    /// The remembered destination. When nothing is stored yet the fallback
    /// is written back so later loads see it.
    pub fn load(&self) -> Destination {
        match self.store.get(SELECTED_DESTINATION_KEY) {
            Some(stored) if !stored.is_empty() => Destination::new(stored),
            _ => {
                if let Err(e) = self.remember(&self.fallback) {
                    tracing::warn!("Could not store default destination: {:#}", e);
                }
                self.fallback.clone()
            }
        }
    }

    pub fn remember(&self, destination: &Destination) -> anyhow::Result<()> {
        self.store.set(SELECTED_DESTINATION_KEY, destination.as_str())
    }
}
