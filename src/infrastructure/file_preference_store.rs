// File preference store - Preferences persisted as a flat TOML table
use crate::application::preference_store::PreferenceStore;
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FilePreferenceStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_table(&path) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Ignoring preferences at {}: {:#}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string(values).context("Failed to serialize preferences")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

fn read_table(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let raw = fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::preference_store::SELECTED_DESTINATION_KEY;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("preferences.toml");

        let store = FilePreferenceStore::open(&path);
        assert_eq!(store.get(SELECTED_DESTINATION_KEY), None);
        store.set(SELECTED_DESTINATION_KEY, "Smith Rock, OR").unwrap();

        let reopened = FilePreferenceStore::open(&path);
        assert_eq!(
            reopened.get(SELECTED_DESTINATION_KEY).as_deref(),
            Some("Smith Rock, OR")
        );
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let store = FilePreferenceStore::open(&path);
        assert_eq!(store.get(SELECTED_DESTINATION_KEY), None);

        store.set(SELECTED_DESTINATION_KEY, "Bishop, CA").unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("selectedDestination = \"Bishop, CA\""));
    }
}
