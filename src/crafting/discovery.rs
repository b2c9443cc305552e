//! # Recipe Discovery
//!
//! Tracks which secret recipes the player has found.

use crate::RuneforgeResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Append-if-absent set of discovered recipe ids.
pub trait DiscoveryStore {
    /// Whether a recipe has been discovered.
    fn is_discovered(&self, recipe_id: &str) -> bool;

    /// Records a discovery. Returns true if it was new.
    fn record(&mut self, recipe_id: &str) -> bool;

    /// Every discovered id, sorted.
    fn discovered(&self) -> Vec<String>;
}

/// Discoveries held in memory, optionally saved as a JSON id list.
///
/// # Examples
///
/// ```
/// use runeforge::{DiscoveryStore, InMemoryDiscoveries};
///
/// let mut store = InMemoryDiscoveries::new();
/// assert!(store.record("shadow_blade"));
/// assert!(!store.record("shadow_blade"));
/// assert!(store.is_discovered("shadow_blade"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryDiscoveries {
    ids: BTreeSet<String>,
}

impl InMemoryDiscoveries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON array of recipe ids.
    pub fn load(path: impl AsRef<Path>) -> RuneforgeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves the discovered ids as a JSON array.
    pub fn save(&self, path: impl AsRef<Path>) -> RuneforgeResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl DiscoveryStore for InMemoryDiscoveries {
    fn is_discovered(&self, recipe_id: &str) -> bool {
        self.ids.contains(recipe_id)
    }

    fn record(&mut self, recipe_id: &str) -> bool {
        self.ids.insert(recipe_id.to_string())
    }

    fn discovered(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("discoveries.json");

        let mut store = InMemoryDiscoveries::new();
        store.record("shadow_blade");
        store.record("phoenix_elixir");
        store.save(&path).unwrap();

        let loaded = InMemoryDiscoveries::load(&path).unwrap();
        assert_eq!(
            loaded.discovered(),
            vec!["phoenix_elixir".to_string(), "shadow_blade".to_string()]
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(InMemoryDiscoveries::load(dir.path().join("missing.json")).is_err());
    }
}
