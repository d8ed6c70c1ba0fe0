use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::asset::AssetRef;

/// Insertion-ordered set of staged references.
#[derive(Debug, Default)]
pub struct Stage {
    items: Vec<AssetRef>,
    index: HashSet<AssetRef>,
}

/// Serialized form of a stage, as `{ "items": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct StageListing {
    pub items: Vec<AssetRef>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the reference was already staged.
    pub fn insert(&mut self, asset: AssetRef) -> bool {
        if self.index.contains(&asset) {
            return false;
        }
        self.index.insert(asset.clone());
        self.items.push(asset);
        true
    }

    /// Returns false if the reference was not staged.
    pub fn remove(&mut self, asset: &AssetRef) -> bool {
        if !self.index.remove(asset) {
            return false;
        }
        self.items.retain(|item| item != asset);
        true
    }

    pub fn contains(&self, asset: &AssetRef) -> bool {
        self.index.contains(asset)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[AssetRef] {
        &self.items
    }
}

impl From<Vec<AssetRef>> for StageListing {
    fn from(items: Vec<AssetRef>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(value: &str) -> AssetRef {
        value.parse().unwrap()
    }

    #[test]
    fn ordered_without_duplicates() {
        let mut stage = Stage::new();
        assert!(stage.insert(asset("assets/b")));
        assert!(stage.insert(asset("assets/a")));
        assert!(stage.insert(asset("resources/c")));
        assert!(!stage.insert(asset("/assets/a")));
        assert_eq!(stage.items(), &[
            asset("assets/b"),
            asset("assets/a"),
            asset("resources/c"),
        ]);
    }

    #[test]
    fn remove_and_clear() {
        let mut stage = Stage::new();
        stage.insert(asset("assets/a"));
        stage.insert(asset("assets/b"));
        assert!(!stage.remove(&asset("assets/missing")));
        assert!(stage.remove(&asset("assets/a")));
        assert!(!stage.contains(&asset("assets/a")));
        assert_eq!(stage.items(), &[asset("assets/b")]);
        // can be re-added after removal, now at the end
        stage.insert(asset("assets/a"));
        assert_eq!(stage.items(), &[asset("assets/b"), asset("assets/a")]);
        stage.clear();
        assert!(stage.is_empty());
        assert_eq!(stage.len(), 0);
    }

    #[test]
    fn listing() -> anyhow::Result<()> {
        let listing = StageListing::from(vec![asset("/assets/foo.png")]);
        assert_eq!(
            serde_json::to_string(&listing)?,
            r#"{"items":["assets/foo.png"]}"#,
        );
        Ok(())
    }
}
