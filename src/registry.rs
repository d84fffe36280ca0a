//! Tag registry: caller-chosen labels mapped to page handle ids.
//!
//! The registry never owns pages; it stores the context-local identity of a
//! page against a unique string tag. Values are kept consistent only by the
//! session's own close operation — a page closed around the manager leaves a
//! dangling entry behind (known gap, inherited behavior).

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;

// ============================================================================
// TagRegistry
// ============================================================================

/// Mapping from unique tag to page handle id.
///
/// Generic over the id type so the mapping logic stays testable without a
/// browser; the session instantiates it with the CDP target id.
#[derive(Debug, Default)]
pub(crate) struct TagRegistry<Id> {
    entries: FxHashMap<String, Id>,
}

impl<Id: Clone + PartialEq> TagRegistry<Id> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Returns the id registered under `tag`, if any.
    pub fn get(&self, tag: &str) -> Option<&Id> {
        self.entries.get(tag)
    }

    /// Returns `true` if `tag` is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Registers `id` under `tag`. Existing tags are left untouched; callers
    /// check [`contains`](Self::contains) first for get-or-create semantics.
    pub fn insert(&mut self, tag: impl Into<String>, id: Id) {
        self.entries.entry(tag.into()).or_insert(id);
    }

    /// Reverse lookup: first tag whose value equals `id`.
    ///
    /// Linear scan, O(n) per call. Fine at the page counts a session sees;
    /// a secondary reverse map would only pay off far beyond that.
    pub fn tag_for(&self, id: &Id) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| *v == id)
            .map(|(k, _)| k.as_str())
    }

    /// Removes the entry registered under `tag`, returning its id.
    pub fn remove(&mut self, tag: &str) -> Option<Id> {
        self.entries.remove(tag)
    }

    /// Removes the first entry pointing at `id`, returning its tag.
    pub fn remove_by_id(&mut self, id: &Id) -> Option<String> {
        let tag = self.tag_for(id).map(str::to_owned)?;
        self.entries.remove(&tag);
        Some(tag)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut reg = TagRegistry::new();
        reg.insert("default", "t-1".to_string());
        reg.insert("shop", "t-2".to_string());

        assert_eq!(reg.get("default"), Some(&"t-1".to_string()));
        assert_eq!(reg.get("shop"), Some(&"t-2".to_string()));
        assert_eq!(reg.get("missing"), None);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_insert_does_not_overwrite() {
        let mut reg = TagRegistry::new();
        reg.insert("default", "t-1".to_string());
        reg.insert("default", "t-2".to_string());

        assert_eq!(reg.get("default"), Some(&"t-1".to_string()));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_distinct_tags_stay_distinct() {
        let mut reg = TagRegistry::new();
        reg.insert("a", "t-1".to_string());
        reg.insert("b", "t-2".to_string());

        assert_ne!(reg.get("a"), reg.get("b"));
    }

    #[test]
    fn test_reverse_lookup() {
        let mut reg = TagRegistry::new();
        reg.insert("shop", "t-2".to_string());

        assert_eq!(reg.tag_for(&"t-2".to_string()), Some("shop"));
        assert_eq!(reg.tag_for(&"t-9".to_string()), None);
    }

    #[test]
    fn test_remove_by_id_prunes_single_entry() {
        let mut reg = TagRegistry::new();
        reg.insert("default", "t-1".to_string());
        reg.insert("shop", "t-2".to_string());

        assert_eq!(reg.remove_by_id(&"t-2".to_string()), Some("shop".into()));
        assert!(!reg.contains("shop"));
        assert!(reg.contains("default"));

        assert_eq!(reg.remove_by_id(&"t-2".to_string()), None);
    }

    #[test]
    fn test_clear() {
        let mut reg = TagRegistry::new();
        reg.insert("a", "t-1".to_string());
        reg.clear();
        assert!(reg.is_empty());
    }
}
