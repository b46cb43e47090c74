use std::collections::HashSet;

/// Identifiers already rendered, used to detect newly arrived items
///
/// The set is replaced wholesale after each successful poll, never merged:
/// an item removed upstream and later re-added counts as new again. This
/// keeps the set equal to "what the last poll put on screen".
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Items from `items` whose identity is not yet in the set, in order
    ///
    /// The key closure receives the positional index so callers can fall
    /// back to it for records without a stable id.
    pub fn filter_new<'a, T, K>(&self, items: &'a [T], key: K) -> Vec<&'a T>
    where
        K: Fn(usize, &T) -> String,
    {
        items
            .iter()
            .enumerate()
            .filter(|(index, item)| !self.ids.contains(&key(*index, item)))
            .map(|(_, item)| item)
            .collect()
    }

    /// Replace the set with the full current identifier list
    pub fn replace<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.ids = ids.into_iter().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(index: usize, item: &&str) -> String {
        let _ = index;
        item.to_string()
    }

    #[test]
    fn test_all_new_on_first_poll() {
        let seen = SeenSet::new();
        let items = ["a", "b", "c"];
        let new = seen.filter_new(&items, |i, s| key(i, s));
        assert_eq!(new.len(), 3);
    }

    #[test]
    fn test_identical_refetch_yields_nothing() {
        let mut seen = SeenSet::new();
        let items = ["a", "b", "c"];
        seen.replace(items.iter().map(|s| s.to_string()));

        let new = seen.filter_new(&items, |i, s| key(i, s));
        assert!(new.is_empty());
    }

    #[test]
    fn test_only_new_items_detected() {
        let mut seen = SeenSet::new();
        seen.replace(["a", "b", "c"].iter().map(|s| s.to_string()));

        let items = ["a", "b", "c", "d"];
        let new = seen.filter_new(&items, |i, s| key(i, s));
        assert_eq!(new, vec![&"d"]);
    }

    #[test]
    fn test_replacement_forgets_removed_items() {
        let mut seen = SeenSet::new();
        seen.replace(["a", "b"].iter().map(|s| s.to_string()));

        // "b" disappeared upstream
        seen.replace(["a"].iter().map(|s| s.to_string()));
        assert!(!seen.contains("b"));

        // Its re-appearance counts as new
        let items = ["a", "b"];
        let new = seen.filter_new(&items, |i, s| key(i, s));
        assert_eq!(new, vec![&"b"]);
    }
}
