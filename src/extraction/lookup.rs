use std::collections::HashMap;

/// Maps raw bubble identifiers to dense ids.
///
/// bubbl.us never reuses the id of a deleted bubble, so an export can carry
/// ids like `0, 1, 4, 7, 8`. Every output refers to nodes by their position
/// instead, which this table hands out.
#[derive(Debug, Default)]
pub(crate) struct IdentifierLookup {
    ids: HashMap<String, usize>,
}

impl IdentifierLookup {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(capacity),
        }
    }

    /// Assigns the next dense id to `raw`.
    ///
    /// Returns `None` if `raw` already has an id.
    pub(crate) fn assign(&mut self, raw: &str, first_id: usize) -> Option<usize> {
        if self.ids.contains_key(raw) {
            return None;
        }
        let id = first_id + self.ids.len();
        self.ids.insert(raw.to_string(), id);
        Some(id)
    }

    /// Resolves a raw identifier to its dense id.
    pub(crate) fn resolve(&self, raw: &str) -> Option<usize> {
        self.ids.get(raw).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_dense_ids_in_insertion_order() {
        let mut lookup = IdentifierLookup::default();
        assert_eq!(lookup.assign("0", 0), Some(0));
        assert_eq!(lookup.assign("4", 0), Some(1));
        assert_eq!(lookup.assign("9", 0), Some(2));
        assert_eq!(lookup.resolve("9"), Some(2));
        assert_eq!(lookup.resolve("1"), None);
        assert_eq!(lookup.len(), 3);
    }

    #[test]
    fn refuses_to_reassign_a_raw_id() {
        let mut lookup = IdentifierLookup::default();
        assert_eq!(lookup.assign("b1", 0), Some(0));
        assert_eq!(lookup.assign("b1", 0), None);
        assert_eq!(lookup.resolve("b1"), Some(0));
    }
}
