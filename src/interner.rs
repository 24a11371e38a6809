/// String interner for the low-cardinality facet columns.
///
/// Country codes and weekday names repeat on every row, so the dataset stores
/// them once and keeps a `StringId` per row. The dataset never mutates after
/// load, so the interner only grows: there is no release or id reuse.
///
/// # Examples
///
/// ```
/// use trendboard::StringInterner;
///
/// let mut interner = StringInterner::new();
///
/// let us = interner.intern("US");
/// let ca = interner.intern("CA");
/// assert_eq!(interner.intern("US"), us);
/// assert_ne!(us, ca);
///
/// assert_eq!(interner.resolve(us), Some("US"));
/// assert_eq!(interner.lookup("GB"), None);
/// ```

use std::collections::HashMap;

/// Interned string ID type
pub type StringId = u32;

#[derive(Debug, Clone, Default)]
pub struct StringInterner {
    string_to_id: HashMap<String, StringId>,
    /// Stores strings by ID (index = ID)
    id_to_string: Vec<String>,
    /// Number of rows referencing each ID
    ref_counts: Vec<u64>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its ID.
    /// Repeated strings return the existing ID and bump its reference count.
    pub fn intern(&mut self, s: &str) -> StringId {
        if let Some(&id) = self.string_to_id.get(s) {
            self.ref_counts[id as usize] += 1;
            return id;
        }

        let id = self.id_to_string.len() as StringId;
        self.id_to_string.push(s.to_string());
        self.ref_counts.push(1);
        self.string_to_id.insert(s.to_string(), id);
        id
    }

    /// Find the ID of an already-interned string without interning it.
    pub fn lookup(&self, s: &str) -> Option<StringId> {
        self.string_to_id.get(s).copied()
    }

    pub fn resolve(&self, id: StringId) -> Option<&str> {
        self.id_to_string.get(id as usize).map(|s| s.as_str())
    }

    /// Number of rows that interned this ID.
    pub fn ref_count(&self, id: StringId) -> u64 {
        self.ref_counts.get(id as usize).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }

    /// Iterate over `(id, string)` pairs in ID (first-seen) order.
    pub fn iter(&self) -> impl Iterator<Item = (StringId, &str)> {
        self.id_to_string
            .iter()
            .enumerate()
            .map(|(i, s)| (i as StringId, s.as_str()))
    }

    pub fn stats(&self) -> InternerStats {
        let string_bytes: usize = self
            .id_to_string
            .iter()
            .map(|s| s.len() + std::mem::size_of::<String>())
            .sum();

        InternerStats {
            unique_strings: self.len(),
            total_references: self.ref_counts.iter().sum(),
            memory_bytes: string_bytes,
        }
    }
}

/// Statistics about the string interner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternerStats {
    pub unique_strings: usize,
    pub total_references: u64,
    /// Approximate bytes held by the interned strings
    pub memory_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interner_basic() {
        let mut interner = StringInterner::new();

        let id1 = interner.intern("Monday");
        let id2 = interner.intern("Tuesday");
        let id3 = interner.intern("Monday");

        assert_eq!(id1, id3);
        assert_ne!(id1, id2);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_interner_lookup_does_not_intern() {
        let mut interner = StringInterner::new();
        interner.intern("US");

        assert_eq!(interner.lookup("US"), Some(0));
        assert_eq!(interner.lookup("FR"), None);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_interner_ref_counting() {
        let mut interner = StringInterner::new();

        let id = interner.intern("IN");
        interner.intern("IN");
        interner.intern("IN");

        assert_eq!(interner.ref_count(id), 3);
        assert_eq!(interner.ref_count(42), 0);
    }

    #[test]
    fn test_interner_iter_first_seen_order() {
        let mut interner = StringInterner::new();
        interner.intern("US");
        interner.intern("CA");
        interner.intern("US");
        interner.intern("GB");

        let seen: Vec<&str> = interner.iter().map(|(_, s)| s).collect();
        assert_eq!(seen, vec!["US", "CA", "GB"]);
    }

    #[test]
    fn test_interner_stats() {
        let mut interner = StringInterner::new();

        interner.intern("hello");
        interner.intern("world");
        interner.intern("hello");

        let stats = interner.stats();
        assert_eq!(stats.unique_strings, 2);
        assert_eq!(stats.total_references, 3);
        assert!(stats.memory_bytes >= 10);
    }
}
