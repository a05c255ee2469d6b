//! Priority-ordered result set.
//!
//! Pairs each item with a ranking weight and yields items by descending
//! weight. Items with equal weight keep the order they were appended in.

/// A weighted collection sorted by descending weight.
///
/// No deduplication happens here: appending the same item twice keeps both.
#[derive(Debug, Clone)]
pub struct PrioritySlice<T> {
    entries: Vec<(f64, T)>,
}

impl<T> Default for PrioritySlice<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PrioritySlice<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Add an item with its ranking weight.
    pub fn append(&mut self, weight: f64, item: T) {
        self.entries.push((weight, item));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort by descending weight.
    ///
    /// `Vec::sort_by` is stable, so ties keep append order. Weights are
    /// compared with [`f64::total_cmp`].
    pub fn sort(mut self) -> Self {
        self.entries.sort_by(|a, b| b.0.total_cmp(&a.0));
        self
    }

    /// Weight/item pairs in their current order.
    pub fn entries(&self) -> &[(f64, T)] {
        &self.entries
    }

    /// Drop the weights and return the items in their current order.
    pub fn into_underlying(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, item)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_descending() {
        let mut ps = PrioritySlice::new();
        ps.append(0.5, "mid");
        ps.append(2.0, "high");
        ps.append(0.1, "low");

        assert_eq!(ps.sort().into_underlying(), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_append_order() {
        let mut ps = PrioritySlice::new();
        ps.append(1.0, "first");
        ps.append(3.0, "top");
        ps.append(1.0, "second");
        ps.append(1.0, "third");

        assert_eq!(
            ps.sort().into_underlying(),
            vec!["top", "first", "second", "third"]
        );
    }

    #[test]
    fn test_no_deduplication() {
        let mut ps = PrioritySlice::new();
        ps.append(1.0, "same");
        ps.append(1.0, "same");
        assert_eq!(ps.len(), 2);
        assert_eq!(ps.sort().into_underlying(), vec!["same", "same"]);
    }

    #[test]
    fn test_empty() {
        let ps: PrioritySlice<u32> = PrioritySlice::default();
        assert!(ps.is_empty());
        assert!(ps.sort().into_underlying().is_empty());
    }

    #[test]
    fn test_entries_expose_weights() {
        let mut ps = PrioritySlice::with_capacity(2);
        ps.append(0.25, 'a');
        ps.append(0.75, 'b');
        let sorted = ps.sort();
        assert_eq!(sorted.entries(), &[(0.75, 'b'), (0.25, 'a')]);
    }
}
