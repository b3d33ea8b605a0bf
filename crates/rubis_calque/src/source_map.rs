//! Synthetic-line to original-line attribution table.

use serde::{Deserialize, Serialize};

/// Maps each line of the synthetic Ruby document back to the template
/// line that produced it.
///
/// Synthetic line numbers are 1-indexed and contiguous: entry *n* is
/// assigned when synthetic line *n* is emitted and never revised.
/// Original line numbers are 1-indexed but need not be contiguous or
/// strictly increasing — one template construct may yield several
/// synthetic lines attributed to the same original line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    entries: Vec<u32>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the attribution for the next synthetic line.
    pub fn push(&mut self, original_line: u32) {
        self.entries.push(original_line);
    }

    /// Original line for a 1-indexed synthetic line.
    pub fn get(&self, synthetic_line: u32) -> Option<u32> {
        if synthetic_line == 0 {
            return None;
        }
        self.entries.get(synthetic_line as usize - 1).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `(synthetic, original)` pairs in synthetic line order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, &original)| (index as u32 + 1, original))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_one_indexed_and_contiguous() {
        let mut map = SourceMap::new();
        map.push(4);
        map.push(4);
        map.push(7);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(0), None);
        assert_eq!(map.get(1), Some(4));
        assert_eq!(map.get(2), Some(4));
        assert_eq!(map.get(3), Some(7));
        assert_eq!(map.get(4), None);

        let pairs: Vec<(u32, u32)> = map.iter().collect();
        assert_eq!(pairs, vec![(1, 4), (2, 4), (3, 7)]);
    }

    #[test]
    fn empty_map() {
        let map = SourceMap::new();
        assert!(map.is_empty());
        assert_eq!(map.get(1), None);
        assert_eq!(map.iter().count(), 0);
    }
}
