//! Pagination over search results.

use super::{BinSearchResult, ContigSearchResult};

/// A page of a larger result set.
///
/// `start` is the zero-based offset of the first item, `num_found` the
/// size of the whole result set regardless of page size.
pub trait Page {
    /// Offset (`start`) of the first item. Absent means 0.
    fn offset(&self) -> i64;

    /// Total number of matches (`num_found`), if reported.
    fn total(&self) -> Option<i64>;

    /// Number of items in this page.
    fn item_count(&self) -> usize;

    /// Returns true if the page fits inside the reported total.
    ///
    /// Holds when `item_count <= num_found` and `start + item_count <=
    /// num_found`. A page without `num_found` is trivially consistent.
    fn is_consistent(&self) -> bool {
        let Some(total) = self.total() else {
            return true;
        };
        let count = self.item_count() as i64;
        match self.offset().checked_add(count) {
            Some(end) => self.offset() >= 0 && count <= total && end <= total,
            None => false,
        }
    }

    /// Offset of the next page, or `None` if this is the last one.
    fn next_start(&self) -> Option<i64> {
        let end = self.offset().checked_add(self.item_count() as i64)?;
        match self.total() {
            Some(total) if end < total && self.item_count() > 0 => Some(end),
            _ => None,
        }
    }
}

impl Page for BinSearchResult {
    fn offset(&self) -> i64 {
        self.start().copied().unwrap_or(0)
    }

    fn total(&self) -> Option<i64> {
        self.num_found().copied()
    }

    fn item_count(&self) -> usize {
        self.bins().map_or(0, Vec::len)
    }
}

impl Page for ContigSearchResult {
    fn offset(&self) -> i64 {
        self.start().copied().unwrap_or(0)
    }

    fn total(&self) -> Option<i64> {
        self.num_found().copied()
    }

    fn item_count(&self) -> usize {
        self.contigs().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use serde_json::json;

    fn page(start: i64, bins: usize, num_found: i64) -> BinSearchResult {
        let bins: Vec<_> = (0..bins).map(|i| json!({"bin_id": format!("b{i}")})).collect();
        decode(json!({"start": start, "bins": bins, "num_found": num_found})).unwrap()
    }

    #[test]
    fn consistent_pages() {
        assert!(page(0, 2, 5).is_consistent());
        assert!(page(3, 2, 5).is_consistent());
        assert!(page(5, 0, 5).is_consistent());
    }

    #[test]
    fn overflowing_pages() {
        assert!(!page(0, 3, 2).is_consistent());
        assert!(!page(4, 2, 5).is_consistent());
    }

    #[test]
    fn offset_near_overflow() {
        let page = page(i64::MAX, 1, 5);
        assert!(!page.is_consistent());
        assert_eq!(page.next_start(), None);
    }

    #[test]
    fn next_start_walks_pages() {
        assert_eq!(page(0, 2, 5).next_start(), Some(2));
        assert_eq!(page(4, 1, 5).next_start(), None);
        assert_eq!(page(2, 0, 5).next_start(), None);
    }
}
