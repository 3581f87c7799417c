//! Reduction of a prefix list to a minimal covering set
//!
//! [`aggregate`] drops every prefix that is contained in another one. It does
//! not merge adjacent prefixes into a supernet: `10.0.0.0/25` and
//! `10.0.0.128/25` both survive.

use crate::overlap::{overlaps, subsumes};
use crate::prefix::Prefix;
use serde::{Deserialize, Serialize};

/// Ordered list of prefixes, normally all of one address family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeSet {
    prefixes: Vec<Prefix>,
}

impl RangeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prefix
    pub fn push(&mut self, prefix: Prefix) {
        self.prefixes.push(prefix);
    }

    /// Number of prefixes
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether the set holds no prefixes
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Iterate in order
    pub fn iter(&self) -> std::slice::Iter<'_, Prefix> {
        self.prefixes.iter()
    }

    /// Sort by ascending prefix length (widest network first)
    ///
    /// The sort is stable, so prefixes of equal length keep insertion order.
    pub fn sort_by_prefix_len(&mut self) {
        self.prefixes.sort_by_key(Prefix::prefix_len);
    }

    /// Remove contained prefixes in place, see [`aggregate`]
    ///
    /// Returns the number of prefixes removed.
    pub fn aggregate_in_place(&mut self) -> usize {
        let before = self.prefixes.len();
        if before < 2 {
            return 0;
        }

        let list = &mut self.prefixes;
        let mut i = 0;
        while i < list.len() {
            let mut j = 0;
            let mut dropped_i = false;
            while j < list.len() {
                if j == i || !overlaps(&list[i], &list[j]) {
                    j += 1;
                    continue;
                }
                // Overlapping aligned blocks are nested: keep the wider one,
                // or the earlier one when both are identical.
                let keep_i = if list[i] == list[j] {
                    i < j
                } else {
                    subsumes(&list[i], &list[j])
                };
                if keep_i {
                    tracing::trace!(kept = %list[i], dropped = %list[j], "prefix contained");
                    list.remove(j);
                    if j < i {
                        i -= 1;
                    }
                } else {
                    tracing::trace!(kept = %list[j], dropped = %list[i], "prefix contained");
                    list.remove(i);
                    dropped_i = true;
                    break;
                }
            }
            // A removed `i` lets the next entry slide into its slot.
            if !dropped_i {
                i += 1;
            }
        }

        before - list.len()
    }
}

impl FromIterator<Prefix> for RangeSet {
    fn from_iter<T: IntoIterator<Item = Prefix>>(iter: T) -> Self {
        Self {
            prefixes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Prefix>> for RangeSet {
    fn from(prefixes: Vec<Prefix>) -> Self {
        Self { prefixes }
    }
}

impl Extend<Prefix> for RangeSet {
    fn extend<T: IntoIterator<Item = Prefix>>(&mut self, iter: T) {
        self.prefixes.extend(iter);
    }
}

impl IntoIterator for RangeSet {
    type Item = Prefix;
    type IntoIter = std::vec::IntoIter<Prefix>;

    fn into_iter(self) -> Self::IntoIter {
        self.prefixes.into_iter()
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a Prefix;
    type IntoIter = std::slice::Iter<'a, Prefix>;

    fn into_iter(self) -> Self::IntoIter {
        self.prefixes.iter()
    }
}

/// Drop every prefix that is contained in another prefix of the set
///
/// Callers normally sort with [`RangeSet::sort_by_prefix_len`] first, but the
/// result covers the same addresses for any input order. Survivors keep
/// their relative order. Pairs of different families never overlap, so a
/// mixed set is reduced per family.
///
/// Every pair is compared until no overlapping pair remains, so running the
/// function on its own output removes nothing.
pub fn aggregate(mut ranges: RangeSet) -> RangeSet {
    let removed = ranges.aggregate_in_place();
    tracing::debug!(removed, remaining = ranges.len(), "aggregated prefixes");
    ranges
}
