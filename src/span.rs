use alloc::vec::Vec;

use crate::SpanSizeLookup;

/// Where an item sits inside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpanEntry {
    /// First lane the item occupies.
    pub index: usize,
    /// Number of lanes the item occupies.
    pub size: usize,
    /// Line (row of a vertical grid) the item belongs to.
    pub group: usize,
}

/// Lazily computed span indexes and groups.
///
/// Entries are computed front to back the way a grid layout manager assigns spans: an item
/// starts a new group when it does not fit in the remaining lanes of the current one.
pub(crate) struct SpanGrid {
    span_count: usize,
    lookup: Option<SpanSizeLookup>,
    entries: Vec<SpanEntry>,
}

impl SpanGrid {
    pub fn new(span_count: usize, lookup: Option<SpanSizeLookup>) -> Self {
        Self {
            span_count: span_count.max(1),
            lookup,
            entries: Vec::new(),
        }
    }

    pub fn span_count(&self) -> usize {
        self.span_count
    }

    pub fn set_span_count(&mut self, span_count: usize) {
        self.span_count = span_count.max(1);
        self.invalidate();
    }

    pub fn set_lookup(&mut self, lookup: Option<SpanSizeLookup>) {
        self.lookup = lookup;
        self.invalidate();
    }

    /// Drops every cached entry. Call after the data set or the lookup changed.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn span_size(&self, position: usize) -> usize {
        match &self.lookup {
            Some(lookup) => lookup(position).clamp(1, self.span_count),
            None => 1,
        }
    }

    pub fn entry(&mut self, position: usize) -> SpanEntry {
        if self.span_count == 1 {
            return SpanEntry {
                index: 0,
                size: 1,
                group: position,
            };
        }
        while self.entries.len() <= position {
            let next = self.entries.len();
            let size = self.span_size(next);
            let entry = match self.entries.last() {
                None => SpanEntry {
                    index: 0,
                    size,
                    group: 0,
                },
                Some(prev) => {
                    let index = prev.index + prev.size;
                    if index + size > self.span_count {
                        SpanEntry {
                            index: 0,
                            size,
                            group: prev.group + 1,
                        }
                    } else {
                        SpanEntry {
                            index,
                            size,
                            group: prev.group,
                        }
                    }
                }
            };
            self.entries.push(entry);
        }
        self.entries[position]
    }

    pub fn span_index(&mut self, position: usize) -> usize {
        self.entry(position).index
    }

    pub fn span_group(&mut self, position: usize) -> usize {
        self.entry(position).group
    }

    pub fn is_full_span(&mut self, position: usize) -> bool {
        self.entry(position).size >= self.span_count
    }

    /// First and last position of the group containing `position`.
    pub fn group_bounds(&mut self, position: usize, item_count: usize) -> (usize, usize) {
        let group = self.span_group(position);
        let mut first = position;
        while first > 0 && self.span_group(first - 1) == group {
            first -= 1;
        }
        let mut last = position;
        while last + 1 < item_count && self.span_group(last + 1) == group {
            last += 1;
        }
        (first, last)
    }
}

impl core::fmt::Debug for SpanGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpanGrid")
            .field("span_count", &self.span_count)
            .field("cached", &self.entries.len())
            .finish_non_exhaustive()
    }
}

/// Splits `total` into `span_count` lanes and returns the `span_count + 1` lane borders.
///
/// The remainder is spread across the lanes so borders stay integral and the last one lands
/// exactly on `total`.
pub(crate) fn lane_borders(total: i32, span_count: usize) -> Vec<i32> {
    let span_count = span_count.max(1);
    let count = i32::try_from(span_count).unwrap_or(i32::MAX);
    let total = total.max(0);
    let size_per_span = total / count;
    let remainder = total % count;

    let mut borders = Vec::with_capacity(span_count + 1);
    borders.push(0);
    let mut consumed = 0;
    let mut additional = 0;
    for _ in 0..span_count {
        let mut size = size_per_span;
        additional += remainder;
        if additional > 0 && count - additional < remainder {
            size += 1;
            additional -= count;
        }
        consumed += size;
        borders.push(consumed);
    }
    borders
}
