use alloc::vec::Vec;

use crate::key::SpanIndexMap;
use crate::span::SpanGrid;

/// Remembers the focused column per span group.
///
/// Moving from a narrow item onto a full-span item (a header, say) and back lands on the column
/// that was focused before, instead of always falling back to the first one.
#[derive(Clone, Debug, Default)]
pub(crate) struct SpanFocusFinder {
    cache: SpanIndexMap,
    last_span_index: Option<usize>,
}

impl SpanFocusFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the focus of `position`. Full-span items never get an entry.
    pub fn update_focus(&mut self, position: usize, spans: &mut SpanGrid) {
        let entry = spans.entry(position);
        if entry.size >= spans.span_count() {
            return;
        }
        self.cache.insert(entry.group, entry.index);
        self.last_span_index = Some(entry.index);
    }

    pub fn cached_span_index(&self, group: usize) -> Option<usize> {
        self.cache.get(&group).copied()
    }

    /// Finds the position focus moves to from `focused` when stepping one line.
    ///
    /// `forward` is visual; it walks toward higher positions unless `reverse_layout` is set.
    /// Returns `None` when the next line would lie past `edge_position`.
    pub fn find_next_span_position(
        &self,
        spans: &mut SpanGrid,
        focused: usize,
        forward: bool,
        edge_position: usize,
        reverse_layout: bool,
    ) -> Option<usize> {
        let toward_end = forward != reverse_layout;
        let (first, last) = spans.group_bounds(focused, edge_position.max(focused) + 1);

        let (next_first, next_last) = if toward_end {
            let next = last.checked_add(1).filter(|&p| p <= edge_position)?;
            let (_, next_last) = spans.group_bounds(next, edge_position + 1);
            (next, next_last)
        } else {
            let prev = first.checked_sub(1).filter(|&p| p >= edge_position)?;
            let (prev_first, _) = spans.group_bounds(prev, prev + 1);
            (prev_first.max(edge_position), prev)
        };

        let focused_entry = spans.entry(focused);
        let target_group = spans.span_group(next_first);
        let target_index = if focused_entry.size < spans.span_count() {
            focused_entry.index
        } else {
            self.cached_span_index(target_group)
                .or(self.last_span_index)
                .unwrap_or(0)
        };

        let mut best = next_first;
        let mut best_distance = usize::MAX;
        for position in next_first..=next_last {
            let entry = spans.entry(position);
            let distance = if target_index < entry.index {
                entry.index - target_index
            } else if target_index >= entry.index + entry.size {
                target_index + 1 - (entry.index + entry.size)
            } else {
                0
            };
            if distance < best_distance {
                best = position;
                best_distance = distance;
            }
            if distance == 0 {
                break;
            }
        }
        ltrace!(
            focused,
            target = best,
            target_index,
            "SpanFocusFinder: next span position"
        );
        Some(best)
    }

    pub fn reset(&mut self) {
        self.cache.clear();
        self.last_span_index = None;
    }

    /// Cache entries sorted by group.
    pub fn entries(&self) -> Vec<(usize, usize)> {
        let mut entries: Vec<_> = self.cache.iter().map(|(&g, &i)| (g, i)).collect();
        entries.sort_unstable();
        entries
    }

    pub fn last_span_index(&self) -> Option<usize> {
        self.last_span_index
    }

    pub fn restore(&mut self, entries: &[(usize, usize)], last_span_index: Option<usize>) {
        self.cache.clear();
        self.cache.extend(entries.iter().copied());
        self.last_span_index = last_span_index;
    }
}
