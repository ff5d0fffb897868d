use alloc::collections::VecDeque;

use crate::axis::Axis;
use crate::structure::LaidOutItem;
use crate::{ItemHandle, RecyclerPool};

/// What one recycling pass released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecycleOutcome {
    pub released: usize,
    /// How much the retained extent shrank at the head.
    pub head_shrink: i32,
    /// How much the retained extent shrank at the tail.
    pub tail_shrink: i32,
}

/// Releases whole lines that fell entirely outside `window` (flow coordinates).
///
/// Trimming walks inward from both ends and stops at the first line that is still visible or holds
/// a focused item or `pinned`, so the attached items stay contiguous. A line's extent is only
/// removed from the retained extent once, when its edge member goes; the remaining members of the
/// same line do not change it.
pub(crate) fn recycle<P: RecyclerPool>(
    children: &mut VecDeque<LaidOutItem<P::Item>>,
    axis: &Axis,
    window: (i32, i32),
    spacing: i32,
    pinned: Option<usize>,
    pool: &mut P,
) -> RecycleOutcome {
    let (low, high) = window;
    let mut outcome = RecycleOutcome::default();

    loop {
        let Some(front) = children.front() else {
            break;
        };
        let group = front.span.group;
        let line_len = children
            .iter()
            .take_while(|c| c.span.group == group)
            .count();
        let outside = children.iter().take(line_len).all(|c| {
            let flow = axis.to_flow(c.item.bounds());
            flow.start + c.line_extent <= low && !c.item.has_focus() && Some(c.position) != pinned
        });
        // Keep at least the last line when everything scrolled away.
        if !outside || line_len == children.len() {
            break;
        }
        for index in 0..line_len {
            let Some(child) = children.pop_front() else {
                break;
            };
            if index == 0 {
                outcome.head_shrink += child.line_extent + spacing;
            }
            pool.release(child.item);
            outcome.released += 1;
        }
    }

    loop {
        let Some(back) = children.back() else {
            break;
        };
        let group = back.span.group;
        let line_len = children
            .iter()
            .rev()
            .take_while(|c| c.span.group == group)
            .count();
        let outside = children.iter().rev().take(line_len).all(|c| {
            let flow = axis.to_flow(c.item.bounds());
            flow.start >= high && !c.item.has_focus() && Some(c.position) != pinned
        });
        if !outside || line_len == children.len() {
            break;
        }
        for index in 0..line_len {
            let Some(child) = children.pop_back() else {
                break;
            };
            if index == 0 {
                outcome.tail_shrink += child.line_extent + spacing;
            }
            pool.release(child.item);
            outcome.released += 1;
        }
    }

    if outcome.released > 0 {
        ltrace!(
            released = outcome.released,
            head_shrink = outcome.head_shrink,
            tail_shrink = outcome.tail_shrink,
            "recycle"
        );
    }
    outcome
}
