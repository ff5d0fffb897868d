use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::direction::resolve;
use crate::layout::PivotLayout;
use crate::structure::LaidOutItem;
use crate::{
    FocusDirection, ItemDirection, ItemHandle, LayoutDirection, RecyclerPool, SelectionEvent,
};

impl<H: ItemHandle> PivotLayout<H> {
    /// Moves the selection one step in `direction`.
    ///
    /// Sub-positions of the selected item are walked before moving to the next item. With `smooth`
    /// the move is queued as a pending movement and the selection advances as soon as the target is
    /// laid out; the host then animates the scroll (see [`PivotLayout::alignment_delta`]).
    /// Without it the target is aligned immediately.
    ///
    /// Returns `false` when nothing moved and nothing is pending, e.g. at the edge of the data set.
    pub fn navigate<P>(&mut self, direction: FocusDirection, smooth: bool, pool: &mut P) -> bool
    where
        P: RecyclerPool<Item = H>,
    {
        let detached = self.state.item_count > 0 && !self.is_attached(self.pivot_position);
        if self.needs_layout || detached || self.state.item_count != pool.item_count() {
            self.relayout(pool);
        }
        if self.state.item_count == 0 {
            return false;
        }

        let resolved = resolve(direction, self.options.orientation, self.options.right_to_left);
        ltrace!(?direction, ?resolved, smooth, "navigate");
        match resolved {
            ItemDirection::PreviousItem | ItemDirection::NextItem => {
                let position_forward = resolved.is_next() != self.options.reverse_layout;
                if !self.pending.has_pending()
                    && self.move_sub_position(position_forward, smooth, pool)
                {
                    return true;
                }
                self.move_item(position_forward, smooth, pool)
            }
            ItemDirection::PreviousColumn | ItemDirection::NextColumn => {
                self.move_column(resolved.is_next(), smooth, pool)
            }
        }
    }

    fn move_sub_position<P>(&mut self, forward: bool, smooth: bool, pool: &mut P) -> bool
    where
        P: RecyclerPool<Item = H>,
    {
        let Some(child) = self.find_child(self.pivot_position) else {
            return false;
        };
        let count = child.item.sub_position_alignments().len();
        let target = if forward {
            self.sub_position.checked_add(1).filter(|&s| s < count)
        } else {
            self.sub_position.checked_sub(1)
        };
        let Some(sub_position) = target else {
            return false;
        };
        self.settle(self.pivot_position, sub_position, smooth, pool);
        true
    }

    fn move_item<P>(&mut self, position_forward: bool, smooth: bool, pool: &mut P) -> bool
    where
        P: RecyclerPool<Item = H>,
    {
        if !smooth {
            self.pending.reset();
            let Some(target) = self.next_target(position_forward) else {
                return false;
            };
            self.settle(target, 0, false, pool);
            return true;
        }

        if position_forward {
            self.pending.increase();
        } else {
            self.pending.decrease();
        }
        self.update_extra_space();
        let direction = if position_forward {
            LayoutDirection::End
        } else {
            LayoutDirection::Start
        };
        let mut scrap = Vec::new();
        self.fill_toward(direction, 0, pool, &mut scrap);
        let moved = self.consume_pending_moves(pool) > 0;
        moved || self.pending.has_pending()
    }

    /// Moves across lanes; never leaves the selected line.
    fn move_column<P>(&mut self, next: bool, smooth: bool, pool: &mut P) -> bool
    where
        P: RecyclerPool<Item = H>,
    {
        let pivot = self.pivot_position;
        let target = if next {
            pivot.checked_add(1).filter(|&p| p < self.state.item_count)
        } else {
            pivot.checked_sub(1)
        };
        let group = self.spans.span_group(pivot);
        let Some(target) = target.filter(|&t| self.spans.span_group(t) == group) else {
            return false;
        };
        self.settle(target, 0, smooth, pool);
        true
    }

    /// The first position of the next line in the given direction, honouring the remembered span.
    fn next_target(&mut self, position_forward: bool) -> Option<usize> {
        let count = self.state.item_count;
        if count == 0 {
            return None;
        }
        let edge = if position_forward { count - 1 } else { 0 };
        self.span_focus.find_next_span_position(
            &mut self.spans,
            self.pivot_position,
            position_forward,
            edge,
            false,
        )
    }

    fn within_look_ahead(&self, child: &LaidOutItem<H>, forward: bool) -> bool {
        if forward {
            child.flow.start < self.axis.primary_extent() + self.state.extra_space_end
        } else {
            child.line_end() > -self.state.extra_space_start
        }
    }

    /// Turns pending movements into selection changes while their targets are in range.
    ///
    /// Returns how many moves were consumed. Hitting the edge of the data set drops whatever is
    /// still pending.
    pub(crate) fn consume_pending_moves<P>(&mut self, pool: &mut P) -> usize
    where
        P: RecyclerPool<Item = H>,
    {
        let mut consumed = 0;
        while self.pending.has_pending() {
            let forward = self.pending.pending_moves() > 0;
            let Some(target) = self.next_target(forward) else {
                ldebug!(pending = self.pending.pending_moves(), "pending moves hit the edge");
                self.pending.reset();
                break;
            };
            if !self.is_attached(target) {
                let direction = if forward {
                    LayoutDirection::End
                } else {
                    LayoutDirection::Start
                };
                self.fill_one_line(direction, pool);
            }
            let Some(child) = self.find_child(target) else {
                break;
            };
            if !self.within_look_ahead(child, forward) && self.alignment_delta() != Some(0) {
                break;
            }
            self.pending.consume();
            self.set_pivot(target, 0);
            consumed += 1;
        }
        if consumed > 0 {
            ltrace!(consumed, pending = self.pending.pending_moves(), "consumed pending moves");
        }
        consumed
    }

    /// Selects `position` (clamped to the data set) and aligns it.
    ///
    /// With `smooth` and an attached target only the selection changes; the host animates the
    /// scroll. Anything else lays out around the target.
    pub fn set_selected_position<P>(&mut self, position: usize, smooth: bool, pool: &mut P)
    where
        P: RecyclerPool<Item = H>,
    {
        let count = pool.item_count();
        if count == 0 {
            return;
        }
        self.settle(position.min(count - 1), 0, smooth, pool);
    }

    /// Like [`PivotLayout::set_selected_position`], then calls `on_reached` once the selection is
    /// aligned. A later selection change drops the callback without calling it.
    pub fn set_selected_position_with_callback<P, F>(
        &mut self,
        position: usize,
        smooth: bool,
        pool: &mut P,
        on_reached: F,
    ) where
        P: RecyclerPool<Item = H>,
        F: FnOnce(usize) + Send + 'static,
    {
        let count = pool.item_count();
        if count == 0 {
            return;
        }
        self.settle(position.min(count - 1), 0, smooth, pool);
        self.on_reached = Some(Box::new(on_reached));
        self.finish_alignment();
    }

    /// Selects a sub-position of `position`. Sub-positions without a configured alignment use the
    /// item's default child alignment.
    pub fn set_selected_sub_position<P>(
        &mut self,
        position: usize,
        sub_position: usize,
        smooth: bool,
        pool: &mut P,
    ) where
        P: RecyclerPool<Item = H>,
    {
        let count = pool.item_count();
        if count == 0 {
            return;
        }
        self.settle(position.min(count - 1), sub_position, smooth, pool);
    }

    fn settle<P>(&mut self, position: usize, sub_position: usize, smooth: bool, pool: &mut P)
    where
        P: RecyclerPool<Item = H>,
    {
        self.pending.reset();
        let attached = !self.needs_layout
            && self.state.item_count == pool.item_count()
            && self.is_attached(position);
        self.set_pivot(position, sub_position);
        if !attached {
            self.layout_children(position, &[], pool);
        } else if smooth {
            self.update_extra_space();
            self.finish_alignment();
        } else {
            if let Some(delta) = self.alignment_delta() {
                if delta != 0 {
                    self.scroll_by(delta, pool);
                }
            }
            self.finish_alignment();
        }
    }

    /// Whether the selection sits where it should and no movement is pending.
    pub fn is_aligned(&self) -> bool {
        !self.pending.has_pending() && self.alignment_delta() == Some(0)
    }

    /// Reports `SelectedAndAligned` (once per selection) and runs the reach callback when the
    /// selection has settled. Hosts animating the scroll call this when the animation ends.
    pub fn finish_alignment(&mut self) -> bool {
        if !self.is_aligned() {
            return false;
        }
        let key = (self.pivot_position, self.sub_position);
        if self.aligned != Some(key) {
            self.aligned = Some(key);
            ldebug!(position = key.0, sub_position = key.1, "selected and aligned");
            self.emit(SelectionEvent::SelectedAndAligned {
                position: key.0,
                sub_position: key.1,
            });
        }
        if let Some(on_reached) = self.on_reached.take() {
            on_reached(self.pivot_position);
        }
        true
    }
}
