use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::alignment::{compute_child_offset, compute_keyline};
use crate::axis::Axis;
use crate::pending::PendingScrollMovements;
use crate::provider::{PoolProvider, ScrapItem, ScrapProvider};
use crate::recycler::{self, RecycleOutcome};
use crate::span::{SpanGrid, lane_borders};
use crate::span_focus::SpanFocusFinder;
use crate::structure::{self, LaidOutItem, LineContext};
use crate::types::Remapped;
use crate::{
    ChildAlignment, ConfigError, DisappearingItem, ItemChange, ItemHandle, LayoutDirection,
    LayoutOptions, LayoutReport, LayoutRequest, LayoutState, Orientation, Padding,
    ParentAlignment, PivotInfo, ProviderError, RecyclerPool, SelectionCallback, SelectionEvent,
    Size, SpanSizeLookup,
};

/// Called once with the selected position when a selection finished aligning.
pub(crate) type OnReached = Box<dyn FnOnce(usize) + Send>;

/// Scroll deltas the attached items allow, relative to the current offset.
///
/// A limit is `None` while the matching edge of the data set is not laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollLimits {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl ScrollLimits {
    /// Clamps a scroll request. The result never passes a limit and never points backward.
    pub fn clamp_scroll(&self, delta: i32) -> i32 {
        if delta > 0 {
            self.max.map_or(delta, |max| delta.min(max).max(0))
        } else if delta < 0 {
            self.min.map_or(delta, |min| delta.max(min).min(0))
        } else {
            0
        }
    }

    /// Clamps `value` into the limits; the head limit wins if they cross.
    pub(crate) fn clamp_into(&self, value: i32) -> i32 {
        let mut value = value;
        if let Some(max) = self.max {
            value = value.min(max);
        }
        if let Some(min) = self.min {
            value = value.max(min);
        }
        value
    }
}

fn to_isize(position: usize) -> isize {
    isize::try_from(position).unwrap_or(isize::MAX)
}

fn fill_result(result: Result<usize, ProviderError>) -> usize {
    result.unwrap_or_else(|_err| {
        lwarn!(error = %_err, "fill aborted");
        0
    })
}

/// A pivot-centric layout engine for lists and grids.
///
/// The engine keeps one selected item (the pivot) aligned to a keyline, lays out the items around
/// it and recycles those that leave the viewport. It does not own any items: every call that may
/// attach or release items takes the host's [`RecyclerPool`].
pub struct PivotLayout<H> {
    pub(crate) options: LayoutOptions,
    pub(crate) viewport: Size,
    pub(crate) axis: Axis,
    pub(crate) borders: Vec<i32>,
    pub(crate) spans: SpanGrid,
    pub(crate) children: VecDeque<LaidOutItem<H>>,
    pub(crate) pivot_position: usize,
    pub(crate) sub_position: usize,
    pub(crate) state: LayoutState,
    pub(crate) pending: PendingScrollMovements,
    pub(crate) span_focus: SpanFocusFinder,
    /// Last (position, sub-position) reported as selected.
    pub(crate) selected: Option<(usize, usize)>,
    /// Last (position, sub-position) reported as selected and aligned.
    pub(crate) aligned: Option<(usize, usize)>,
    pub(crate) on_reached: Option<OnReached>,
    /// Geometry changed since the last pass.
    pub(crate) needs_layout: bool,
}

impl<H> core::fmt::Debug for PivotLayout<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PivotLayout")
            .field("options", &self.options)
            .field("viewport", &self.viewport)
            .field("pivot_position", &self.pivot_position)
            .field("sub_position", &self.sub_position)
            .field("attached", &self.children.len())
            .field("state", &self.state)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<H: ItemHandle> PivotLayout<H> {
    pub fn new(options: LayoutOptions) -> Result<Self, ConfigError> {
        if options.span_count == 0 {
            return Err(ConfigError::InvalidSpanCount);
        }
        options.parent_alignment.validate()?;
        options.child_alignment.validate()?;

        let options = options.sanitized();
        let viewport = Size::default();
        let axis = Self::axis_for(&options, viewport);
        let borders = lane_borders(axis.cross_space(), options.span_count);
        Ok(Self {
            spans: SpanGrid::new(options.span_count, options.span_size_lookup.clone()),
            pending: PendingScrollMovements::new(options.max_pending_moves),
            options,
            viewport,
            axis,
            borders,
            children: VecDeque::new(),
            pivot_position: 0,
            sub_position: 0,
            state: LayoutState::default(),
            span_focus: SpanFocusFinder::new(),
            selected: None,
            aligned: None,
            on_reached: None,
            needs_layout: true,
        })
    }

    fn axis_for(options: &LayoutOptions, viewport: Size) -> Axis {
        Axis::new(
            options.orientation,
            options.reverse_layout,
            options.right_to_left,
            viewport.width,
            viewport.height,
            options.padding,
        )
    }

    fn rebuild_geometry(&mut self) {
        self.axis = Self::axis_for(&self.options, self.viewport);
        self.borders = lane_borders(self.axis.cross_space(), self.spans.span_count());
        self.needs_layout = true;
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resizes the viewport. Takes effect on the next layout pass.
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        let viewport = Size::new(width.max(0), height.max(0));
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.rebuild_geometry();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.options.orientation != orientation {
            self.options.orientation = orientation;
            self.rebuild_geometry();
        }
    }

    pub fn set_reverse_layout(&mut self, reverse_layout: bool) {
        if self.options.reverse_layout != reverse_layout {
            self.options.reverse_layout = reverse_layout;
            self.rebuild_geometry();
        }
    }

    pub fn set_right_to_left(&mut self, right_to_left: bool) {
        if self.options.right_to_left != right_to_left {
            self.options.right_to_left = right_to_left;
            self.rebuild_geometry();
        }
    }

    pub fn set_padding(&mut self, padding: Padding) {
        if self.options.padding != padding {
            self.options.padding = padding;
            self.rebuild_geometry();
        }
    }

    pub fn set_item_spacing(&mut self, item_spacing: i32) {
        self.options.item_spacing = item_spacing.max(0);
        self.needs_layout = true;
    }

    pub fn set_extra_layout_space(&mut self, start: i32, end: i32) {
        self.options.extra_layout_space_start = start.max(0);
        self.options.extra_layout_space_end = end.max(0);
    }

    /// Changes the keyline. Takes effect on the next layout pass.
    pub fn set_parent_alignment(&mut self, alignment: ParentAlignment) -> Result<(), ConfigError> {
        alignment.validate()?;
        self.options.parent_alignment = alignment;
        self.needs_layout = true;
        Ok(())
    }

    pub fn set_child_alignment(&mut self, alignment: ChildAlignment) -> Result<(), ConfigError> {
        alignment.validate()?;
        self.options.child_alignment = alignment;
        self.needs_layout = true;
        Ok(())
    }

    /// Changes the number of lanes. Forgets every remembered span focus.
    pub fn set_span_count(&mut self, span_count: usize) -> Result<(), ConfigError> {
        if span_count == 0 {
            return Err(ConfigError::InvalidSpanCount);
        }
        if span_count != self.options.span_count {
            self.options.span_count = span_count;
            self.spans.set_span_count(span_count);
            self.span_focus.reset();
            self.rebuild_geometry();
        }
        Ok(())
    }

    pub fn set_span_size_lookup(&mut self, lookup: Option<SpanSizeLookup>) {
        self.options.span_size_lookup = lookup.clone();
        self.spans.set_lookup(lookup);
        self.needs_layout = true;
    }

    /// Values below `1` are treated as `1`.
    pub fn set_max_pending_moves(&mut self, max_pending_moves: i32) {
        self.options.max_pending_moves = max_pending_moves.max(1);
        self.pending.set_max_pending_moves(max_pending_moves);
    }

    pub fn set_layout_disappearing_items(&mut self, enabled: bool) {
        self.options.layout_disappearing_items = enabled;
    }

    pub fn set_on_selection(&mut self, on_selection: Option<SelectionCallback>) {
        self.options.on_selection = on_selection;
    }

    /// The selected position, or `None` before the first pass and for empty data sets.
    pub fn selected_position(&self) -> Option<usize> {
        (self.state.item_count > 0).then_some(self.pivot_position)
    }

    pub fn selected_sub_position(&self) -> usize {
        self.sub_position
    }

    /// The pivot and its extent, or `None` when it is not attached.
    pub fn pivot_info(&self) -> Option<PivotInfo> {
        let child = self.find_child(self.pivot_position)?;
        Some(PivotInfo {
            position: self.pivot_position,
            sub_position: self.sub_position,
            head_offset: child.flow.start,
            tail_offset: child.flow.end,
        })
    }

    pub fn item_count(&self) -> usize {
        self.state.item_count
    }

    pub fn layout_state(&self) -> LayoutState {
        self.state
    }

    pub fn pending_moves(&self) -> i32 {
        self.pending.pending_moves()
    }

    /// Attached items in position order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &LaidOutItem<H>> {
        self.children.iter()
    }

    pub fn find_child(&self, position: usize) -> Option<&LaidOutItem<H>> {
        let first = self.children.front()?.position;
        let index = position.checked_sub(first)?;
        self.children.get(index).filter(|c| c.position == position)
    }

    pub fn is_attached(&self, position: usize) -> bool {
        self.find_child(position).is_some()
    }

    /// Keyline, measured from the head edge of the viewport along the scroll axis.
    pub fn keyline(&self) -> i32 {
        let (start_pad, end_pad) = self.axis.primary_padding();
        compute_keyline(
            self.axis.primary_extent(),
            start_pad,
            end_pad,
            &self.options.parent_alignment,
        )
    }

    fn sub_position_of(&self, child: &LaidOutItem<H>) -> usize {
        if child.position == self.pivot_position {
            self.sub_position
        } else {
            0
        }
    }

    /// Flow offset of the point inside `child` that should sit on the keyline.
    pub(crate) fn anchor_of(&self, child: &LaidOutItem<H>, sub_position: usize) -> i32 {
        let alignment = child
            .item
            .sub_position_alignments()
            .get(sub_position)
            .copied()
            .unwrap_or(self.options.child_alignment);
        if let Some(bounds) = alignment
            .alignment_view_id
            .and_then(|id| child.item.sub_view_bounds(id))
        {
            let flow = self.axis.to_flow(bounds);
            return flow.start + compute_child_offset(flow.len(), &alignment);
        }
        child.flow.start + compute_child_offset(child.flow.len(), &alignment)
    }

    /// Scroll needed to put the pivot's anchor on the keyline, ignoring limits.
    fn raw_alignment_delta(&self) -> Option<i32> {
        let child = self.find_child(self.pivot_position)?;
        Some(self.anchor_of(child, self.sub_position) - self.keyline())
    }

    /// Remaining scroll needed to align the pivot, capped by the data-set edges.
    ///
    /// Always derived from the current state. `None` when the pivot is not attached.
    pub fn alignment_delta(&self) -> Option<i32> {
        let raw = self.raw_alignment_delta()?;
        Some(self.scroll_limits().clamp_scroll(raw))
    }

    pub fn scroll_limits(&self) -> ScrollLimits {
        let (Some(first), Some(last)) = (self.children.front(), self.children.back()) else {
            return ScrollLimits::default();
        };
        let keyline = self.keyline();
        let (start_pad, end_pad) = self.axis.primary_padding();
        let parent = &self.options.parent_alignment;
        let pin_min = parent.edge.clamps_min() && !parent.prefer_keyline_over_edge;
        let pin_max = parent.edge.clamps_max() && !parent.prefer_keyline_over_edge;

        let mut min = (first.position == 0).then(|| {
            if pin_min {
                first.flow.start - start_pad
            } else {
                self.anchor_of(first, self.sub_position_of(first)) - keyline
            }
        });
        let mut max = (last.position + 1 == self.state.item_count).then(|| {
            if pin_max {
                last.line_end() - (self.axis.primary_extent() - end_pad)
            } else {
                self.anchor_of(last, self.sub_position_of(last)) - keyline
            }
        });

        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                if pin_max && !pin_min {
                    min = Some(hi);
                } else {
                    max = Some(lo);
                }
            }
        }
        ScrollLimits { min, max }
    }

    /// Lays out around `position` with no data-set change.
    pub fn layout_pivot<P>(&mut self, position: usize, pool: &mut P) -> LayoutReport
    where
        P: RecyclerPool<Item = H>,
    {
        self.layout_children(position, &[], pool)
    }

    /// Lays out again around the current selection, realigning it.
    pub fn relayout<P>(&mut self, pool: &mut P) -> LayoutReport
    where
        P: RecyclerPool<Item = H>,
    {
        self.layout_children(self.pivot_position, &[], pool)
    }

    /// Runs one layout pass.
    ///
    /// `pivot` and the attached items are expressed in positions from before `changes`; both are
    /// mapped through the changes first. Attached items are detached into a scrap list and re-used
    /// for their (new) positions, changed items are released and acquired again.
    pub fn layout_children<P>(
        &mut self,
        pivot: usize,
        changes: &[ItemChange],
        pool: &mut P,
    ) -> LayoutReport
    where
        P: RecyclerPool<Item = H>,
    {
        let item_count = pool.item_count();
        self.state.item_count = item_count;
        self.needs_layout = false;

        let mut scrap: Vec<ScrapItem<H>> = Vec::with_capacity(self.children.len());
        for child in self.children.drain(..) {
            let mut position = child.position;
            let mut removed = false;
            let mut changed = false;
            for change in changes {
                position = match change.remap(position) {
                    Remapped::Kept(p) => p,
                    Remapped::Changed(p) => {
                        changed = true;
                        p
                    }
                    Remapped::Removed(p) => {
                        removed = true;
                        p
                    }
                };
            }
            if (changed && !removed) || (!removed && position >= item_count) {
                pool.release(child.item);
                continue;
            }
            scrap.push(ScrapItem {
                position,
                item: child.item,
                removed,
            });
        }

        let mut pivot = pivot;
        for change in changes {
            pivot = match change.remap(pivot) {
                Remapped::Kept(p) | Remapped::Changed(p) | Remapped::Removed(p) => p,
            };
        }
        if !changes.is_empty() {
            self.spans.invalidate();
            self.pending.reset();
        }

        if item_count == 0 {
            for s in scrap {
                pool.release(s.item);
            }
            self.pivot_position = 0;
            self.sub_position = 0;
            self.selected = None;
            self.aligned = None;
            self.on_reached = None;
            self.pending.reset();
            self.state.reached_start = true;
            self.state.reached_end = true;
            self.pending.set_edges(true, true);
            ldebug!("layout: empty data set");
            return LayoutReport {
                pivot: None,
                attached: 0,
                disappearing: Vec::new(),
                reached_start: true,
                reached_end: true,
            };
        }

        let pivot = pivot.min(item_count - 1);
        let sub_position = if pivot == self.pivot_position {
            self.sub_position
        } else {
            0
        };
        self.set_pivot(pivot, sub_position);
        self.update_extra_space();

        self.layout_pivot_line(pool, &mut scrap);
        self.fill_toward(LayoutDirection::End, 0, pool, &mut scrap);
        self.fill_toward(LayoutDirection::Start, 0, pool, &mut scrap);

        // Pull the edges of the data set back inside their limits.
        for _ in 0..4 {
            let Some(raw) = self.raw_alignment_delta() else {
                break;
            };
            let fix = self.scroll_limits().clamp_into(raw);
            if fix == 0 {
                break;
            }
            ltrace!(fix, "layout: edge correction");
            self.offset_children(-fix);
            self.fill_toward(LayoutDirection::End, 0, pool, &mut scrap);
            self.fill_toward(LayoutDirection::Start, 0, pool, &mut scrap);
        }

        let mut disappearing = Vec::new();
        if self.options.layout_disappearing_items && !changes.is_empty() && !scrap.is_empty() {
            for (position, item) in self.layout_disappearing(&mut scrap) {
                disappearing.push(DisappearingItem {
                    position,
                    bounds: item.bounds(),
                });
                pool.release(item);
            }
        }
        for s in scrap {
            pool.release(s.item);
        }

        self.recycle(true, pool);
        self.refresh_edges();

        let report = LayoutReport {
            pivot: self.pivot_info(),
            attached: self.children.len(),
            disappearing,
            reached_start: self.state.reached_start,
            reached_end: self.state.reached_end,
        };
        ldebug!(
            pivot = self.pivot_position,
            attached = report.attached,
            disappearing = report.disappearing.len(),
            "layout"
        );
        self.finish_alignment();
        report
    }

    /// Lays out the pivot's line and moves it so the pivot's anchor lands on the keyline.
    fn layout_pivot_line<P>(&mut self, pool: &mut P, scrap: &mut Vec<ScrapItem<H>>)
    where
        P: RecyclerPool<Item = H>,
    {
        let mut request =
            LayoutRequest::new(to_isize(self.pivot_position), 0, 1, LayoutDirection::End);
        let ctx = LineContext {
            axis: &self.axis,
            borders: &self.borders,
            spacing: self.options.item_spacing,
            item_count: self.state.item_count,
        };
        let mut provider = PoolProvider::new(pool, scrap);
        let placed = structure::layout_line(
            &ctx,
            &mut self.spans,
            &mut request,
            &mut provider,
            &mut self.children,
        );
        if let Err(_err) = placed {
            lwarn!(error = %_err, "layout: pivot line aborted");
        }
        if let Some(delta) = self.raw_alignment_delta() {
            self.offset_children(-delta);
        }
    }

    /// Fills from the attached edge in `direction` until the viewport, the extra layout space and
    /// `extra` are covered.
    pub(crate) fn fill_toward<P>(
        &mut self,
        direction: LayoutDirection,
        extra: i32,
        pool: &mut P,
        scrap: &mut Vec<ScrapItem<H>>,
    ) -> usize
    where
        P: RecyclerPool<Item = H>,
    {
        let spacing = self.options.item_spacing;
        let mut request = match direction {
            LayoutDirection::End => {
                let Some(last) = self.children.back() else {
                    return 0;
                };
                let offset = last.line_end() + spacing;
                let limit = self.axis.primary_extent() + self.state.extra_space_end;
                LayoutRequest::new(
                    to_isize(last.position) + 1,
                    offset,
                    limit.saturating_add(extra) - offset,
                    direction,
                )
            }
            LayoutDirection::Start => {
                let Some(first) = self.children.front() else {
                    return 0;
                };
                let offset = first.flow.start - spacing;
                LayoutRequest::new(
                    to_isize(first.position) - 1,
                    offset,
                    offset
                        .saturating_add(self.state.extra_space_start)
                        .saturating_add(extra),
                    direction,
                )
            }
        };
        let ctx = LineContext {
            axis: &self.axis,
            borders: &self.borders,
            spacing,
            item_count: self.state.item_count,
        };
        let mut provider = PoolProvider::new(pool, scrap);
        fill_result(structure::fill(
            &ctx,
            &mut self.spans,
            &mut request,
            &mut provider,
            &mut self.children,
        ))
    }

    /// Lays out exactly one more line in `direction`, wherever the edge currently is.
    pub(crate) fn fill_one_line<P>(&mut self, direction: LayoutDirection, pool: &mut P) -> usize
    where
        P: RecyclerPool<Item = H>,
    {
        let spacing = self.options.item_spacing;
        let extra = match direction {
            LayoutDirection::End => self.children.back().map(|last| {
                let limit = self.axis.primary_extent() + self.state.extra_space_end;
                (last.line_end() + spacing - limit + 1).max(0)
            }),
            LayoutDirection::Start => self.children.front().map(|first| {
                let offset = first.flow.start - spacing;
                (1 - offset - self.state.extra_space_start).max(0)
            }),
        };
        let Some(extra) = extra else {
            return 0;
        };
        let mut scrap = Vec::new();
        self.fill_toward(direction, extra, pool, &mut scrap)
    }

    fn layout_disappearing(&self, scrap: &mut Vec<ScrapItem<H>>) -> Vec<(usize, H)> {
        let mut out = Vec::new();
        let spacing = self.options.item_spacing;
        let (Some(head), Some(tail)) = (
            self.children.front().map(|c| c.flow.start),
            self.children.back().map(|c| c.line_end()),
        ) else {
            return out;
        };

        let mut provider = ScrapProvider::new(scrap);
        let mut request = LayoutRequest::new(
            to_isize(self.pivot_position) + 1,
            tail + spacing,
            i32::MAX,
            LayoutDirection::End,
        );
        let tail_result = structure::fill_disappearing(
            &self.axis,
            spacing,
            &mut request,
            &mut provider,
            &mut out,
        );
        let mut request = LayoutRequest::new(
            to_isize(self.pivot_position),
            head - spacing,
            i32::MAX,
            LayoutDirection::Start,
        );
        let head_result = structure::fill_disappearing(
            &self.axis,
            spacing,
            &mut request,
            &mut provider,
            &mut out,
        );
        if let Err(_err) = tail_result.and(head_result) {
            lwarn!(error = %_err, "layout: disappearing items aborted");
        }
        out
    }

    pub(crate) fn offset_children(&mut self, delta: i32) {
        for child in self.children.iter_mut() {
            child.shift(&self.axis, delta);
        }
    }

    pub(crate) fn update_extra_space(&mut self) {
        let look_ahead = self.axis.primary_extent();
        let pending = self.pending.pending_moves();
        self.state.extra_space_start =
            self.options.extra_layout_space_start + if pending < 0 { look_ahead } else { 0 };
        self.state.extra_space_end =
            self.options.extra_layout_space_end + if pending > 0 { look_ahead } else { 0 };
    }

    /// Releases lines outside the retained window. With `pin_pivot` the pivot's line is kept so a
    /// scroll heading back to it can still align it.
    pub(crate) fn recycle<P>(&mut self, pin_pivot: bool, pool: &mut P) -> RecycleOutcome
    where
        P: RecyclerPool<Item = H>,
    {
        let window = (
            -self.state.extra_space_start,
            self.axis.primary_extent() + self.state.extra_space_end,
        );
        let pinned = (pin_pivot && self.state.item_count > 0).then_some(self.pivot_position);
        recycler::recycle(
            &mut self.children,
            &self.axis,
            window,
            self.options.item_spacing,
            pinned,
            pool,
        )
    }

    pub(crate) fn refresh_edges(&mut self) {
        let count = self.state.item_count;
        self.state.reached_start = self.children.front().is_some_and(|c| c.position == 0);
        self.state.reached_end = self
            .children
            .back()
            .is_some_and(|c| c.position + 1 == count);
        self.pending
            .set_edges(self.state.reached_start, self.state.reached_end);
    }

    /// Scrolls the content by `delta` along the scroll axis and returns the consumed part.
    ///
    /// Positive deltas reveal higher positions. Items are filled ahead of the scroll, the delta is
    /// clamped to the data-set edges and items that left the viewport are recycled. Outstanding
    /// pending moves are consumed as their targets come into range.
    pub fn scroll_by<P>(&mut self, delta: i32, pool: &mut P) -> i32
    where
        P: RecyclerPool<Item = H>,
    {
        if self.needs_layout || self.state.item_count != pool.item_count() {
            self.relayout(pool);
        }
        if delta == 0 || self.children.is_empty() {
            return 0;
        }

        self.update_extra_space();
        let direction = if delta > 0 {
            LayoutDirection::End
        } else {
            LayoutDirection::Start
        };
        let mut scrap = Vec::new();
        self.fill_toward(direction, delta.saturating_abs(), pool, &mut scrap);

        // Only a scroll that moves the pivot toward the keyline keeps it attached off screen.
        let toward_pivot = self
            .raw_alignment_delta()
            .is_some_and(|raw| raw != 0 && (raw > 0) == (delta > 0));
        let consumed = self.scroll_limits().clamp_scroll(delta);
        if consumed != 0 {
            self.offset_children(-consumed);
        }
        self.recycle(toward_pivot, pool);
        self.refresh_edges();
        ltrace!(delta, consumed, "scroll_by");

        self.consume_pending_moves(pool);
        consumed
    }

    /// Releases every attached item and forgets the selection.
    pub fn clear<P>(&mut self, pool: &mut P)
    where
        P: RecyclerPool<Item = H>,
    {
        for child in self.children.drain(..) {
            pool.release(child.item);
        }
        self.pivot_position = 0;
        self.sub_position = 0;
        self.state = LayoutState::default();
        self.pending.reset();
        self.span_focus.reset();
        self.spans.invalidate();
        self.selected = None;
        self.aligned = None;
        self.on_reached = None;
        self.needs_layout = true;
    }

    /// Moves the selection without laying out. Reports `Selected` when it changed.
    pub(crate) fn set_pivot(&mut self, position: usize, sub_position: usize) {
        if position != self.pivot_position {
            self.on_reached = None;
        }
        self.pivot_position = position;
        self.sub_position = sub_position;
        self.span_focus.update_focus(position, &mut self.spans);
        if self.selected != Some((position, sub_position)) {
            self.selected = Some((position, sub_position));
            self.aligned = None;
            ldebug!(position, sub_position, "selected");
            self.emit(SelectionEvent::Selected {
                position,
                sub_position,
            });
        }
    }

    pub(crate) fn emit(&self, event: SelectionEvent) {
        if let Some(on_selection) = &self.options.on_selection {
            on_selection(event);
        }
    }
}
