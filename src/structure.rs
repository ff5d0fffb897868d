use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::axis::{Axis, FlowRect};
use crate::span::{SpanEntry, SpanGrid};
use crate::{ItemHandle, LayoutDirection, LayoutRequest, ProviderError, ViewBounds, ViewProvider};

/// An attached item and where it was laid out.
#[derive(Debug)]
pub struct LaidOutItem<H> {
    pub(crate) item: H,
    pub(crate) position: usize,
    pub(crate) span: SpanEntry,
    pub(crate) flow: FlowRect,
    pub(crate) bounds: ViewBounds,
    /// Extent of the line the item belongs to (its tallest member).
    pub(crate) line_extent: i32,
}

impl<H> LaidOutItem<H> {
    pub fn item(&self) -> &H {
        &self.item
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    pub fn span_index(&self) -> usize {
        self.span.index
    }

    pub fn span_size(&self) -> usize {
        self.span.size
    }

    pub fn span_group(&self) -> usize {
        self.span.group
    }

    /// Flow offset where the item's line ends.
    pub(crate) fn line_end(&self) -> i32 {
        self.flow.start + self.line_extent
    }
}

impl<H: ItemHandle> LaidOutItem<H> {
    pub(crate) fn place(&mut self, axis: &Axis, flow: FlowRect) {
        self.flow = flow;
        self.bounds = axis.to_bounds(flow);
        self.item.set_bounds(self.bounds);
    }

    pub(crate) fn shift(&mut self, axis: &Axis, delta: i32) {
        let flow = self.flow.offset(delta);
        self.place(axis, flow);
    }
}

/// Geometry shared by every line of a fill.
pub(crate) struct LineContext<'a> {
    pub axis: &'a Axis,
    /// Lane borders, `span_count + 1` entries starting at `0`.
    pub borders: &'a [i32],
    pub spacing: i32,
    pub item_count: usize,
}

impl LineContext<'_> {
    fn lane(&self, span: SpanEntry) -> (i32, i32) {
        let (cross_pad, _) = self.axis.cross_padding();
        let last = self.borders.len().saturating_sub(1);
        let start = self.borders[span.index.min(last)];
        let end = self.borders[(span.index + span.size).min(last)];
        (cross_pad + start, cross_pad + end)
    }
}

/// Fills lines from the request's cursor until its space is used up or the provider runs dry.
///
/// Returns the number of lines laid out.
pub(crate) fn fill<H, V>(
    ctx: &LineContext<'_>,
    spans: &mut SpanGrid,
    request: &mut LayoutRequest,
    provider: &mut V,
    children: &mut VecDeque<LaidOutItem<H>>,
) -> Result<usize, ProviderError>
where
    H: ItemHandle,
    V: ViewProvider<Item = H>,
{
    let mut lines = 0;
    while request.available_space > 0 {
        if !provider.has_next(request) {
            request.exhausted = true;
            break;
        }
        // Zero-extent lines still count as progress.
        let Some(consumed) = layout_line(ctx, spans, request, provider, children)? else {
            break;
        };
        request.available_space -= consumed;
        lines += 1;
    }
    ltrace!(
        direction = ?request.direction,
        lines,
        exhausted = request.exhausted,
        "fill"
    );
    Ok(lines)
}

/// Lays out the line holding the cursor's next position.
///
/// The cursor is moved to the line's edge in the direction of travel first, so the whole span
/// group is laid out even when the request points into its middle. Returns the consumed space
/// (line extent plus spacing), or `None` when nothing could be laid out.
pub(crate) fn layout_line<H, V>(
    ctx: &LineContext<'_>,
    spans: &mut SpanGrid,
    request: &mut LayoutRequest,
    provider: &mut V,
    children: &mut VecDeque<LaidOutItem<H>>,
) -> Result<Option<i32>, ProviderError>
where
    H: ItemHandle,
    V: ViewProvider<Item = H>,
{
    let Some(position) = provider.next_position(request) else {
        return Ok(None);
    };
    let (first, last) = spans.group_bounds(position, ctx.item_count);
    match request.direction {
        LayoutDirection::End => request.seek(first),
        LayoutDirection::Start => request.seek(last),
    }

    let mut line: Vec<(H, usize, SpanEntry, i32)> = Vec::with_capacity(last - first + 1);
    for _ in first..=last {
        if !provider.has_next(request) {
            break;
        }
        let mut provided = provider.next(request)?;
        let span = spans.entry(provided.position);
        let (lane_start, lane_end) = ctx.lane(span);
        let size = provided
            .item
            .measure(ctx.axis.measure_spec(lane_end - lane_start));
        let primary = ctx.axis.primary_size(size).max(0);
        line.push((provided.item, provided.position, span, primary));
    }
    if line.is_empty() {
        return Ok(None);
    }

    let extent = line.iter().map(|&(_, _, _, primary)| primary).max().unwrap_or(0);
    let line_start = match request.direction {
        LayoutDirection::End => request.current_offset,
        LayoutDirection::Start => request.current_offset - extent,
    };

    for (item, position, span, primary) in line {
        let (cross_start, cross_end) = ctx.lane(span);
        let mut child = LaidOutItem {
            item,
            position,
            span,
            flow: FlowRect::default(),
            bounds: ViewBounds::default(),
            line_extent: extent,
        };
        child.place(
            ctx.axis,
            FlowRect {
                start: line_start,
                end: line_start + primary,
                cross_start,
                cross_end,
            },
        );
        match request.direction {
            LayoutDirection::End => children.push_back(child),
            LayoutDirection::Start => children.push_front(child),
        }
    }

    request.current_offset = match request.direction {
        LayoutDirection::End => line_start + extent + ctx.spacing,
        LayoutDirection::Start => line_start - ctx.spacing,
    };
    Ok(Some(extent + ctx.spacing))
}

/// Lays out scrap items one per line past an edge, keeping their previous size and lanes.
///
/// Used for disappearing items; they are never attached.
pub(crate) fn fill_disappearing<H, V>(
    axis: &Axis,
    spacing: i32,
    request: &mut LayoutRequest,
    provider: &mut V,
    out: &mut Vec<(usize, H)>,
) -> Result<(), ProviderError>
where
    H: ItemHandle,
    V: ViewProvider<Item = H>,
{
    while provider.has_next(request) {
        let mut provided = provider.next(request)?;
        let previous = axis.to_flow(provided.item.bounds());
        let len = previous.len().max(0);
        let start = match request.direction {
            LayoutDirection::End => request.current_offset,
            LayoutDirection::Start => request.current_offset - len,
        };
        let flow = FlowRect {
            start,
            end: start + len,
            ..previous
        };
        provided.item.set_bounds(axis.to_bounds(flow));
        request.current_offset = match request.direction {
            LayoutDirection::End => flow.end + spacing,
            LayoutDirection::Start => flow.start - spacing,
        };
        out.push((provided.position, provided.item));
    }
    Ok(())
}
