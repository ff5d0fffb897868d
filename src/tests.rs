use crate::*;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// A host item with a fixed extent along the scroll axis.
#[derive(Clone, Debug, Default)]
pub(crate) struct TestItem {
    /// Position the item was acquired for.
    pub position: usize,
    pub size: i32,
    pub bounds: ViewBounds,
    pub focused: bool,
    pub subs: Vec<ChildAlignment>,
    /// `(view id, offset from the item's top, height)`.
    pub sub_views: Vec<(u32, i32, i32)>,
}

impl ItemHandle for TestItem {
    fn measure(&mut self, spec: MeasureSpec) -> Size {
        Size::new(
            spec.width.unwrap_or(self.size),
            spec.height.unwrap_or(self.size),
        )
    }

    fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: ViewBounds) {
        self.bounds = bounds;
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn sub_position_alignments(&self) -> &[ChildAlignment] {
        &self.subs
    }

    fn sub_view_bounds(&self, view_id: u32) -> Option<ViewBounds> {
        self.sub_views
            .iter()
            .find(|&&(id, _, _)| id == view_id)
            .map(|&(_, offset, height)| {
                ViewBounds::new(
                    self.bounds.left,
                    self.bounds.top + offset,
                    self.bounds.right,
                    self.bounds.top + offset + height,
                )
            })
    }
}

/// A pool over a list of item sizes that counts what it hands out and gets back.
#[derive(Debug, Default)]
pub(crate) struct TestPool {
    sizes: Vec<i32>,
    subs: Vec<(usize, Vec<ChildAlignment>)>,
    sub_views: Vec<(usize, u32, i32, i32)>,
    acquired: usize,
    released: usize,
}

impl TestPool {
    pub fn new(count: usize, size: impl Fn(usize) -> i32) -> Self {
        Self {
            sizes: (0..count).map(size).collect(),
            ..Self::default()
        }
    }

    pub fn uniform(count: usize, size: i32) -> Self {
        Self::new(count, |_| size)
    }

    pub fn acquired(&self) -> usize {
        self.acquired
    }

    pub fn released(&self) -> usize {
        self.released
    }

    /// Items handed out and not returned yet.
    pub fn live(&self) -> usize {
        self.acquired - self.released
    }

    pub fn insert(&mut self, position: usize, size: i32) {
        self.sizes.insert(position, size);
    }

    pub fn remove(&mut self, position: usize) {
        self.sizes.remove(position);
    }

    pub fn set_sub_alignments(&mut self, position: usize, subs: Vec<ChildAlignment>) {
        self.subs.push((position, subs));
    }

    pub fn add_sub_view(&mut self, position: usize, view_id: u32, offset: i32, height: i32) {
        self.sub_views.push((position, view_id, offset, height));
    }
}

impl RecyclerPool for TestPool {
    type Item = TestItem;

    fn item_count(&self) -> usize {
        self.sizes.len()
    }

    fn acquire(&mut self, position: usize) -> TestItem {
        self.acquired += 1;
        TestItem {
            position,
            size: self.sizes[position],
            bounds: ViewBounds::default(),
            focused: false,
            subs: self
                .subs
                .iter()
                .find(|(p, _)| *p == position)
                .map(|(_, subs)| subs.clone())
                .unwrap_or_default(),
            sub_views: self
                .sub_views
                .iter()
                .filter(|(p, _, _, _)| *p == position)
                .map(|&(_, id, offset, height)| (id, offset, height))
                .collect(),
        }
    }

    fn release(&mut self, _item: TestItem) {
        self.released += 1;
    }
}

type Events = Arc<Mutex<Vec<SelectionEvent>>>;

fn recorded(options: LayoutOptions) -> (LayoutOptions, Events) {
    let events: Events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let options = options.with_on_selection(Some(move |event| {
        sink.lock().unwrap().push(event);
    }));
    (options, events)
}

fn take(events: &Events) -> Vec<SelectionEvent> {
    core::mem::take(&mut *events.lock().unwrap())
}

fn engine(options: LayoutOptions) -> PivotLayout<TestItem> {
    let mut layout = PivotLayout::new(options).unwrap();
    layout.set_viewport(1920, 1080);
    layout
}

fn tops(layout: &PivotLayout<TestItem>) -> Vec<i32> {
    layout.children().map(|c| c.bounds().top).collect()
}

fn pivot_top(layout: &PivotLayout<TestItem>) -> i32 {
    let position = layout.selected_position().unwrap();
    layout.find_child(position).unwrap().bounds().top
}

/// Scrolls the way a host animation would until the selection settles.
fn settle(layout: &mut PivotLayout<TestItem>, pool: &mut TestPool) {
    for _ in 0..64 {
        match layout.alignment_delta() {
            Some(delta) if delta != 0 => {
                layout.scroll_by(delta, pool);
            }
            _ => break,
        }
    }
    layout.finish_alignment();
}

fn assert_contiguous(layout: &PivotLayout<TestItem>, pool: &TestPool) {
    let spacing = layout.options().item_spacing;
    let children: Vec<_> = layout.children.iter().collect();
    for pair in children.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert_eq!(a.position + 1, b.position, "attached positions must be contiguous");
        if a.span.group == b.span.group {
            assert_eq!(a.flow.start, b.flow.start);
            assert_eq!(a.line_extent, b.line_extent);
        } else {
            assert_eq!(a.line_end() + spacing, b.flow.start, "lines must not overlap or gap");
        }
    }
    assert_eq!(pool.live(), children.len(), "every acquired item is attached or released");
}

#[test]
fn list_pivot_is_centered_on_the_keyline() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(3, 300);
    let report = layout.layout_pivot(0, &mut pool);

    assert_eq!(tops(&layout), vec![390, 690, 990]);
    assert_eq!(
        report.pivot,
        Some(PivotInfo {
            position: 0,
            sub_position: 0,
            head_offset: 390,
            tail_offset: 690,
        })
    );
    assert_eq!(report.attached, 3);
    assert!(report.reached_start);
    assert!(report.reached_end);
    assert!(report.disappearing.is_empty());
    assert_eq!(layout.keyline(), 540);
    assert_eq!(
        layout.scroll_limits(),
        ScrollLimits {
            min: Some(0),
            max: Some(600),
        }
    );
    assert_contiguous(&layout, &pool);
}

#[test]
fn grid_lines_share_tops_and_lanes() {
    let mut layout = engine(LayoutOptions::grid(3));
    let mut pool = TestPool::uniform(9, 300);
    layout.layout_pivot(0, &mut pool);

    assert_eq!(tops(&layout), vec![390, 390, 390, 690, 690, 690, 990, 990, 990]);
    let lefts: Vec<_> = layout.children().map(|c| c.bounds().left).collect();
    assert_eq!(lefts, vec![0, 640, 1280, 0, 640, 1280, 0, 640, 1280]);
    let widths: Vec<_> = layout.children().map(|c| c.bounds().width()).collect();
    assert!(widths.iter().all(|&w| w == 640));
    assert_eq!(
        layout.children().map(|c| c.span_group()).collect::<Vec<_>>(),
        vec![0, 0, 0, 1, 1, 1, 2, 2, 2]
    );
    assert_contiguous(&layout, &pool);
}

#[test]
fn jump_navigation_keeps_the_pivot_on_the_keyline() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(100, 300);
    layout.layout_pivot(0, &mut pool);

    for expected in 1..=5 {
        assert!(layout.navigate(FocusDirection::Down, false, &mut pool));
        assert_eq!(layout.selected_position(), Some(expected));
        assert_eq!(layout.pivot_info().unwrap().head_offset, 390);
        assert!(layout.is_aligned());
        assert_contiguous(&layout, &pool);
    }

    assert!(layout.navigate(FocusDirection::Up, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(4));
    assert_eq!(pivot_top(&layout), 390);
}

#[test]
fn navigation_stops_at_both_edges() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(3, 300);
    layout.layout_pivot(0, &mut pool);

    assert!(!layout.navigate(FocusDirection::Up, false, &mut pool));
    assert!(!layout.navigate(FocusDirection::Up, true, &mut pool));
    assert_eq!(layout.pending_moves(), 0);
    assert_eq!(layout.selected_position(), Some(0));

    assert!(layout.navigate(FocusDirection::Down, false, &mut pool));
    assert!(layout.navigate(FocusDirection::Down, false, &mut pool));
    assert!(!layout.navigate(FocusDirection::Down, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(2));
    // The keyline wins over the edge by default, so the last item is centered too.
    assert_eq!(pivot_top(&layout), 390);
}

#[test]
fn edges_pin_content_when_the_keyline_does_not_win() {
    let parent = ParentAlignment::default().with_prefer_keyline_over_edge(false);
    let mut layout = engine(LayoutOptions::default().with_parent_alignment(parent));
    let mut pool = TestPool::uniform(100, 300);
    layout.layout_pivot(0, &mut pool);
    assert_eq!(pivot_top(&layout), 0);
    assert!(layout.is_aligned());

    // Item 1 would have to move up to be centered, but that would pull item 0 off the edge.
    layout.navigate(FocusDirection::Down, false, &mut pool);
    assert_eq!(pivot_top(&layout), 300);
    layout.navigate(FocusDirection::Down, false, &mut pool);
    assert_eq!(pivot_top(&layout), 390);

    layout.set_selected_position(99, false, &mut pool);
    let info = layout.pivot_info().unwrap();
    assert_eq!((info.head_offset, info.tail_offset), (780, 1080));
    assert_eq!(layout.alignment_delta(), Some(0));
    assert_contiguous(&layout, &pool);
}

#[test]
fn short_content_sticks_to_the_start_edge() {
    let parent = ParentAlignment::default().with_prefer_keyline_over_edge(false);
    let mut layout = engine(LayoutOptions::default().with_parent_alignment(parent));
    let mut pool = TestPool::uniform(3, 300);
    layout.layout_pivot(0, &mut pool);
    assert_eq!(tops(&layout), vec![0, 300, 600]);

    layout.set_selected_position(2, false, &mut pool);
    assert_eq!(tops(&layout), vec![0, 300, 600]);
    assert!(layout.is_aligned());
}

#[test]
fn selection_events_come_in_two_phases() {
    let (options, events) = recorded(LayoutOptions::default());
    let mut layout = engine(options);
    let mut pool = TestPool::uniform(50, 300);

    layout.layout_pivot(0, &mut pool);
    assert_eq!(
        take(&events),
        vec![
            SelectionEvent::Selected {
                position: 0,
                sub_position: 0
            },
            SelectionEvent::SelectedAndAligned {
                position: 0,
                sub_position: 0
            },
        ]
    );

    layout.relayout(&mut pool);
    assert!(take(&events).is_empty());

    layout.navigate(FocusDirection::Down, true, &mut pool);
    assert_eq!(
        take(&events),
        vec![SelectionEvent::Selected {
            position: 1,
            sub_position: 0
        }]
    );
    assert_eq!(layout.alignment_delta(), Some(300));
    assert!(!layout.finish_alignment());

    assert_eq!(layout.scroll_by(150, &mut pool), 150);
    assert_eq!(layout.alignment_delta(), Some(150));
    assert_eq!(layout.scroll_by(150, &mut pool), 150);
    assert!(layout.finish_alignment());
    assert!(layout.finish_alignment());
    assert_eq!(
        take(&events),
        vec![SelectionEvent::SelectedAndAligned {
            position: 1,
            sub_position: 0
        }]
    );
}

#[test]
fn smooth_presses_run_ahead_and_drain_while_scrolling() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(100, 300);
    layout.layout_pivot(0, &mut pool);

    for _ in 0..10 {
        assert!(layout.navigate(FocusDirection::Down, true, &mut pool));
    }
    // Targets within one viewport of look-ahead are selected right away.
    assert_eq!(layout.selected_position(), Some(5));
    assert_eq!(layout.pending_moves(), 5);

    settle(&mut layout, &mut pool);
    assert_eq!(layout.selected_position(), Some(10));
    assert_eq!(layout.pending_moves(), 0);
    assert_eq!(pivot_top(&layout), 390);
    assert_contiguous(&layout, &pool);
}

#[test]
fn pending_moves_are_bounded() {
    let mut layout = engine(LayoutOptions::default().with_max_pending_moves(2));
    let mut pool = TestPool::uniform(100, 300);
    layout.layout_pivot(0, &mut pool);

    for _ in 0..10 {
        layout.navigate(FocusDirection::Down, true, &mut pool);
    }
    assert_eq!(layout.selected_position(), Some(5));
    assert_eq!(layout.pending_moves(), 2);

    settle(&mut layout, &mut pool);
    assert_eq!(layout.selected_position(), Some(7));
    assert!(layout.is_aligned());
}

#[test]
fn pending_moves_drop_at_the_edge() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(4, 300);
    layout.layout_pivot(0, &mut pool);

    for _ in 0..8 {
        layout.navigate(FocusDirection::Down, true, &mut pool);
    }
    assert_eq!(layout.selected_position(), Some(3));
    assert_eq!(layout.pending_moves(), 0);
    assert!(!layout.navigate(FocusDirection::Down, true, &mut pool));

    // Reversing direction cancels instead of stacking.
    layout.navigate(FocusDirection::Up, true, &mut pool);
    assert_eq!(layout.selected_position(), Some(2));
}

#[test]
fn grid_columns_stay_in_their_line() {
    let mut layout = engine(LayoutOptions::grid(3));
    let mut pool = TestPool::uniform(30, 300);
    layout.layout_pivot(0, &mut pool);

    assert!(layout.navigate(FocusDirection::Right, false, &mut pool));
    assert!(layout.navigate(FocusDirection::Right, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(2));
    assert!(!layout.navigate(FocusDirection::Right, false, &mut pool));

    assert!(layout.navigate(FocusDirection::Down, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(5));
    assert!(layout.navigate(FocusDirection::Down, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(8));
    assert!(layout.navigate(FocusDirection::Left, false, &mut pool));
    assert!(layout.navigate(FocusDirection::Up, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(4));
    assert_eq!(pivot_top(&layout), 390);
}

#[test]
fn full_span_headers_remember_the_column() {
    let options = LayoutOptions::grid(3).with_span_size_lookup(Some(|i: usize| {
        if i % 4 == 0 { 3 } else { 1 }
    }));
    let mut layout = engine(options);
    let mut pool = TestPool::uniform(20, 300);
    layout.layout_pivot(0, &mut pool);

    layout.set_selected_position(3, false, &mut pool);
    assert!(layout.navigate(FocusDirection::Down, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(4));
    assert_eq!(layout.find_child(4).unwrap().bounds().width(), 1920);

    assert!(layout.navigate(FocusDirection::Down, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(7));

    assert!(layout.navigate(FocusDirection::Up, false, &mut pool));
    assert!(layout.navigate(FocusDirection::Up, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(3));
}

#[test]
fn right_to_left_grids_mirror_the_lanes() {
    let mut layout = engine(LayoutOptions::grid(3).with_right_to_left(true));
    let mut pool = TestPool::uniform(9, 300);
    layout.layout_pivot(0, &mut pool);

    let lefts: Vec<_> = layout.children().take(3).map(|c| c.bounds().left).collect();
    assert_eq!(lefts, vec![1280, 640, 0]);
    assert_eq!(tops(&layout)[..3], [390, 390, 390]);

    assert!(layout.navigate(FocusDirection::Left, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(1));
    assert!(layout.navigate(FocusDirection::Right, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(0));
    assert!(!layout.navigate(FocusDirection::Right, false, &mut pool));
}

#[test]
fn reversed_lists_grow_upward() {
    let mut layout = engine(LayoutOptions::default().with_reverse_layout(true));
    let mut pool = TestPool::uniform(100, 200);
    layout.layout_pivot(0, &mut pool);

    let item0 = layout.find_child(0).unwrap().bounds();
    let item1 = layout.find_child(1).unwrap().bounds();
    assert_eq!((item0.top, item0.bottom), (440, 640));
    assert_eq!((item1.top, item1.bottom), (240, 440));

    assert!(layout.navigate(FocusDirection::Up, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(1));
    assert_eq!(pivot_top(&layout), 440);
    assert!(layout.navigate(FocusDirection::Down, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(0));
}

#[test]
fn right_to_left_rows_run_leftward() {
    let mut layout = engine(
        LayoutOptions::new(Orientation::Horizontal).with_right_to_left(true),
    );
    let mut pool = TestPool::uniform(20, 300);
    layout.layout_pivot(0, &mut pool);

    assert_eq!(layout.find_child(0).unwrap().bounds().left, 810);
    assert_eq!(layout.find_child(1).unwrap().bounds().left, 510);
    assert_eq!(layout.find_child(0).unwrap().bounds().height(), 1080);

    assert!(layout.navigate(FocusDirection::Left, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(1));
    assert_eq!(layout.find_child(1).unwrap().bounds().left, 810);
    assert!(layout.navigate(FocusDirection::Forward, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(2));
}

#[test]
fn sub_positions_are_walked_before_items() {
    let (options, events) = recorded(LayoutOptions::default());
    let mut layout = engine(options);
    let mut pool = TestPool::uniform(10, 300);
    pool.set_sub_alignments(
        1,
        vec![
            ChildAlignment::new(0, 0.0).unwrap(),
            ChildAlignment::new(0, 1.0).unwrap(),
        ],
    );
    layout.layout_pivot(0, &mut pool);
    take(&events);

    layout.navigate(FocusDirection::Down, false, &mut pool);
    assert_eq!(layout.selected_position(), Some(1));
    assert_eq!(layout.selected_sub_position(), 0);
    assert_eq!(pivot_top(&layout), 540);

    layout.navigate(FocusDirection::Down, false, &mut pool);
    assert_eq!(layout.selected_position(), Some(1));
    assert_eq!(layout.selected_sub_position(), 1);
    assert_eq!(pivot_top(&layout), 240);
    assert!(take(&events).contains(&SelectionEvent::SelectedAndAligned {
        position: 1,
        sub_position: 1
    }));

    layout.navigate(FocusDirection::Down, false, &mut pool);
    assert_eq!(layout.selected_position(), Some(2));
    assert_eq!(layout.selected_sub_position(), 0);
    assert_eq!(pivot_top(&layout), 390);

    layout.set_selected_sub_position(1, 1, false, &mut pool);
    assert_eq!(pivot_top(&layout), 240);
}

#[test]
fn alignment_views_anchor_on_the_sub_view() {
    let child = ChildAlignment::new(0, 0.0).unwrap().with_alignment_view(Some(7));
    let mut layout = engine(LayoutOptions::default().with_child_alignment(child));
    let mut pool = TestPool::uniform(10, 300);
    pool.add_sub_view(3, 7, 100, 50);

    layout.set_selected_position(3, false, &mut pool);
    // The sub-view's top sits on the keyline.
    assert_eq!(pivot_top(&layout), 440);
    // Items without the sub-view fall back to their own bounds.
    layout.navigate(FocusDirection::Down, false, &mut pool);
    assert_eq!(pivot_top(&layout), 540);
}

#[test]
fn insertions_before_the_pivot_follow_it() {
    let (options, events) = recorded(LayoutOptions::default());
    let mut layout = engine(options);
    let mut pool = TestPool::uniform(10, 300);
    layout.set_selected_position(3, false, &mut pool);
    take(&events);

    pool.insert(0, 300);
    pool.insert(0, 300);
    let change = ItemChange::Inserted {
        position: 0,
        count: 2,
    };
    let report = layout.layout_children(3, &[change], &mut pool);
    assert_eq!(report.pivot.map(|p| p.position), Some(5));
    assert_eq!(report.pivot.map(|p| p.head_offset), Some(390));
    assert_eq!(
        take(&events),
        vec![
            SelectionEvent::Selected {
                position: 5,
                sub_position: 0
            },
            SelectionEvent::SelectedAndAligned {
                position: 5,
                sub_position: 0
            },
        ]
    );
    assert_contiguous(&layout, &pool);
}

#[test]
fn removing_the_pivot_selects_its_successor() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(10, 300);
    layout.set_selected_position(3, false, &mut pool);

    pool.remove(3);
    layout.layout_children(3, &[ItemChange::Removed { position: 3, count: 1 }], &mut pool);
    assert_eq!(layout.selected_position(), Some(3));
    assert_eq!(layout.item_count(), 9);
    assert_eq!(pivot_top(&layout), 390);
    assert_contiguous(&layout, &pool);

    // Removing everything past the pivot clamps it.
    for _ in 0..6 {
        pool.remove(3);
    }
    layout.layout_children(3, &[ItemChange::Removed { position: 3, count: 6 }], &mut pool);
    assert_eq!(layout.selected_position(), Some(2));
    assert_contiguous(&layout, &pool);
}

#[test]
fn changed_items_are_acquired_again() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(10, 300);
    layout.layout_pivot(0, &mut pool);
    let acquired = pool.acquired();

    layout.layout_children(0, &[ItemChange::Changed { position: 1, count: 1 }], &mut pool);
    assert_eq!(pool.acquired(), acquired + 1);
    assert_contiguous(&layout, &pool);

    // The moved pivot is re-used; 3 and 4 come into view below it.
    layout.layout_children(0, &[ItemChange::Moved { from: 0, to: 2 }], &mut pool);
    assert_eq!(layout.selected_position(), Some(2));
    assert_eq!(pool.acquired(), acquired + 3);
    assert_contiguous(&layout, &pool);
}

#[test]
fn removed_items_are_laid_out_past_the_tail() {
    let mut layout = engine(LayoutOptions::default().with_layout_disappearing_items(true));
    let mut pool = TestPool::uniform(10, 300);
    layout.layout_pivot(0, &mut pool);

    pool.remove(1);
    let change = ItemChange::Removed {
        position: 1,
        count: 1,
    };
    let report = layout.layout_children(0, &[change], &mut pool);
    assert_eq!(
        report.disappearing,
        vec![DisappearingItem {
            position: 1,
            bounds: ViewBounds::new(0, 1290, 1920, 1590),
        }]
    );
    assert_eq!(tops(&layout), vec![390, 690, 990]);
    assert_eq!(pool.acquired(), 4);
    assert_contiguous(&layout, &pool);
}

#[test]
fn disappearing_items_are_off_by_default() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(10, 300);
    layout.layout_pivot(0, &mut pool);
    pool.remove(1);
    let change = ItemChange::Removed {
        position: 1,
        count: 1,
    };
    let report = layout.layout_children(0, &[change], &mut pool);
    assert!(report.disappearing.is_empty());
    assert_contiguous(&layout, &pool);
}

#[test]
fn empty_data_sets_have_no_pivot() {
    let (options, events) = recorded(LayoutOptions::default());
    let mut layout = engine(options);
    let mut pool = TestPool::uniform(0, 300);

    let report = layout.layout_pivot(0, &mut pool);
    assert_eq!(report.pivot, None);
    assert_eq!(report.attached, 0);
    assert_eq!(layout.selected_position(), None);
    assert!(!layout.navigate(FocusDirection::Down, false, &mut pool));
    assert_eq!(layout.scroll_by(100, &mut pool), 0);
    assert!(take(&events).is_empty());

    pool.insert(0, 300);
    layout.layout_pivot(0, &mut pool);
    assert_eq!(layout.selected_position(), Some(0));
    assert_eq!(take(&events).len(), 2);
}

#[test]
fn scrolling_is_clamped_to_the_data_set() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(100, 300);
    layout.layout_pivot(0, &mut pool);

    assert_eq!(layout.scroll_by(-100, &mut pool), 0);
    assert_eq!(layout.scroll_by(1000, &mut pool), 1000);
    // Scrolling away from the pivot lets it go like any other item.
    assert_eq!(layout.pivot_info(), None);
    assert_eq!(layout.alignment_delta(), None);
    assert!(!layout.is_aligned());
    assert_eq!(layout.children().next().map(|c| c.position()), Some(2));
    assert_contiguous(&layout, &pool);

    layout.relayout(&mut pool);
    assert_eq!(pivot_top(&layout), 390);
    for child in layout.children() {
        assert!(child.flow.start < 1080 && child.line_end() > 0);
    }

    let mut short = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(3, 300);
    short.layout_pivot(0, &mut pool);
    assert_eq!(short.scroll_by(1000, &mut pool), 600);
    assert_eq!(short.scroll_by(1, &mut pool), 0);
}

#[test]
fn reach_callbacks_run_once_aligned() {
    let reached = Arc::new(AtomicUsize::new(0));
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(100, 300);
    layout.layout_pivot(0, &mut pool);

    let sink = Arc::clone(&reached);
    layout.set_selected_position_with_callback(5, false, &mut pool, move |p| {
        sink.store(p + 1, Ordering::SeqCst);
    });
    assert_eq!(reached.load(Ordering::SeqCst), 6);

    let sink = Arc::clone(&reached);
    layout.set_selected_position_with_callback(6, true, &mut pool, move |p| {
        sink.store(p + 1, Ordering::SeqCst);
    });
    assert_eq!(reached.load(Ordering::SeqCst), 6);
    settle(&mut layout, &mut pool);
    assert_eq!(reached.load(Ordering::SeqCst), 7);

    // A newer selection drops the pending callback.
    let sink = Arc::clone(&reached);
    layout.set_selected_position_with_callback(7, true, &mut pool, move |p| {
        sink.store(p + 1, Ordering::SeqCst);
    });
    layout.set_selected_position(9, false, &mut pool);
    assert_eq!(reached.load(Ordering::SeqCst), 7);
    assert_eq!(layout.selected_position(), Some(9));
}

#[test]
fn saved_state_restores_selection_and_span_focus() {
    let mut layout = engine(LayoutOptions::grid(3));
    let mut pool = TestPool::uniform(30, 300);
    layout.layout_pivot(0, &mut pool);
    layout.set_selected_position(7, false, &mut pool);

    let saved = layout.save_state();
    assert_eq!(saved.selected_position, 7);
    assert_eq!(saved.sub_position, 0);
    assert!(saved.span_focus.contains(&(2, 1)));
    assert_eq!(saved.last_span_index, Some(1));

    let (options, events) = recorded(LayoutOptions::grid(3));
    let mut restored = engine(options);
    let mut pool = TestPool::uniform(30, 300);
    restored.restore_state(&saved);
    restored.relayout(&mut pool);
    assert_eq!(restored.selected_position(), Some(7));
    assert_eq!(pivot_top(&restored), 390);
    assert_eq!(restored.save_state(), saved);
    assert_eq!(
        take(&events).first(),
        Some(&SelectionEvent::Selected {
            position: 7,
            sub_position: 0
        })
    );
}

#[test]
fn invalid_configuration_is_rejected() {
    assert_eq!(
        PivotLayout::<TestItem>::new(LayoutOptions::grid(0)).err(),
        Some(ConfigError::InvalidSpanCount)
    );
    assert_eq!(
        ParentAlignment::new(Edge::None, 0, 1.5).err(),
        Some(ConfigError::InvalidRatio(1.5))
    );
    assert!(ChildAlignment::new(0, -0.1).is_err());

    let mut layout = engine(LayoutOptions::default());
    assert_eq!(layout.set_span_count(0), Err(ConfigError::InvalidSpanCount));
    let mut bad = ParentAlignment::default();
    bad.offset_ratio = 2.0;
    assert!(layout.set_parent_alignment(bad).is_err());
    assert_eq!(layout.options().parent_alignment, ParentAlignment::default());

    // Cosmetic values are clamped instead.
    let layout = engine(
        LayoutOptions::default()
            .with_item_spacing(-4)
            .with_max_pending_moves(0),
    );
    assert_eq!(layout.options().item_spacing, 0);
    assert_eq!(layout.options().max_pending_moves, 1);
}

#[test]
fn span_count_changes_relayout_the_grid() {
    let mut layout = engine(LayoutOptions::grid(3));
    let mut pool = TestPool::uniform(30, 300);
    layout.layout_pivot(0, &mut pool);
    layout.set_selected_position(4, false, &mut pool);

    layout.set_span_count(2).unwrap();
    layout.relayout(&mut pool);
    assert_eq!(layout.selected_position(), Some(4));
    let pivot = layout.find_child(4).unwrap();
    assert_eq!(pivot.span_index(), 0);
    assert_eq!(pivot.bounds().width(), 960);
    assert_eq!(pivot_top(&layout), 390);
    assert_contiguous(&layout, &pool);
}

#[test]
fn viewport_changes_take_effect_on_the_next_scroll() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(100, 300);
    layout.layout_pivot(0, &mut pool);
    layout.set_viewport(1920, 600);
    assert_eq!(layout.scroll_by(0, &mut pool), 0);
    assert_eq!(layout.keyline(), 300);
    assert_eq!(pivot_top(&layout), 150);
}

#[test]
fn clear_releases_everything() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(100, 300);
    layout.set_selected_position(40, false, &mut pool);
    layout.clear(&mut pool);
    assert_eq!(layout.children().len(), 0);
    assert_eq!(pool.live(), 0);
    assert_eq!(layout.selected_position(), None);
}

#[test]
fn randomized_navigation_keeps_the_layout_consistent() {
    let mut rng = Lcg::new(0x5eed);
    let options = LayoutOptions::grid(4)
        .with_item_spacing(8)
        .with_padding(Padding::new(24, 16, 24, 16))
        .with_span_size_lookup(Some(|i: usize| {
            if i % 7 == 0 {
                4
            } else if i % 5 == 0 {
                2
            } else {
                1
            }
        }));
    let mut layout = engine(options);
    let mut pool = TestPool::new(300, |i| 100 + (i as i32 * 37) % 200);
    layout.layout_pivot(0, &mut pool);

    let directions = [
        FocusDirection::Up,
        FocusDirection::Down,
        FocusDirection::Down,
        FocusDirection::Left,
        FocusDirection::Right,
    ];
    for _ in 0..400 {
        let direction = directions[rng.gen_range_usize(0, directions.len())];
        let smooth = rng.gen_bool();
        layout.navigate(direction, smooth, &mut pool);
        if smooth {
            settle(&mut layout, &mut pool);
        }
        assert!(layout.is_aligned(), "selection settles after {direction:?}");
        let selected = layout.selected_position().unwrap();
        assert!(selected < 300);
        assert!(layout.is_attached(selected));
        assert_contiguous(&layout, &pool);
    }
}

#[test]
fn relayout_keeps_only_visible_lines() {
    let mut layout = engine(LayoutOptions::grid(3).with_item_spacing(10));
    let mut pool = TestPool::new(90, |i| 120 + (i as i32 % 4) * 40);
    layout.layout_pivot(0, &mut pool);
    for _ in 0..12 {
        layout.navigate(FocusDirection::Down, true, &mut pool);
    }
    settle(&mut layout, &mut pool);
    layout.relayout(&mut pool);
    for child in layout.children() {
        assert!(child.flow.start < 1080 && child.line_end() > 0);
    }
    assert_contiguous(&layout, &pool);
}

#[test]
fn free_scrolling_releases_the_pivot_with_everything_else() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(1000, 300);
    layout.layout_pivot(0, &mut pool);

    for _ in 0..300 {
        assert_eq!(layout.scroll_by(300, &mut pool), 300);
        // 1080 / 300 rounds up to four lines, plus one straddling each edge at most.
        assert!(layout.children().len() <= 5, "attached {}", layout.children().len());
        assert_contiguous(&layout, &pool);
    }
    assert!(!layout.is_attached(0));
    assert_eq!(layout.alignment_delta(), None);

    // The next press lays out around the selection again before moving it.
    assert!(layout.navigate(FocusDirection::Down, false, &mut pool));
    assert_eq!(layout.selected_position(), Some(1));
    assert_eq!(pivot_top(&layout), 390);
    assert_contiguous(&layout, &pool);
}

#[test]
fn randomized_grid_scrolling_keeps_the_attached_set_bounded() {
    let mut rng = Lcg::new(0xfeed);
    let mut layout = engine(LayoutOptions::grid(4).with_item_spacing(8));
    let mut pool = TestPool::new(2000, |i| 100 + (i as i32 * 37) % 200);
    layout.layout_pivot(0, &mut pool);

    for _ in 0..500 {
        let delta = rng.gen_range_usize(0, 801) as i32 - 300;
        layout.scroll_by(delta, &mut pool);
        let mut lines: Vec<usize> = layout.children().map(|c| c.span_group()).collect();
        lines.dedup();
        // At most eleven 108px lines fit in 1080px; a pivot being scrolled back to may add a few.
        assert!(lines.len() <= 16, "attached {} lines", lines.len());
        assert_contiguous(&layout, &pool);
    }
}

#[test]
fn zero_extent_lines_do_not_stop_the_fill() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::new(10, |i| if i == 2 || i == 3 { 0 } else { 300 });
    layout.layout_pivot(0, &mut pool);

    let placed: Vec<_> = layout
        .children()
        .map(|c| (c.position(), c.bounds().top, c.bounds().bottom))
        .collect();
    assert_eq!(
        placed,
        vec![
            (0, 390, 690),
            (1, 690, 990),
            (2, 990, 990),
            (3, 990, 990),
            (4, 990, 1290),
        ]
    );
    assert_contiguous(&layout, &pool);

    assert_eq!(layout.scroll_by(10, &mut pool), 10);
    assert_eq!(
        layout.children().last().map(|c| (c.position(), c.bounds().top)),
        Some((4, 980))
    );
}

#[test]
fn every_edge_mode_puts_the_pivot_anchor_on_the_keyline() {
    let cases = [
        (Edge::Min, -100, 0),
        (Edge::Min, 1200, 1200),
        (Edge::Max, -100, -100),
        (Edge::Max, 1200, 1080),
        (Edge::MinMax, -100, 0),
        (Edge::MinMax, 1200, 1080),
        (Edge::None, -100, -100),
        (Edge::None, 1200, 1200),
    ];
    for (edge, offset, keyline) in cases {
        let parent = ParentAlignment::new(edge, offset, 0.0).unwrap();
        let mut layout = engine(LayoutOptions::default().with_parent_alignment(parent));
        let mut pool = TestPool::uniform(100, 300);
        layout.layout_pivot(0, &mut pool);
        assert_eq!(layout.keyline(), keyline, "{edge:?} {offset}");

        for position in [0, 50, 99, 49] {
            layout.set_selected_position(position, false, &mut pool);
            let pivot = layout.pivot_info().unwrap();
            assert_eq!(pivot.position, position);
            assert_eq!(pivot.head_offset + 150, keyline, "{edge:?} {offset} at {position}");
            assert_contiguous(&layout, &pool);
        }
    }
}

#[test]
fn the_same_pivot_always_lays_out_the_same_way() {
    fn snapshot(layout: &PivotLayout<TestItem>) -> Vec<(usize, ViewBounds)> {
        layout.children().map(|c| (c.position(), c.bounds())).collect()
    }

    let options = || {
        LayoutOptions::grid(3)
            .with_item_spacing(12)
            .with_span_size_lookup(Some(|i: usize| if i % 5 == 0 { 3 } else { 1 }))
    };
    let sizes = |i: usize| 80 + (i as i32 * 53) % 240;

    let mut fresh = engine(options());
    let mut pool = TestPool::new(200, sizes);
    fresh.layout_pivot(37, &mut pool);
    let expected = snapshot(&fresh);
    fresh.relayout(&mut pool);
    assert_eq!(snapshot(&fresh), expected);

    let mut used = engine(options());
    let mut other = TestPool::new(200, sizes);
    used.layout_pivot(120, &mut other);
    for _ in 0..6 {
        used.navigate(FocusDirection::Up, true, &mut other);
        settle(&mut used, &mut other);
    }
    used.layout_pivot(37, &mut other);
    assert_eq!(snapshot(&used), expected);
}

#[test]
fn alignment_changes_take_effect_on_the_next_scroll() {
    let mut layout = engine(LayoutOptions::default());
    let mut pool = TestPool::uniform(100, 300);
    layout.set_selected_position(50, false, &mut pool);
    assert_eq!(pivot_top(&layout), 390);

    let parent = ParentAlignment::new(Edge::None, 200, 0.0).unwrap();
    layout.set_parent_alignment(parent).unwrap();
    assert_eq!(layout.scroll_by(0, &mut pool), 0);
    assert_eq!(pivot_top(&layout), 50);

    let child = ChildAlignment::new(0, 0.0).unwrap();
    layout.set_child_alignment(child).unwrap();
    layout.navigate(FocusDirection::Down, false, &mut pool);
    assert_eq!(layout.selected_position(), Some(51));
    assert_eq!(pivot_top(&layout), 200);
}
