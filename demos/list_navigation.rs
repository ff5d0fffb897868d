// Example: a vertical list that keeps the selection centered while the user presses Down.
use dpad_layout::{
    FocusDirection, ItemChange, ItemHandle, LayoutOptions, MeasureSpec, PivotLayout, RecyclerPool,
    SelectionEvent, Size, ViewBounds,
};

#[derive(Debug, Default)]
struct Row {
    bounds: ViewBounds,
}

impl ItemHandle for Row {
    fn measure(&mut self, spec: MeasureSpec) -> Size {
        Size::new(spec.width.unwrap_or(0), spec.height.unwrap_or(120))
    }

    fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: ViewBounds) {
        self.bounds = bounds;
    }
}

struct Rows {
    count: usize,
    spare: Vec<Row>,
}

impl RecyclerPool for Rows {
    type Item = Row;

    fn item_count(&self) -> usize {
        self.count
    }

    fn acquire(&mut self, _position: usize) -> Row {
        self.spare.pop().unwrap_or_default()
    }

    fn release(&mut self, item: Row) {
        self.spare.push(item);
    }
}

fn main() {
    let options = LayoutOptions::default()
        .with_item_spacing(8)
        .with_on_selection(Some(|event: SelectionEvent| println!("  {event:?}")));
    let mut layout = PivotLayout::<Row>::new(options).expect("default options are valid");
    let mut pool = Rows {
        count: 10_000,
        spare: Vec::new(),
    };
    layout.set_viewport(1280, 720);

    let report = layout.layout_pivot(0, &mut pool);
    println!("initial: pivot={:?} attached={}", report.pivot, report.attached);

    for _ in 0..3 {
        layout.navigate(FocusDirection::Down, false, &mut pool);
    }
    println!(
        "after 3 presses: selected={:?} keyline={} pivot={:?}",
        layout.selected_position(),
        layout.keyline(),
        layout.pivot_info()
    );

    layout.set_selected_position(9_999, false, &mut pool);
    println!("jumped to the end: pivot={:?}", layout.pivot_info());

    // Ten rows disappear from the top; the selection follows its item.
    pool.count -= 10;
    let removed = [ItemChange::Removed {
        position: 0,
        count: 10,
    }];
    let report = layout.layout_children(9_999, &removed, &mut pool);
    println!("after removal: pivot={:?} attached={}", report.pivot, report.attached);

    let visible: Vec<_> = layout
        .children()
        .map(|c| (c.position(), c.bounds().top))
        .collect();
    println!("visible rows: {visible:?}");
}
