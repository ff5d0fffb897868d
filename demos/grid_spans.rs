// Example: a 4-column grid with full-width section headers every 9 items.
use dpad_layout::{
    FocusDirection, ItemHandle, LayoutOptions, MeasureSpec, PivotLayout, RecyclerPool, Size,
    ViewBounds,
};

#[derive(Debug, Default)]
struct Tile {
    bounds: ViewBounds,
    header: bool,
}

impl ItemHandle for Tile {
    fn measure(&mut self, spec: MeasureSpec) -> Size {
        let height = if self.header { 60 } else { 200 };
        Size::new(spec.width.unwrap_or(0), spec.height.unwrap_or(height))
    }

    fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: ViewBounds) {
        self.bounds = bounds;
    }
}

struct Tiles {
    count: usize,
}

fn is_header(position: usize) -> bool {
    position % 9 == 0
}

impl RecyclerPool for Tiles {
    type Item = Tile;

    fn item_count(&self) -> usize {
        self.count
    }

    fn acquire(&mut self, position: usize) -> Tile {
        Tile {
            bounds: ViewBounds::default(),
            header: is_header(position),
        }
    }

    fn release(&mut self, _item: Tile) {}
}

fn main() {
    let options = LayoutOptions::grid(4)
        .with_item_spacing(12)
        .with_span_size_lookup(Some(|position| if is_header(position) { 4 } else { 1 }));
    let mut layout = PivotLayout::<Tile>::new(options).expect("grid options are valid");
    let mut pool = Tiles { count: 900 };
    layout.set_viewport(1920, 1080);
    layout.layout_pivot(3, &mut pool);

    // Down through a header and back up: the column is remembered across the full-width line.
    for direction in [
        FocusDirection::Right,
        FocusDirection::Down,
        FocusDirection::Down,
        FocusDirection::Down,
        FocusDirection::Up,
        FocusDirection::Up,
    ] {
        layout.navigate(direction, false, &mut pool);
        let pivot = layout.selected_position().unwrap_or_default();
        let lane = layout
            .find_child(pivot)
            .map(|c| (c.span_group(), c.span_index()));
        println!("{direction:?}: selected={pivot} (line, lane)={lane:?}");
    }

    println!("saved state: {:?}", layout.save_state());
}
