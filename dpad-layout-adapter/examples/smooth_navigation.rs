use dpad_layout::{
    FocusDirection, ItemHandle, LayoutOptions, MeasureSpec, RecyclerPool, Size, ViewBounds,
};
use dpad_layout_adapter::{Controller, Easing, ScrollStateRegistry};

#[derive(Debug, Default)]
struct Card {
    bounds: ViewBounds,
}

impl ItemHandle for Card {
    fn measure(&mut self, spec: MeasureSpec) -> Size {
        Size::new(spec.width.unwrap_or(400), spec.height.unwrap_or(240))
    }

    fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: ViewBounds) {
        self.bounds = bounds;
    }
}

struct Cards {
    count: usize,
    spare: Vec<Card>,
}

impl RecyclerPool for Cards {
    type Item = Card;

    fn item_count(&self) -> usize {
        self.count
    }

    fn acquire(&mut self, _position: usize) -> Card {
        self.spare.pop().unwrap_or_default()
    }

    fn release(&mut self, item: Card) {
        self.spare.push(item);
    }
}

fn main() {
    // Example: a controller animating D-pad presses without holding any UI objects.
    //
    // An adapter would:
    // - forward key presses to navigate(direction, now_ms, pool)
    // - call tick(now_ms, pool) in a frame loop / timer while is_animating()
    // - render the attached items at their bounds
    let mut pool = Cards {
        count: 1_000,
        spare: Vec::new(),
    };
    let mut c = Controller::new(LayoutOptions::default().with_item_spacing(16))
        .expect("default options are valid")
        .with_animation(240, Easing::EaseInOutCubic);
    c.layout_mut().set_viewport(1280, 720);
    c.layout_mut().layout_pivot(0, &mut pool);

    let mut now_ms = 0u64;
    for _ in 0..4 {
        c.navigate(FocusDirection::Down, now_ms, &mut pool);
        now_ms += 32;
        c.tick(now_ms, &mut pool);
    }
    println!(
        "pressed 4x: selected={:?} pending={}",
        c.layout().selected_position(),
        c.layout().pending_moves()
    );

    while c.tick(now_ms, &mut pool) {
        now_ms += 16;
        if now_ms.is_multiple_of(80) {
            println!(
                "t={now_ms} scrolled={} attached={}",
                c.scrolled(),
                c.layout().children().len()
            );
        }
    }

    let selected = c.layout().selected_position();
    println!("done: selected={selected:?} pivot={:?}", c.layout().pivot_info());

    // Remember where this row was before it gets recycled by its parent.
    let mut registry = ScrollStateRegistry::new();
    registry.save("row-0", c.layout());
    println!("saved={:?}", registry.get(&"row-0"));
}
