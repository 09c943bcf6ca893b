// Example: watching pin state and paint order through a hand-off.
use std::sync::{Arc, Mutex};

use sticky_list::{
    Bounds, EngineOptions, Insets, NotificationBus, PositionIndex, ScrollDirection, ScrollEngine,
    Span, StickyChange, StickyState, Viewport, WindowEdge,
};

struct Boxes {
    window: Vec<usize>,
    bounds: Vec<Bounds>,
}

impl Viewport for Boxes {
    type Handle = usize;
    type Error = std::convert::Infallible;

    fn materialize(&mut self, position: usize, edge: WindowEdge) -> Result<usize, Self::Error> {
        if self.bounds.len() <= position {
            self.bounds.resize(position + 1, Bounds::default());
        }
        match edge {
            WindowEdge::Start => self.window.insert(0, position),
            WindowEdge::End => self.window.push(position),
        }
        Ok(position)
    }

    fn measure(&mut self, handle: usize) -> Result<i32, Self::Error> {
        Ok(if handle % 4 == 0 { 10 } else { 20 })
    }

    fn place(&mut self, handle: usize, bounds: Bounds) -> Result<(), Self::Error> {
        self.bounds[handle] = bounds;
        Ok(())
    }

    fn boxes(&self) -> &[usize] {
        &self.window
    }

    fn bounds(&self, handle: usize) -> Span {
        self.bounds[handle].span()
    }

    fn offset_all_vertically(&mut self, amount: i32) {
        for &position in &self.window {
            self.bounds[position].top += amount;
            self.bounds[position].bottom += amount;
        }
    }

    fn recycle(&mut self, handle: usize) {
        self.window.retain(|&p| p != handle);
    }

    fn visible_height(&self) -> i32 {
        50
    }

    fn width(&self) -> i32 {
        100
    }

    fn padding(&self) -> Insets {
        Insets::default()
    }

    fn position_of(&self, handle: usize) -> usize {
        handle
    }
}

fn main() {
    // Three groups of three: headers land on positions 0, 4 and 8.
    let items = ["a1", "a2", "a3", "b1", "b2", "b3", "c1", "c2", "c3"];
    let index = PositionIndex::new(|s: &&str| s.as_bytes()[0]).with_items(items);

    let linked = Arc::new(Mutex::new(0usize));
    let mut engine = ScrollEngine::with_adapter(EngineOptions::default(), index);
    engine.add_listener(Arc::new({
        let linked = Arc::clone(&linked);
        move |c: &StickyChange<'_, u8>| {
            if c.state == StickyState::Linked {
                *linked.lock().unwrap() += 1;
            }
        }
    }));
    engine.on_attach();

    let mut boxes = Boxes {
        window: Vec::new(),
        bounds: Vec::new(),
    };
    let Ok(_) = engine.layout(&mut boxes);

    for delta in [15, 15, 35, 10, -10, -10] {
        let Ok(consumed) = engine.scroll_by(delta, &mut boxes);
        let order: Vec<usize> = engine
            .draw_order(&boxes)
            .iter()
            .map(|i| boxes.window[i])
            .collect();
        println!(
            "delta={delta:>4} consumed={consumed:>4} pinned={:?} state={:?} paint={order:?}",
            engine.pinned_position(),
            engine.pin_state(),
        );
    }
    println!("linked notifications: {}", linked.lock().unwrap());

    // The bus can also be driven directly, e.g. to replay a saved state.
    let mut bus = NotificationBus::<u8>::new();
    bus.notify(b'a', StickyState::Alone, ScrollDirection::Forward);
    println!("replayed: {:?}", bus.state());
}
