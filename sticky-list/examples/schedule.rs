// Example: a day-grouped schedule with a minimal in-memory viewport.
use std::sync::Arc;

use sticky_list::{
    Bounds, EngineOptions, Entry, Insets, PositionIndex, ScrollEngine, Span, StickyChange,
    Viewport, WindowEdge,
};

#[derive(Clone, Debug, PartialEq)]
struct Session {
    day: u32,
    title: &'static str,
}

/// Terminal-ish viewport: one row per content line, headers two rows tall.
struct Rows {
    height: i32,
    headers: Vec<bool>,
    window: Vec<usize>,
    bounds: Vec<Bounds>,
}

impl Viewport for Rows {
    // A box is identified by its position; the window never holds a position twice.
    type Handle = usize;
    type Error = std::convert::Infallible;

    fn materialize(&mut self, position: usize, edge: WindowEdge) -> Result<usize, Self::Error> {
        match edge {
            WindowEdge::Start => self.window.insert(0, position),
            WindowEdge::End => self.window.push(position),
        }
        Ok(position)
    }

    fn measure(&mut self, handle: usize) -> Result<i32, Self::Error> {
        Ok(if self.headers[handle] { 2 } else { 1 })
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
        self.height
    }

    fn width(&self) -> i32 {
        40
    }

    fn padding(&self) -> Insets {
        Insets::default()
    }

    fn position_of(&self, handle: usize) -> usize {
        handle
    }
}

fn main() {
    let sessions = [
        (1, "Registration"),
        (1, "Keynote"),
        (1, "Lunch"),
        (2, "Workshops"),
        (2, "Panel"),
        (2, "Dinner"),
        (2, "Party"),
        (3, "Hackathon"),
        (3, "Closing"),
    ]
    .into_iter()
    .map(|(day, title)| Session { day, title });

    let index = PositionIndex::new(|s: &Session| s.day).with_items(sessions);
    let count = index.item_count();
    let mut rows = Rows {
        height: 6,
        headers: (0..count)
            .map(|p| index.resolve(p).is_some_and(|e| e.is_header()))
            .collect(),
        window: Vec::new(),
        bounds: vec![Bounds::default(); count],
    };

    let mut engine = ScrollEngine::with_adapter(EngineOptions::default(), index);
    engine.add_listener(Arc::new(|c: &StickyChange<'_, u32>| {
        println!(
            "  sticky: {:?} -> {:?} ({:?}, {:?})",
            c.previous, c.current, c.state, c.direction
        );
    }));
    engine.on_attach();

    let Ok(materialized) = engine.layout(&mut rows);
    println!("layout materialized {materialized} rows");

    for delta in [3, 3, 2, 4, -5, -20] {
        let Ok(consumed) = engine.scroll_by(delta, &mut rows);
        println!("scroll_by({delta}) consumed {consumed}");
        render(&engine, &rows);
    }
}

fn render(engine: &ScrollEngine<PositionIndex<Session, u32>>, rows: &Rows) {
    let Some(index) = engine.adapter() else {
        return;
    };
    for window_index in engine.draw_order(rows).iter() {
        let position = rows.window[window_index];
        let span = rows.bounds(position);
        match index.resolve(position) {
            Some(Entry::Header(day)) => println!("  [{:>3},{:>3}) == Day {day} ==", span.top, span.bottom),
            Some(Entry::Content(s)) => println!("  [{:>3},{:>3})    {}", span.top, span.bottom, s.title),
            None => {}
        }
    }
}
