use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{Bounds, Insets, Span, Viewport, WindowEdge};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct BoxId(usize);

#[derive(Clone, Copy, Debug)]
struct Slot {
    position: usize,
    bounds: Bounds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FakeError {
    pub position: usize,
}

/// In-memory viewport that records every call the engine makes.
pub(crate) struct FakeViewport {
    width: i32,
    height: i32,
    padding: Insets,
    heights: Box<dyn Fn(usize) -> i32>,
    window: Vec<BoxId>,
    slots: Vec<Option<Slot>>,
    free: Vec<BoxId>,
    fail_at: Option<usize>,
    pub materialized: usize,
    pub recycled: usize,
    pub offsets: usize,
}

impl FakeViewport {
    pub fn new(width: i32, height: i32, heights: impl Fn(usize) -> i32 + 'static) -> Self {
        Self {
            width,
            height,
            padding: Insets::default(),
            heights: Box::new(heights),
            window: Vec::new(),
            slots: Vec::new(),
            free: Vec::new(),
            fail_at: None,
            materialized: 0,
            recycled: 0,
            offsets: 0,
        }
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn fail_at(&mut self, position: usize) {
        self.fail_at = Some(position);
    }

    /// Positions in window order.
    pub fn positions(&self) -> Vec<usize> {
        self.window.iter().map(|&id| self.slot(id).position).collect()
    }

    pub fn span_of(&self, position: usize) -> Option<Span> {
        self.window
            .iter()
            .map(|&id| self.slot(id))
            .find(|slot| slot.position == position)
            .map(|slot| slot.bounds.span())
    }

    pub fn bounds_of(&self, position: usize) -> Option<Bounds> {
        self.window
            .iter()
            .map(|&id| self.slot(id))
            .find(|slot| slot.position == position)
            .map(|slot| slot.bounds)
    }

    fn slot(&self, id: BoxId) -> &Slot {
        self.slots[id.0].as_ref().expect("live box")
    }
}

impl Viewport for FakeViewport {
    type Handle = BoxId;
    type Error = FakeError;

    fn materialize(&mut self, position: usize, edge: WindowEdge) -> Result<BoxId, FakeError> {
        if self.fail_at == Some(position) {
            return Err(FakeError { position });
        }
        self.materialized += 1;
        let slot = Slot {
            position,
            bounds: Bounds::default(),
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(slot);
                id
            }
            None => {
                self.slots.push(Some(slot));
                BoxId(self.slots.len() - 1)
            }
        };
        match edge {
            WindowEdge::Start => self.window.insert(0, id),
            WindowEdge::End => self.window.push(id),
        }
        Ok(id)
    }

    fn measure(&mut self, handle: BoxId) -> Result<i32, FakeError> {
        Ok((self.heights)(self.slot(handle).position))
    }

    fn place(&mut self, handle: BoxId, bounds: Bounds) -> Result<(), FakeError> {
        if let Some(slot) = self.slots[handle.0].as_mut() {
            slot.bounds = bounds;
        }
        Ok(())
    }

    fn boxes(&self) -> &[BoxId] {
        &self.window
    }

    fn bounds(&self, handle: BoxId) -> Span {
        self.slot(handle).bounds.span()
    }

    fn offset_all_vertically(&mut self, amount: i32) {
        self.offsets += 1;
        for slot in self.slots.iter_mut().flatten() {
            slot.bounds.top += amount;
            slot.bounds.bottom += amount;
        }
    }

    fn recycle(&mut self, handle: BoxId) {
        self.recycled += 1;
        self.window.retain(|&id| id != handle);
        self.slots[handle.0] = None;
        self.free.push(handle);
    }

    fn visible_height(&self) -> i32 {
        self.height
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn padding(&self) -> Insets {
        self.padding
    }

    fn position_of(&self, handle: BoxId) -> usize {
        self.slot(handle).position
    }
}
