use crate::{Bounds, Insets, Span};

/// Where a newly materialized box joins the viewport's ordered window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowEdge {
    Start,
    End,
}

/// The rendering backend a [`crate::ScrollEngine`] drives.
///
/// The viewport owns every box. The engine only holds handles for the duration of a single call
/// and re-reads geometry through [`Self::bounds`] each time, so handles may be reused after
/// [`Self::recycle`].
///
/// Coordinates are relative to the viewport's top edge; `0` is the pin line.
pub trait Viewport {
    type Handle: Copy + Eq + core::fmt::Debug;
    type Error;

    /// Creates (or reuses) a box for `position` and inserts it at `edge` of the window.
    fn materialize(
        &mut self,
        position: usize,
        edge: WindowEdge,
    ) -> Result<Self::Handle, Self::Error>;

    /// Measures the box and returns its height.
    fn measure(&mut self, handle: Self::Handle) -> Result<i32, Self::Error>;

    fn place(&mut self, handle: Self::Handle, bounds: Bounds) -> Result<(), Self::Error>;

    /// Currently materialized boxes in window order.
    fn boxes(&self) -> &[Self::Handle];

    fn bounds(&self, handle: Self::Handle) -> Span;

    /// Shifts every materialized box by `amount` (negative moves content up).
    fn offset_all_vertically(&mut self, amount: i32);

    fn recycle(&mut self, handle: Self::Handle);

    fn visible_height(&self) -> i32;

    fn width(&self) -> i32;

    fn padding(&self) -> Insets;

    fn position_of(&self, handle: Self::Handle) -> usize;
}
