/// Renderer-facing kind of a flattened position.
pub type ViewType = u32;

/// View type reported for synthesized header positions unless overridden.
pub const DEFAULT_HEADER_VIEW_TYPE: ViewType = 1_220_887_943;

/// View type reported for content positions unless overridden.
pub const DEFAULT_CONTENT_VIEW_TYPE: ViewType = 0;

/// One slot of the flattened position space.
#[derive(Debug, PartialEq, Eq)]
pub enum Entry<'a, T, I> {
    /// Synthesized header for a run of items sharing `I`. Owns no item.
    Header(I),
    Content(&'a T),
}

impl<T, I> Entry<'_, T, I> {
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header(_))
    }

    pub fn is_content(&self) -> bool {
        matches!(self, Self::Content(_))
    }
}

/// Whether the pinned header sits alone at the top edge or is being pushed off by the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StickyState {
    Alone,
    Linked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Vertical extent of a materialized box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub top: i32,
    pub bottom: i32, // exclusive
}

impl Span {
    pub fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Full placement rectangle handed to [`crate::Viewport::place`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn span(&self) -> Span {
        Span::new(self.top, self.bottom)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}
