use crate::index::PositionIndex;
use crate::key::IdentifierKey;
use crate::ViewType;

/// The position space a [`crate::ScrollEngine`] lays out.
///
/// [`PositionIndex`] is the stock implementation; hosts with their own storage can implement this
/// directly as long as header positions report [`Self::header_view_type`].
pub trait StickyAdapter {
    type Identifier: Clone + PartialEq;

    fn item_count(&self) -> usize;

    /// `None` when `position` is out of range.
    fn view_type_at(&self, position: usize) -> Option<ViewType>;

    fn header_view_type(&self) -> ViewType;

    /// For a header, its own identifier; for content, the identifier of its group.
    fn identifier_at(&self, position: usize) -> Option<Self::Identifier>;

    fn find_header_position(&self, identifier: &Self::Identifier) -> Option<usize>;

    fn is_header(&self, position: usize) -> bool {
        self.view_type_at(position) == Some(self.header_view_type())
    }
}

impl<T, I: IdentifierKey> StickyAdapter for PositionIndex<T, I> {
    type Identifier = I;

    fn item_count(&self) -> usize {
        PositionIndex::item_count(self)
    }

    fn view_type_at(&self, position: usize) -> Option<ViewType> {
        PositionIndex::view_type_at(self, position)
    }

    fn header_view_type(&self) -> ViewType {
        PositionIndex::header_view_type(self)
    }

    fn identifier_at(&self, position: usize) -> Option<I> {
        PositionIndex::identifier_at(self, position)
    }

    fn find_header_position(&self, identifier: &I) -> Option<usize> {
        PositionIndex::find_header_position(self, identifier)
    }
}
