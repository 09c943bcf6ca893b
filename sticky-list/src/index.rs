use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::key::{IdentifierKey, KnownSet};
use crate::{DEFAULT_CONTENT_VIEW_TYPE, DEFAULT_HEADER_VIEW_TYPE, Entry, ViewType};

/// Maps an item to the identifier of the group it belongs to.
pub type GroupingFn<T, I> = Arc<dyn Fn(&T) -> I + Send + Sync>;

/// A maximal run of consecutive items sharing one identifier.
#[derive(Clone, Debug)]
struct Run<I> {
    identifier: I,
    /// Flattened position of the run's header. Content follows at `header + 1..=header + len`.
    header: usize,
    first_item: usize,
    len: usize,
}

impl<I> Run<I> {
    fn end(&self) -> usize {
        self.header + 1 + self.len
    }
}

/// Flattens an ordered item list into a position space that interleaves synthesized headers.
///
/// A header precedes every maximal run of consecutive items whose identifier differs from the
/// previous item's identifier:
///
/// ```text
/// items:      A1 A2 B1
/// positions:  [Header(A), A1, A2, Header(B), B1]
/// ```
///
/// The run table is rebuilt on every mutation so lookups are `O(log runs)`; observable results
/// are identical to walking the list from the start.
pub struct PositionIndex<T, I> {
    items: Vec<T>,
    grouping: GroupingFn<T, I>,
    known: KnownSet<I>,
    runs: Vec<Run<I>>,
    header_view_type: ViewType,
    content_view_type: ViewType,
}

impl<T, I: IdentifierKey> PositionIndex<T, I> {
    /// Creates an empty index. `grouping(item)` must be deterministic for the item's lifetime in
    /// the index.
    pub fn new(grouping: impl Fn(&T) -> I + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            grouping: Arc::new(grouping),
            known: KnownSet::default(),
            runs: Vec::new(),
            header_view_type: DEFAULT_HEADER_VIEW_TYPE,
            content_view_type: DEFAULT_CONTENT_VIEW_TYPE,
        }
    }

    pub fn with_view_types(mut self, header: ViewType, content: ViewType) -> Self {
        debug_assert_ne!(header, content, "header and content view types must differ");
        self.header_view_type = header;
        self.content_view_type = content;
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.add(items);
        self
    }

    pub fn add(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
        self.on_items_changed();
    }

    /// Removes the first item equal to `item`. Returns `false` when nothing matched.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(i) = self.items.iter().position(|it| it == item) else {
            return false;
        };
        self.items.remove(i);
        self.on_items_changed();
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.on_items_changed();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of addressable positions: items plus one header per *distinct* identifier.
    ///
    /// When an identifier reappears in two non-adjacent runs this is smaller than the number of
    /// positions [`Self::resolve`] can produce; see [`Self::header_count`].
    pub fn item_count(&self) -> usize {
        self.items.len() + self.known.len()
    }

    /// Number of synthesized headers, one per run.
    pub fn header_count(&self) -> usize {
        self.runs.len()
    }

    pub fn known_identifiers(&self) -> impl Iterator<Item = &I> {
        self.known.iter()
    }

    pub fn identifier_of(&self, item: &T) -> I {
        (self.grouping)(item)
    }

    pub fn resolve(&self, position: usize) -> Option<Entry<'_, T, I>> {
        let run = self.run_at(position)?;
        if position == run.header {
            return Some(Entry::Header(run.identifier.clone()));
        }
        let offset = position - run.header - 1;
        if offset >= run.len {
            return None;
        }
        self.items.get(run.first_item + offset).map(Entry::Content)
    }

    /// The content item at `position`, or `None` for headers and out-of-range positions.
    pub fn item_at(&self, position: usize) -> Option<&T> {
        match self.resolve(position)? {
            Entry::Content(item) => Some(item),
            Entry::Header(_) => None,
        }
    }

    pub fn identifier_at(&self, position: usize) -> Option<I> {
        let run = self.run_at(position)?;
        (position < run.end()).then(|| run.identifier.clone())
    }

    pub fn view_type_at(&self, position: usize) -> Option<ViewType> {
        let run = self.run_at(position)?;
        if position == run.header {
            Some(self.header_view_type)
        } else if position < run.end() {
            Some(self.content_view_type)
        } else {
            None
        }
    }

    pub fn header_view_type(&self) -> ViewType {
        self.header_view_type
    }

    pub fn content_view_type(&self) -> ViewType {
        self.content_view_type
    }

    /// Position of the first header carrying `identifier`.
    pub fn find_header_position(&self, identifier: &I) -> Option<usize> {
        self.runs
            .iter()
            .find(|run| run.identifier == *identifier)
            .map(|run| run.header)
    }

    fn run_at(&self, position: usize) -> Option<&Run<I>> {
        let next = self.runs.partition_point(|run| run.header <= position);
        next.checked_sub(1).map(|i| &self.runs[i])
    }

    fn on_items_changed(&mut self) {
        self.runs.clear();
        let mut produced = KnownSet::default();
        for (i, item) in self.items.iter().enumerate() {
            let identifier = (self.grouping)(item);
            let extends = self
                .runs
                .last()
                .is_some_and(|run| run.identifier == identifier);
            if extends {
                if let Some(run) = self.runs.last_mut() {
                    run.len += 1;
                }
            } else {
                let header = self.runs.last().map_or(0, Run::end);
                self.runs.push(Run {
                    identifier: identifier.clone(),
                    header,
                    first_item: i,
                    len: 1,
                });
            }
            produced.insert(identifier);
        }

        self.known.extend(produced.iter().cloned());
        self.known.retain(|identifier| produced.contains(identifier));

        sdebug!(
            items = self.items.len(),
            runs = self.runs.len(),
            known = self.known.len(),
            "PositionIndex::on_items_changed"
        );
    }
}

impl<T: Clone, I: Clone> Clone for PositionIndex<T, I> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            grouping: Arc::clone(&self.grouping),
            known: self.known.clone(),
            runs: self.runs.clone(),
            header_view_type: self.header_view_type,
            content_view_type: self.content_view_type,
        }
    }
}

impl<T: core::fmt::Debug, I: core::fmt::Debug> core::fmt::Debug for PositionIndex<T, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PositionIndex")
            .field("items", &self.items)
            .field("known", &self.known)
            .field("header_view_type", &self.header_view_type)
            .field("content_view_type", &self.content_view_type)
            .finish_non_exhaustive()
    }
}
