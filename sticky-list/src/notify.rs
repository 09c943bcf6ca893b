use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{PinState, ScrollDirection, StickyState};

/// Payload passed to every [`StickyListener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StickyChange<'a, I> {
    pub previous: Option<&'a I>,
    pub current: Option<&'a I>,
    pub state: StickyState,
    pub direction: ScrollDirection,
}

/// A callback fired when the pinned header or its sticky state changes.
///
/// Listeners run synchronously, on the caller's stack, in registration order. A panicking
/// listener unwinds through the scroll call that triggered it.
pub type StickyListener<I> = Arc<dyn Fn(&StickyChange<'_, I>) + Send + Sync>;

/// Stores the last notified [`PinState`] and fans changes out to listeners.
pub struct NotificationBus<I> {
    state: PinState<I>,
    listeners: Vec<StickyListener<I>>,
}

impl<I> NotificationBus<I> {
    pub fn new() -> Self {
        Self {
            state: PinState::default(),
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &PinState<I> {
        &self.state
    }

    /// Registers `listener`. Registering the same handle twice makes it fire twice.
    pub fn add_listener(&mut self, listener: StickyListener<I>) {
        self.listeners.push(listener);
    }

    /// Removes the first registration of `listener` (compared by pointer).
    pub fn remove_listener(&mut self, listener: &StickyListener<I>) -> bool {
        let Some(i) = self.listeners.iter().position(|l| Arc::ptr_eq(l, listener)) else {
            return false;
        };
        self.listeners.remove(i);
        true
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn reset(&mut self) {
        self.state = PinState::default();
    }
}

impl<I: Clone + PartialEq> NotificationBus<I> {
    /// Records `identifier`/`state` and notifies listeners if either differs from the stored
    /// values. Returns whether listeners were invoked.
    pub fn notify(&mut self, identifier: I, state: StickyState, direction: ScrollDirection) -> bool {
        let mut changed = false;

        if self.state.current.as_ref() != Some(&identifier) {
            self.state.previous = self.state.current.replace(identifier);
            changed = true;
        }

        if self.state.state != Some(state) {
            self.state.state = Some(state);
            changed = true;
        }

        if !changed {
            return false;
        }

        strace!(
            listeners = self.listeners.len(),
            ?state,
            ?direction,
            "NotificationBus::notify"
        );
        let change = StickyChange {
            previous: self.state.previous.as_ref(),
            current: self.state.current.as_ref(),
            state,
            direction,
        };
        for listener in &self.listeners {
            listener(&change);
        }
        true
    }
}

impl<I> Default for NotificationBus<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: core::fmt::Debug> core::fmt::Debug for NotificationBus<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
