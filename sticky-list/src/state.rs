use crate::StickyState;

/// The last `(previous, current, state)` triple reported to listeners.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize` so hosts can dump it
/// alongside their own frame state when debugging.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinState<I> {
    pub previous: Option<I>,
    pub current: Option<I>,
    pub state: Option<StickyState>,
}

impl<I> Default for PinState<I> {
    fn default() -> Self {
        Self {
            previous: None,
            current: None,
            state: None,
        }
    }
}

impl<I> PinState<I> {
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.state.is_none()
    }
}
