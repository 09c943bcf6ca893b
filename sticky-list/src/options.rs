/// Configuration for [`crate::ScrollEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineOptions {
    /// Lift the pinned and hand-off headers to the end of [`crate::ScrollEngine::draw_order`].
    ///
    /// When disabled, `draw_order` always returns the identity mapping and the host is expected
    /// to order painting itself (e.g. via elevation).
    pub auto_draw_order: bool,

    /// Pin headers to the top edge and notify listeners.
    ///
    /// When disabled, headers scroll in natural flow like any other box.
    pub sticky_enabled: bool,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self {
            auto_draw_order: true,
            sticky_enabled: true,
        }
    }

    pub fn with_auto_draw_order(mut self, auto_draw_order: bool) -> Self {
        self.auto_draw_order = auto_draw_order;
        self
    }

    pub fn with_sticky_enabled(mut self, sticky_enabled: bool) -> Self {
        self.sticky_enabled = sticky_enabled;
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new()
    }
}
