use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::{
    Bounds, DrawOrder, EngineOptions, NotificationBus, PinState, ScrollDirection, StickyAdapter,
    StickyListener, StickyState, ViewType, Viewport, WindowEdge,
};

/// Incremental layout engine for a vertically scrolling list with sticky headers.
///
/// The engine holds no boxes. The host passes its [`Viewport`] into each call, and the engine
/// materializes, places, and recycles boxes through it:
/// - [`Self::layout`] fills an empty viewport from position 0.
/// - [`Self::scroll_by`] consumes a scroll delta, growing the window at the leading edge, pinning
///   the header that covers the top edge, and recycling boxes that left the viewport.
///
/// Which header is pinned is re-derived from box geometry on every call. Between calls the engine
/// only remembers the *position* of the pinned header, never a box handle.
///
/// Random-access jumps are not supported; see [`Self::scroll_to_position`].
pub struct ScrollEngine<A: StickyAdapter> {
    options: EngineOptions,
    adapter: Option<A>,
    attached: bool,
    pinned: Option<usize>,
    bus: NotificationBus<A::Identifier>,
}

impl<A: StickyAdapter> ScrollEngine<A> {
    pub fn new(options: EngineOptions) -> Self {
        sdebug!(
            auto_draw_order = options.auto_draw_order,
            sticky_enabled = options.sticky_enabled,
            "ScrollEngine::new"
        );
        Self {
            options,
            adapter: None,
            attached: false,
            pinned: None,
            bus: NotificationBus::new(),
        }
    }

    pub fn with_adapter(options: EngineOptions, adapter: A) -> Self {
        let mut engine = Self::new(options);
        engine.adapter = Some(adapter);
        engine
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Replaces the options. A header pinned before sticky is disabled returns to natural flow
    /// on the next scroll.
    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// Mutable access for list mutations. The host is responsible for re-laying out the viewport
    /// afterwards; the engine does not observe the change.
    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    /// Replaces the adapter and returns the previous one.
    pub fn swap_adapter(&mut self, adapter: Option<A>) -> Option<A> {
        sdebug!(has_adapter = adapter.is_some(), "ScrollEngine::swap_adapter");
        self.pinned = None;
        core::mem::replace(&mut self.adapter, adapter)
    }

    pub fn on_attach(&mut self) {
        sdebug!("ScrollEngine::on_attach");
        self.attached = true;
    }

    /// Detaches from the viewport and forgets the pinned header and the last notified state.
    pub fn on_detach(&mut self) {
        sdebug!("ScrollEngine::on_detach");
        self.attached = false;
        self.pinned = None;
        self.bus.reset();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn can_scroll_vertically(&self) -> bool {
        true
    }

    pub fn can_scroll_horizontally(&self) -> bool {
        false
    }

    pub fn item_count(&self) -> usize {
        self.adapter.as_ref().map_or(0, StickyAdapter::item_count)
    }

    pub fn view_type_at(&self, position: usize) -> Option<ViewType> {
        self.adapter.as_ref()?.view_type_at(position)
    }

    pub fn add_listener(&mut self, listener: StickyListener<A::Identifier>) {
        self.bus.add_listener(listener);
    }

    pub fn remove_listener(&mut self, listener: &StickyListener<A::Identifier>) -> bool {
        self.bus.remove_listener(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.bus.listener_count()
    }

    /// The last `(previous, current, state)` reported to listeners.
    pub fn pin_state(&self) -> &PinState<A::Identifier> {
        self.bus.state()
    }

    /// Position of the header held at the pin line, if any. During a hand-off this is the header
    /// being pushed off, not the incoming one.
    pub fn pinned_position(&self) -> Option<usize> {
        self.pinned
    }

    /// The materialized box for `position`, if any.
    pub fn box_at<V: Viewport>(&self, viewport: &V, position: usize) -> Option<V::Handle> {
        viewport
            .boxes()
            .iter()
            .copied()
            .find(|&handle| viewport.position_of(handle) == position)
    }

    /// Index of `position`'s box inside the viewport's window, if materialized.
    pub fn window_index_of<V: Viewport>(&self, viewport: &V, position: usize) -> Option<usize> {
        viewport
            .boxes()
            .iter()
            .position(|&handle| viewport.position_of(handle) == position)
    }

    /// Fills an empty viewport top-down from position 0.
    ///
    /// Returns the number of boxes materialized. A viewport that already holds boxes is left
    /// untouched.
    pub fn layout<V: Viewport>(&mut self, viewport: &mut V) -> core::result::Result<usize, V::Error> {
        if !viewport.boxes().is_empty() {
            return Ok(0);
        }
        let Some(adapter) = self.adapter.as_ref() else {
            return Ok(0);
        };

        let count = adapter.item_count();
        let padding = viewport.padding();
        let left = padding.left;
        let right = viewport.width().saturating_sub(padding.right);
        let limit = viewport.visible_height().saturating_sub(padding.bottom);

        let mut top = padding.top;
        let mut position = 0;
        while position < count && top < limit {
            let handle = viewport.materialize(position, WindowEdge::End)?;
            let height = viewport.measure(handle)?;
            let bottom = top.saturating_add(height);
            viewport.place(
                handle,
                Bounds {
                    left,
                    top,
                    right,
                    bottom,
                },
            )?;
            top = bottom;
            position += 1;
        }

        sdebug!(materialized = position, count, "ScrollEngine::layout");
        Ok(position)
    }

    /// Scrolls by `delta` (positive moves content up, revealing later positions) and returns the
    /// signed distance actually consumed.
    ///
    /// The result is smaller in magnitude than `delta` when the content boundary is reached;
    /// there is no overscroll. `delta == 0` is a no-op. Viewport errors propagate unchanged and
    /// leave the window as it was at the failing call.
    pub fn scroll_by<V: Viewport>(
        &mut self,
        delta: i32,
        viewport: &mut V,
    ) -> core::result::Result<i32, V::Error> {
        if delta == 0 {
            return Ok(0);
        }
        if !self.attached {
            swarn!(delta, "ScrollEngine::scroll_by while detached");
            return Ok(0);
        }
        let Some(adapter) = self.adapter.as_ref() else {
            return Ok(0);
        };

        let mut pass = LayoutPass::new(adapter, viewport, self.pinned, self.options.sticky_enabled);
        let (scrolled, pin, direction) = if delta > 0 {
            let (scrolled, pin) = pass.forward(delta)?;
            (scrolled, pin, ScrollDirection::Forward)
        } else {
            let (scrolled, pin) = pass.backward(delta)?;
            (scrolled, pin, ScrollDirection::Backward)
        };
        pass.recycle_hidden();
        self.pinned = pass.pinned;

        strace!(
            delta,
            scrolled,
            pinned = ?self.pinned,
            ?direction,
            "ScrollEngine::scroll_by"
        );

        if let Some((identifier, state)) = pin {
            self.bus.notify(identifier, state, direction);
        }
        Ok(scrolled)
    }

    /// Always fails: the engine positions boxes incrementally and cannot jump.
    pub fn scroll_to_position(&mut self, _position: usize) -> Result<()> {
        Err(Error::Unsupported {
            operation: "scroll_to_position",
        })
    }

    /// Always fails: the engine positions boxes incrementally and cannot jump.
    pub fn smooth_scroll_to_position(&mut self, _position: usize) -> Result<()> {
        Err(Error::Unsupported {
            operation: "smooth_scroll_to_position",
        })
    }

    /// Paint order for the viewport's current window.
    ///
    /// The last notified current header paints last and the previous one second to last, as
    /// long as their boxes are materialized. Identity when `auto_draw_order` is off.
    pub fn draw_order<V: Viewport>(&self, viewport: &V) -> DrawOrder {
        let count = viewport.boxes().len();
        if !self.options.auto_draw_order || !self.options.sticky_enabled {
            return DrawOrder::identity(count);
        }
        let Some(adapter) = self.adapter.as_ref() else {
            return DrawOrder::identity(count);
        };

        let on_screen = |identifier: &A::Identifier| {
            adapter
                .find_header_position(identifier)
                .and_then(|position| self.window_index_of(viewport, position))
        };
        let state = self.bus.state();
        DrawOrder::new(
            count,
            state.previous.as_ref().and_then(on_screen),
            state.current.as_ref().and_then(on_screen),
        )
    }
}

impl<A: StickyAdapter> core::fmt::Debug for ScrollEngine<A>
where
    A::Identifier: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollEngine")
            .field("options", &self.options)
            .field("has_adapter", &self.adapter.is_some())
            .field("attached", &self.attached)
            .field("pinned", &self.pinned)
            .field("bus", &self.bus)
            .finish()
    }
}

type Pin<I> = Option<(I, StickyState)>;

/// Borrowed state for one `scroll_by` call.
///
/// Every box except the pinned header sits in natural flow: consecutive positions, each directly
/// below its predecessor. `pinned` always names the one box placed at the pin line instead.
struct LayoutPass<'a, A: StickyAdapter, V: Viewport> {
    adapter: &'a A,
    viewport: &'a mut V,
    pinned: Option<usize>,
    sticky_enabled: bool,
    left: i32,
    right: i32,
    height: i32,
}

impl<'a, A: StickyAdapter, V: Viewport> LayoutPass<'a, A, V> {
    fn new(adapter: &'a A, viewport: &'a mut V, pinned: Option<usize>, sticky_enabled: bool) -> Self {
        let padding = viewport.padding();
        let left = padding.left;
        let right = viewport.width().saturating_sub(padding.right);
        let height = viewport.visible_height();
        let mut pass = Self {
            adapter,
            viewport,
            pinned,
            sticky_enabled,
            left,
            right,
            height,
        };
        if pass.current_sticky().is_none() {
            pass.pinned = None;
        }
        pass
    }

    fn forward(&mut self, delta: i32) -> core::result::Result<(i32, Pin<A::Identifier>), V::Error> {
        let count = self.adapter.item_count();
        let mut scrolled = 0i32;
        while scrolled < delta {
            let Some(last) = self.last_normal() else {
                break;
            };
            let hanging = self
                .viewport
                .bounds(last)
                .bottom
                .saturating_sub(self.height)
                .max(0);
            let step = (delta - scrolled).min(hanging);
            scrolled += step;
            if step != 0 {
                self.viewport.offset_all_vertically(-step);
            }

            let next = self.viewport.position_of(last) + 1;
            if next < count && scrolled < delta {
                let top = self.viewport.bounds(last).bottom;
                self.materialize_at(next, WindowEdge::End, top)?;
            } else {
                break;
            }
        }

        if !self.sticky_enabled {
            self.release_pin(None)?;
            return Ok((scrolled, None));
        }

        let stale = self.current_sticky();
        let mut current = None;
        let mut next = None;
        let mut max_bottom = i32::MIN;
        let mut min_top = i32::MAX;
        for &handle in self.viewport.boxes() {
            if !self.is_header(handle) {
                continue;
            }
            let span = self.viewport.bounds(handle);
            if max_bottom <= span.bottom && span.top <= 0 {
                max_bottom = span.bottom;
                current = Some(handle);
            }
            // The pinned box's geometry says nothing about where the next group starts.
            if min_top > span.top && current != Some(handle) && stale != Some(handle) {
                min_top = span.top;
                next = Some(handle);
            }
        }

        self.release_pin(current)?;
        let Some(current) = current else {
            return Ok((scrolled, None));
        };
        self.place_at(current, 0)?;
        self.pinned = Some(self.viewport.position_of(current));

        let mut reported = current;
        let mut state = StickyState::Alone;
        if let Some(next) = next {
            let gap = self.viewport.bounds(next).top - self.viewport.bounds(current).bottom;
            if gap < 0 {
                self.place_at(current, gap)?;
                reported = next;
                state = StickyState::Linked;
            }
        }

        let pin = self
            .adapter
            .identifier_at(self.viewport.position_of(reported))
            .map(|identifier| (identifier, state));
        Ok((scrolled, pin))
    }

    fn backward(&mut self, delta: i32) -> core::result::Result<(i32, Pin<A::Identifier>), V::Error> {
        // A header pinned in its own natural slot, with its predecessor still on screen, moves
        // down with the flow from here on.
        let predecessor_shown = self
            .sticky_position()
            .and_then(|position| position.checked_sub(1))
            .and_then(|position| self.box_for(position))
            .is_some();
        if predecessor_shown {
            self.release_pin(None)?;
        }

        let mut scrolled = 0i32;
        while scrolled > delta {
            let Some(first) = self.first_normal() else {
                break;
            };
            let hanging = self.viewport.bounds(first).top.saturating_neg().max(0);
            let step = scrolled.saturating_sub(delta).min(hanging);
            scrolled -= step;
            if step != 0 {
                self.viewport.offset_all_vertically(step);
            }

            let Some(previous) = self.viewport.position_of(first).checked_sub(1) else {
                break;
            };
            let sticky_is_previous = self
                .current_sticky()
                .is_some_and(|sticky| self.viewport.position_of(sticky) == previous);
            if sticky_is_previous {
                // The pinned header is the next box up: it rejoins the flow above `first`.
                self.release_pin(None)?;
            } else if scrolled > delta {
                let anchor_top = self.viewport.bounds(first).top;
                self.materialize_at(previous, WindowEdge::Start, anchor_top)?;
            } else {
                break;
            }
        }

        if !self.sticky_enabled {
            self.release_pin(None)?;
            return Ok((scrolled, None));
        }

        self.insert_required_header()?;

        let (current, previous) = self.select_backward_headers();
        self.release_pin(current)?;
        let Some(current) = current else {
            return Ok((scrolled, None));
        };
        self.place_at(current, 0)?;
        self.pinned = Some(self.viewport.position_of(current));

        let mut state = StickyState::Alone;
        if let Some(previous) = previous {
            let gap = self.viewport.bounds(previous).top - self.viewport.bounds(current).bottom;
            if gap < 0 {
                self.place_at(current, gap)?;
                state = StickyState::Linked;
            }
        }

        let pin = self
            .adapter
            .identifier_at(self.viewport.position_of(current))
            .map(|identifier| (identifier, state));
        Ok((scrolled, pin))
    }

    /// Materializes the header of the lead content box when its group has no header on screen
    /// and every materialized header sits at or below the top edge.
    fn insert_required_header(&mut self) -> core::result::Result<(), V::Error> {
        let Some(first) = self.first_normal() else {
            return Ok(());
        };
        let first_position = self.viewport.position_of(first);
        if self.adapter.is_header(first_position) {
            return Ok(());
        }
        let Some(required) = self.adapter.identifier_at(first_position) else {
            return Ok(());
        };

        let mut resolved = false;
        let mut first_header_top = None::<i32>;
        for &handle in self.viewport.boxes() {
            if !self.is_header(handle) {
                continue;
            }
            let position = self.viewport.position_of(handle);
            if self.adapter.identifier_at(position).as_ref() == Some(&required) {
                resolved = true;
            }
            let top = self.viewport.bounds(handle).top;
            if first_header_top.is_none_or(|min| top < min) {
                first_header_top = Some(top);
            }
        }
        if resolved || !first_header_top.is_some_and(|top| top >= 0) {
            return Ok(());
        }

        let Some(header) = self.adapter.find_header_position(&required) else {
            sdebug!(
                position = first_position,
                "required header not found; skipping pin for this frame"
            );
            return Ok(());
        };
        let anchor_top = self.viewport.bounds(first).top;
        self.materialize_at(header, WindowEdge::Start, anchor_top)
    }

    /// Returns `(current, previous)` for a backward pass.
    ///
    /// `previous` is the highest header in natural flow whose top is at or below the top edge.
    /// `current` is the header with the greatest bottom among those entirely above `previous`
    /// (or among all headers when there is no `previous`).
    fn select_backward_headers(&self) -> (Option<V::Handle>, Option<V::Handle>) {
        let stale = self.current_sticky();
        let headers: Vec<V::Handle> = self
            .viewport
            .boxes()
            .iter()
            .rev()
            .copied()
            .filter(|&handle| self.is_header(handle))
            .collect();

        let mut previous: Option<V::Handle> = None;
        for &handle in &headers {
            if stale == Some(handle) {
                continue;
            }
            let top = self.viewport.bounds(handle).top;
            let higher = previous.is_none_or(|p| self.viewport.bounds(p).top > top);
            if top >= 0 && higher {
                previous = Some(handle);
            }
        }

        let mut current: Option<V::Handle> = None;
        for &handle in &headers {
            let bottom = self.viewport.bounds(handle).bottom;
            let above_previous = previous.is_none_or(|p| self.viewport.bounds(p).top >= bottom);
            let lower = current.is_none_or(|c| self.viewport.bounds(c).bottom < bottom);
            if above_previous && lower {
                current = Some(handle);
            }
        }

        match (current, previous) {
            (None, Some(previous)) => (Some(previous), None),
            pair => pair,
        }
    }

    fn is_header(&self, handle: V::Handle) -> bool {
        self.adapter.is_header(self.viewport.position_of(handle))
    }

    /// Position of the pinned header, if it still resolves to a header.
    fn sticky_position(&self) -> Option<usize> {
        self.pinned
            .filter(|&position| self.adapter.is_header(position))
    }

    fn current_sticky(&self) -> Option<V::Handle> {
        self.box_for(self.sticky_position()?)
    }

    fn box_for(&self, position: usize) -> Option<V::Handle> {
        self.viewport
            .boxes()
            .iter()
            .copied()
            .find(|&handle| self.viewport.position_of(handle) == position)
    }

    /// The box with the smallest top, excluding the pinned header.
    fn first_normal(&self) -> Option<V::Handle> {
        let sticky = self.sticky_position();
        let mut resolved = None;
        let mut min_top = i32::MAX;
        for &handle in self.viewport.boxes() {
            if sticky == Some(self.viewport.position_of(handle)) {
                continue;
            }
            let top = self.viewport.bounds(handle).top;
            if top < min_top {
                min_top = top;
                resolved = Some(handle);
            }
        }
        resolved
    }

    /// The box with the greatest bottom, excluding the pinned header.
    ///
    /// A header pinned exactly at its natural slot still belongs to the flow; when it directly
    /// follows the resolved box it is the last box itself.
    fn last_normal(&self) -> Option<V::Handle> {
        let sticky = self.sticky_position();
        let mut resolved = None;
        let mut max_bottom = i32::MIN;
        for &handle in self.viewport.boxes().iter().rev() {
            if sticky == Some(self.viewport.position_of(handle)) {
                continue;
            }
            let bottom = self.viewport.bounds(handle).bottom;
            if bottom > max_bottom {
                max_bottom = bottom;
                resolved = Some(handle);
            }
        }
        match (resolved, self.current_sticky()) {
            (Some(last), Some(sticky))
                if self.viewport.position_of(sticky) == self.viewport.position_of(last) + 1 =>
            {
                Some(sticky)
            }
            (resolved, _) => resolved,
        }
    }

    /// Unpins the pinned header unless it is `keep`.
    fn release_pin(&mut self, keep: Option<V::Handle>) -> core::result::Result<(), V::Error> {
        let Some(pinned) = self.current_sticky() else {
            self.pinned = None;
            return Ok(());
        };
        if keep == Some(pinned) {
            return Ok(());
        }
        self.pinned = None;
        self.return_to_flow(pinned)
    }

    /// Places `handle` back in its natural slot next to a materialized neighbour, or recycles it
    /// when neither neighbour is materialized.
    fn return_to_flow(&mut self, handle: V::Handle) -> core::result::Result<(), V::Error> {
        let position = self.viewport.position_of(handle);
        let height = self.viewport.bounds(handle).height();
        if let Some(below) = self.box_for(position + 1) {
            let top = self.viewport.bounds(below).top.saturating_sub(height);
            return self.place_at(handle, top);
        }
        if let Some(above) = position.checked_sub(1).and_then(|p| self.box_for(p)) {
            let top = self.viewport.bounds(above).bottom;
            return self.place_at(handle, top);
        }
        strace!(position, "recycle released header");
        self.viewport.recycle(handle);
        Ok(())
    }

    /// Moves `handle` so its top sits at `top`, keeping its height.
    fn place_at(&mut self, handle: V::Handle, top: i32) -> core::result::Result<(), V::Error> {
        let height = self.viewport.bounds(handle).height();
        self.viewport.place(
            handle,
            Bounds {
                left: self.left,
                top,
                right: self.right,
                bottom: top.saturating_add(height),
            },
        )
    }

    /// Materializes `position` and places it against `anchor`: below it for
    /// [`WindowEdge::End`], above it for [`WindowEdge::Start`].
    fn materialize_at(
        &mut self,
        position: usize,
        edge: WindowEdge,
        anchor: i32,
    ) -> core::result::Result<(), V::Error> {
        let handle = self.viewport.materialize(position, edge)?;
        let height = self.viewport.measure(handle)?;
        let (top, bottom) = match edge {
            WindowEdge::End => (anchor, anchor.saturating_add(height)),
            WindowEdge::Start => (anchor.saturating_sub(height), anchor),
        };
        strace!(position, top, bottom, ?edge, "materialize");
        self.viewport.place(
            handle,
            Bounds {
                left: self.left,
                top,
                right: self.right,
                bottom,
            },
        )
    }

    /// Releases every box that lies entirely outside `[0, height]`.
    fn recycle_hidden(&mut self) {
        let hidden: Vec<V::Handle> = self
            .viewport
            .boxes()
            .iter()
            .copied()
            .filter(|&handle| {
                let span = self.viewport.bounds(handle);
                span.bottom < 0 || span.top > self.height
            })
            .collect();
        for handle in hidden {
            let position = self.viewport.position_of(handle);
            if self.pinned == Some(position) {
                self.pinned = None;
            }
            strace!(position, "recycle");
            self.viewport.recycle(handle);
        }
    }
}
