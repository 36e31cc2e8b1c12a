//! Host-owned resource handles and their load state machine.

/// Load status of one per-card resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceState {
    /// Nothing requested; no handle held.
    #[default]
    Invalid,
    /// Request sent to the host, waiting for a handle.
    Loading,
    /// Handle present and usable.
    Loaded,
}

/// The three resource kinds each card streams from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Card face texture.
    Texture,
    /// Screen-aligned detail texture.
    DetailTexture,
    /// Custom card mesh.
    Geometry,
}

impl ResourceKind {
    /// Every kind, in reconciliation order.
    pub const ALL: [Self; 3] =
        [Self::Texture, Self::DetailTexture, Self::Geometry];
}

/// Opaque texture handle with the pixel size the detail layout needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    /// Host-side identifier.
    pub id: u64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TextureHandle {
    /// Handle for host texture `id` of the given pixel size.
    #[must_use]
    pub const fn new(id: u64, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

/// Opaque mesh handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

/// A handle paired with its load state.
///
/// `Loaded` is only reachable with a handle present, and `Invalid` never
/// holds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSlot<H> {
    handle: Option<H>,
    state: ResourceState,
}

impl<H> Default for ResourceSlot<H> {
    fn default() -> Self {
        Self {
            handle: None,
            state: ResourceState::Invalid,
        }
    }
}

impl<H: Copy> ResourceSlot<H> {
    /// Current load state.
    #[must_use]
    pub fn state(&self) -> ResourceState {
        self.state
    }

    /// Handle, only while loaded.
    #[must_use]
    pub fn handle(&self) -> Option<H> {
        self.handle
    }

    /// Invalid -> Loading. Other states are left alone.
    pub(crate) fn mark_loading(&mut self) {
        if self.state == ResourceState::Invalid {
            self.state = ResourceState::Loading;
        }
    }

    /// Host reply. `Some` promotes a pending request to Loaded (or replaces
    /// an already loaded handle); `None` drops the resource from any state.
    ///
    /// Returns whether the slot ended up loaded.
    pub(crate) fn fulfil(&mut self, handle: Option<H>) -> bool {
        match (handle, self.state) {
            (None, _) => {
                self.invalidate();
                false
            }
            (Some(h), ResourceState::Loading | ResourceState::Loaded) => {
                self.handle = Some(h);
                self.state = ResourceState::Loaded;
                true
            }
            (Some(_), ResourceState::Invalid) => false,
        }
    }

    /// Any -> Invalid, releasing the handle.
    pub(crate) fn invalidate(&mut self) {
        self.handle = None;
        self.state = ResourceState::Invalid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loaded_is_only_reachable_through_loading() {
        let mut slot = ResourceSlot::<GeometryHandle>::default();
        assert!(!slot.fulfil(Some(GeometryHandle(7))));
        assert_eq!(slot.state(), ResourceState::Invalid);
        assert_eq!(slot.handle(), None);

        slot.mark_loading();
        assert_eq!(slot.state(), ResourceState::Loading);
        assert!(slot.fulfil(Some(GeometryHandle(7))));
        assert_eq!(slot.state(), ResourceState::Loaded);
        assert_eq!(slot.handle(), Some(GeometryHandle(7)));
    }

    #[test]
    fn null_handle_invalidates_from_any_state() {
        let mut slot = ResourceSlot::<TextureHandle>::default();
        assert!(!slot.fulfil(None));
        assert_eq!(slot.state(), ResourceState::Invalid);

        slot.mark_loading();
        assert!(!slot.fulfil(None));
        assert_eq!(slot.state(), ResourceState::Invalid);

        slot.mark_loading();
        let _ = slot.fulfil(Some(TextureHandle::new(1, 8, 8)));
        assert!(!slot.fulfil(None));
        assert_eq!(slot.state(), ResourceState::Invalid);
        assert_eq!(slot.handle(), None);
    }

    #[test]
    fn loaded_handle_can_be_replaced() {
        let mut slot = ResourceSlot::<TextureHandle>::default();
        slot.mark_loading();
        let _ = slot.fulfil(Some(TextureHandle::new(1, 8, 8)));
        slot.mark_loading();
        assert_eq!(slot.state(), ResourceState::Loaded);
        assert!(slot.fulfil(Some(TextureHandle::new(2, 16, 16))));
        assert_eq!(slot.handle().map(|h| h.id), Some(2));
    }
}
