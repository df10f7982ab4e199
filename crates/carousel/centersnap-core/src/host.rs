//! Collaborator traits implemented by hosts.
//!
//! The layout host owns the real items, their sizes and the container's
//! scroll offset. The core only reads through it, and writes only from the
//! animation coordinator.

use crate::config::UpdateMode;
use crate::error::Collaborator;
use crate::geometry::{ItemGeometry, Size};
use crate::ids::{ItemId, TweenHandle};
use crate::outputs::{Outputs, TweenTarget, TweenValue};
use crate::padding::PaddingConfig;
use crate::tween::{FrameTime, TweenSpec};

/// Rendering/layout engine that lays items out in a row.
pub trait LayoutHost {
    /// Whatever the host needs to instantiate a new item.
    type Template;

    /// Reports the first required collaborator that is absent, if any.
    fn missing_collaborator(&self) -> Option<Collaborator> {
        None
    }

    /// Handle of the container itself, when the host lists it among children.
    fn container(&self) -> Option<ItemId> {
        None
    }

    /// Current children of the container in visual order.
    fn children(&self) -> Vec<ItemId>;

    /// Current size of an item as set on it (not including transform scale).
    fn measured_size(&self, item: ItemId) -> Option<Size>;

    /// Placement of an item in container-local space.
    fn item_geometry(&self, item: ItemId) -> Option<ItemGeometry>;

    fn viewport_width(&self) -> f32;

    /// Horizontal position of the container relative to the viewport.
    fn scroll_offset(&self) -> f32;
    fn set_scroll_offset(&mut self, offset: f32);

    /// Zero any residual scroll velocity.
    fn stop_inertia(&mut self);

    /// Returns false when the item no longer exists.
    fn set_item_size(&mut self, item: ItemId, size: Size) -> bool;

    fn set_padding(&mut self, padding: PaddingConfig);

    /// Synchronous re-flow of the container.
    fn force_relayout(&mut self);

    fn instantiate(&mut self, template: &Self::Template) -> Option<ItemId>;
    fn destroy(&mut self, item: ItemId);
}

/// Tween engine interpolating values over time.
pub trait AnimationEngine {
    fn animate(
        &mut self,
        target: TweenTarget,
        from: TweenValue,
        to: TweenValue,
        spec: TweenSpec,
    ) -> TweenHandle;

    /// One-shot timer; reported as `EngineEvent::DelayElapsed` when it fires.
    fn delayed_call(&mut self, delay: f32, mode: UpdateMode) -> TweenHandle;

    /// Returns true when a live tween was cancelled.
    fn cancel(&mut self, handle: TweenHandle) -> bool;

    fn is_live(&self, handle: TweenHandle) -> bool;

    fn live_count(&self) -> usize;

    fn cancel_all(&mut self);

    /// Advance all live tweens and report this frame's values and events.
    fn update(&mut self, frame: FrameTime) -> Outputs;
}
