//! Animation ownership: one scroll tween, one size tween per item, one
//! deferred relayout.
//!
//! Every start on a target first cancels whatever the target's slot holds,
//! so a later caller always wins and no target ever has two live tweens.

use hashbrown::HashMap;

use crate::config::{CarouselConfig, UpdateMode};
use crate::easing::Easing;
use crate::error::CarouselError;
use crate::host::{AnimationEngine, LayoutHost};
use crate::ids::{ItemId, TweenHandle};
use crate::outputs::{EngineEvent, Outputs, TweenTarget, TweenValue};
use crate::registry::ElementRegistry;
use crate::tween::{FrameTime, TweenEngine, TweenSpec};

#[derive(Debug)]
pub struct AnimationCoordinator<E: AnimationEngine = TweenEngine> {
    engine: E,
    scroll_tween: Option<TweenHandle>,
    size_tweens: HashMap<ItemId, TweenHandle>,
    relayout_call: Option<TweenHandle>,

    duration: f32,
    easing: Easing,
    selected_scale: f32,
    size_update: UpdateMode,
    scroll_update: UpdateMode,
}

impl AnimationCoordinator<TweenEngine> {
    pub fn new(cfg: &CarouselConfig) -> Self {
        Self::with_engine(
            TweenEngine::with_capacity(cfg.tween_capacity, cfg.sequence_capacity),
            cfg,
        )
    }
}

impl<E: AnimationEngine> AnimationCoordinator<E> {
    pub fn with_engine(engine: E, cfg: &CarouselConfig) -> Self {
        Self {
            engine,
            scroll_tween: None,
            size_tweens: HashMap::new(),
            relayout_call: None,
            duration: cfg.tween_duration,
            easing: cfg.easing,
            selected_scale: cfg.selected_scale,
            size_update: cfg.size_update,
            scroll_update: cfg.scroll_update,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn selected_scale(&self) -> f32 {
        self.selected_scale
    }

    pub fn scroll_tween(&self) -> Option<TweenHandle> {
        self.scroll_tween.filter(|h| self.engine.is_live(*h))
    }

    pub fn size_tween(&self, item: ItemId) -> Option<TweenHandle> {
        self.size_tweens
            .get(&item)
            .copied()
            .filter(|h| self.engine.is_live(*h))
    }

    pub fn relayout_pending(&self) -> bool {
        self.relayout_call.is_some_and(|h| self.engine.is_live(h))
    }

    pub fn is_animating(&self) -> bool {
        self.engine.live_count() > 0
    }

    /// Cancel the live scroll tween, if any.
    pub fn cancel_scroll(&mut self) -> bool {
        match self.scroll_tween.take() {
            Some(handle) => self.engine.cancel(handle),
            None => false,
        }
    }

    fn cancel_size(&mut self, item: ItemId) {
        if let Some(handle) = self.size_tweens.remove(&item) {
            self.engine.cancel(handle);
        }
    }

    /// Drop every live tween and pending relayout.
    pub fn cancel_all(&mut self) {
        self.engine.cancel_all();
        self.scroll_tween = None;
        self.size_tweens.clear();
        self.relayout_call = None;
    }

    /// Move the container to `target`, either eased or immediately.
    pub fn move_scroll_to<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: f32,
        animated: bool,
    ) {
        self.cancel_scroll();
        if animated {
            let spec = TweenSpec::new(self.duration, self.easing).with_update(self.scroll_update);
            let handle = self.engine.animate(
                TweenTarget::ScrollOffset,
                TweenValue::Scalar(host.scroll_offset()),
                TweenValue::Scalar(target),
                spec,
            );
            self.scroll_tween = Some(handle);
        } else {
            host.set_scroll_offset(target);
        }
    }

    /// Grow `target` to `original * selected_scale` and return every other
    /// item to its original size.
    ///
    /// Animated changes defer the container re-flow until the tweens finish;
    /// immediate changes re-flow synchronously.
    pub fn set_selected_visual<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        registry: &ElementRegistry,
        target: ItemId,
        animated: bool,
    ) -> Result<(), CarouselError> {
        if !registry.contains(target) {
            return Err(CarouselError::StaleTarget { item: target });
        }

        let spec = TweenSpec::new(self.duration, self.easing).with_update(self.size_update);
        for item in registry.iter() {
            self.cancel_size(item.id);
            let goal = if item.id == target {
                item.original_size * self.selected_scale
            } else {
                item.original_size
            };
            if animated {
                let Some(current) = host.measured_size(item.id) else {
                    log::debug!("item {:?} vanished from host, skipping rescale", item.id);
                    continue;
                };
                let handle = self.engine.animate(
                    TweenTarget::ItemSize(item.id),
                    TweenValue::Size(current),
                    TweenValue::Size(goal),
                    spec,
                );
                self.size_tweens.insert(item.id, handle);
            } else {
                host.set_item_size(item.id, goal);
            }
        }

        if let Some(previous) = self.relayout_call.take() {
            self.engine.cancel(previous);
        }
        if animated {
            self.relayout_call = Some(self.engine.delayed_call(self.duration, self.size_update));
        } else {
            host.force_relayout();
        }
        Ok(())
    }

    /// Advance the engine one frame and write its values into the host.
    ///
    /// Values aimed at items that left the registry are dropped along with
    /// their tweens.
    pub fn tick<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        registry: &ElementRegistry,
        frame: FrameTime,
    ) -> Outputs {
        let out = self.engine.update(frame);

        for change in &out.changes {
            match (change.target, change.value) {
                (TweenTarget::ScrollOffset, TweenValue::Scalar(offset)) => {
                    host.set_scroll_offset(offset);
                }
                (TweenTarget::ItemSize(item), TweenValue::Size(size)) => {
                    if !registry.contains(item) || !host.set_item_size(item, size) {
                        log::debug!(
                            "{}; dropping tween {:?}",
                            CarouselError::StaleTarget { item },
                            change.handle
                        );
                        self.engine.cancel(change.handle);
                        if self.size_tweens.get(&item) == Some(&change.handle) {
                            self.size_tweens.remove(&item);
                        }
                    }
                }
                (target, value) => {
                    log::trace!("ignoring {value:?} for {target:?}");
                }
            }
        }

        for event in &out.events {
            match *event {
                EngineEvent::Completed { handle, target } => match target {
                    TweenTarget::ScrollOffset if self.scroll_tween == Some(handle) => {
                        self.scroll_tween = None;
                    }
                    TweenTarget::ItemSize(item) if self.size_tweens.get(&item) == Some(&handle) => {
                        self.size_tweens.remove(&item);
                    }
                    _ => {}
                },
                EngineEvent::DelayElapsed { handle } => {
                    if self.relayout_call == Some(handle) {
                        self.relayout_call = None;
                        host.force_relayout();
                    }
                }
            }
        }

        out
    }
}
