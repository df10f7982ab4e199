//! Built-in time-sliced tween engine.
//!
//! Tweens never block: each `update` advances every live tween by the frame's
//! delta on its own clock and reports the interpolated values. Completed
//! tweens and fired delays are dropped in the same update.

use serde::{Deserialize, Serialize};

use crate::config::UpdateMode;
use crate::easing::Easing;
use crate::host::AnimationEngine;
use crate::ids::{HandleAllocator, TweenHandle};
use crate::outputs::{Change, EngineEvent, Outputs, TweenTarget, TweenValue};

/// Duration/easing/clock of a single tween.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TweenSpec {
    /// Seconds.
    pub duration: f32,
    pub easing: Easing,
    #[serde(default)]
    pub update: UpdateMode,
}

impl TweenSpec {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            update: UpdateMode::Scaled,
        }
    }

    pub fn with_update(mut self, update: UpdateMode) -> Self {
        self.update = update;
        self
    }
}

/// Time elapsed since the previous frame, on both clocks.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FrameTime {
    pub delta: f32,
    pub unscaled_delta: f32,
}

impl FrameTime {
    pub fn new(delta: f32, unscaled_delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta,
        }
    }

    /// Same delta on both clocks.
    pub fn uniform(delta: f32) -> Self {
        Self::new(delta, delta)
    }

    #[inline]
    pub fn for_mode(&self, mode: UpdateMode) -> f32 {
        match mode {
            UpdateMode::Scaled => self.delta,
            UpdateMode::Unscaled => self.unscaled_delta,
        }
    }
}

#[derive(Debug)]
struct Tween {
    handle: TweenHandle,
    target: TweenTarget,
    from: TweenValue,
    to: TweenValue,
    spec: TweenSpec,
    elapsed: f32,
}

#[derive(Debug)]
struct Delay {
    handle: TweenHandle,
    delay: f32,
    update: UpdateMode,
    elapsed: f32,
}

#[derive(Debug, Default)]
pub struct TweenEngine {
    ids: HandleAllocator,
    tweens: Vec<Tween>,
    delays: Vec<Delay>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate room for `tweens` live tweens and `delays` pending delayed calls.
    pub fn with_capacity(tweens: usize, delays: usize) -> Self {
        Self {
            ids: HandleAllocator::new(),
            tweens: Vec::with_capacity(tweens),
            delays: Vec::with_capacity(delays),
        }
    }

    /// Number of live interpolating tweens writing to `target`.
    pub fn live_on(&self, target: TweenTarget) -> usize {
        self.tweens.iter().filter(|t| t.target == target).count()
    }
}

impl AnimationEngine for TweenEngine {
    fn animate(
        &mut self,
        target: TweenTarget,
        from: TweenValue,
        to: TweenValue,
        spec: TweenSpec,
    ) -> TweenHandle {
        let handle = self.ids.alloc();
        self.tweens.push(Tween {
            handle,
            target,
            from,
            to,
            spec,
            elapsed: 0.0,
        });
        log::trace!("tween {handle:?} started on {target:?}");
        handle
    }

    fn delayed_call(&mut self, delay: f32, mode: UpdateMode) -> TweenHandle {
        let handle = self.ids.alloc();
        self.delays.push(Delay {
            handle,
            delay,
            update: mode,
            elapsed: 0.0,
        });
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.tweens.len() + self.delays.len();
        self.tweens.retain(|t| t.handle != handle);
        self.delays.retain(|d| d.handle != handle);
        let cancelled = before != self.tweens.len() + self.delays.len();
        if cancelled {
            log::trace!("tween {handle:?} cancelled");
        }
        cancelled
    }

    fn is_live(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
            || self.delays.iter().any(|d| d.handle == handle)
    }

    fn live_count(&self) -> usize {
        self.tweens.len() + self.delays.len()
    }

    fn cancel_all(&mut self) {
        self.tweens.clear();
        self.delays.clear();
    }

    fn update(&mut self, frame: FrameTime) -> Outputs {
        let mut out = Outputs::default();

        self.tweens.retain_mut(|tween| {
            tween.elapsed += frame.for_mode(tween.spec.update).max(0.0);
            let linear = if tween.spec.duration <= 0.0 {
                1.0
            } else {
                (tween.elapsed / tween.spec.duration).clamp(0.0, 1.0)
            };
            let value = if linear >= 1.0 {
                tween.to
            } else {
                tween.from.lerp(&tween.to, tween.spec.easing.apply(linear))
            };
            out.push_change(Change {
                handle: tween.handle,
                target: tween.target,
                value,
            });
            if linear >= 1.0 {
                out.push_event(EngineEvent::Completed {
                    handle: tween.handle,
                    target: tween.target,
                });
                false
            } else {
                true
            }
        });

        self.delays.retain_mut(|delay| {
            delay.elapsed += frame.for_mode(delay.update).max(0.0);
            if delay.elapsed >= delay.delay {
                out.push_event(EngineEvent::DelayElapsed {
                    handle: delay.handle,
                });
                false
            } else {
                true
            }
        });

        out
    }
}
