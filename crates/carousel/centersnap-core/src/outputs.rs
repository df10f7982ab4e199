//! Output contracts from the tween engine.
//!
//! Outputs carry only this frame's interpolated values, keyed by target, and
//! a separate list of lifecycle events. The coordinator applies changes to
//! the layout host.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::ids::{ItemId, TweenHandle};

/// What a tween writes to.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// The container's horizontal scroll offset.
    ScrollOffset,
    /// One item's rendered size.
    ItemSize(ItemId),
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TweenValue {
    Scalar(f32),
    Size(Size),
}

impl TweenValue {
    /// Interpolate; mismatched kinds keep the left value.
    pub fn lerp(&self, to: &TweenValue, t: f32) -> TweenValue {
        match (self, to) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => TweenValue::Scalar(a + (b - a) * t),
            (TweenValue::Size(a), TweenValue::Size(b)) => TweenValue::Size(Size::new(
                a.width + (b.width - a.width) * t,
                a.height + (b.height - a.height) * t,
            )),
            _ => *self,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            TweenValue::Scalar(v) => Some(*v),
            TweenValue::Size(_) => None,
        }
    }
}

/// One interpolated value for a live tween this frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Change {
    pub handle: TweenHandle,
    pub target: TweenTarget,
    pub value: TweenValue,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum EngineEvent {
    /// The tween reached its end value this frame and is no longer live.
    Completed {
        handle: TweenHandle,
        target: TweenTarget,
    },
    DelayElapsed {
        handle: TweenHandle,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<EngineEvent>,
}

impl Outputs {
    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
