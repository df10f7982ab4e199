//! Centersnap Core (engine-agnostic)
//!
//! Keeps exactly one item of a horizontally scrolling row centered in its
//! viewport. Hosts implement [`LayoutHost`] (measurement, sizing, padding,
//! scroll offset) and feed drag/navigation events plus frame ticks into a
//! [`CarouselController`]. Animation runs through an [`AnimationEngine`];
//! [`TweenEngine`] is the built-in time-sliced implementation.

pub mod config;
pub mod controller;
pub mod coordinator;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod host;
pub mod ids;
pub mod outputs;
pub mod padding;
pub mod proximity;
pub mod registry;
pub mod tween;

// Re-exports for consumers (adapters)
pub use config::{CarouselConfig, UpdateMode};
pub use controller::{CarouselController, DragEvent, Phase};
pub use coordinator::AnimationCoordinator;
pub use easing::Easing;
pub use error::{CarouselError, Collaborator};
pub use geometry::{center_offset_of, GeometrySnapshot, ItemGeometry, Size};
pub use host::{AnimationEngine, LayoutHost};
pub use ids::{ItemId, TweenHandle};
pub use outputs::{Change, EngineEvent, Outputs, TweenTarget, TweenValue};
pub use padding::{compute_padding, PaddingConfig};
pub use proximity::{nearest_index, ProximityResolver};
pub use registry::{CarouselItem, ElementRegistry};
pub use tween::{FrameTime, TweenEngine, TweenSpec};
