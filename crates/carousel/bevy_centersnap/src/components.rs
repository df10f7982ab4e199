use std::collections::HashMap;

use bevy::prelude::*;
use centersnap_core::{CarouselConfig, CarouselController, Size};

/// Marks an entity as a carousel and names its viewport and content nodes.
///
/// The content node's children are the carousel items; its `Style.left`
/// is the scroll offset.
#[derive(Component, Debug, Clone, Default)]
pub struct CenterSnapCarousel {
    pub viewport: Option<Entity>,
    pub content: Option<Entity>,
    pub config: CarouselConfig,
}

/// Runtime state attached on activation.
#[derive(Component, Debug)]
pub struct CarouselState {
    pub controller: CarouselController,
    /// Items spawned this frame whose components are not queryable yet.
    pub(crate) pending: HashMap<Entity, Size>,
}

impl CarouselState {
    pub fn new(controller: CarouselController) -> Self {
        Self {
            controller,
            pending: HashMap::new(),
        }
    }
}

/// Blueprint for items added at runtime.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    pub size: Size,
    pub color: Color,
}

#[derive(Event, Debug, Clone)]
pub enum CarouselCommand {
    Next(Entity),
    Previous(Entity),
    Select { carousel: Entity, index: usize },
    Add { carousel: Entity, template: ItemTemplate },
    Remove { carousel: Entity, item: Entity },
}

impl CarouselCommand {
    pub fn carousel(&self) -> Entity {
        match self {
            CarouselCommand::Next(carousel) | CarouselCommand::Previous(carousel) => *carousel,
            CarouselCommand::Select { carousel, .. }
            | CarouselCommand::Add { carousel, .. }
            | CarouselCommand::Remove { carousel, .. } => *carousel,
        }
    }
}

/// Pointer drag input for a carousel. Moves and ends share one stream so
/// they are handled in the order they were sent.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum CarouselDrag {
    /// Horizontal movement in logical pixels.
    Moved { carousel: Entity, delta: f32 },
    Ended { carousel: Entity },
}

impl CarouselDrag {
    pub fn carousel(&self) -> Entity {
        match self {
            CarouselDrag::Moved { carousel, .. } | CarouselDrag::Ended { carousel } => *carousel,
        }
    }
}
