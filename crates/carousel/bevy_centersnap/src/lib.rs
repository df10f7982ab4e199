use bevy::prelude::*;

pub mod components;
pub mod host;
pub mod systems;

pub use components::{
    CarouselCommand, CarouselDrag, CarouselState, CenterSnapCarousel, ItemTemplate,
};
pub use host::{entity_of, item_id, UiNodes, UiRowHost};

/// Drives every [`CenterSnapCarousel`] in the world: activation, commands,
/// drag input, then the per-frame tick.
pub struct CenterSnapPlugin;

impl Plugin for CenterSnapPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CarouselCommand>()
            .add_event::<CarouselDrag>()
            .add_systems(
                Update,
                (
                    systems::activate_carousels_system,
                    systems::carousel_commands_system,
                    systems::carousel_drag_system,
                    systems::tick_carousels_system,
                )
                    .chain(),
            );
    }
}
