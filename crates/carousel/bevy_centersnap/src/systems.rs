use bevy::prelude::*;
use centersnap_core::{CarouselConfig, CarouselController, DragEvent, FrameTime, LayoutHost};

use crate::components::{CarouselCommand, CarouselDrag, CarouselState, CenterSnapCarousel};
use crate::host::{item_id, UiNodes, UiRowHost};

/// Attach a controller to each new carousel and start its deferred
/// initialization. Carousels with a missing viewport or content node end up
/// disabled.
pub fn activate_carousels_system(
    added: Query<(Entity, &CenterSnapCarousel), Without<CarouselState>>,
    mut ui: UiNodes,
) {
    for (entity, carousel) in added.iter() {
        let controller = CarouselController::new(carousel.config.clone()).or_else(|err| {
            error!("{err}; carousel {entity:?} falls back to default config");
            CarouselController::new(CarouselConfig::default())
        });
        let Ok(controller) = controller else { continue };

        let mut state = CarouselState::new(controller);
        {
            let host = UiRowHost::new(&mut ui, carousel, &mut state.pending);
            if let Err(err) = state.controller.activate(&host) {
                warn!("carousel {entity:?} not activated: {err}");
            }
        }
        ui.commands.entity(entity).insert(state);
    }
}

pub fn carousel_commands_system(
    mut events: EventReader<CarouselCommand>,
    mut carousels: Query<(&CenterSnapCarousel, &mut CarouselState)>,
    mut ui: UiNodes,
) {
    for command in events.read() {
        let Ok((carousel, state)) = carousels.get_mut(command.carousel()) else {
            debug!("carousel command for unknown entity {:?}", command.carousel());
            continue;
        };
        let state = state.into_inner();
        let mut host = UiRowHost::new(&mut ui, carousel, &mut state.pending);
        let controller = &mut state.controller;

        match command {
            CarouselCommand::Next(_) => controller.select_next(&mut host),
            CarouselCommand::Previous(_) => controller.select_previous(&mut host),
            CarouselCommand::Select { index, .. } => controller.select_index(&mut host, *index),
            CarouselCommand::Add { template, .. } => {
                if let Err(err) = controller.add_item(&mut host, template) {
                    warn!("failed to add carousel item: {err}");
                }
            }
            CarouselCommand::Remove { item, .. } => {
                if let Err(err) = controller.remove_item(&mut host, item_id(*item)) {
                    debug!("remove ignored: {err}");
                }
            }
        }
    }
}

/// Apply drag deltas to the content offset, then let the controller track
/// proximity or snap on release.
pub fn carousel_drag_system(
    mut drags: EventReader<CarouselDrag>,
    mut carousels: Query<(&CenterSnapCarousel, &mut CarouselState)>,
    mut ui: UiNodes,
) {
    for drag in drags.read() {
        let Ok((carousel, state)) = carousels.get_mut(drag.carousel()) else {
            continue;
        };
        let state = state.into_inner();
        if state.controller.is_disabled() {
            continue;
        }
        let mut host = UiRowHost::new(&mut ui, carousel, &mut state.pending);

        match *drag {
            CarouselDrag::Moved { delta, .. } => {
                let offset = host.scroll_offset() + delta;
                host.set_scroll_offset(offset);
                state.controller.on_drag(
                    &mut host,
                    &DragEvent {
                        position: [offset, 0.0],
                        delta: [delta, 0.0],
                    },
                );
            }
            CarouselDrag::Ended { .. } => {
                state
                    .controller
                    .on_end_drag(&mut host, &DragEvent::default());
            }
        }
    }
}

/// Advance initialization stages and animations. Size tweens follow real
/// time, the scroll snap follows virtual time.
pub fn tick_carousels_system(
    virtual_time: Res<Time<Virtual>>,
    real_time: Res<Time<Real>>,
    mut carousels: Query<(&CenterSnapCarousel, &mut CarouselState)>,
    mut ui: UiNodes,
) {
    let frame = FrameTime::new(virtual_time.delta_seconds(), real_time.delta_seconds());
    for (carousel, state) in carousels.iter_mut() {
        let state = state.into_inner();
        state
            .pending
            .retain(|entity, _| ui.nodes.get(*entity).is_err());
        let mut host = UiRowHost::new(&mut ui, carousel, &mut state.pending);
        state.controller.tick(&mut host, frame);
    }
}
