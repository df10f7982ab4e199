//! Carousel state machine.
//!
//! ```text
//! Uninitialized --activate--> PendingFirstLayout --tick--> PendingSecondLayout --tick--> Settled
//! Settled --next/prev--> Settled
//! Settled --drag--> Dragging(h) --drag--> Dragging(h') --drag end--> Settled
//! any --deactivate--> Uninitialized
//! ```
//!
//! A missing collaborator at activation moves the controller to `Disabled`
//! for good.

use serde::{Deserialize, Serialize};

use crate::config::CarouselConfig;
use crate::coordinator::AnimationCoordinator;
use crate::error::{CarouselError, Collaborator};
use crate::geometry::center_offset_of;
use crate::host::{AnimationEngine, LayoutHost};
use crate::ids::ItemId;
use crate::outputs::Outputs;
use crate::padding::{compute_padding, PaddingConfig};
use crate::proximity::ProximityResolver;
use crate::registry::ElementRegistry;
use crate::tween::{FrameTime, TweenEngine};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    /// Waiting for the host's first layout pass before measuring items.
    PendingFirstLayout,
    /// Padding applied; waiting for a second pass before the initial centering.
    PendingSecondLayout,
    Settled,
    Dragging {
        highlight: usize,
    },
    Disabled {
        missing: Collaborator,
    },
}

/// Raw pointer data forwarded by the input source.
///
/// The controller re-reads the live scroll offset from the host, so the
/// payload is informational only.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DragEvent {
    pub position: [f32; 2],
    pub delta: [f32; 2],
}

#[derive(Debug)]
pub struct CarouselController<E: AnimationEngine = TweenEngine> {
    config: CarouselConfig,
    phase: Phase,
    registry: ElementRegistry,
    coordinator: AnimationCoordinator<E>,
    selected_index: usize,
    padding: PaddingConfig,
}

impl CarouselController<TweenEngine> {
    pub fn new(config: CarouselConfig) -> Result<Self, CarouselError> {
        config.validate()?;
        let coordinator = AnimationCoordinator::new(&config);
        Ok(Self::from_parts(config, coordinator))
    }
}

impl<E: AnimationEngine> CarouselController<E> {
    /// Controller driving a host-provided animation engine.
    pub fn with_engine(config: CarouselConfig, engine: E) -> Result<Self, CarouselError> {
        config.validate()?;
        let coordinator = AnimationCoordinator::with_engine(engine, &config);
        Ok(Self::from_parts(config, coordinator))
    }

    fn from_parts(config: CarouselConfig, coordinator: AnimationCoordinator<E>) -> Self {
        Self {
            config,
            phase: Phase::Uninitialized,
            registry: ElementRegistry::new(),
            coordinator,
            selected_index: 0,
            padding: PaddingConfig::default(),
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Item currently emphasized: the drag highlight while dragging,
    /// otherwise the selection. `None` for an empty carousel.
    pub fn highlight_index(&self) -> Option<usize> {
        if self.registry.is_empty() {
            return None;
        }
        match self.phase {
            Phase::Dragging { highlight } => Some(highlight),
            _ => Some(self.selected_index),
        }
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.registry.get(self.selected_index).map(|item| item.id)
    }

    pub fn item_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn coordinator(&self) -> &AnimationCoordinator<E> {
        &self.coordinator
    }

    pub fn padding(&self) -> PaddingConfig {
        self.padding
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.phase, Phase::Disabled { .. })
    }

    pub fn is_animating(&self) -> bool {
        self.coordinator.is_animating()
    }

    fn is_interactive(&self) -> bool {
        matches!(self.phase, Phase::Settled | Phase::Dragging { .. })
    }

    /// Validate collaborators and schedule the two-stage initialization.
    ///
    /// A missing collaborator disables the controller permanently.
    pub fn activate<H: LayoutHost + ?Sized>(&mut self, host: &H) -> Result<(), CarouselError> {
        if let Phase::Disabled { missing } = self.phase {
            return Err(CarouselError::Configuration { missing });
        }
        if let Some(missing) = host.missing_collaborator() {
            let err = CarouselError::Configuration { missing };
            log::error!("{err}");
            self.coordinator.cancel_all();
            self.registry.clear();
            self.phase = Phase::Disabled { missing };
            return Err(err);
        }
        self.coordinator.cancel_all();
        self.selected_index = 0;
        self.phase = Phase::PendingFirstLayout;
        log::debug!("carousel activated, waiting for first layout pass");
        Ok(())
    }

    /// Tear down: cancel every live tween and forget all items.
    pub fn deactivate(&mut self) {
        if self.is_disabled() {
            return;
        }
        self.coordinator.cancel_all();
        self.registry.clear();
        self.selected_index = 0;
        self.phase = Phase::Uninitialized;
        log::debug!("carousel deactivated");
    }

    /// Per-frame entry point: runs pending initialization stages, then
    /// advances animations.
    pub fn tick<H: LayoutHost + ?Sized>(&mut self, host: &mut H, frame: FrameTime) -> Outputs {
        match self.phase {
            Phase::Uninitialized | Phase::Disabled { .. } => return Outputs::default(),
            Phase::PendingFirstLayout => {
                host.force_relayout();
                let count = self.registry.initialize(&*host);
                self.apply_padding(host);
                host.force_relayout();
                self.phase = Phase::PendingSecondLayout;
                log::debug!("discovered {count} carousel items");
            }
            Phase::PendingSecondLayout => {
                if !self.registry.is_empty() {
                    self.selected_index = 0;
                    self.commit_center(host, false);
                }
                self.phase = Phase::Settled;
            }
            Phase::Settled | Phase::Dragging { .. } => {}
        }
        self.coordinator.tick(host, &self.registry, frame)
    }

    pub fn select_next<H: LayoutHost + ?Sized>(&mut self, host: &mut H) {
        if self.selected_index + 1 < self.registry.len() {
            self.select_index(host, self.selected_index + 1);
        }
    }

    pub fn select_previous<H: LayoutHost + ?Sized>(&mut self, host: &mut H) {
        if self.selected_index > 0 {
            self.select_index(host, self.selected_index - 1);
        }
    }

    /// Jump to `index` with an animated re-center; out-of-range is a no-op.
    pub fn select_index<H: LayoutHost + ?Sized>(&mut self, host: &mut H, index: usize) {
        if !self.is_interactive() || index >= self.registry.len() {
            return;
        }
        self.selected_index = index;
        self.phase = Phase::Settled;
        self.commit_center(host, true);
    }

    /// Drag-progress handler: track the nearest item and rescale it without
    /// touching the scroll offset.
    pub fn on_drag<H: LayoutHost + ?Sized>(&mut self, host: &mut H, event: &DragEvent) {
        if !self.is_interactive() || self.registry.is_empty() {
            return;
        }
        log::trace!("drag {:?}", event.delta);

        let highlight = match self.phase {
            Phase::Dragging { highlight } => highlight,
            _ => {
                // The user's drag owns the scroll offset from here on.
                self.coordinator.cancel_scroll();
                self.phase = Phase::Dragging {
                    highlight: self.selected_index,
                };
                self.selected_index
            }
        };

        let Some(nearest) = ProximityResolver::resolve(&*host, &self.registry) else {
            return;
        };
        if nearest != highlight {
            self.phase = Phase::Dragging { highlight: nearest };
            if let Some(item) = self.registry.get(nearest).map(|item| item.id) {
                let result = self
                    .coordinator
                    .set_selected_visual(host, &self.registry, item, true);
                drop_stale(result);
            }
        }
    }

    /// Drag-end handler: kill inertia, commit the nearest item and snap to it.
    pub fn on_end_drag<H: LayoutHost + ?Sized>(&mut self, host: &mut H, event: &DragEvent) {
        if !self.is_interactive() || self.registry.is_empty() {
            return;
        }
        log::trace!("drag end at {:?}", event.position);

        host.stop_inertia();
        let nearest =
            ProximityResolver::resolve(&*host, &self.registry).unwrap_or(self.selected_index);
        self.selected_index = nearest;
        self.phase = Phase::Settled;
        self.commit_center(host, true);
    }

    /// Instantiate a new item at the end of the row. It is not selected.
    pub fn add_item<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        template: &H::Template,
    ) -> Result<ItemId, CarouselError> {
        if let Phase::Disabled { missing } = self.phase {
            return Err(CarouselError::Configuration { missing });
        }
        let id = self.registry.add(host, template)?;
        let previous = self.padding;
        self.apply_padding(host);
        host.force_relayout();
        // New padding shifts the whole row under the selected item.
        if self.phase == Phase::Settled && self.registry.len() > 1 && self.padding != previous {
            self.commit_center(host, true);
        }
        Ok(id)
    }

    /// Remove an item, keeping the selection on a valid index.
    ///
    /// A settled carousel re-centers on its selection afterwards. Mid-drag the
    /// offset belongs to the user until the drag ends.
    pub fn remove_item<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        item: ItemId,
    ) -> Result<(), CarouselError> {
        if let Phase::Disabled { missing } = self.phase {
            return Err(CarouselError::Configuration { missing });
        }
        let (index, _) = self
            .registry
            .remove(item)
            .ok_or(CarouselError::StaleTarget { item })?;
        host.destroy(item);

        if index < self.selected_index {
            self.selected_index -= 1;
        }
        let last = self.registry.len().saturating_sub(1);
        self.selected_index = self.selected_index.min(last);
        if let Phase::Dragging { highlight } = self.phase {
            self.phase = Phase::Dragging {
                highlight: highlight.min(last),
            };
        }

        self.apply_padding(host);
        host.force_relayout();
        if self.phase == Phase::Settled && !self.registry.is_empty() {
            self.commit_center(host, true);
        }
        Ok(())
    }

    fn apply_padding<H: LayoutHost + ?Sized>(&mut self, host: &mut H) {
        let padding = compute_padding(
            host.viewport_width(),
            self.registry.reference_width(&*host),
            self.config.default_item_width,
        );
        host.set_padding(padding);
        self.padding = padding;
        log::debug!(
            "Set padding - left: {}, right: {}",
            padding.left,
            padding.right
        );
    }

    fn commit_center<H: LayoutHost + ?Sized>(&mut self, host: &mut H, animated: bool) {
        let result = self.center_on(host, self.selected_index, animated);
        drop_stale(result);
    }

    /// Scroll so item `index` sits at the viewport center and emphasize it.
    ///
    /// Animated moves aim at the geometry of the current frame; the rescale
    /// lands while the scroll tween runs. Immediate moves rescale and re-flow
    /// first, so the item ends up exactly centered at its emphasized size.
    fn center_on<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
        animated: bool,
    ) -> Result<(), CarouselError> {
        let item = self
            .registry
            .get(index)
            .map(|item| item.id)
            .ok_or(CarouselError::EmptyCarousel)?;

        if animated {
            let target = centering_offset(&*host, item)?;
            self.coordinator.move_scroll_to(host, target, true);
            self.coordinator
                .set_selected_visual(host, &self.registry, item, true)
        } else {
            self.coordinator
                .set_selected_visual(host, &self.registry, item, false)?;
            let target = centering_offset(&*host, item)?;
            self.coordinator.move_scroll_to(host, target, false);
            Ok(())
        }
    }
}

fn centering_offset<H: LayoutHost + ?Sized>(
    host: &H,
    item: ItemId,
) -> Result<f32, CarouselError> {
    let geometry = host
        .item_geometry(item)
        .ok_or(CarouselError::StaleTarget { item })?;
    Ok(host.viewport_width() * 0.5 - center_offset_of(&geometry))
}

/// Stale targets and empty carousels are expected mid-interaction; never surfaced.
fn drop_stale(result: Result<(), CarouselError>) {
    if let Err(err) = result {
        log::debug!("dropped carousel animation: {err}");
    }
}
