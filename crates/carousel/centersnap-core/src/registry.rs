//! Ordered item list with each item's original (unscaled) size.

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;
use crate::geometry::Size;
use crate::host::LayoutHost;
use crate::ids::ItemId;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CarouselItem {
    pub id: ItemId,
    /// Captured once when the item enters the registry.
    pub original_size: Size,
}

/// Items in visual left-to-right order.
#[derive(Clone, Debug, Default)]
pub struct ElementRegistry {
    items: Vec<CarouselItem>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repopulate from the host's current children, capturing original sizes.
    ///
    /// Children the host cannot measure are skipped. Returns the item count.
    pub fn initialize<H: LayoutHost + ?Sized>(&mut self, host: &H) -> usize {
        self.items.clear();
        let container = host.container();
        for child in host.children() {
            if Some(child) == container {
                continue;
            }
            match host.measured_size(child) {
                Some(original_size) => self.items.push(CarouselItem {
                    id: child,
                    original_size,
                }),
                None => log::debug!("skipping unmeasurable child {child:?}"),
            }
        }
        self.items.len()
    }

    /// Instantiate `template` under the container and append it.
    pub fn add<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        template: &H::Template,
    ) -> Result<ItemId, CarouselError> {
        let id = host.instantiate(template).ok_or(CarouselError::Configuration {
            missing: crate::error::Collaborator::Container,
        })?;
        let original_size = match host.measured_size(id) {
            Some(size) => size,
            None => {
                host.destroy(id);
                return Err(CarouselError::StaleTarget { item: id });
            }
        };
        self.items.push(CarouselItem { id, original_size });
        Ok(id)
    }

    /// Remove an item, returning its former index.
    pub fn remove(&mut self, id: ItemId) -> Option<(usize, CarouselItem)> {
        let index = self.index_of(id)?;
        Some((index, self.items.remove(index)))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, index: usize) -> Option<&CarouselItem> {
        self.items.get(index)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn original_size(&self, id: ItemId) -> Option<Size> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.original_size)
    }

    /// Width padding is computed from: the first item's current measured
    /// width, or its original width if the host lost track of it.
    pub fn reference_width<H: LayoutHost + ?Sized>(&self, host: &H) -> Option<f32> {
        let first = self.items.first()?;
        let size = host.measured_size(first.id).unwrap_or(first.original_size);
        Some(size.width)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CarouselItem> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
