//! Layout snapshots exchanged with JavaScript.
//!
//! JS measures its DOM, hands the carousel a [`LayoutSnapshot`], and applies
//! the returned [`HostWrite`]s. Writes are also folded back into the snapshot
//! so later reads within the same call observe them.

use centersnap_core::{
    Collaborator, ItemGeometry, ItemId, LayoutHost, PaddingConfig, Size,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutSnapshot {
    pub viewport_width: f32,
    pub scroll_offset: f32,
    pub spacing: f32,
    pub padding: PaddingConfig,
    pub items: Vec<ItemSnapshot>,
    /// Set by JS when the viewport or content element could not be found.
    pub missing: Option<Collaborator>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ItemSnapshot {
    pub id: u64,
    pub width: f32,
    pub height: f32,
    /// Left edge relative to the content element. Derived from the row when absent.
    #[serde(default)]
    pub left: Option<f32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostWrite {
    ScrollOffset { value: f32 },
    ItemSize { id: u64, width: f32, height: f32 },
    Padding { left: u32, right: u32 },
    StopInertia,
    Relayout,
    Instantiate { id: u64, width: f32, height: f32 },
    Destroy { id: u64 },
}

pub struct SnapshotHost<'a> {
    layout: LayoutSnapshot,
    writes: Vec<HostWrite>,
    next_id: &'a mut u64,
}

impl<'a> SnapshotHost<'a> {
    pub fn new(layout: LayoutSnapshot, next_id: &'a mut u64) -> Self {
        Self {
            layout,
            writes: Vec::new(),
            next_id,
        }
    }

    pub fn into_writes(self) -> Vec<HostWrite> {
        self.writes
    }

    fn item(&self, id: ItemId) -> Option<&ItemSnapshot> {
        self.layout.items.iter().find(|item| item.id == id.0)
    }

    fn row_left(&self, id: ItemId) -> Option<f32> {
        let mut left = self.layout.padding.left as f32;
        for item in &self.layout.items {
            if item.id == id.0 {
                return Some(item.left.unwrap_or(left));
            }
            left += item.width + self.layout.spacing;
        }
        None
    }
}

impl LayoutHost for SnapshotHost<'_> {
    type Template = Size;

    fn missing_collaborator(&self) -> Option<Collaborator> {
        self.layout.missing
    }

    fn children(&self) -> Vec<ItemId> {
        self.layout.items.iter().map(|item| ItemId(item.id)).collect()
    }

    fn measured_size(&self, item: ItemId) -> Option<Size> {
        self.item(item).map(|i| Size::new(i.width, i.height))
    }

    fn item_geometry(&self, item: ItemId) -> Option<ItemGeometry> {
        let size = self.measured_size(item)?;
        Some(ItemGeometry::from_left_edge(self.row_left(item)?, size))
    }

    fn viewport_width(&self) -> f32 {
        self.layout.viewport_width
    }

    fn scroll_offset(&self) -> f32 {
        self.layout.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.layout.scroll_offset = offset;
        self.writes.push(HostWrite::ScrollOffset { value: offset });
    }

    fn stop_inertia(&mut self) {
        self.writes.push(HostWrite::StopInertia);
    }

    fn set_item_size(&mut self, item: ItemId, size: Size) -> bool {
        let Some(entry) = self.layout.items.iter_mut().find(|i| i.id == item.0) else {
            return false;
        };
        entry.width = size.width;
        entry.height = size.height;
        self.writes.push(HostWrite::ItemSize {
            id: item.0,
            width: size.width,
            height: size.height,
        });
        true
    }

    fn set_padding(&mut self, padding: PaddingConfig) {
        self.layout.padding = padding;
        self.writes.push(HostWrite::Padding {
            left: padding.left,
            right: padding.right,
        });
    }

    fn force_relayout(&mut self) {
        // Explicit lefts are stale once sizes or padding change.
        for item in &mut self.layout.items {
            item.left = None;
        }
        self.writes.push(HostWrite::Relayout);
    }

    fn instantiate(&mut self, template: &Size) -> Option<ItemId> {
        let id = *self.next_id;
        *self.next_id += 1;
        self.layout.items.push(ItemSnapshot {
            id,
            width: template.width,
            height: template.height,
            left: None,
        });
        self.writes.push(HostWrite::Instantiate {
            id,
            width: template.width,
            height: template.height,
        });
        Some(ItemId(id))
    }

    fn destroy(&mut self, item: ItemId) {
        self.layout.items.retain(|i| i.id != item.0);
        self.writes.push(HostWrite::Destroy { id: item.0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> LayoutSnapshot {
        LayoutSnapshot {
            viewport_width: 300.0,
            spacing: 10.0,
            padding: PaddingConfig { left: 100, right: 100 },
            items: (1..=3)
                .map(|id| ItemSnapshot {
                    id,
                    width: 100.0,
                    height: 50.0,
                    left: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn geometry_follows_row_when_lefts_are_absent() {
        let mut next = 100;
        let host = SnapshotHost::new(row(), &mut next);
        let geometry = host.item_geometry(ItemId(3)).unwrap();
        // 100 padding + 2 * (100 + 10) + half width
        assert_eq!(geometry.position[0], 370.0);
    }

    #[test]
    fn explicit_left_wins_until_relayout() {
        let mut layout = row();
        layout.items[0].left = Some(40.0);
        let mut next = 100;
        let mut host = SnapshotHost::new(layout, &mut next);
        assert_eq!(host.item_geometry(ItemId(1)).unwrap().position[0], 90.0);

        host.force_relayout();
        assert_eq!(host.item_geometry(ItemId(1)).unwrap().position[0], 150.0);
    }

    #[test]
    fn writes_are_recorded_in_order() {
        let mut next = 100;
        let mut host = SnapshotHost::new(row(), &mut next);
        host.set_scroll_offset(-20.0);
        assert!(host.set_item_size(ItemId(2), Size::new(150.0, 75.0)));
        assert!(!host.set_item_size(ItemId(9), Size::new(1.0, 1.0)));
        let added = host.instantiate(&Size::new(80.0, 80.0)).unwrap();
        assert_eq!(added, ItemId(100));
        assert_eq!(host.scroll_offset(), -20.0);

        let writes = host.into_writes();
        assert_eq!(
            writes,
            vec![
                HostWrite::ScrollOffset { value: -20.0 },
                HostWrite::ItemSize {
                    id: 2,
                    width: 150.0,
                    height: 75.0
                },
                HostWrite::Instantiate {
                    id: 100,
                    width: 80.0,
                    height: 80.0
                },
            ]
        );
        assert_eq!(next, 101);
    }
}
