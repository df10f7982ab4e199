//! In-memory horizontal layout group used as a carousel host in tests.
//!
//! Item sizes change immediately when set, but left edges only move on
//! `force_relayout`, like a real layout pass.

use centersnap_core::{
    Collaborator, ItemGeometry, ItemId, LayoutHost, PaddingConfig, Size,
};

/// Mutating host calls, recorded in order.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    StopInertia,
    SetScroll(f32),
    SetPadding(PaddingConfig),
    SetSize(ItemId, Size),
    Relayout,
    Instantiate(ItemId),
    Destroy(ItemId),
}

#[derive(Clone, Debug)]
struct RowItem {
    id: ItemId,
    size: Size,
    left: f32,
}

#[derive(Clone, Debug)]
pub struct RowLayout {
    viewport_width: f32,
    spacing: f32,
    padding: PaddingConfig,
    items: Vec<RowItem>,
    scroll_offset: f32,
    velocity: f32,
    next_id: u64,
    missing: Option<Collaborator>,
    calls: Vec<HostCall>,
}

impl RowLayout {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            viewport_width,
            spacing: 0.0,
            padding: PaddingConfig::default(),
            items: Vec::new(),
            scroll_offset: 0.0,
            velocity: 0.0,
            next_id: 1,
            missing: None,
            calls: Vec::new(),
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self.layout();
        self
    }

    pub fn with_items(mut self, sizes: &[Size]) -> Self {
        for &size in sizes {
            self.push(size);
        }
        self.layout();
        self
    }

    /// Pretend a collaborator was never wired up.
    pub fn without(mut self, collaborator: Collaborator) -> Self {
        self.missing = Some(collaborator);
        self
    }

    fn push(&mut self, size: Size) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(RowItem {
            id,
            size,
            left: 0.0,
        });
        id
    }

    fn layout(&mut self) {
        let mut x = self.padding.left as f32;
        for item in &mut self.items {
            item.left = x;
            x += item.size.width + self.spacing;
        }
    }

    /// Simulate a drag: move the content and leave residual velocity.
    pub fn drag_by(&mut self, dx: f32) {
        self.scroll_offset += dx;
        self.velocity = dx;
    }

    /// Scroll offset that puts item `index`'s current center under the viewport center.
    pub fn offset_centering(&self, index: usize) -> f32 {
        let item = &self.items[index];
        self.viewport_width * 0.5 - (item.left + item.size.width * 0.5)
    }

    /// Remove an item behind the controller's back.
    pub fn remove_externally(&mut self, id: ItemId) {
        self.items.retain(|item| item.id != id);
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn size_of(&self, id: ItemId) -> Option<Size> {
        self.items.iter().find(|item| item.id == id).map(|item| item.size)
    }

    pub fn size_at(&self, index: usize) -> Size {
        self.items[index].size
    }

    pub fn padding(&self) -> PaddingConfig {
        self.padding
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn relayout_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::Relayout))
            .count()
    }
}

impl LayoutHost for RowLayout {
    type Template = Size;

    fn missing_collaborator(&self) -> Option<Collaborator> {
        self.missing
    }

    fn children(&self) -> Vec<ItemId> {
        self.ids()
    }

    fn measured_size(&self, item: ItemId) -> Option<Size> {
        self.size_of(item)
    }

    fn item_geometry(&self, item: ItemId) -> Option<ItemGeometry> {
        self.items
            .iter()
            .find(|it| it.id == item)
            .map(|it| ItemGeometry::from_left_edge(it.left, it.size))
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
        self.calls.push(HostCall::SetScroll(offset));
    }

    fn stop_inertia(&mut self) {
        self.velocity = 0.0;
        self.calls.push(HostCall::StopInertia);
    }

    fn set_item_size(&mut self, item: ItemId, size: Size) -> bool {
        match self.items.iter_mut().find(|it| it.id == item) {
            Some(it) => {
                it.size = size;
                self.calls.push(HostCall::SetSize(item, size));
                true
            }
            None => false,
        }
    }

    fn set_padding(&mut self, padding: PaddingConfig) {
        self.padding = padding;
        self.calls.push(HostCall::SetPadding(padding));
    }

    fn force_relayout(&mut self) {
        self.layout();
        self.calls.push(HostCall::Relayout);
    }

    fn instantiate(&mut self, template: &Size) -> Option<ItemId> {
        let id = self.push(*template);
        self.calls.push(HostCall::Instantiate(id));
        Some(id)
    }

    fn destroy(&mut self, item: ItemId) {
        self.items.retain(|it| it.id != item);
        self.calls.push(HostCall::Destroy(item));
    }
}
