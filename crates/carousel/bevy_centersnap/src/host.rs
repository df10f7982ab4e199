//! `LayoutHost` over bevy_ui nodes.
//!
//! Item sizes live in `Style.width/height` (`Val::Px`), the scroll offset in
//! the content node's `Style.left`, and padding in the content node's
//! `Style.padding`. Geometry comes from `GlobalTransform` relative to the
//! content node's left edge. Until bevy_ui has run a layout pass (or when no
//! `UiPlugin` is present) widths and positions are derived from the styles
//! of the row instead.

use std::collections::HashMap;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use centersnap_core::{
    Collaborator, ItemGeometry, ItemId, LayoutHost, PaddingConfig, Size,
};

use crate::components::{CenterSnapCarousel, ItemTemplate};

/// Bevy entities travel through the core as their bit representation.
pub fn item_id(entity: Entity) -> ItemId {
    ItemId(entity.to_bits())
}

pub fn entity_of(item: ItemId) -> Option<Entity> {
    Entity::try_from_bits(item.0).ok()
}

#[derive(SystemParam)]
pub struct UiNodes<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub nodes: Query<'w, 's, (&'static mut Style, &'static Node, &'static GlobalTransform)>,
    pub children: Query<'w, 's, &'static Children>,
}

pub struct UiRowHost<'a, 'w, 's> {
    ui: &'a mut UiNodes<'w, 's>,
    viewport: Option<Entity>,
    content: Option<Entity>,
    pending: &'a mut HashMap<Entity, Size>,
}

impl<'a, 'w, 's> UiRowHost<'a, 'w, 's> {
    pub fn new(
        ui: &'a mut UiNodes<'w, 's>,
        carousel: &CenterSnapCarousel,
        pending: &'a mut HashMap<Entity, Size>,
    ) -> Self {
        Self {
            ui,
            viewport: carousel.viewport,
            content: carousel.content,
            pending,
        }
    }

    fn px_or(val: Val, fallback: f32) -> f32 {
        match val {
            Val::Px(v) => v,
            _ => fallback,
        }
    }

    fn styled_size(style: &Style, node: &Node) -> Size {
        let rendered = node.size();
        Size::new(
            Self::px_or(style.width, rendered.x),
            Self::px_or(style.height, rendered.y),
        )
    }

    /// Walk the row left to right the way a flex row without wrapping would.
    fn styled_geometry(&self, entity: Entity) -> Option<ItemGeometry> {
        let content = self.content?;
        let (content_style, _, _) = self.ui.nodes.get(content).ok()?;
        let gap = Self::px_or(content_style.column_gap, 0.0);
        let mut left = Self::px_or(content_style.padding.left, 0.0);

        for &child in self.ui.children.get(content).ok()?.iter() {
            let Ok((style, node, _)) = self.ui.nodes.get(child) else {
                continue;
            };
            let size = Self::styled_size(style, node);
            if child == entity {
                return Some(ItemGeometry::from_left_edge(left, size));
            }
            left += size.width + gap;
        }
        None
    }
}

impl LayoutHost for UiRowHost<'_, '_, '_> {
    type Template = ItemTemplate;

    fn missing_collaborator(&self) -> Option<Collaborator> {
        let Some(viewport) = self.viewport else {
            return Some(Collaborator::Viewport);
        };
        if self.ui.nodes.get(viewport).is_err() {
            return Some(Collaborator::Viewport);
        }
        let Some((style, _, _)) = self
            .content
            .and_then(|content| self.ui.nodes.get(content).ok())
        else {
            return Some(Collaborator::Container);
        };
        if style.display != Display::Flex || style.flex_direction != FlexDirection::Row {
            return Some(Collaborator::LayoutGroup);
        }
        None
    }

    fn container(&self) -> Option<ItemId> {
        self.content.map(item_id)
    }

    fn children(&self) -> Vec<ItemId> {
        let Some(content) = self.content else {
            return Vec::new();
        };
        let Ok(children) = self.ui.children.get(content) else {
            return Vec::new();
        };
        children
            .iter()
            .filter(|&&child| self.ui.nodes.get(child).is_ok())
            .map(|&child| item_id(child))
            .collect()
    }

    fn measured_size(&self, item: ItemId) -> Option<Size> {
        let entity = entity_of(item)?;
        if let Some(size) = self.pending.get(&entity) {
            return Some(*size);
        }
        let (style, node, _) = self.ui.nodes.get(entity).ok()?;
        Some(Self::styled_size(style, node))
    }

    fn item_geometry(&self, item: ItemId) -> Option<ItemGeometry> {
        let entity = entity_of(item)?;
        let (_, node, transform) = self.ui.nodes.get(entity).ok()?;
        let (_, content_node, content_transform) = self.ui.nodes.get(self.content?).ok()?;
        if node.size().x <= 0.0 || content_node.size().x <= 0.0 {
            return self.styled_geometry(entity);
        }

        let left_edge = content_transform.translation().x - content_node.size().x * 0.5;
        let (scale, _, translation) = transform.to_scale_rotation_translation();
        let size = node.size();
        Some(ItemGeometry {
            position: [translation.x - left_edge, translation.y],
            size: Size::new(size.x, size.y),
            pivot: [0.5, 0.5],
            scale: [scale.x, scale.y],
        })
    }

    fn viewport_width(&self) -> f32 {
        self.viewport
            .and_then(|viewport| self.ui.nodes.get(viewport).ok())
            .map(|(style, node, _)| match node.size().x {
                laid_out if laid_out > 0.0 => laid_out,
                _ => Self::px_or(style.width, 0.0),
            })
            .unwrap_or(0.0)
    }

    fn scroll_offset(&self) -> f32 {
        self.content
            .and_then(|content| self.ui.nodes.get(content).ok())
            .map(|(style, _, _)| Self::px_or(style.left, 0.0))
            .unwrap_or(0.0)
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        let Some(content) = self.content else { return };
        if let Ok((mut style, _, _)) = self.ui.nodes.get_mut(content) {
            style.left = Val::Px(offset);
        }
    }

    fn stop_inertia(&mut self) {
        // Drags move `Style.left` directly; there is no velocity to zero.
    }

    fn set_item_size(&mut self, item: ItemId, size: Size) -> bool {
        let Some(entity) = entity_of(item) else {
            return false;
        };
        if let Ok((mut style, _, _)) = self.ui.nodes.get_mut(entity) {
            style.width = Val::Px(size.width);
            style.height = Val::Px(size.height);
            return true;
        }
        if let Some(pending) = self.pending.get_mut(&entity) {
            *pending = size;
            self.ui
                .commands
                .entity(entity)
                .add(move |id: Entity, world: &mut World| {
                    if let Some(mut style) = world.get_mut::<Style>(id) {
                        style.width = Val::Px(size.width);
                        style.height = Val::Px(size.height);
                    }
                });
            return true;
        }
        false
    }

    fn set_padding(&mut self, padding: PaddingConfig) {
        let Some(content) = self.content else { return };
        if let Ok((mut style, _, _)) = self.ui.nodes.get_mut(content) {
            style.padding.left = Val::Px(padding.left as f32);
            style.padding.right = Val::Px(padding.right as f32);
        }
    }

    fn force_relayout(&mut self) {
        // bevy_ui recomputes layout every frame after `Update`.
    }

    fn instantiate(&mut self, template: &ItemTemplate) -> Option<ItemId> {
        let content = self.content?;
        let entity = self
            .ui
            .commands
            .spawn(NodeBundle {
                style: Style {
                    width: Val::Px(template.size.width),
                    height: Val::Px(template.size.height),
                    flex_shrink: 0.0,
                    ..default()
                },
                background_color: template.color.into(),
                ..default()
            })
            .id();
        self.ui.commands.entity(content).add_child(entity);
        self.pending.insert(entity, template.size);
        Some(item_id(entity))
    }

    fn destroy(&mut self, item: ItemId) {
        let Some(entity) = entity_of(item) else { return };
        self.pending.remove(&entity);
        self.ui.commands.entity(entity).despawn_recursive();
    }
}
