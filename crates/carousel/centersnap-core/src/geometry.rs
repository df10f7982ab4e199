//! Read-only geometry math over item rectangles.
//!
//! All coordinates are horizontal positions in the scrolling container's
//! local space, measured from the container's left edge.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::host::LayoutHost;
use crate::registry::ElementRegistry;

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn approx_eq(&self, other: &Size, eps: f32) -> bool {
        (self.width - other.width).abs() <= eps && (self.height - other.height).abs() <= eps
    }
}

impl Mul<f32> for Size {
    type Output = Size;

    fn mul(self, rhs: f32) -> Size {
        Size::new(self.width * rhs, self.height * rhs)
    }
}

/// Axis-aligned placement of one item relative to its container.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ItemGeometry {
    /// Pivot position in container-local space.
    pub position: [f32; 2],
    /// Unscaled rect size.
    pub size: Size,
    /// Pivot inside the rect, normalized (0,0 = bottom-left, 1,1 = top-right).
    pub pivot: [f32; 2],
    pub scale: [f32; 2],
}

impl ItemGeometry {
    /// Geometry for a rect whose left edge sits at `left`, centered pivot, no scale.
    pub fn from_left_edge(left: f32, size: Size) -> Self {
        Self {
            position: [left + size.width * 0.5, size.height * 0.5],
            size,
            pivot: [0.5, 0.5],
            scale: [1.0, 1.0],
        }
    }
}

/// Horizontal center of an item in container-local space.
#[inline]
pub fn center_offset_of(geometry: &ItemGeometry) -> f32 {
    geometry.position[0] + (0.5 - geometry.pivot[0]) * geometry.size.width * geometry.scale[0]
}

/// Item centers read at one consistent instant.
///
/// Entries are `None` for items the host could no longer measure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometrySnapshot {
    pub centers: Vec<Option<f32>>,
}

impl GeometrySnapshot {
    pub fn capture<H: LayoutHost + ?Sized>(host: &H, registry: &ElementRegistry) -> Self {
        let centers = registry
            .iter()
            .map(|item| host.item_geometry(item.id).map(|g| center_offset_of(&g)))
            .collect();
        Self { centers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pivot_reports_position() {
        let g = ItemGeometry::from_left_edge(100.0, Size::new(100.0, 40.0));
        assert_eq!(center_offset_of(&g), 150.0);
    }

    #[test]
    fn left_pivot_shifts_by_half_scaled_width() {
        let g = ItemGeometry {
            position: [10.0, 0.0],
            size: Size::new(80.0, 80.0),
            pivot: [0.0, 0.5],
            scale: [2.0, 1.0],
        };
        assert_eq!(center_offset_of(&g), 10.0 + 80.0);
    }

    #[test]
    fn right_pivot_moves_center_left() {
        let g = ItemGeometry {
            position: [200.0, 0.0],
            size: Size::new(50.0, 50.0),
            pivot: [1.0, 0.5],
            scale: [1.0, 1.0],
        };
        assert_eq!(center_offset_of(&g), 175.0);
    }

    #[test]
    fn size_scales_uniformly() {
        assert_eq!(Size::new(100.0, 60.0) * 1.5, Size::new(150.0, 90.0));
    }
}
