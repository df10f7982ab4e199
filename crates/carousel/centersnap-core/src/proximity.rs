//! Nearest-to-center selection.

use crate::geometry::GeometrySnapshot;
use crate::host::LayoutHost;
use crate::registry::ElementRegistry;

/// Distance between an item's center and the viewport center, given the
/// container's scroll offset.
#[inline]
pub fn distance_to_center(center: f32, scroll_offset: f32, viewport_center: f32) -> f32 {
    ((-scroll_offset + viewport_center) - center).abs()
}

/// Index of the item whose center is closest to the viewport center.
///
/// Ties go to the lowest index. Unmeasurable (`None`) or non-finite centers
/// are skipped; `None` is returned when nothing could be measured.
pub fn nearest_index(
    centers: &[Option<f32>],
    scroll_offset: f32,
    viewport_center: f32,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, center) in centers.iter().enumerate() {
        let Some(center) = center else { continue };
        let d = distance_to_center(*center, scroll_offset, viewport_center);
        if !d.is_finite() {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Scans the registry against live host geometry.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProximityResolver;

impl ProximityResolver {
    /// Read every item at one instant and pick the nearest.
    pub fn resolve<H: LayoutHost + ?Sized>(host: &H, registry: &ElementRegistry) -> Option<usize> {
        if registry.is_empty() {
            return None;
        }
        let snapshot = GeometrySnapshot::capture(host, registry);
        nearest_index(
            &snapshot.centers,
            host.scroll_offset(),
            host.viewport_width() * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize, width: f32, pad: f32) -> Vec<Option<f32>> {
        (0..n)
            .map(|i| Some(pad + width * i as f32 + width * 0.5))
            .collect()
    }

    #[test]
    fn picks_item_under_viewport_center() {
        // Five 100-wide items after 100 padding, viewport 300 (center 150).
        let centers = row(5, 100.0, 100.0);
        assert_eq!(nearest_index(&centers, 0.0, 150.0), Some(0));
        assert_eq!(nearest_index(&centers, -300.0, 150.0), Some(3));
        assert_eq!(nearest_index(&centers, -10_000.0, 150.0), Some(4));
        assert_eq!(nearest_index(&centers, 10_000.0, 150.0), Some(0));
    }

    #[test]
    fn ties_go_to_lower_index() {
        let centers = row(5, 100.0, 100.0);
        // Viewport center sits exactly between items 1 and 2.
        assert_eq!(nearest_index(&centers, -150.0, 150.0), Some(1));
    }

    #[test]
    fn rescanning_is_idempotent() {
        let centers = row(7, 80.0, 60.0);
        for offset in [-400.0, -123.0, 0.0, 37.5] {
            let first = nearest_index(&centers, offset, 150.0);
            assert_eq!(first, nearest_index(&centers, offset, 150.0));
            let idx = first.unwrap();
            assert!(idx < centers.len());
        }
    }

    #[test]
    fn unmeasured_items_are_skipped() {
        let centers = vec![None, Some(400.0), None];
        assert_eq!(nearest_index(&centers, 0.0, 150.0), Some(1));
        assert_eq!(nearest_index(&[None, None], 0.0, 150.0), None);
        assert_eq!(nearest_index(&[], 0.0, 150.0), None);
    }
}
