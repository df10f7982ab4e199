//! Side padding that lets the first and last items reach dead center.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaddingConfig {
    pub left: u32,
    pub right: u32,
}

/// Symmetric padding of `(viewport - reference) / 2`, floored at zero.
///
/// `reference_width` is the first item's width, or `None` before any item
/// exists, in which case `default_width` stands in. Halves round to even.
pub fn compute_padding(
    viewport_width: f32,
    reference_width: Option<f32>,
    default_width: f32,
) -> PaddingConfig {
    let item_width = reference_width.unwrap_or(default_width);
    let side = ((viewport_width - item_width) / 2.0).max(0.0);
    let side = if side.is_finite() {
        side.round_ties_even() as u32
    } else {
        0
    };
    PaddingConfig {
        left: side,
        right: side,
    }
}
