//! Carousel configuration.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::CarouselError;

/// Which clock a tween advances on.
///
/// `Scaled` follows the host's (possibly paused or slowed) game time, while
/// `Unscaled` keeps running on real time.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    #[default]
    Scaled,
    Unscaled,
}

/// Tunables for one carousel instance.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarouselConfig {
    /// Size multiplier applied to the selected item.
    pub selected_scale: f32,
    /// Duration of snap, rescale and deferred relayout, in seconds.
    pub tween_duration: f32,
    pub easing: Easing,
    /// Reference width used for padding before any item exists.
    pub default_item_width: f32,

    /// Initial capacity hints for the tween engine.
    pub tween_capacity: usize,
    pub sequence_capacity: usize,

    pub size_update: UpdateMode,
    pub scroll_update: UpdateMode,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            selected_scale: 1.5,
            tween_duration: 0.5,
            easing: Easing::OutCubic,
            default_item_width: 100.0,
            tween_capacity: 500,
            sequence_capacity: 250,
            size_update: UpdateMode::Unscaled,
            scroll_update: UpdateMode::Scaled,
        }
    }
}

impl CarouselConfig {
    /// Parse a JSON config blob; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CarouselError> {
        let cfg: CarouselConfig =
            serde_json::from_str(json).map_err(|e| CarouselError::ConfigParse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        if !(self.selected_scale.is_finite() && self.selected_scale > 0.0) {
            return Err(CarouselError::InvalidConfig(format!(
                "selected_scale must be positive, got {}",
                self.selected_scale
            )));
        }
        if !(self.tween_duration.is_finite() && self.tween_duration >= 0.0) {
            return Err(CarouselError::InvalidConfig(format!(
                "tween_duration must be non-negative, got {}",
                self.tween_duration
            )));
        }
        if !(self.default_item_width.is_finite() && self.default_item_width > 0.0) {
            return Err(CarouselError::InvalidConfig(format!(
                "default_item_width must be positive, got {}",
                self.default_item_width
            )));
        }
        if let Easing::CubicBezier(ctrl) = self.easing {
            if !(0.0..=1.0).contains(&ctrl[0]) || !(0.0..=1.0).contains(&ctrl[2]) {
                return Err(CarouselError::InvalidConfig(
                    "cubic bezier x control points must lie in [0, 1]".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = CarouselConfig::default();
        assert_eq!(cfg.selected_scale, 1.5);
        assert_eq!(cfg.tween_duration, 0.5);
        assert_eq!(cfg.easing, Easing::OutCubic);
        assert_eq!(cfg.default_item_width, 100.0);
        assert_eq!(cfg.size_update, UpdateMode::Unscaled);
        assert_eq!(cfg.scroll_update, UpdateMode::Scaled);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = CarouselConfig::from_json(r#"{ "selected_scale": 2.0, "easing": "linear" }"#)
            .unwrap();
        assert_eq!(cfg.selected_scale, 2.0);
        assert_eq!(cfg.easing, Easing::Linear);
        assert_eq!(cfg.tween_duration, 0.5);
    }

    #[test]
    fn rejects_non_positive_scale() {
        let err = CarouselConfig::from_json(r#"{ "selected_scale": 0.0 }"#).unwrap_err();
        assert!(matches!(err, CarouselError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = CarouselConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, CarouselError::ConfigParse(_)));
    }
}
