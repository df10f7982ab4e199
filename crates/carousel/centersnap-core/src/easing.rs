//! Easing curves mapping normalized time [0, 1] to eased progress.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    InCubic,
    #[default]
    OutCubic,
    InOutCubic,
    OutQuad,
    /// CSS-style timing curve with control points (x1, y1, x2, y2).
    CubicBezier([f32; 4]),
}

impl Easing {
    /// Apply the curve to `t`; input is clamped and endpoints are exact.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::InCubic => t * t * t,
            Easing::OutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Easing::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicBezier(ctrl) => bezier_ease_t(t, ctrl[0], ctrl[1], ctrl[2], ctrl[3]),
        }
    }
}

#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Invert the x polynomial by bisection, then evaluate y.
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::OutQuad,
        Easing::CubicBezier([0.25, 0.1, 0.25, 1.0]),
    ];

    #[test]
    fn endpoints_are_exact() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?}");
            assert_eq!(e.apply(1.0), 1.0, "{e:?}");
            assert_eq!(e.apply(-3.0), 0.0, "{e:?}");
            assert_eq!(e.apply(7.0), 1.0, "{e:?}");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for e in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = e.apply(i as f32 / 100.0);
                assert!(v + 1e-5 >= prev, "{e:?} dipped at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn out_cubic_front_loads_progress() {
        assert!((Easing::OutCubic.apply(0.5) - 0.875).abs() < 1e-6);
        assert!(Easing::InCubic.apply(0.5) < 0.5);
    }

    #[test]
    fn linear_bezier_matches_identity() {
        let e = Easing::CubicBezier([0.0, 0.0, 1.0, 1.0]);
        assert!((e.apply(0.3) - 0.3).abs() < 1e-6);
    }
}
