//! Easing functions for camera transitions.
//!
//! All curves map `[0, 1]` onto `[0, 1]` with `f(0) = 0` and `f(1) = 1`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quartic ease-out: `1 - (1 - t)^4`. Fast departure, gentle arrival.
    QuarticOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control value.
        c1: f32,
        /// Second control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default easing for camera flights.
    pub const DEFAULT: Self = Self::QuarticOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            Self::Linear => t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::QuarticOut => {
                let omt = 1.0 - t;
                let omt2 = omt * omt;
                1.0 - omt2 * omt2
            }
            Self::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for f in [
            EasingFunction::Linear,
            EasingFunction::QuadraticOut,
            EasingFunction::QuarticOut,
            EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 },
        ] {
            assert_eq!(f.evaluate(0.0), 0.0);
            assert!((f.evaluate(1.0) - 1.0).abs() < 1e-6, "{f:?}");
        }
    }

    #[test]
    fn test_quartic_out() {
        let quart = EasingFunction::QuarticOut;
        assert_eq!(quart.evaluate(0.5), 0.9375); // 1 - 0.5^4
        let quad = EasingFunction::QuadraticOut;
        assert!(quart.evaluate(0.1) > quad.evaluate(0.1));
    }

    #[test]
    fn test_quartic_out_is_monotonic() {
        let quart = EasingFunction::QuarticOut;
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = quart.evaluate(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_input_clamping() {
        let quart = EasingFunction::QuarticOut;
        assert_eq!(quart.evaluate(-0.5), 0.0);
        assert_eq!(quart.evaluate(1.5), 1.0);
        assert_eq!(EasingFunction::Linear.evaluate(2.0), 1.0);
    }

    #[test]
    fn test_default_is_quartic_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::QuarticOut);
    }
}
