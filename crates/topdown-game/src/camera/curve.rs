//! Zoom response curves
//!
//! A curve maps the normalized zoom value onto the [0, 1] blend used for every
//! camera rig parameter.

use serde::{Deserialize, Serialize};

/// Monotonic mapping from normalized zoom to rig blend
pub trait ZoomCurve {
    fn evaluate(&self, value: f32) -> f32;
}

impl<F> ZoomCurve for F
where
    F: Fn(f32) -> f32,
{
    fn evaluate(&self, value: f32) -> f32 {
        self(value)
    }
}

/// Identity curve
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LinearCurve;

impl ZoomCurve for LinearCurve {
    fn evaluate(&self, value: f32) -> f32 {
        value
    }
}

/// Errors building a sampled curve
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("zoom curve needs at least one key")]
    Empty,

    #[error("zoom curve key {0} is not finite")]
    NonFinite(usize),

    #[error("zoom curve key {0} is not after the previous key")]
    Unsorted(usize),
}

/// A single keyframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise-linear curve through sorted keyframes, clamped at both ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f32; 2]>", into = "Vec<[f32; 2]>")]
pub struct SampledCurve {
    keys: Vec<CurveKey>,
}

impl SampledCurve {
    /// Build a curve from keys sorted by strictly increasing time
    pub fn new(keys: Vec<CurveKey>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (i, key) in keys.iter().enumerate() {
            if !key.time.is_finite() || !key.value.is_finite() {
                return Err(CurveError::NonFinite(i));
            }
            if i > 0 && key.time <= keys[i - 1].time {
                return Err(CurveError::Unsorted(i));
            }
        }
        Ok(Self { keys })
    }

    /// Build a curve from `[time, value]` pairs
    pub fn from_pairs(pairs: &[[f32; 2]]) -> Result<Self, CurveError> {
        Self::new(
            pairs
                .iter()
                .map(|&[time, value]| CurveKey { time, value })
                .collect(),
        )
    }

    /// Keyframes in time order
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }
}

impl ZoomCurve for SampledCurve {
    fn evaluate(&self, value: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if value.is_nan() || value <= first.time {
            return first.value;
        }
        if value >= last.time {
            return last.value;
        }

        // First key strictly after `value`; the clamps above keep it in 1..len
        let upper = self.keys.partition_point(|key| key.time <= value);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let t = (value - a.time) / (b.time - a.time);
        a.value + (b.value - a.value) * t
    }
}

impl TryFrom<Vec<[f32; 2]>> for SampledCurve {
    type Error = CurveError;

    fn try_from(pairs: Vec<[f32; 2]>) -> Result<Self, Self::Error> {
        Self::from_pairs(&pairs)
    }
}

impl From<SampledCurve> for Vec<[f32; 2]> {
    fn from(curve: SampledCurve) -> Self {
        curve.keys.iter().map(|k| [k.time, k.value]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_is_identity() {
        assert_eq!(LinearCurve.evaluate(0.3), 0.3);
    }

    #[test]
    fn test_closure_curve() {
        let squared = |v: f32| v * v;
        assert_eq!(squared.evaluate(0.5), 0.25);
    }

    #[test]
    fn test_sampled_interpolates_and_clamps() {
        let curve = SampledCurve::from_pairs(&[[0.0, 0.0], [0.5, 0.2], [1.0, 1.0]]).unwrap();
        assert_eq!(curve.evaluate(-1.0), 0.0);
        assert_eq!(curve.evaluate(2.0), 1.0);
        assert!((curve.evaluate(0.25) - 0.1).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 0.6).abs() < 1e-6);
        assert_eq!(curve.evaluate(0.5), 0.2);
    }

    #[test]
    fn test_nan_input_returns_first_key() {
        let curve = SampledCurve::from_pairs(&[[0.0, 0.1], [0.5, 0.2], [1.0, 1.0]]).unwrap();
        assert_eq!(curve.evaluate(f32::NAN), 0.1);
        assert_eq!(curve.evaluate(f32::INFINITY), 1.0);
        assert_eq!(curve.evaluate(f32::NEG_INFINITY), 0.1);
    }

    #[test]
    fn test_single_key_is_constant() {
        let curve = SampledCurve::from_pairs(&[[0.4, 0.7]]).unwrap();
        assert_eq!(curve.evaluate(0.0), 0.7);
        assert_eq!(curve.evaluate(1.0), 0.7);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert_eq!(SampledCurve::from_pairs(&[]), Err(CurveError::Empty));
        assert_eq!(
            SampledCurve::from_pairs(&[[0.0, 0.0], [0.0, 1.0]]),
            Err(CurveError::Unsorted(1))
        );
        assert_eq!(
            SampledCurve::from_pairs(&[[0.0, f32::NAN]]),
            Err(CurveError::NonFinite(0))
        );
    }
}
