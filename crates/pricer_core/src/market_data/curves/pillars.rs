//! Interpolant shared by the rate and forward curves.

use crate::math::interpolators::{linear_interpolate, CubicSplineInterpolator};
use crate::types::InterpolationError;

/// Curve interpolant by number of pillars.
///
/// One pillar is flat, two are joined linearly and three or more use a
/// natural cubic spline. Queries outside the pillar range are clamped to the
/// boundary value.
#[derive(Debug, Clone, Default)]
pub(crate) enum PillarInterpolant {
    #[default]
    Empty,
    Flat(f64),
    Linear([f64; 2], [f64; 2]),
    Spline(CubicSplineInterpolator<f64>),
}

impl PillarInterpolant {
    /// Builds from `(time, value)` pillars in any order.
    pub(crate) fn build(mut points: Vec<(f64, f64)>) -> Result<Self, InterpolationError> {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(index) = points.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }
        match points.as_slice() {
            [] => Ok(PillarInterpolant::Empty),
            [(_, y)] => Ok(PillarInterpolant::Flat(*y)),
            [(x0, y0), (x1, y1)] => Ok(PillarInterpolant::Linear([*x0, *x1], [*y0, *y1])),
            _ => {
                let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
                Ok(PillarInterpolant::Spline(CubicSplineInterpolator::new(&xs, &ys)?))
            }
        }
    }

    /// Clamped value at `t`; `None` when there are no pillars.
    pub(crate) fn value(&self, t: f64) -> Option<f64> {
        match self {
            PillarInterpolant::Empty => None,
            PillarInterpolant::Flat(y) => Some(*y),
            PillarInterpolant::Linear(xs, ys) => linear_interpolate(t, xs, ys, false).ok(),
            PillarInterpolant::Spline(spline) => Some(spline.evaluate_clamped(t)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states() {
        assert!(PillarInterpolant::build(vec![]).unwrap().value(1.0).is_none());
        assert_eq!(
            PillarInterpolant::build(vec![(0.5, 0.03)]).unwrap().value(9.0),
            Some(0.03)
        );
        let two = PillarInterpolant::build(vec![(1.0, 0.04), (0.0, 0.02)]).unwrap();
        assert!((two.value(0.5).unwrap() - 0.03).abs() < 1e-15);
        assert_eq!(two.value(5.0), Some(0.04));
        assert_eq!(two.value(-1.0), Some(0.02));
        let three = PillarInterpolant::build(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)]).unwrap();
        assert!(matches!(three, PillarInterpolant::Spline(_)));
        assert_eq!(three.value(3.0), Some(5.0));
    }

    #[test]
    fn test_duplicate_times_rejected() {
        assert!(matches!(
            PillarInterpolant::build(vec![(1.0, 0.01), (1.0, 0.02)]),
            Err(InterpolationError::NonMonotonicData { index: 1 })
        ));
    }
}
