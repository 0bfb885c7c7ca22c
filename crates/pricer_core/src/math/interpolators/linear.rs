//! Linear interpolation with optional linear extrapolation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Validates a pair of pillar slices shared by the free-function kernels.
pub(crate) fn check_points<T>(xs: &[T], ys: &[T]) -> Result<(), InterpolationError> {
    if xs.len() != ys.len() {
        return Err(InterpolationError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(InterpolationError::EmptyInput);
    }
    Ok(())
}

/// Value at `x` on the line through `(x1, y1)` and `(x2, y2)`.
///
/// A degenerate segment (`x1 == x2`) returns `y1`.
#[inline]
pub(crate) fn linear_segment<T: Float>(x: T, x1: T, y1: T, x2: T, y2: T) -> T {
    if x2 == x1 {
        return y1;
    }
    let slope = (y2 - y1) / (x2 - x1);
    y1 + slope * (x - x1)
}

/// Linear interpolation over sorted pillars.
///
/// The bracket is located with a bisect-left search. Outside the pillar
/// range the result is extrapolated from the two boundary points when
/// `extrapolate` is true, otherwise clamped to the boundary value.
///
/// # Errors
///
/// * `InterpolationError::LengthMismatch` if `xs` and `ys` differ in length
/// * `InterpolationError::EmptyInput` if no points are supplied
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::linear_interpolate;
///
/// let xs = [1.0, 2.0, 3.0];
/// let ys = [10.0, 20.0, 40.0];
///
/// assert_eq!(linear_interpolate(2.5, &xs, &ys, true).unwrap(), 30.0);
/// assert_eq!(linear_interpolate(4.0, &xs, &ys, true).unwrap(), 60.0);
/// assert_eq!(linear_interpolate(4.0, &xs, &ys, false).unwrap(), 40.0);
/// ```
pub fn linear_interpolate<T: Float>(
    x: T,
    xs: &[T],
    ys: &[T],
    extrapolate: bool,
) -> Result<T, InterpolationError> {
    check_points(xs, ys)?;
    let n = xs.len();
    if n == 1 {
        return Ok(ys[0]);
    }

    let idx = xs.partition_point(|&xi| xi < x);
    // Pillar hits return the stored value exactly.
    if idx < n && xs[idx] == x {
        return Ok(ys[idx]);
    }
    if idx == 0 {
        return Ok(if extrapolate {
            linear_segment(x, xs[0], ys[0], xs[1], ys[1])
        } else {
            ys[0]
        });
    }
    if idx >= n {
        return Ok(if extrapolate {
            linear_segment(x, xs[n - 2], ys[n - 2], xs[n - 1], ys[n - 1])
        } else {
            ys[n - 1]
        });
    }
    Ok(linear_segment(x, xs[idx - 1], ys[idx - 1], xs[idx], ys[idx]))
}

/// Indices of the two pillars bracketing `x`.
///
/// Below the first pillar this is `(0, 1)`, above the last `(n-2, n-1)`,
/// so callers extrapolate from the boundary pair. A single pillar yields
/// `(0, 0)`.
///
/// ```
/// use pricer_core::math::interpolators::find_bracketing_indices;
///
/// let ts = [0.25, 0.5, 1.0];
/// assert_eq!(find_bracketing_indices(0.1, &ts).unwrap(), (0, 1));
/// assert_eq!(find_bracketing_indices(0.75, &ts).unwrap(), (1, 2));
/// assert_eq!(find_bracketing_indices(2.0, &ts).unwrap(), (1, 2));
/// ```
pub fn find_bracketing_indices<T: Float>(
    x: T,
    xs: &[T],
) -> Result<(usize, usize), InterpolationError> {
    let n = xs.len();
    match n {
        0 => Err(InterpolationError::EmptyInput),
        1 => Ok((0, 0)),
        _ => {
            let idx = xs.partition_point(|&xi| xi < x);
            if idx == 0 {
                Ok((0, 1))
            } else if idx >= n {
                Ok((n - 2, n - 1))
            } else {
                Ok((idx - 1, idx))
            }
        }
    }
}

/// Piecewise linear interpolator.
///
/// Stores sorted (x, y) points. Queries outside the domain fail with
/// `OutOfBounds` unless extrapolation was enabled with
/// [`LinearInterpolator::with_extrapolation`].
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let xs: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
/// let ys = [0.0, 2.0, 4.0, 6.0];
///
/// let interp = LinearInterpolator::new(&xs, &ys).unwrap();
/// assert_eq!(interp.domain(), (0.0, 3.0));
/// assert!(interp.interpolate(4.0).is_err());
///
/// let interp = interp.with_extrapolation(true);
/// assert!((interp.interpolate(4.0).unwrap() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    extrapolate: bool,
}

impl<T: Float> LinearInterpolator<T> {
    /// Constructs an interpolator from unsorted points.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::LengthMismatch` for mismatched slices
    /// * `InterpolationError::InsufficientData` for fewer than 2 points
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let (sorted_xs, sorted_ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        Ok(Self {
            xs: sorted_xs,
            ys: sorted_ys,
            extrapolate: false,
        })
    }

    /// Enables or disables linear extrapolation beyond the domain.
    pub fn with_extrapolation(mut self, extrapolate: bool) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    /// Sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// y-values aligned with [`Self::xs`].
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false once constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if !self.extrapolate && (x < x_min || x > x_max) {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        linear_interpolate(x, &self.xs, &self.ys, true)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_kernel_interior() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 10.0, 30.0];
        assert_relative_eq!(linear_interpolate(0.5, &xs, &ys, true).unwrap(), 5.0);
        assert_relative_eq!(linear_interpolate(1.5, &xs, &ys, true).unwrap(), 20.0);
    }

    #[test]
    fn test_kernel_extrapolates_from_boundary_pairs() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 10.0, 30.0];
        assert_relative_eq!(linear_interpolate(-1.0, &xs, &ys, true).unwrap(), -10.0);
        assert_relative_eq!(linear_interpolate(3.0, &xs, &ys, true).unwrap(), 50.0);
    }

    #[test]
    fn test_kernel_clamps_without_extrapolation() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 10.0, 30.0];
        assert_eq!(linear_interpolate(-1.0, &xs, &ys, false).unwrap(), 0.0);
        assert_eq!(linear_interpolate(3.0, &xs, &ys, false).unwrap(), 30.0);
    }

    #[test]
    fn test_kernel_single_point() {
        assert_eq!(linear_interpolate(42.0, &[1.0], &[7.0], true).unwrap(), 7.0);
    }

    #[test]
    fn test_kernel_errors() {
        assert_eq!(
            linear_interpolate::<f64>(1.0, &[], &[], true),
            Err(InterpolationError::EmptyInput)
        );
        assert_eq!(
            linear_interpolate(1.0, &[0.0, 1.0], &[0.0], true),
            Err(InterpolationError::LengthMismatch { xs: 2, ys: 1 })
        );
    }

    #[test]
    fn test_kernel_degenerate_segment() {
        // Duplicate pillars resolve to the left value instead of dividing by zero.
        let xs = [1.0, 1.0];
        let ys = [3.0, 5.0];
        assert_eq!(linear_interpolate(2.0, &xs, &ys, true).unwrap(), 3.0);
    }

    #[test]
    fn test_bracketing_edges() {
        assert_eq!(find_bracketing_indices(5.0, &[1.0]).unwrap(), (0, 0));
        assert_eq!(
            find_bracketing_indices::<f64>(5.0, &[]),
            Err(InterpolationError::EmptyInput)
        );
        // A pillar hit brackets to its left segment.
        assert_eq!(find_bracketing_indices(0.5, &[0.25, 0.5, 1.0]).unwrap(), (0, 1));
    }

    #[test]
    fn test_struct_rejects_single_point() {
        assert_eq!(
            LinearInterpolator::new(&[1.0], &[1.0]).unwrap_err(),
            InterpolationError::InsufficientData { got: 1, need: 2 }
        );
    }

    #[test]
    fn test_struct_sorts_points() {
        let interp = LinearInterpolator::new(&[2.0, 0.0, 1.0], &[4.0, 0.0, 2.0]).unwrap();
        assert_eq!(interp.xs(), &[0.0, 1.0, 2.0]);
        assert_eq!(interp.ys(), &[0.0, 2.0, 4.0]);
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 3.0);
    }

    #[test]
    fn test_struct_out_of_bounds() {
        let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(matches!(
            interp.interpolate(1.5),
            Err(InterpolationError::OutOfBounds { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_pillars_reproduced_exactly(
            ys in proptest::collection::vec(-10.0f64..10.0, 2..12),
            extrapolate in any::<bool>(),
        ) {
            let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64 * 0.5 + 0.1).collect();
            for (x, y) in xs.iter().zip(ys.iter()) {
                let v = linear_interpolate(*x, &xs, &ys, extrapolate).unwrap();
                prop_assert_eq!(v, *y);
            }
        }

        #[test]
        fn prop_interior_within_neighbours(
            ys in proptest::collection::vec(-10.0f64..10.0, 2..12),
            frac in 0.0f64..1.0,
        ) {
            let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
            let x = frac * (xs.len() - 1) as f64;
            let (i, j) = find_bracketing_indices(x, &xs).unwrap();
            let v = linear_interpolate(x, &xs, &ys, true).unwrap();
            let lo = ys[i].min(ys[j]) - 1e-12;
            let hi = ys[i].max(ys[j]) + 1e-12;
            prop_assert!(v >= lo && v <= hi);
        }
    }
}
