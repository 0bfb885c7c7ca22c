//! Natural cubic spline interpolation.

use super::linear::{check_points, linear_interpolate};
use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Polynomial coefficients for one spline segment:
/// `y = a + b·dx + c·dx² + d·dx³` with `dx = x - x_i`.
#[derive(Debug, Clone, Copy)]
struct SplineCoeffs<T: Float> {
    a: T,
    b: T,
    c: T,
    d: T,
}

/// Natural cubic spline (zero second derivative at both ends).
///
/// Points are sorted on construction; at least 3 distinct x-values are
/// required. [`Interpolator::interpolate`] rejects queries outside the
/// domain, while [`CubicSplineInterpolator::evaluate`] extends the boundary
/// polynomials and [`CubicSplineInterpolator::evaluate_clamped`] holds the
/// boundary values flat.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{CubicSplineInterpolator, Interpolator};
///
/// let interp = CubicSplineInterpolator::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
/// let y = interp.interpolate(1.5).unwrap();
/// assert!(y > 1.0 && y < 4.0);
/// assert_eq!(interp.evaluate_clamped(10.0), 9.0);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSplineInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    coeffs: Vec<SplineCoeffs<T>>,
}

impl<T: Float> CubicSplineInterpolator<T> {
    /// Builds the spline.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::LengthMismatch` for mismatched slices
    /// * `InterpolationError::InsufficientData` for fewer than 3 points
    /// * `InterpolationError::NonMonotonicData` for duplicate x-values
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.len() < 3 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 3,
            });
        }

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let (sorted_xs, sorted_ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        if let Some(index) = sorted_xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }

        let coeffs = Self::compute_coefficients(&sorted_xs, &sorted_ys);
        Ok(Self {
            xs: sorted_xs,
            ys: sorted_ys,
            coeffs,
        })
    }

    /// Solves the tridiagonal system for the second derivatives with the
    /// Thomas algorithm, then converts them to per-segment coefficients.
    fn compute_coefficients(xs: &[T], ys: &[T]) -> Vec<SplineCoeffs<T>> {
        let n = xs.len();
        let zero = T::zero();
        let two = T::one() + T::one();
        let six = two + two + two;

        let h: Vec<T> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        // Interior unknowns M[1..n-1]; M[0] = M[n-1] = 0.
        let m = n - 2;
        let mut c_prime = vec![zero; m];
        let mut d_prime = vec![zero; m];
        for k in 0..m {
            let i = k + 1;
            let diag = two * (h[i - 1] + h[i]);
            let rhs = six * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
            let (sub, prev_c, prev_d) = if k > 0 {
                (h[i - 1], c_prime[k - 1], d_prime[k - 1])
            } else {
                (zero, zero, zero)
            };
            let denom = diag - sub * prev_c;
            c_prime[k] = if k + 1 < m { h[i] / denom } else { zero };
            d_prime[k] = (rhs - sub * prev_d) / denom;
        }

        let mut second = vec![zero; n];
        for k in (0..m).rev() {
            second[k + 1] = d_prime[k] - c_prime[k] * second[k + 2];
        }

        (0..n - 1)
            .map(|i| SplineCoeffs {
                a: ys[i],
                b: (ys[i + 1] - ys[i]) / h[i] - h[i] * (two * second[i] + second[i + 1]) / six,
                c: second[i] / two,
                d: (second[i + 1] - second[i]) / (six * h[i]),
            })
            .collect()
    }

    /// Segment index `i` with `xs[i] <= x < xs[i+1]`, clamped to `[0, n-2]`.
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }

    /// Evaluates the spline, extending the boundary cubics outside the domain.
    pub fn evaluate(&self, x: T) -> T {
        if let Some(i) = self.xs.iter().position(|&xi| xi == x) {
            return self.ys[i];
        }
        let i = self.find_segment(x);
        let c = &self.coeffs[i];
        let dx = x - self.xs[i];
        c.a + dx * (c.b + dx * (c.c + dx * c.d))
    }

    /// Evaluates the spline, holding the boundary values flat outside the domain.
    pub fn evaluate_clamped(&self, x: T) -> T {
        let (x_min, x_max) = self.domain();
        if x <= x_min {
            self.ys[0]
        } else if x >= x_max {
            self.ys[self.ys.len() - 1]
        } else {
            self.evaluate(x)
        }
    }

    /// Sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Number of data points.
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

impl<T: Float> Interpolator<T> for CubicSplineInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if x < x_min || x > x_max {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.evaluate(x))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

/// One-shot natural cubic spline over sorted pillars.
///
/// One point returns that point and two points fall back to
/// [`linear_interpolate`]. Outside the range the boundary y-value is
/// returned when `extrapolate` is false; otherwise the boundary cubic is
/// extended.
///
/// ```
/// use pricer_core::math::interpolators::cubic_spline_interpolate;
///
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 1.0, 4.0];
/// assert_eq!(cubic_spline_interpolate(1.0, &xs, &ys, true).unwrap(), 1.0);
/// assert_eq!(cubic_spline_interpolate(5.0, &xs, &ys, false).unwrap(), 4.0);
/// ```
pub fn cubic_spline_interpolate<T: Float>(
    x: T,
    xs: &[T],
    ys: &[T],
    extrapolate: bool,
) -> Result<T, InterpolationError> {
    check_points(xs, ys)?;
    match xs.len() {
        1 => Ok(ys[0]),
        2 => linear_interpolate(x, xs, ys, extrapolate),
        _ => {
            let spline = CubicSplineInterpolator::new(xs, ys)?;
            Ok(if extrapolate {
                spline.evaluate(x)
            } else {
                spline.evaluate_clamped(x)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_requires_three_points() {
        assert_eq!(
            CubicSplineInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap_err(),
            InterpolationError::InsufficientData { got: 2, need: 3 }
        );
    }

    #[test]
    fn test_new_rejects_duplicate_x() {
        assert_eq!(
            CubicSplineInterpolator::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]).unwrap_err(),
            InterpolationError::NonMonotonicData { index: 2 }
        );
    }

    #[test]
    fn test_new_sorts_points() {
        let interp =
            CubicSplineInterpolator::new(&[3.0, 1.0, 2.0, 0.0], &[9.0, 1.0, 4.0, 0.0]).unwrap();
        assert_eq!(interp.xs(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_knots_reproduced() {
        let xs = [0.0, 0.5, 1.5, 3.0, 4.0];
        let ys = [1.0, -2.0, 4.0, 0.5, 3.0];
        let interp = CubicSplineInterpolator::new(&xs, &ys).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_eq!(interp.interpolate(*x).unwrap(), *y);
        }
    }

    #[test]
    fn test_three_point_closed_form() {
        // Natural spline through (0,0), (1,1), (2,4): M1 = 6*(3-1)/(2*2) = 3.
        // On [0,1]: y = x*(1 - 3/6) + (3/6)*x^3 = 0.5x + 0.5x^3.
        let interp = CubicSplineInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        let x = 0.5;
        assert_relative_eq!(interp.interpolate(x).unwrap(), 0.5 * x + 0.5 * x * x * x, epsilon = 1e-14);
    }

    #[test]
    fn test_linear_data_stays_linear() {
        let xs = [0.0, 1.0, 2.0, 3.0, 5.0];
        let ys = [1.0, 3.0, 5.0, 7.0, 11.0];
        let interp = CubicSplineInterpolator::new(&xs, &ys).unwrap();
        for x in [0.25, 1.5, 2.75, 4.0] {
            assert_relative_eq!(interp.interpolate(x).unwrap(), 1.0 + 2.0 * x, epsilon = 1e-12);
        }
        // Extended boundary cubic is linear too.
        assert_relative_eq!(interp.evaluate(6.0), 13.0, epsilon = 1e-12);
    }

    #[test]
    fn test_natural_boundary_second_derivative() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 4.0, 9.0];
        let interp = CubicSplineInterpolator::new(&xs, &ys).unwrap();
        let h = 1e-3;
        let d2 = (interp.evaluate(2.0 * h) - 2.0 * interp.evaluate(h) + interp.evaluate(0.0)) / (h * h);
        assert!(d2.abs() < 0.1, "second derivative at boundary = {}", d2);
    }

    #[test]
    fn test_first_derivative_continuous_at_knots() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 1.0, 4.0, 9.0, 16.0];
        let interp = CubicSplineInterpolator::new(&xs, &ys).unwrap();
        for &knot in &xs[1..xs.len() - 1] {
            let h = 1e-6;
            let left = (interp.evaluate(knot) - interp.evaluate(knot - h)) / h;
            let right = (interp.evaluate(knot + h) - interp.evaluate(knot)) / h;
            assert!((right - left).abs() < 1e-3, "kink at {}", knot);
        }
    }

    #[test]
    fn test_out_of_bounds_modes() {
        let interp = CubicSplineInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        assert!(matches!(
            interp.interpolate(2.1),
            Err(InterpolationError::OutOfBounds { .. })
        ));
        assert_eq!(interp.evaluate_clamped(-3.0), 0.0);
        assert_eq!(interp.evaluate_clamped(3.0), 4.0);
        assert!(interp.evaluate(3.0).is_finite());
    }

    #[test]
    fn test_free_function_fallbacks() {
        assert_eq!(cubic_spline_interpolate(9.0, &[1.0], &[2.0], true).unwrap(), 2.0);
        // Two points: linear, with extrapolation.
        assert_relative_eq!(
            cubic_spline_interpolate(3.0, &[0.0, 1.0], &[0.0, 2.0], true).unwrap(),
            6.0
        );
        assert_eq!(
            cubic_spline_interpolate(3.0, &[0.0, 1.0], &[0.0, 2.0], false).unwrap(),
            2.0
        );
        assert!(cubic_spline_interpolate::<f64>(1.0, &[], &[], true).is_err());
    }

    #[test]
    fn test_with_f32() {
        let interp =
            CubicSplineInterpolator::new(&[0.0f32, 1.0, 2.0, 3.0], &[0.0f32, 1.0, 4.0, 9.0]).unwrap();
        assert!(interp.interpolate(1.5f32).unwrap().is_finite());
    }
}
