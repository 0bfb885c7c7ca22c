//! Bilinear interpolation over rectangular grids.

use super::linear::linear_interpolate;
use crate::types::InterpolationError;
use num_traits::Float;

/// Checks that `zs` has one row per x and one column per y.
fn check_grid<T, R: AsRef<[T]>>(
    xs: &[T],
    ys: &[T],
    zs: &[R],
) -> Result<(), InterpolationError> {
    if zs.len() != xs.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "Grid rows ({}) must match x-axis length ({})",
            zs.len(),
            xs.len()
        )));
    }
    for (i, row) in zs.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid row {} length ({}) must match y-axis length ({})",
                i,
                row.len(),
                ys.len()
            )));
        }
    }
    Ok(())
}

/// Two-pass linear interpolation on a grid `zs[i][j] = z(xs[i], ys[j])`.
///
/// Each grid column is first interpolated along x, then the resulting
/// values are interpolated along y. `extrapolate` applies to both passes
/// with the same meaning as in [`linear_interpolate`].
///
/// # Errors
///
/// * `InterpolationError::EmptyInput` if either axis is empty
/// * `InterpolationError::InvalidInput` if the grid shape does not match
///
/// ```
/// use pricer_core::math::interpolators::interpolate_2d;
///
/// let xs = [0.0, 1.0];
/// let ys = [0.0, 1.0];
/// let zs = vec![vec![0.0, 1.0], vec![2.0, 3.0]];
/// let z: f64 = interpolate_2d(0.5, 0.5, &xs, &ys, &zs, true).unwrap();
/// assert!((z - 1.5).abs() < 1e-12);
/// ```
pub fn interpolate_2d<T: Float, R: AsRef<[T]>>(
    x: T,
    y: T,
    xs: &[T],
    ys: &[T],
    zs: &[R],
    extrapolate: bool,
) -> Result<T, InterpolationError> {
    if xs.is_empty() || ys.is_empty() {
        return Err(InterpolationError::EmptyInput);
    }
    check_grid(xs, ys, zs)?;

    let mut column = Vec::with_capacity(xs.len());
    let mut z_at_x = Vec::with_capacity(ys.len());
    for j in 0..ys.len() {
        column.clear();
        column.extend(zs.iter().map(|row| row.as_ref()[j]));
        z_at_x.push(linear_interpolate(x, xs, &column, extrapolate)?);
    }
    linear_interpolate(y, ys, &z_at_x, extrapolate)
}

/// Bilinear interpolator for a fixed grid.
///
/// The grid is stored as `zs[i][j] = z(xs[i], ys[j])`; queries outside the
/// grid are rejected. Use [`interpolate_2d`] for clamping or extrapolation.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::BilinearInterpolator;
///
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 1.0];
/// let zs = [&[0.0, 1.0][..], &[2.0, 3.0][..], &[4.0, 5.0][..]];
///
/// let interp = BilinearInterpolator::new(&xs, &ys, &zs).unwrap();
/// let z: f64 = interp.interpolate(0.5, 0.5).unwrap();
/// assert!((z - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BilinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    zs: Vec<Vec<T>>,
}

impl<T: Float> BilinearInterpolator<T> {
    /// Builds the interpolator from sorted axes and a matching grid.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InsufficientData` - fewer than 2 points on an axis
    /// * `InterpolationError::InvalidInput` - grid dimensions don't match axis lengths
    pub fn new(xs: &[T], ys: &[T], zs: &[&[T]]) -> Result<Self, InterpolationError> {
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }
        if ys.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: ys.len(),
                need: 2,
            });
        }
        check_grid(xs, ys, zs)?;

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs: zs.iter().map(|row| row.to_vec()).collect(),
        })
    }

    /// Interpolates at `(x, y)`:
    ///
    /// ```text
    /// z = (1-u)(1-v)*z00 + u*(1-v)*z10 + (1-u)*v*z01 + u*v*z11
    /// ```
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBounds` if `(x, y)` is outside the grid.
    pub fn interpolate(&self, x: T, y: T) -> Result<T, InterpolationError> {
        Self::check_bounds(x, self.domain_x())?;
        Self::check_bounds(y, self.domain_y())?;

        let i = Self::cell_index(&self.xs, x);
        let j = Self::cell_index(&self.ys, y);

        let u = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        let v = (y - self.ys[j]) / (self.ys[j + 1] - self.ys[j]);

        let z00 = self.zs[i][j];
        let z10 = self.zs[i + 1][j];
        let z01 = self.zs[i][j + 1];
        let z11 = self.zs[i + 1][j + 1];

        let one = T::one();
        Ok((one - u) * (one - v) * z00 + u * (one - v) * z10 + (one - u) * v * z01 + u * v * z11)
    }

    fn check_bounds(value: T, (lo, hi): (T, T)) -> Result<(), InterpolationError> {
        if value < lo || value > hi {
            return Err(InterpolationError::OutOfBounds {
                x: value.to_f64().unwrap_or(f64::NAN),
                min: lo.to_f64().unwrap_or(f64::NAN),
                max: hi.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    #[inline]
    fn cell_index(axis: &[T], value: T) -> usize {
        let pos = axis.partition_point(|&a| a <= value);
        if pos == 0 {
            0
        } else if pos >= axis.len() {
            axis.len() - 2
        } else {
            pos - 1
        }
    }

    /// Valid range along x.
    #[inline]
    pub fn domain_x(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Valid range along y.
    #[inline]
    pub fn domain_y(&self) -> (T, T) {
        (self.ys[0], self.ys[self.ys.len() - 1])
    }

    /// Grid values, row-major by x.
    #[inline]
    pub fn zs(&self) -> &[Vec<T>] {
        &self.zs
    }
}
