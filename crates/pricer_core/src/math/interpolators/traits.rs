//! Common interface for one-dimensional interpolators.

use crate::types::InterpolationError;
use num_traits::Float;

/// A one-dimensional interpolant built from sorted data points.
///
/// Implementations are generic over `T: Float` so the same curve can be
/// queried with `f64` or with dual numbers for sensitivity checks.
pub trait Interpolator<T: Float> {
    /// Evaluates the interpolant at `x`.
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBounds` when `x` is outside [`Self::domain`]
    /// and the implementation does not extrapolate.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Inclusive `(min, max)` range of the x-coordinates.
    fn domain(&self) -> (T, T);

    /// Whether `x` lies inside [`Self::domain`].
    fn contains(&self, x: T) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }
}
