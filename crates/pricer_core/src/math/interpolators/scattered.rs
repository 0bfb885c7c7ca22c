//! Piecewise-linear interpolation over scattered `(x, y, z)` points.
//!
//! Points sharing an x-coordinate form a slice (for a volatility surface:
//! one maturity, several strikes). Adjacent slices are stitched into a strip
//! of triangles. Where a slice spans a narrower y range than its neighbours,
//! the pockets between the strips and the convex hull are triangulated too,
//! so the whole hull is covered. A query is resolved with barycentric
//! weights inside the triangle that contains it. Queries outside the hull
//! snap to the nearest slice and then to the nearest y on that slice.

use crate::types::InterpolationError;

const BARYCENTRIC_TOL: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Clone)]
struct Slice {
    x: f64,
    /// Sorted by `y`.
    points: Vec<Point>,
}

/// Scattered-data linear interpolator with nearest-neighbour fallback.
///
/// Results are rounded to 4 decimal places.
///
/// ```
/// use pricer_core::math::interpolators::ScatteredLinearInterpolator;
///
/// let points = [
///     (30.0, 1.00, 0.10),
///     (30.0, 1.10, 0.12),
///     (90.0, 1.00, 0.14),
///     (90.0, 1.10, 0.16),
/// ];
/// let interp = ScatteredLinearInterpolator::new(&points).unwrap();
/// assert_eq!(interp.interpolate(60.0, 1.05), 0.13);
/// // Outside the hull: nearest slice, then nearest point on it.
/// assert_eq!(interp.interpolate(365.0, 1.50), 0.16);
/// ```
#[derive(Debug, Clone)]
pub struct ScatteredLinearInterpolator {
    slices: Vec<Slice>,
    triangles: Vec<[Point; 3]>,
}

impl ScatteredLinearInterpolator {
    /// Builds the interpolator from `(x, y, z)` triples in any order.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::EmptyInput` for no points
    /// * `InterpolationError::InvalidInput` for non-finite coordinates
    pub fn new(points: &[(f64, f64, f64)]) -> Result<Self, InterpolationError> {
        if points.is_empty() {
            return Err(InterpolationError::EmptyInput);
        }
        if let Some((x, y, z)) = points
            .iter()
            .find(|(x, y, z)| !(x.is_finite() && y.is_finite() && z.is_finite()))
        {
            return Err(InterpolationError::InvalidInput(format!(
                "Non-finite scattered point ({}, {}, {})",
                x, y, z
            )));
        }

        let mut sorted: Vec<Point> = points.iter().map(|&(x, y, z)| Point { x, y, z }).collect();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

        let mut slices: Vec<Slice> = Vec::new();
        for p in sorted {
            match slices.last_mut() {
                Some(slice) if slice.x == p.x => slice.points.push(p),
                _ => slices.push(Slice {
                    x: p.x,
                    points: vec![p],
                }),
            }
        }

        let mut triangles: Vec<[Point; 3]> = slices
            .windows(2)
            .flat_map(|pair| Self::strip(&pair[0].points, &pair[1].points))
            .collect();
        if slices.len() > 2 {
            let tops: Vec<Point> = slices.iter().filter_map(|s| s.points.last().copied()).collect();
            let bottoms: Vec<Point> = slices.iter().filter_map(|s| s.points.first().copied()).collect();
            triangles.extend(Self::hull_pockets(&tops, true));
            triangles.extend(Self::hull_pockets(&bottoms, false));
        }

        Ok(Self { slices, triangles })
    }

    /// Triangulates the strip between two slices by walking both in y order
    /// and always advancing the side whose next point is lower.
    fn strip(lower: &[Point], upper: &[Point]) -> Vec<[Point; 3]> {
        let mut triangles = Vec::with_capacity(lower.len() + upper.len());
        let (mut a, mut b) = (0, 0);
        while a + 1 < lower.len() || b + 1 < upper.len() {
            let advance_lower = if a + 1 >= lower.len() {
                false
            } else if b + 1 >= upper.len() {
                true
            } else {
                lower[a + 1].y <= upper[b + 1].y
            };
            if advance_lower {
                triangles.push([lower[a], upper[b], lower[a + 1]]);
                a += 1;
            } else {
                triangles.push([lower[a], upper[b], upper[b + 1]]);
                b += 1;
            }
        }
        triangles
    }

    /// Triangles between an x-ordered boundary chain and its hull side.
    ///
    /// Built with the monotone chain scan: each point dropped from the hull
    /// leaves behind the triangle it formed with its two neighbours.
    fn hull_pockets(chain: &[Point], upper: bool) -> Vec<[Point; 3]> {
        let mut hull: Vec<Point> = Vec::with_capacity(chain.len());
        let mut triangles = Vec::new();
        for &p in chain {
            while let [.., a, b] = hull[..] {
                let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
                let inside = if upper {
                    cross >= -BARYCENTRIC_TOL
                } else {
                    cross <= BARYCENTRIC_TOL
                };
                if !inside {
                    break;
                }
                if cross.abs() > BARYCENTRIC_TOL {
                    triangles.push([a, b, p]);
                }
                hull.pop();
            }
            hull.push(p);
        }
        triangles
    }

    fn barycentric(tri: &[Point; 3], x: f64, y: f64) -> Option<f64> {
        let [p1, p2, p3] = tri;
        let det = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
        if det.abs() < f64::EPSILON {
            return None;
        }
        let l1 = ((p2.y - p3.y) * (x - p3.x) + (p3.x - p2.x) * (y - p3.y)) / det;
        let l2 = ((p3.y - p1.y) * (x - p3.x) + (p1.x - p3.x) * (y - p3.y)) / det;
        let l3 = 1.0 - l1 - l2;
        if l1 < -BARYCENTRIC_TOL || l2 < -BARYCENTRIC_TOL || l3 < -BARYCENTRIC_TOL {
            return None;
        }
        Some(l1 * p1.z + l2 * p2.z + l3 * p3.z)
    }

    fn nearest(&self, x: f64, y: f64) -> f64 {
        let slice = self
            .slices
            .iter()
            .min_by(|a, b| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
            .unwrap_or(&self.slices[0]);
        slice
            .points
            .iter()
            .min_by(|a, b| (a.y - y).abs().total_cmp(&(b.y - y).abs()))
            .map_or(slice.points[0].z, |p| p.z)
    }

    /// Interpolated value at `(x, y)`, rounded to 4 decimal places.
    pub fn interpolate(&self, x: f64, y: f64) -> f64 {
        let z = self
            .triangles
            .iter()
            .find_map(|tri| Self::barycentric(tri, x, y))
            .unwrap_or_else(|| self.nearest(x, y));
        (z * 10_000.0).round() / 10_000.0
    }

    /// Number of distinct x-coordinates.
    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    /// Number of triangles covering the hull.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<(f64, f64, f64)> {
        // z = 0.001 * x + 0.1 * y on three slices with uneven strike counts.
        let mut points = Vec::new();
        for (x, ys) in [
            (30.0, vec![1.00, 1.05, 1.10]),
            (90.0, vec![0.98, 1.04, 1.12, 1.20]),
            (180.0, vec![0.95, 1.15]),
        ] {
            for y in ys {
                points.push((x, y, 0.001 * x + 0.1 * y));
            }
        }
        points
    }

    #[test]
    fn test_strip_triangle_count() {
        // Each strip has (n_lower - 1) + (n_upper - 1) triangles.
        let interp = ScatteredLinearInterpolator::new(&grid()).unwrap();
        assert_eq!(interp.slice_count(), 3);
        assert_eq!(interp.triangle_count(), (2 + 3) + (3 + 1));
    }

    #[test]
    fn test_linear_data_reproduced_inside_hull() {
        let interp = ScatteredLinearInterpolator::new(&grid()).unwrap();
        for (x, y) in [(45.0, 1.05), (60.0, 1.02), (120.0, 1.10), (90.0, 1.08)] {
            let expected = ((0.001 * x + 0.1 * y) * 10_000.0_f64).round() / 10_000.0;
            assert!((interp.interpolate(x, y) - expected).abs() < 1e-9, "({}, {})", x, y);
        }
    }

    #[test]
    fn test_data_points_reproduced() {
        let points = grid();
        let interp = ScatteredLinearInterpolator::new(&points).unwrap();
        for (x, y, z) in points {
            let expected = (z * 10_000.0).round() / 10_000.0;
            assert!((interp.interpolate(x, y) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_narrow_middle_slice_interpolates_across_hull() {
        // z = 0.001 * x + 0.1 * y; the middle slice quotes a tighter range
        let mut points = Vec::new();
        for (x, ys) in [
            (30.0, vec![1.00, 1.10, 1.20]),
            (90.0, vec![1.08, 1.12]),
            (180.0, vec![1.00, 1.10, 1.20]),
        ] {
            for y in ys {
                points.push((x, y, 0.001 * x + 0.1 * y));
            }
        }
        let interp = ScatteredLinearInterpolator::new(&points).unwrap();
        assert_eq!(interp.triangle_count(), (2 + 1) + (1 + 2) + 2);
        for (x, y) in [(90.0, 1.15), (90.0, 1.02), (60.0, 1.01), (150.0, 1.19)] {
            let expected = ((0.001 * x + 0.1 * y) * 10_000.0_f64).round() / 10_000.0;
            assert!((interp.interpolate(x, y) - expected).abs() < 1e-9, "({}, {})", x, y);
        }
    }

    #[test]
    fn test_outside_hull_snaps_to_nearest() {
        let interp = ScatteredLinearInterpolator::new(&grid()).unwrap();
        // Before the first slice, far below the lowest strike.
        assert_eq!(interp.interpolate(1.0, 0.5), 0.13);
        // Beyond the last slice, above the highest strike on it.
        assert_eq!(interp.interpolate(400.0, 2.0), 0.295);
    }

    #[test]
    fn test_single_slice_uses_nearest_point() {
        let interp =
            ScatteredLinearInterpolator::new(&[(30.0, 1.0, 0.1), (30.0, 1.2, 0.2)]).unwrap();
        assert_eq!(interp.triangle_count(), 0);
        assert_eq!(interp.interpolate(30.0, 1.15), 0.2);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            ScatteredLinearInterpolator::new(&[]).unwrap_err(),
            InterpolationError::EmptyInput
        );
        assert!(ScatteredLinearInterpolator::new(&[(1.0, f64::NAN, 0.1)]).is_err());
    }
}
