//! Planar points and coordinate normalization.

use crate::error::{Result, TspError};

/// An immutable 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Scales every coordinate by the reciprocal of the largest y-coordinate.
///
/// The scaling is isotropic, so tour shape is preserved while lengths
/// become comparable across inputs of different resolution.
///
/// # Errors
///
/// [`TspError::InvalidInput`] if `points` is empty or the largest
/// y-coordinate is not a positive finite number.
pub fn normalize(points: &[Point]) -> Result<Vec<Point>> {
    let max_y = points
        .iter()
        .map(|p| p.y)
        .fold(f64::NEG_INFINITY, f64::max);

    if !(max_y.is_finite() && max_y > 0.0) {
        return Err(TspError::InvalidInput(format!(
            "cannot normalize by max y = {max_y}"
        )));
    }

    let scale = 1.0 / max_y;
    Ok(points
        .iter()
        .map(|p| Point::new(p.x * scale, p.y * scale))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_scales_by_max_y() {
        let pts = vec![Point::new(4.0, 2.0), Point::new(1.0, 8.0)];
        let norm = normalize(&pts).unwrap();
        assert_eq!(norm[0], Point::new(0.5, 0.25));
        assert_eq!(norm[1], Point::new(0.125, 1.0));
    }

    #[test]
    fn test_normalize_rejects_non_positive_max_y() {
        let pts = vec![Point::new(1.0, 0.0), Point::new(2.0, -1.0)];
        assert!(matches!(normalize(&pts), Err(TspError::InvalidInput(_))));
        assert!(matches!(normalize(&[]), Err(TspError::InvalidInput(_))));
    }
}
