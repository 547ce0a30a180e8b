//! Point sequences for pencil and pen paths.

use crate::error::{EngineError, EngineResult};
use kurbo::{Point, Rect};

/// Result of rewriting a point sequence relative to its bounding-box minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPath {
    /// Bounding-box minimum in canvas space; becomes the element position.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    /// Points relative to `origin`.
    pub points: Vec<Point>,
}

/// Bounding box of a point sequence, `None` when empty.
pub fn points_bounds(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let init = Rect::from_points(*first, *first);
    Some(points.iter().skip(1).fold(init, |acc, p| acc.union_pt(*p)))
}

/// Rewrite `points` relative to their bounding-box minimum.
///
/// Each extent is clamped to at least `min_extent`, so single-axis strokes
/// still get a usable box.
pub fn normalize_points(points: &[Point], min_extent: f64) -> Option<NormalizedPath> {
    let bounds = points_bounds(points)?;
    let origin = Point::new(bounds.x0, bounds.y0);
    Some(NormalizedPath {
        origin,
        width: bounds.width().max(min_extent),
        height: bounds.height().max(min_extent),
        points: points.iter().map(|p| (*p - origin).to_point()).collect(),
    })
}

/// Flatten points into `[x0, y0, x1, y1, ...]`.
pub fn flatten_points(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Build points from a flat coordinate list. The list must hold whole pairs.
pub fn points_from_flat(coords: &[f64]) -> EngineResult<Vec<Point>> {
    if coords.len() % 2 != 0 {
        return Err(EngineError::OddCoordinateCount(coords.len()));
    }
    Ok(coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_moves_min_to_origin() {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(30.0, 10.0),
        ];
        let normalized = normalize_points(&points, 1.0).unwrap();
        assert_eq!(normalized.origin, Point::new(10.0, 10.0));
        assert!((normalized.width - 20.0).abs() < f64::EPSILON);
        assert!((normalized.height - 10.0).abs() < f64::EPSILON);
        assert_eq!(
            normalized.points,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(20.0, 0.0)]
        );
    }

    #[test]
    fn test_normalize_clamps_flat_extent() {
        let points = vec![Point::new(5.0, 7.0), Point::new(50.0, 7.0)];
        let normalized = normalize_points(&points, 1.0).unwrap();
        assert!((normalized.width - 45.0).abs() < f64::EPSILON);
        assert!((normalized.height - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize_points(&[], 1.0).is_none());
        assert!(points_bounds(&[]).is_none());
    }

    #[test]
    fn test_flat_coordinates() {
        let points = points_from_flat(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(flatten_points(&points), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_flat_coordinates_reject_odd_length() {
        let err = points_from_flat(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, EngineError::OddCoordinateCount(3)));
    }
}
