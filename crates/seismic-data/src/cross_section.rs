//! Cross-section rectangle and point-in-polygon test
//!
//! Containment is tested on raw `[lng, lat]` pairs without projecting them
//! first. The error against a projected test is not noticeable at the
//! scale of a drawn cross-section.

use seismic_core::{CrossSectionPoints, LatLng, Polygon};

/// Axis-aligned rectangle spanning two picked points.
///
/// Vertices are `[lng, lat]` pairs ordered SW, NW, NE, SE, matching the axis
/// order of [`seismic_core::Earthquake::position`]. Returns `None` unless
/// both points are present.
pub fn derive_rectangle(p1: Option<LatLng>, p2: Option<LatLng>) -> Option<Polygon> {
    let (p1, p2) = (p1?, p2?);
    let (min_lat, max_lat) = (p1.lat.min(p2.lat), p1.lat.max(p2.lat));
    let (min_lng, max_lng) = (p1.lng.min(p2.lng), p1.lng.max(p2.lng));
    Some(vec![
        [min_lng, min_lat],
        [min_lng, max_lat],
        [max_lng, max_lat],
        [max_lng, min_lat],
    ])
}

/// Rectangle for a drawn cross-section line, once both endpoints exist
pub fn rectangle_for(points: &CrossSectionPoints) -> Option<Polygon> {
    derive_rectangle(points.get(0), points.get(1))
}

/// Even-odd ray casting (pnpoly).
///
/// An edge is crossed when exactly one of its endpoints lies strictly above
/// the point, and the crossing counts only when the point is strictly left
/// of the edge. For an axis-aligned rectangle this puts the left and bottom
/// edges inside and the right and top edges outside. Polygons with fewer
/// than three vertices contain nothing. NaN coordinates are never inside.
pub fn point_in_polygon(point: [f64; 2], polygon: &[[f64; 2]]) -> bool {
    let [x, y] = point;
    let mut inside = false;
    if polygon.len() < 3 {
        return inside;
    }
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let [xi, yi] = polygon[i];
        let [xj, yj] = polygon[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]
    }

    #[test]
    fn test_point_inside_and_outside_square() {
        assert!(point_in_polygon([5.0, 5.0], &square()));
        assert!(!point_in_polygon([15.0, 5.0], &square()));
        assert!(!point_in_polygon([5.0, -1.0], &square()));
    }

    #[test]
    fn test_edge_tie_break() {
        let sq = square();
        assert!(point_in_polygon([0.0, 5.0], &sq));
        assert!(point_in_polygon([5.0, 0.0], &sq));
        assert!(!point_in_polygon([10.0, 5.0], &sq));
        assert!(!point_in_polygon([5.0, 10.0], &sq));
    }

    #[test]
    fn test_degenerate_polygons_contain_nothing() {
        assert!(!point_in_polygon([0.0, 0.0], &[]));
        assert!(!point_in_polygon([0.0, 0.0], &[[0.0, 0.0]]));
        assert!(!point_in_polygon([0.5, 0.5], &[[0.0, 0.0], [1.0, 1.0]]));
    }

    #[test]
    fn test_nan_point_is_outside() {
        assert!(!point_in_polygon([f64::NAN, 5.0], &square()));
        assert!(!point_in_polygon([5.0, f64::NAN], &square()));
    }

    #[test]
    fn test_concave_polygon() {
        // U shape opening upwards
        let u = vec![
            [0.0, 0.0],
            [0.0, 10.0],
            [3.0, 10.0],
            [3.0, 3.0],
            [7.0, 3.0],
            [7.0, 10.0],
            [10.0, 10.0],
            [10.0, 0.0],
        ];
        assert!(point_in_polygon([1.5, 8.0], &u));
        assert!(!point_in_polygon([5.0, 8.0], &u));
        assert!(point_in_polygon([5.0, 1.0], &u));
    }

    #[test]
    fn test_rectangle_orders_corners_regardless_of_drawing_direction() {
        let expected = vec![[20.0, 10.0], [20.0, 30.0], [40.0, 30.0], [40.0, 10.0]];
        let a = LatLng::new(10.0, 40.0);
        let b = LatLng::new(30.0, 20.0);

        assert_eq!(derive_rectangle(Some(a), Some(b)), Some(expected.clone()));
        assert_eq!(derive_rectangle(Some(b), Some(a)), Some(expected));
    }

    #[test]
    fn test_rectangle_needs_two_points() {
        assert_eq!(derive_rectangle(Some(LatLng::new(1.0, 2.0)), None), None);
        assert_eq!(derive_rectangle(None, None), None);

        let half = CrossSectionPoints::default().with_point(0, LatLng::new(1.0, 2.0));
        assert_eq!(rectangle_for(&half), None);
    }

    #[test]
    fn test_rectangle_contains_point_between_endpoints() {
        let points = CrossSectionPoints::new(LatLng::new(30.0, -120.0), LatLng::new(40.0, -110.0));
        let rect = rectangle_for(&points).unwrap();

        // [lng, lat]
        assert!(point_in_polygon([-115.0, 35.0], &rect));
        assert!(!point_in_polygon([35.0, -115.0], &rect));
        assert!(!point_in_polygon([-105.0, 35.0], &rect));
    }
}
