//! Polygon reductions for lasso selections.

use super::region::Region;
use super::space::PercentPoint;

/// Axis-aligned bounding box of a polygon.
///
/// An empty polygon yields a zero-sized region at the origin. The result is
/// not normalized; a degenerate trace can produce zero width or height.
pub fn bounding_box(polygon: &[PercentPoint]) -> Region {
    let Some(first) = polygon.first() else {
        return Region::default();
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &polygon[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Region {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Even-odd point-in-polygon test.
///
/// The polygon is treated as implicitly closed. Fewer than three vertices
/// never contain anything.
pub fn polygon_contains(polygon: &[PercentPoint], point: PercentPoint) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<PercentPoint> {
        vec![
            PercentPoint::new(10.0, 10.0),
            PercentPoint::new(50.0, 10.0),
            PercentPoint::new(50.0, 50.0),
            PercentPoint::new(10.0, 50.0),
        ]
    }

    #[test]
    fn test_bounding_box_square() {
        assert_eq!(bounding_box(&square()), Region::new(10.0, 10.0, 40.0, 40.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        assert_eq!(bounding_box(&[]), Region::default());
    }

    #[test]
    fn test_bounding_box_single_point() {
        let r = bounding_box(&[PercentPoint::new(30.0, 40.0)]);
        assert_eq!(r, Region::new(30.0, 40.0, 0.0, 0.0));
    }

    #[test]
    fn test_polygon_contains() {
        let poly = square();
        assert!(polygon_contains(&poly, PercentPoint::new(30.0, 30.0)));
        assert!(!polygon_contains(&poly, PercentPoint::new(5.0, 30.0)));
        assert!(!polygon_contains(&poly, PercentPoint::new(30.0, 60.0)));
    }

    #[test]
    fn test_polygon_contains_concave() {
        // U shape: the notch between the arms is outside
        let poly = vec![
            PercentPoint::new(0.0, 0.0),
            PercentPoint::new(10.0, 0.0),
            PercentPoint::new(10.0, 20.0),
            PercentPoint::new(20.0, 20.0),
            PercentPoint::new(20.0, 0.0),
            PercentPoint::new(30.0, 0.0),
            PercentPoint::new(30.0, 30.0),
            PercentPoint::new(0.0, 30.0),
        ];
        assert!(polygon_contains(&poly, PercentPoint::new(5.0, 10.0)));
        assert!(!polygon_contains(&poly, PercentPoint::new(15.0, 10.0)));
        assert!(polygon_contains(&poly, PercentPoint::new(15.0, 25.0)));
    }

    #[test]
    fn test_polygon_contains_degenerate() {
        let line = vec![PercentPoint::new(0.0, 0.0), PercentPoint::new(10.0, 10.0)];
        assert!(!polygon_contains(&line, PercentPoint::new(5.0, 5.0)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn polygon_strategy() -> impl Strategy<Value = Vec<PercentPoint>> {
        prop::collection::vec(
            (0.0f64..=100.0, 0.0f64..=100.0).prop_map(|(x, y)| PercentPoint::new(x, y)),
            1..50,
        )
    }

    proptest! {
        /// Property: The bounding box is non-negative and contains every vertex.
        #[test]
        fn prop_bounding_box_contains_all(polygon in polygon_strategy()) {
            let bbox = bounding_box(&polygon);
            prop_assert!(bbox.width >= 0.0);
            prop_assert!(bbox.height >= 0.0);
            for p in &polygon {
                prop_assert!(bbox.contains(p.x, p.y), "{:?} not in {:?}", p, bbox);
            }
        }
    }
}
