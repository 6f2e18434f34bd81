//! Property-based tests for contour ordering.
//!
//! Run with: cargo test -p plyslice --test proptest_contour

use nalgebra::Point3;
use plyslice::order_contour;
use proptest::prelude::*;

fn arb_points(max_len: usize) -> impl Strategy<Value = Vec<Point3<f64>>> {
    prop::collection::vec(
        (-500.0..500.0f64, -500.0..500.0f64, -500.0..500.0f64),
        1..max_len,
    )
    .prop_map(|coords| {
        coords
            .into_iter()
            .map(|(x, y, z)| Point3::new(x, y, z))
            .collect()
    })
}

/// Canonical form for multiset comparison.
fn sorted_triples(points: &[Point3<f64>]) -> Vec<[f64; 3]> {
    let mut triples: Vec<[f64; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
    triples.sort_by(|a, b| {
        a[0].total_cmp(&b[0])
            .then(a[1].total_cmp(&b[1]))
            .then(a[2].total_cmp(&b[2]))
    });
    triples
}

proptest! {
    /// Ordering is a pure permutation: same multiset of points out as in.
    #[test]
    fn proptest_ordering_is_permutation(points in arb_points(64)) {
        let ordered = order_contour(&points);
        prop_assert_eq!(ordered.len(), points.len());
        prop_assert_eq!(sorted_triples(&ordered), sorted_triples(&points));
    }

    /// Ordering an already-ordered contour changes nothing.
    #[test]
    fn proptest_ordering_is_idempotent(points in arb_points(64)) {
        let once = order_contour(&points);
        let twice = order_contour(&once);
        prop_assert_eq!(once, twice);
    }

    /// Output angles about the centroid are non-decreasing.
    #[test]
    fn proptest_ordering_sorts_by_angle(points in arb_points(64)) {
        let n = points.len() as f64;
        let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
        let cy = points.iter().map(|p| p.y).sum::<f64>() / n;

        let ordered = order_contour(&points);
        for pair in ordered.windows(2) {
            let theta_a = (pair[0].x - cx).atan2(pair[0].y - cy);
            let theta_b = (pair[1].x - cx).atan2(pair[1].y - cy);
            prop_assert!(theta_a <= theta_b);
        }
    }
}
