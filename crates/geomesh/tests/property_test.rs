//! Property-based tests for tag allocation and loop closure.

use std::collections::BTreeSet;

use geomesh::*;
use proptest::prelude::*;

/// A point declaration with an explicit tag, or an automatic one.
fn arb_point_tags() -> impl Strategy<Value = Vec<Option<Tag>>> {
    prop::collection::vec(prop_oneof![Just(None), (1..40i32).prop_map(Some)], 1..40)
}

/// A builder holding a closed n-gon of lines `1..=n` through points `1..=n`.
fn polygon(n: i32) -> GeometryBuilder {
    let mut geo = GeometryBuilder::new();
    for i in 0..n {
        let angle = std::f64::consts::TAU * f64::from(i) / f64::from(n);
        geo.add_point(angle.cos(), angle.sin(), 0.0, None, None).unwrap();
    }
    for i in 1..=n {
        geo.add_line(i, i % n + 1, None).unwrap();
    }
    geo
}

proptest! {
    #[test]
    fn auto_tags_increase_and_never_collide(requests in arb_point_tags()) {
        let mut geo = GeometryBuilder::new();
        let mut used = BTreeSet::new();
        let mut last_auto = 0;

        for request in requests {
            let result = geo.add_point(0.0, 0.0, 0.0, None, request);
            match request {
                Some(tag) if used.contains(&tag) => {
                    let is_duplicate = matches!(result, Err(GeometryError::DuplicateTag { .. }));
                    prop_assert!(is_duplicate);
                }
                Some(tag) => {
                    prop_assert_eq!(result.unwrap(), tag);
                    used.insert(tag);
                }
                None => {
                    let tag = result.unwrap();
                    prop_assert!(!used.contains(&tag));
                    prop_assert!(tag > last_auto);
                    let highest = used.iter().next_back().copied().unwrap_or(0);
                    prop_assert_eq!(tag, highest + 1);
                    last_auto = tag;
                    used.insert(tag);
                }
            }
        }
        prop_assert_eq!(geo.geometry().count(Dim::Point), used.len());
    }

    #[test]
    fn rotated_polygon_loop_closes(n in 3..12i32, shift in 0..12usize) {
        let mut geo = polygon(n);
        let mut curves: Vec<Tag> = (1..=n).collect();
        let len = curves.len();
        curves.rotate_left(shift % len);
        prop_assert!(geo.add_curve_loop(&curves, None).is_ok());

        // The reversed traversal closes too.
        let reversed: Vec<Tag> = curves.iter().rev().map(|c| -c).collect();
        prop_assert!(geo.add_curve_loop(&reversed, None).is_ok());
    }

    #[test]
    fn swapped_curves_leave_loop_open(n in 3..12i32, k in 0..11usize) {
        let mut geo = polygon(n);
        let mut curves: Vec<Tag> = (1..=n).collect();
        let k = k % (curves.len() - 1);
        curves.swap(k, k + 1);

        let is_open = matches!(geo.add_curve_loop(&curves, None), Err(GeometryError::OpenLoop { .. }));
        prop_assert!(is_open);
        prop_assert!(geo.geometry().curve_loops().is_empty());
    }

    #[test]
    fn flipped_curve_leaves_loop_open(n in 3..12i32, k in 0..12usize) {
        let mut geo = polygon(n);
        let mut curves: Vec<Tag> = (1..=n).collect();
        let k = k % curves.len();
        curves[k] = -curves[k];

        let is_open = matches!(geo.add_curve_loop(&curves, None), Err(GeometryError::OpenLoop { .. }));
        prop_assert!(is_open);
    }

    #[test]
    fn synchronized_geometry_is_frozen(n in 3..8i32, x in -10.0..10.0f64) {
        let mut geo = polygon(n);
        let before = geo.synchronize();

        let point = geo.add_point(x, 0.0, 1.0, None, None);
        prop_assert!(matches!(point, Err(GeometryError::FrozenGeometry { .. })), "{:?}", point);
        let line = geo.add_line(1, 2, None);
        prop_assert!(matches!(line, Err(GeometryError::FrozenGeometry { .. })), "{:?}", line);

        prop_assert_eq!(geo.geometry().count(Dim::Point), before.count(Dim::Point));
        prop_assert!(std::sync::Arc::ptr_eq(&before, &geo.synchronize()));
    }
}
