mod test_utils;

mod test_area_queue {
    use crate::test_utils::{aabb_fuzzy_eq_eps, body_area, first_mismatch, sample_points};
    use bezier_area::{
        area::{Area, BatchRules, BooleanOp, Body, Relationship},
        assert_fuzzy_eq,
        core::{
            math::{vec2, Transform},
            traits::FuzzyEq,
        },
        path::{Path, PathError},
    };
    use static_aabb2d_index::AABB;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Body<f64> {
        Body::from_source(&Path::rect(x, y, w, h)).unwrap()
    }

    fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Body<f64> {
        Body::from_source(&Path::ellipse(cx, cy, rx, ry)).unwrap()
    }

    fn aabb(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> AABB<f64> {
        AABB::new(min_x, min_y, max_x, max_y)
    }

    fn mixed_ops() -> Vec<(BooleanOp, Body<f64>)> {
        use BooleanOp::*;
        vec![
            (Add, ellipse(0.0, 0.0, 3.0, 2.0)),
            (Add, rect(2.0, -1.0, 4.0, 2.0)),
            (Add, rect(20.0, 0.0, 2.0, 2.0)),
            (Add, rect(30.0, 0.0, 2.0, 2.0)),
            (Subtract, rect(-1.0, -0.5, 2.0, 1.0)),
            (Subtract, rect(100.0, 100.0, 1.0, 1.0)),
            (Xor, rect(50.0, 50.0, 2.0, 2.0)),
            (Intersect, rect(-10.0, -10.0, 45.0, 20.0)),
            (Add, ellipse(21.0, 1.0, 1.5, 0.5)),
            (Add, rect(40.0, 0.0, 1.0, 1.0)),
            (Add, rect(41.0, 0.0, 1.0, 1.0)),
        ]
    }

    fn run(rules: BatchRules) -> Area<f64> {
        let mut area = Area::new().with_rules(rules);
        for (op, operand) in mixed_ops() {
            area.push_op(op, operand);
        }
        area
    }

    #[test]
    fn queue_runs_on_query() {
        let mut area = Area::new();
        area.add(rect(0.0, 0.0, 2.0, 2.0)).add(rect(1.0, 0.0, 2.0, 2.0));
        assert_eq!(area.pending_len(), 2);
        assert_eq!(area.rules(), BatchRules::Bounds);

        let bounds = area.bounds().unwrap();
        assert_eq!(area.pending_len(), 0);
        assert!(aabb_fuzzy_eq_eps(&bounds, &aabb(0.0, 0.0, 3.0, 2.0), 1e-12));
        assert_fuzzy_eq!(body_area(area.body()), 6.0);

        area.subtract(rect(0.0, 0.0, 1.0, 2.0));
        assert_eq!(area.pending_len(), 1);
        assert!(!area.contains_point(vec2(0.5, 1.0)));
        assert!(area.contains_point(vec2(1.5, 1.0)));
        assert_eq!(area.pending_len(), 0);
    }

    #[test]
    fn bounds_rules_match_sequential() {
        let mut sequential = run(BatchRules::Sequential);
        let mut batched = run(BatchRules::Bounds);

        let seq_bounds = sequential.bounds().unwrap();
        let batched_bounds = batched.bounds().unwrap();
        assert!(
            aabb_fuzzy_eq_eps(&seq_bounds, &batched_bounds, 1e-9),
            "{:?} != {:?}",
            seq_bounds,
            batched_bounds
        );
        // the xor tile outside the intersect rect is gone
        assert!(seq_bounds.max_x < 45.0);

        let seq_area = body_area(sequential.body());
        let batched_area = body_area(batched.body());
        assert!(
            (seq_area - batched_area).abs() < 1e-6,
            "{} != {}",
            seq_area,
            batched_area
        );

        let seq = sequential.body().clone();
        let bat = batched.body().clone();
        let points = sample_points(&seq_bounds, 1.0, 600, 7);
        let mismatch = first_mismatch(
            &points,
            |p| bat.contains_point(p),
            |p| seq.contains_point(p),
        );
        assert!(mismatch.is_none(), "disagree at {:?}", mismatch);
    }

    #[test]
    fn apart_operands_leave_shape_alone() {
        let base = || Area::from(rect(0.0, 0.0, 2.0, 2.0));

        let mut kept = base();
        kept.subtract(rect(10.0, 10.0, 1.0, 1.0));
        assert_fuzzy_eq!(body_area(kept.body()), 4.0);

        let mut gone = base();
        gone.intersect(rect(10.0, 10.0, 1.0, 1.0));
        assert!(gone.is_empty());
        assert!(gone.bounds().is_none());

        let mut both = base();
        both.xor(rect(10.0, 10.0, 1.0, 1.0));
        assert_fuzzy_eq!(body_area(both.body()), 5.0);
        assert!(both.contains_point(vec2(10.5, 10.5)));
        assert!(both.contains_point(vec2(1.0, 1.0)));
    }

    #[test]
    fn grid_of_tiles() {
        let mut area = Area::new();
        // separate tiles
        for i in 0..10 {
            for j in 0..10 {
                area.add(rect(i as f64 * 1.5, j as f64 * 1.5, 1.0, 1.0));
            }
        }
        // a strip of edge sharing tiles below the grid
        for i in 0..10 {
            area.add(rect(i as f64, -3.0, 1.0, 1.0));
        }
        assert_eq!(area.pending_len(), 110);

        let body = area.body();
        assert_fuzzy_eq!(body_area(body), 110.0);
        let bounds = body.validate().bounds().unwrap();
        assert!(aabb_fuzzy_eq_eps(&bounds, &aabb(0.0, -3.0, 14.5, 14.5), 1e-12));
        // the strip merges into a single contour
        assert_eq!(body.validate().contour_starts().count(), 101);

        assert!(area.contains_point(vec2(0.5, 0.5)));
        assert!(!area.contains_point(vec2(1.25, 0.5)));
        assert!(area.contains_point(vec2(5.0, -2.5)));
    }

    #[test]
    fn reset_and_into_body() {
        let mut area = Area::from_source(&Path::rect(0.0, 0.0, 4.0, 4.0)).unwrap();
        area.subtract(rect(1.0, 1.0, 2.0, 2.0));
        area.reset();
        assert_eq!(area.pending_len(), 0);
        assert!(area.is_empty());

        area.add(rect(0.0, 0.0, 4.0, 4.0))
            .subtract(rect(1.0, 1.0, 2.0, 2.0));
        let body = area.into_body();
        assert!(body.is_validated());
        assert_fuzzy_eq!(body_area(&body), 12.0);
    }

    #[test]
    fn transform_processes_first() {
        let mut area = Area::new();
        area.add(rect(0.0, 0.0, 2.0, 2.0));
        area.try_transform(&Transform::translate(5.0, 0.0)).unwrap();
        assert_eq!(area.pending_len(), 0);
        let bounds = area.bounds().unwrap();
        assert!(aabb_fuzzy_eq_eps(&bounds, &aabb(5.0, 0.0, 7.0, 2.0), 1e-12));

        assert_eq!(
            area.try_transform(&Transform::translate(f64::NAN, 0.0)),
            Err(PathError::NonFiniteTransform)
        );
        let b = area.bounds().unwrap();
        assert_eq!(
            (b.min_x, b.min_y, b.max_x, b.max_y),
            (bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y)
        );
    }

    #[test]
    fn relationship_sees_queued_ops() {
        let mut area = Area::from(rect(0.0, 0.0, 10.0, 10.0));
        let small = Path::rect(2.0, 2.0, 2.0, 2.0);
        assert_eq!(
            area.relationship(&small, None),
            Ok(Relationship::RhsInsideLhs)
        );

        area.subtract(rect(1.0, 1.0, 4.0, 4.0));
        assert_eq!(area.relationship(&small, None), Ok(Relationship::Disjoint));
    }

    #[test]
    fn rules_switch_keeps_queue() {
        let mut area = Area::new();
        area.add(rect(0.0, 0.0, 1.0, 1.0));
        area.set_rules(BatchRules::Sequential);
        assert_eq!(area.pending_len(), 1);
        assert_eq!(area.rules(), BatchRules::Sequential);
        assert_fuzzy_eq!(body_area(area.body()), 1.0);
    }
}
