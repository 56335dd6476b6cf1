mod test_utils;

mod test_relationship {
    use bezier_area::{
        area::{Body, Relationship, RelationshipOptions},
        core::math::Transform,
        path::{Path, PathError, WindingRule},
    };
    use Relationship::*;

    fn body(path: &Path<f64>) -> Body<f64> {
        Body::from_source(path).unwrap()
    }

    fn square() -> Body<f64> {
        body(&Path::rect(0.0, 0.0, 10.0, 10.0))
    }

    fn rel(lhs: &Body<f64>, rhs: &Path<f64>) -> Relationship {
        lhs.relationship(rhs, None).unwrap()
    }

    #[test]
    fn rectangles() {
        let lhs = square();
        assert_eq!(rel(&lhs, &Path::rect(2.0, 2.0, 2.0, 2.0)), RhsInsideLhs);
        assert_eq!(rel(&lhs, &Path::rect(-5.0, -5.0, 30.0, 30.0)), LhsInsideRhs);
        assert_eq!(rel(&lhs, &Path::rect(5.0, 5.0, 10.0, 10.0)), Complex);
        assert_eq!(rel(&lhs, &Path::rect(20.0, 0.0, 5.0, 5.0)), Disjoint);
        assert_eq!(rel(&lhs, &Path::rect(0.0, 0.0, 10.0, 10.0)), Complex);
    }

    #[test]
    fn disjoint_with_overlapping_bounds() {
        // L shape with the notch at the top right
        let lhs = square().subtract(&body(&Path::rect(5.0, -1.0, 6.0, 6.0)));
        assert_eq!(rel(&lhs, &Path::rect(6.0, 1.0, 2.0, 2.0)), Disjoint);
        assert_eq!(rel(&lhs, &Path::rect(1.0, 1.0, 2.0, 2.0)), RhsInsideLhs);
        assert_eq!(rel(&lhs, &Path::rect(4.0, 1.0, 2.0, 2.0)), Complex);
    }

    #[test]
    fn mixed_containment_is_complex() {
        let lhs = square();
        let mut rhs = Path::new(WindingRule::NonZero);
        rhs.extend(Path::<f64>::rect(2.0, 2.0, 1.0, 1.0).iter().copied());
        rhs.extend(Path::<f64>::rect(20.0, 20.0, 1.0, 1.0).iter().copied());
        assert_eq!(rel(&lhs, &rhs), Complex);

        let two_pieces = body(&Path::rect(0.0, 0.0, 2.0, 2.0))
            .merge(&body(&Path::rect(20.0, 20.0, 2.0, 2.0)));
        assert_eq!(rel(&two_pieces, &Path::rect(-1.0, -1.0, 4.0, 4.0)), Complex);
        assert_eq!(rel(&two_pieces, &Path::rect(-1.0, -1.0, 30.0, 30.0)), LhsInsideRhs);
    }

    #[test]
    fn empty_contours_are_ignored() {
        let lhs = square();
        let mut rhs = Path::new(WindingRule::NonZero);
        rhs.move_to(20.0, 20.0);
        rhs.extend(Path::<f64>::rect(2.0, 2.0, 1.0, 1.0).iter().copied());
        rhs.move_to(-30.0, -30.0);
        assert_eq!(rel(&lhs, &rhs), RhsInsideLhs);
    }

    #[test]
    fn implied_closing_line_is_tested() {
        // U shape: arms at x in [0, 3] and [7, 10], joined along y in [8, 10]
        let lhs = square().subtract(&body(&Path::rect(3.0, -1.0, 4.0, 9.0)));

        // open contour running down the left arm, along the base and up the right arm, its
        // implied closing line crosses the notch
        let mut rhs = Path::new(WindingRule::NonZero);
        rhs.move_to(1.0, 2.0)
            .line_to(1.0, 9.0)
            .line_to(9.0, 9.0)
            .line_to(9.0, 2.0);
        assert_eq!(rel(&lhs, &rhs), Complex);

        // same route without the return leg inside the left arm only
        let mut inside = Path::new(WindingRule::NonZero);
        inside.move_to(1.0, 2.0).line_to(1.0, 9.0).line_to(2.0, 9.0);
        assert_eq!(rel(&lhs, &inside), RhsInsideLhs);
    }

    #[test]
    fn curved_shapes() {
        let circle = body(&Path::ellipse(0.0, 0.0, 10.0, 10.0));
        assert_eq!(rel(&circle, &Path::rect(-1.0, -1.0, 2.0, 2.0)), RhsInsideLhs);
        assert_eq!(rel(&circle, &Path::rect(8.0, 8.0, 5.0, 5.0)), Disjoint);
        assert_eq!(rel(&circle, &Path::ellipse(9.0, 0.0, 3.0, 3.0)), Complex);
        assert_eq!(rel(&circle, &Path::ellipse(0.0, 0.0, 20.0, 20.0)), LhsInsideRhs);
        assert_eq!(rel(&circle, &Path::ellipse(1.0, 1.0, 2.0, 3.0)), RhsInsideLhs);
    }

    #[test]
    fn body_on_right_hand_side() {
        let lhs = square();
        let inner = body(&Path::ellipse(5.0, 5.0, 2.0, 2.0));
        assert_eq!(lhs.relationship(&inner, None), Ok(RhsInsideLhs));
        assert_eq!(inner.relationship(&lhs, None), Ok(LhsInsideRhs));

        let crossing = body(&Path::rect(8.0, 2.0, 5.0, 5.0));
        assert_eq!(lhs.relationship(&crossing, None), Ok(Complex));
        assert_eq!(crossing.relationship(&lhs, None), Ok(Complex));

        assert_eq!(lhs.relationship(&Body::empty(), None), Ok(Disjoint));
        assert_eq!(Body::empty().relationship(&lhs, None), Ok(Disjoint));
    }

    #[test]
    fn transforms() {
        let lhs = square();
        let small = Path::rect(2.0, 2.0, 2.0, 2.0);

        let shift = Transform::translate(20.0, 0.0);
        assert_eq!(lhs.relationship(&small, Some(&shift)), Ok(Disjoint));
        let grow = Transform::scale(4.0, 4.0).then(&Transform::translate(-5.0, -5.0));
        assert_eq!(lhs.relationship(&small, Some(&grow)), Ok(Complex));
        let cover = Transform::scale(10.0, 10.0).then(&Transform::translate(-25.0, -25.0));
        assert_eq!(lhs.relationship(&small, Some(&cover)), Ok(LhsInsideRhs));

        let moved = Transform::translate(100.0, 0.0);
        assert_eq!(
            lhs.relationship_transformed(&moved, &Path::rect(102.0, 2.0, 2.0, 2.0), None),
            Ok(RhsInsideLhs)
        );
        assert_eq!(
            lhs.relationship_transformed(&moved, &small, None),
            Ok(Disjoint)
        );
        assert_eq!(
            lhs.relationship_transformed(&moved, &small, Some(&moved)),
            Ok(RhsInsideLhs)
        );

        // quarter turn maps the square onto x in [-10, 0], y in [0, 10]
        let quarter = Transform::rotate(std::f64::consts::FRAC_PI_2);
        assert_eq!(
            lhs.relationship_transformed(&quarter, &Path::rect(-6.0, 4.0, 2.0, 2.0), None),
            Ok(RhsInsideLhs)
        );
        assert_eq!(
            lhs.relationship_transformed(&quarter, &small, None),
            Ok(Disjoint)
        );
    }

    #[test]
    fn reuse_prebuilt_index() {
        let lhs = body(&Path::ellipse(0.0, 0.0, 10.0, 10.0));
        let index = lhs.create_aabb_index();
        let mut options = RelationshipOptions::new();
        options.lhs_aabb_index = Some(&index);

        let shapes = [
            Path::rect(-1.0, -1.0, 2.0, 2.0),
            Path::rect(8.0, 8.0, 5.0, 5.0),
            Path::ellipse(9.0, 0.0, 3.0, 3.0),
            Path::ellipse(0.0, 0.0, 20.0, 20.0),
        ];
        for rhs in shapes.iter() {
            assert_eq!(
                lhs.relationship_opt(rhs, None, &options),
                lhs.relationship(rhs, None)
            );
        }
    }

    #[test]
    fn invalid_rhs_is_an_error() {
        let lhs = square();
        let mut nan = Path::new(WindingRule::NonZero);
        nan.move_to(0.0, 0.0).line_to(f64::NAN, 1.0).close();
        assert_eq!(
            lhs.relationship(&nan, None),
            Err(PathError::NonFiniteCoordinate { index: 1 })
        );

        let mut no_move = Path::new(WindingRule::NonZero);
        no_move.line_to(1.0, 1.0);
        assert_eq!(
            lhs.relationship(&no_move, None),
            Err(PathError::MissingMoveTo { index: 0 })
        );

        let overflow = Transform::scale(f64::MAX, f64::MAX);
        assert!(lhs
            .relationship(&Path::rect(2.0, 2.0, 4.0, 4.0), Some(&overflow))
            .is_err());
    }
}
