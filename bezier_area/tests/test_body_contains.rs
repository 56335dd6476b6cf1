mod test_utils;

mod test_body_contains {
    use super::test_utils::{first_mismatch, reverse_path, sample_points};
    use bezier_area::{
        area::Body,
        core::math::{vec2, Transform},
        path::{Path, WindingRule},
        polygon_path,
    };

    fn body(path: &Path<f64>) -> Body<f64> {
        Body::from_source(path).unwrap()
    }

    /// Five pointed star drawn as one self intersecting contour.
    fn pentagram(winding_rule: WindingRule) -> Path<f64> {
        let mut path = Path::new(winding_rule);
        for i in 0..5 {
            let angle = std::f64::consts::FRAC_PI_2 + (i * 2) as f64 * std::f64::consts::TAU / 5.0;
            let (x, y) = (10.0 * angle.cos(), -10.0 * angle.sin());
            if i == 0 {
                path.move_to(x, y);
            } else {
                path.line_to(x, y);
            }
        }
        path.close();
        path
    }

    #[test]
    fn rectangle_boundary_is_half_open() {
        let square = body(&Path::rect(0.0, 0.0, 10.0, 10.0));
        for b in [square.clone(), square.to_validated()] {
            assert!(b.contains_point(vec2(0.0, 0.0)));
            assert!(b.contains_point(vec2(0.0, 5.0)));
            assert!(b.contains_point(vec2(5.0, 0.0)));
            assert!(b.contains_point(vec2(9.999, 9.999)));
            assert!(!b.contains_point(vec2(10.0, 5.0)));
            assert!(!b.contains_point(vec2(5.0, 10.0)));
            assert!(!b.contains_point(vec2(10.0, 10.0)));
            assert!(!b.contains_point(vec2(-0.001, 5.0)));
        }
    }

    #[test]
    fn curved_shapes() {
        let circle = body(&Path::ellipse(0.0, 0.0, 5.0, 5.0));
        assert!(circle.contains_point(vec2(0.0, 0.0)));
        assert!(circle.contains_point(vec2(4.9, 0.0)));
        assert!(circle.contains_point(vec2(3.0, 3.9)));
        assert!(!circle.contains_point(vec2(4.5, 4.5)));
        assert!(!circle.contains_point(vec2(-4.9, -4.9)));
        assert!(!circle.is_polygonal());

        let mut arch = Path::new(WindingRule::NonZero);
        arch.move_to(0.0, 10.0)
            .quad_to(5.0, -10.0, 10.0, 10.0)
            .close();
        let arch = body(&arch);
        assert!(arch.contains_point(vec2(5.0, 5.0)));
        assert!(arch.contains_point(vec2(5.0, 0.1)));
        assert!(!arch.contains_point(vec2(5.0, -0.1)));
        assert!(!arch.contains_point(vec2(1.0, 1.0)));
        let bounds = arch.bounds().unwrap();
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 10.0);
    }

    #[test]
    fn winding_rule_with_nested_contours() {
        let mut same_direction = Path::new(WindingRule::NonZero);
        same_direction.extend(Path::<f64>::rect(0.0, 0.0, 10.0, 10.0).iter().copied());
        same_direction.extend(Path::<f64>::rect(2.0, 2.0, 6.0, 6.0).iter().copied());
        let filled = body(&same_direction);
        assert!(filled.contains_point(vec2(5.0, 5.0)));

        let mut opposite = Path::new(WindingRule::NonZero);
        opposite.extend(Path::<f64>::rect(0.0, 0.0, 10.0, 10.0).iter().copied());
        opposite.extend(reverse_path(&Path::rect(2.0, 2.0, 6.0, 6.0)).iter().copied());
        let ring = body(&opposite);
        assert!(!ring.contains_point(vec2(5.0, 5.0)));
        assert!(ring.contains_point(vec2(1.0, 5.0)));

        same_direction.set_winding_rule(WindingRule::EvenOdd);
        let even_odd = body(&same_direction);
        assert!(!even_odd.contains_point(vec2(5.0, 5.0)));
        assert!(even_odd == ring);
        assert!(filled != ring);
    }

    #[test]
    fn pending_and_validated_agree() {
        for rule in [WindingRule::NonZero, WindingRule::EvenOdd] {
            let star = body(&pentagram(rule));
            let validated = star.to_validated();
            let points = sample_points(&star.bounds().unwrap(), 1.0, 500, 21);
            let mismatch = first_mismatch(
                &points,
                |p| star.contains_point(p),
                |p| validated.contains_point(p),
            );
            assert!(mismatch.is_none(), "rule: {:?}, mismatch at: {:?}", rule, mismatch);
        }

        assert!(body(&pentagram(WindingRule::NonZero)).contains_point(vec2(0.0, 0.0)));
        assert!(!body(&pentagram(WindingRule::EvenOdd)).contains_point(vec2(0.0, 0.0)));
    }

    #[test]
    fn rectangle_queries() {
        let square = body(&Path::rect(0.0, 0.0, 10.0, 10.0));
        assert!(square.contains_rect(2.0, 2.0, 3.0, 3.0));
        assert!(!square.contains_rect(8.0, 8.0, 4.0, 4.0));
        assert!(!square.contains_rect(-5.0, -5.0, 30.0, 30.0));
        // sharing an edge is not strict containment
        assert!(!square.contains_rect(0.0, 2.0, 3.0, 3.0));

        assert!(square.intersects_rect(8.0, 8.0, 4.0, 4.0));
        assert!(square.intersects_rect(2.0, 2.0, 3.0, 3.0));
        assert!(square.intersects_rect(-5.0, -5.0, 30.0, 30.0));
        assert!(!square.intersects_rect(20.0, 20.0, 1.0, 1.0));

        let circle = Path::ellipse(5.0, 5.0, 2.0, 2.0);
        assert!(square.contains_path(&circle));
        assert!(square.intersects_path(&circle));
        let shifted = Path::ellipse(10.0, 5.0, 2.0, 2.0);
        assert!(!square.contains_path(&shifted));
        assert!(square.intersects_path(&shifted));
    }

    #[test]
    fn shape_predicates() {
        let square = body(&Path::rect(1.0, 1.0, 3.0, 2.0));
        assert!(square.is_rectangular());
        assert!(square.is_polygonal());
        assert!(square.is_singular());

        let diamond = body(&polygon_path![(0.0, 2.0), (2.0, 0.0), (4.0, 2.0), (2.0, 4.0)]);
        assert!(!diamond.is_rectangular());
        assert!(diamond.is_polygonal());

        let rotated = square.transform(&Transform::rotate(0.3));
        assert!(!rotated.is_rectangular());

        let two = square.add(&body(&Path::rect(10.0, 10.0, 1.0, 1.0)));
        assert!(!two.is_singular());
        assert!(!two.is_rectangular());
    }

    #[test]
    fn bounds() {
        let shape = body(&Path::ellipse(0.5, 0.5, 2.2, 1.3));
        let b = shape.bounds().unwrap();
        assert!((b.min_x + 1.7).abs() < 1e-12);
        assert!((b.max_x - 2.7).abs() < 1e-12);
        assert!((b.min_y + 0.8).abs() < 1e-12);
        assert!((b.max_y - 1.8).abs() < 1e-12);

        let ib = shape.integer_bounds().unwrap();
        assert_eq!(
            (ib.min_x, ib.min_y, ib.max_x, ib.max_y),
            (-2.0, -1.0, 3.0, 2.0)
        );
    }

    #[test]
    fn empty_body() {
        let empty = Body::<f64>::empty();
        assert!(empty.is_empty());
        assert!(empty.is_validated());
        assert!(empty.bounds().is_none());
        assert!(empty.integer_bounds().is_none());
        assert!(!empty.contains_point(vec2(0.0, 0.0)));
        assert!(!empty.contains_rect(0.0, 0.0, 1.0, 1.0));
        assert!(!empty.intersects_rect(0.0, 0.0, 1.0, 1.0));
        assert!(empty.is_singular());
        assert!(empty.is_polygonal());
        assert!(!empty.is_rectangular());
        assert_eq!(empty.iter_commands().count(), 0);
        assert!(empty == Body::default());
    }
}
