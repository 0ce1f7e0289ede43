use super::*;

fn quad(points: [(f64, f64); 4]) -> CornerQuad {
    CornerQuad::new(points.map(|(x, y)| Point::new(x, y)))
}

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} vs {b}");
}

#[test]
fn identical_quads_give_identity() {
    let q = CornerQuad::pixel_corners(320, 240);
    let c = solve_perspective(&q, &q).unwrap();
    for (got, want) in c.0.iter().zip(PerspectiveCoefficients::IDENTITY.0) {
        assert_close(*got, want, 1e-9);
    }
}

#[test]
fn perturbed_corners_reproject() {
    let src = CornerQuad::pixel_corners(200, 100);
    let dst = quad([(12.0, 7.0), (190.0, 3.0), (180.0, 95.0), (25.0, 88.0)]);
    let c = solve_perspective(&src, &dst).unwrap();
    for (s, d) in src.points().iter().zip(dst.points()) {
        let m = c.apply(*s).unwrap();
        assert_close(m.x, d.x, 1e-6);
        assert_close(m.y, d.y, 1e-6);
    }
}

#[test]
fn pure_translation_has_no_projective_terms() {
    let src = quad([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let dst = quad([(5.0, -3.0), (15.0, -3.0), (15.0, 7.0), (5.0, 7.0)]);
    let c = solve_perspective(&src, &dst).unwrap();
    let [a, b, cc, d, e, f, g, h] = c.0;
    assert_close(a, 1.0, 1e-9);
    assert_close(b, 0.0, 1e-9);
    assert_close(cc, 5.0, 1e-9);
    assert_close(d, 0.0, 1e-9);
    assert_close(e, 1.0, 1e-9);
    assert_close(f, -3.0, 1e-9);
    assert_close(g, 0.0, 1e-9);
    assert_close(h, 0.0, 1e-9);
}

#[test]
fn zero_width_source_is_degenerate() {
    let src = CornerQuad::pixel_corners(1, 50);
    let dst = quad([(0.0, 0.0), (3.0, 0.0), (3.0, 49.0), (0.0, 49.0)]);
    let err = solve_perspective(&src, &dst).unwrap_err();
    assert!(matches!(err, PasteError::DegenerateGeometry(_)));
}

#[test]
fn coincident_source_points_are_degenerate() {
    let p = (4.0, 4.0);
    let src = quad([p, p, p, p]);
    let dst = CornerQuad::pixel_corners(8, 8);
    assert!(matches!(
        solve_perspective(&src, &dst),
        Err(PasteError::DegenerateGeometry(_))
    ));
}

#[test]
fn apply_reports_points_at_infinity() {
    let c = PerspectiveCoefficients([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0]);
    assert!(c.apply(Point::new(1.0, 5.0)).is_none());
    assert!(c.apply(Point::new(0.5, 5.0)).is_some());
}
