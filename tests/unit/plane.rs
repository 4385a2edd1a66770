use super::*;

fn square() -> Quad {
    Quad::from_rect(Point::new(0.0, 0.0), Point::new(100.0, 100.0))
}

fn assert_quad_close(a: &Quad, b: &Quad) {
    for k in 0..4 {
        assert!((a[k] - b[k]).length() < 1e-9, "corner {k}: {:?} != {:?}", a[k], b[k]);
    }
}

fn assert_vec_close(a: Vec2, b: Vec2) {
    assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn plane_mode_roles() {
    assert_eq!(PlaneMode::Hidden.driver(), QuadRole::Inner);
    assert_eq!(PlaneMode::Hidden.derived(), None);
    assert!(!PlaneMode::Hidden.has_outer());

    assert_eq!(PlaneMode::InnerFollowsOuter.driver(), QuadRole::Outer);
    assert_eq!(PlaneMode::InnerFollowsOuter.derived(), Some(QuadRole::Inner));
    assert!(!PlaneMode::InnerFollowsOuter.outer_locked());

    assert_eq!(PlaneMode::OuterFollowsInner.driver(), QuadRole::Inner);
    assert_eq!(PlaneMode::OuterFollowsInner.derived(), Some(QuadRole::Outer));
    assert!(PlaneMode::OuterFollowsInner.outer_locked());
}

#[test]
fn default_plane_is_centered_half() {
    let plane = AmbientPlane::default();
    let inner = plane.inner_from_outer(&square());
    assert_quad_close(
        &inner,
        &Quad::from_rect(Point::new(25.0, 25.0), Point::new(75.0, 75.0)),
    );
    assert_quad_close(&plane.outer_from_inner(&inner), &square());
}

#[test]
fn fit_recovers_fractions() {
    let mut plane = AmbientPlane::default();
    let inner = Quad::from_rect(Point::new(10.0, 20.0), Point::new(60.0, 90.0));
    assert!(plane.fit(&square(), &inner));
    assert_vec_close(plane.c1, Vec2::new(0.1, 0.2));
    assert_vec_close(plane.c2, Vec2::new(0.6, 0.9));
    assert_quad_close(&plane.inner_from_outer(&square()), &inner);
}

#[test]
fn fit_rejects_degenerate_outer() {
    let mut plane = AmbientPlane::default();
    let collapsed = Quad::new([Point::new(3.0, 3.0); 4]);
    assert!(!plane.fit(&collapsed, &square()));
    assert_eq!(plane, AmbientPlane::default());
}

#[test]
fn shift_moves_both_fractions() {
    let mut plane = AmbientPlane::default();
    plane.shift(Vec2::new(0.1, -0.05));
    assert_vec_close(plane.c1, Vec2::new(0.35, 0.2));
    assert_vec_close(plane.c2, Vec2::new(0.85, 0.7));
}

#[test]
fn inner_corner_moves_adjacent_edges() {
    let mut plane = AmbientPlane::default();
    plane.move_inner_corner(1, Vec2::new(0.9, 0.2));
    assert_vec_close(plane.c1, Vec2::new(0.25, 0.2));
    assert_vec_close(plane.c2, Vec2::new(0.9, 0.75));

    plane.move_inner_corner(3, Vec2::new(0.0, 1.0));
    assert_vec_close(plane.c1, Vec2::new(0.0, 0.2));
    assert_vec_close(plane.c2, Vec2::new(0.9, 1.0));
}

#[test]
fn outer_corner_moves_through_inverted_fractions() {
    let mut plane = AmbientPlane::default();
    // In text quad coordinates the outer quad spans -0.5..1.5.
    plane.move_outer_corner(2, Vec2::new(2.5, 2.5));
    assert_vec_close(plane.c1, Vec2::new(1.0 / 6.0, 1.0 / 6.0));
    assert_vec_close(plane.c2, Vec2::new(0.5, 0.5));
}

#[test]
fn encode_uses_two_decimals() {
    let outer = Quad::from_rect(Point::new(0.0, -10.0), Point::new(100.5, 50.25));
    assert_eq!(
        AmbientPlane::encode(&outer).unwrap(),
        "0.00;-10.00|100.50;-10.00|100.50;50.25|0.00;50.25"
    );
}

#[test]
fn encode_refuses_non_finite_corners() {
    let mut outer = square();
    outer[2] = Point::new(f64::NAN, 1.0);
    assert!(matches!(
        AmbientPlane::encode(&outer),
        Err(SubperspError::NonFinite(_))
    ));
}

#[test]
fn decode_reads_encoded_descriptor() {
    let outer = Quad::from_rect(Point::new(12.0, 8.0), Point::new(640.0, 360.0));
    let text = AmbientPlane::encode(&outer).unwrap();
    assert_eq!(AmbientPlane::decode(&text).unwrap(), outer);
    assert_eq!(
        AmbientPlane::decode(" 1 ;2|3;4|5;6|7;8").unwrap()[0],
        Point::new(1.0, 2.0)
    );
}

#[test]
fn decode_rejects_malformed_descriptors() {
    for bad in [
        "",
        "1;2|3;4|5;6",
        "1;2|3;4|5;6|7;8|9;10",
        "1;2|3;4|5;6|7",
        "1;2|3;4|5;6|7;8;9",
        "a;2|3;4|5;6|7;8",
        "inf;2|3;4|5;6|7;8",
        "NaN;2|3;4|5;6|7;8",
    ] {
        let err = AmbientPlane::decode(bad).unwrap_err();
        assert!(matches!(err, SubperspError::MalformedPlane(_)), "{bad:?}: {err}");
    }
}

#[test]
fn plane_record_uses_extradata_key() {
    let record = PlaneRecord::new("1;2|3;4|5;6|7;8".to_string());
    assert_eq!(record.key, "_aegi_perspective_ambient_plane");
    assert_eq!(record.value, "1;2|3;4|5;6|7;8");
}
