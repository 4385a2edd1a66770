use super::*;

fn square() -> Quad {
    Quad::from_rect(Point::new(0.0, 0.0), Point::new(100.0, 100.0))
}

fn assert_point_close(a: Point, b: Point) {
    assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn single_axis_keeps_dominant_component() {
    let d = single_axis(&square(), Point::new(0.0, 0.0), Vec2::new(10.0, 3.0));
    assert!((d - Vec2::new(10.0, 0.0)).length() < 1e-9, "{d:?}");
    let d = single_axis(&square(), Point::new(100.0, 100.0), Vec2::new(-2.0, 7.0));
    assert!((d - Vec2::new(0.0, 7.0)).length() < 1e-9, "{d:?}");
}

#[test]
fn single_axis_follows_rotated_quad() {
    // Square rotated by 45 degrees.
    let quad = Quad::new([
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 20.0),
        Point::new(-10.0, 10.0),
    ]);
    let d = single_axis(&quad, Point::new(0.0, 0.0), Vec2::new(5.0, 4.0));
    assert!((d - Vec2::new(4.5, 4.5)).length() < 1e-9, "{d:?}");
}

#[test]
fn single_axis_ignores_degenerate_quad() {
    let quad = Quad::new([Point::new(1.0, 1.0); 4]);
    let d = Vec2::new(3.0, 4.0);
    assert_eq!(single_axis(&quad, Point::new(1.0, 1.0), d), d);
}

#[test]
fn diagonal_snap_picks_closer_diagonal() {
    assert_point_close(
        onto_diagonals(&square(), Point::new(20.0, 30.0)),
        Point::new(25.0, 25.0),
    );
    assert_point_close(
        onto_diagonals(&square(), Point::new(90.0, 0.0)),
        Point::new(95.0, 5.0),
    );
}

#[test]
fn nearest_corner_snaps_to_old_corner() {
    assert_eq!(
        nearest_corner(&square(), Point::new(80.0, 120.0)),
        Point::new(100.0, 100.0)
    );
    assert_eq!(
        nearest_corner(&square(), Point::new(-5.0, 60.0)),
        Point::new(0.0, 100.0)
    );
}

#[test]
fn mirror_moves_opposite_corners_symmetrically() {
    let quad = mirror(&square(), 0, Point::new(-10.0, -20.0));
    assert_point_close(quad[0], Point::new(-10.0, -20.0));
    assert_point_close(quad[1], Point::new(110.0, -20.0));
    assert_point_close(quad[2], Point::new(110.0, 120.0));
    assert_point_close(quad[3], Point::new(-10.0, 120.0));

    let quad = mirror(&square(), 2, Point::new(90.0, 110.0));
    assert_point_close(quad[0], Point::new(10.0, -10.0));
    assert_point_close(quad[2], Point::new(90.0, 110.0));
}
