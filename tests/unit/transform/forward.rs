use super::*;
use crate::foundation::core::{Alignment, Rect};

const Z: f64 = 312.5;

fn close(a: Point, b: Point) {
    assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
}

fn top_left(pos: Point) -> TransformParams {
    TransformParams {
        pos,
        align: Alignment::TOP_LEFT,
        ..TransformParams::default()
    }
}

#[test]
fn untransformed_text_is_its_extents() {
    let q = project(
        &top_left(Point::new(10.0, 20.0)),
        &Rect::new(0.0, 0.0, 100.0, 50.0),
        Z,
    );
    close(q[0], Point::new(10.0, 20.0));
    close(q[1], Point::new(110.0, 20.0));
    close(q[2], Point::new(110.0, 70.0));
    close(q[3], Point::new(10.0, 70.0));
}

#[test]
fn alignment_point_sits_at_pos() {
    let extents = Rect::new(0.0, 0.0, 100.0, 50.0);
    let mut params = TransformParams {
        pos: Point::new(200.0, 200.0),
        ..TransformParams::default()
    };

    params.align = Alignment::new(5).unwrap();
    close(project(&params, &extents, Z).midpoint(), Point::new(200.0, 200.0));

    params.align = Alignment::new(3).unwrap();
    close(project(&params, &extents, Z)[2], Point::new(200.0, 200.0));

    params.align = Alignment::new(2).unwrap();
    let q = project(&params, &extents, Z);
    close(q[2].midpoint(q[3]), Point::new(200.0, 200.0));
}

#[test]
fn scale_and_shear_apply_before_rotation() {
    let mut params = top_left(Point::ORIGIN);
    params.fsc = Vec2::new(200.0, 50.0);
    params.fax = 0.5;
    let q = project(&params, &Rect::new(0.0, 0.0, 100.0, 40.0), Z);
    close(q[1], Point::new(200.0, 0.0));
    close(q[3], Point::new(40.0, 20.0));
    close(q[2], Point::new(240.0, 20.0));
}

#[test]
fn positive_frz_turns_counterclockwise_on_screen() {
    let mut params = top_left(Point::ORIGIN);
    params.angle_z = 90.0;
    let q = project(&params, &Rect::new(0.0, 0.0, 100.0, 50.0), Z);
    close(q[1], Point::new(0.0, -100.0));
    close(q[2], Point::new(50.0, -100.0));
    close(q[3], Point::new(50.0, 0.0));
}

#[test]
fn fry_foreshortens_the_receding_side() {
    let params = TransformParams {
        pos: Point::new(500.0, 500.0),
        align: Alignment::new(5).unwrap(),
        angle_y: 30.0,
        ..TransformParams::default()
    };
    let q = project(&params, &Rect::new(0.0, 0.0, 200.0, 100.0), Z);
    let right = (q[2] - q[1]).length();
    let left = (q[3] - q[0]).length();
    assert!(right < left, "right {right} left {left}");
    assert!(q.is_convex());
}

#[test]
fn rotation_is_around_org() {
    let params = TransformParams {
        pos: Point::new(100.0, 100.0),
        org: Some(Point::new(0.0, 0.0)),
        align: Alignment::TOP_LEFT,
        angle_z: 180.0,
        ..TransformParams::default()
    };
    let q = project(&params, &Rect::new(0.0, 0.0, 10.0, 10.0), Z);
    close(q[0], Point::new(-100.0, -100.0));
    close(q[2], Point::new(-110.0, -110.0));
}

#[test]
fn empty_extents_still_project_finitely() {
    let q = project(&top_left(Point::ORIGIN), &Rect::ZERO, Z);
    assert!(q.is_finite());
}
