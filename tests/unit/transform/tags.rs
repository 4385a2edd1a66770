use super::*;
use crate::foundation::core::Vec2;

fn find<'a>(edits: &'a [TagEdit], tag: &str) -> &'a TagEdit {
    edits.iter().find(|e| e.tag() == tag).unwrap()
}

#[test]
fn defaults_are_removed() {
    let params = TransformParams {
        bord: Vec2::new(2.0, 2.0),
        shad: Vec2::new(2.0, 2.0),
        pos: Point::new(640.0, 360.0),
        ..TransformParams::default()
    };
    let edits = emit(&params, &StyleDefaults::default());
    for tag in [
        "\\fax", "\\fay", "\\fscx", "\\fscy", "\\frz", "\\frx", "\\fry", "\\xbord", "\\ybord",
        "\\xshad", "\\yshad", "\\bord", "\\shad",
    ] {
        assert!(
            matches!(find(&edits, tag), TagEdit::Remove { .. }),
            "{tag} should be removed"
        );
    }
    assert_eq!(
        find(&edits, "\\pos").override_text().as_deref(),
        Some("\\pos(640,360)")
    );
    assert_eq!(
        find(&edits, "\\org").override_text().as_deref(),
        Some("\\org(640,360)")
    );
}

#[test]
fn values_use_fixed_precision_per_tag() {
    let params = TransformParams {
        fax: 0.25,
        fsc: Vec2::new(120.0, 80.5),
        angle_x: -12.5,
        angle_y: 3.0,
        angle_z: 45.0,
        bord: Vec2::new(3.0, 1.0),
        shad: Vec2::new(0.0, 4.25),
        org: Some(Point::new(100.126, -20.0)),
        pos: Point::new(0.5, 10.0),
        ..TransformParams::default()
    };
    let edits = emit(&params, &StyleDefaults::default());
    let text = |tag| find(&edits, tag).override_text();
    assert_eq!(text("\\fax").as_deref(), Some("\\fax0.250000"));
    assert_eq!(text("\\fscx").as_deref(), Some("\\fscx120.00"));
    assert_eq!(text("\\fscy").as_deref(), Some("\\fscy80.50"));
    assert_eq!(text("\\frx").as_deref(), Some("\\frx-12.5000"));
    assert_eq!(text("\\fry").as_deref(), Some("\\fry3.0000"));
    assert_eq!(text("\\frz").as_deref(), Some("\\frz45.0000"));
    assert_eq!(text("\\xbord").as_deref(), Some("\\xbord3.00"));
    assert_eq!(text("\\xshad").as_deref(), Some("\\xshad0.00"));
    assert_eq!(text("\\yshad").as_deref(), Some("\\yshad4.25"));
    assert_eq!(text("\\org").as_deref(), Some("\\org(100.13,-20)"));
    assert_eq!(text("\\pos").as_deref(), Some("\\pos(0.5,10)"));
}

#[test]
fn negative_zero_rounding_is_treated_as_default() {
    let params = TransformParams {
        angle_y: -0.00001,
        fax: -0.0000001,
        ..TransformParams::default()
    };
    let edits = emit(&params, &StyleDefaults::default());
    assert!(matches!(find(&edits, "\\fry"), TagEdit::Remove { .. }));
    assert!(matches!(find(&edits, "\\fax"), TagEdit::Remove { .. }));
}

#[test]
fn style_defaults_drive_removal() {
    let style = StyleDefaults {
        scale: Vec2::new(120.0, 120.0),
        angle: 10.0,
        outline: 0.0,
        shadow: 0.0,
    };
    let params = TransformParams {
        fsc: Vec2::new(120.0, 100.0),
        angle_z: 10.0,
        ..TransformParams::default()
    };
    let edits = emit(&params, &style);
    assert!(matches!(find(&edits, "\\fscx"), TagEdit::Remove { .. }));
    assert!(matches!(find(&edits, "\\fscy"), TagEdit::Set { .. }));
    assert!(matches!(find(&edits, "\\frz"), TagEdit::Remove { .. }));
    assert!(matches!(find(&edits, "\\xbord"), TagEdit::Remove { .. }));
}

#[test]
fn override_block_joins_sets_in_order() {
    let params = TransformParams {
        fsc: Vec2::new(150.0, 100.0),
        pos: Point::new(1.0, 2.0),
        bord: Vec2::new(2.0, 2.0),
        shad: Vec2::new(2.0, 2.0),
        ..TransformParams::default()
    };
    let edits = emit(&params, &StyleDefaults::default());
    assert_eq!(override_block(&edits), "{\\fscx150.00\\org(1,2)\\pos(1,2)}");
}

#[test]
fn trim_decimal_drops_trailing_zeros() {
    assert_eq!(trim_decimal(1.5, 2), "1.5");
    assert_eq!(trim_decimal(2.0, 2), "2");
    assert_eq!(trim_decimal(-0.001, 2), "0");
    assert_eq!(trim_decimal(-3.256, 2), "-3.26");
}
