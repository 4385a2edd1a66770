use super::*;

#[test]
fn defaults_hide_the_plane() {
    let settings = ToolSettings::default();
    assert_eq!(settings.plane_mode(), PlaneMode::Hidden);
    assert_eq!(settings.origin_mode, OriginMode::Center);
    assert!(!settings.has_origin_handle());
}

#[test]
fn json_roundtrip_and_missing_fields() {
    let settings = ToolSettings {
        outer: true,
        outer_locked: true,
        grid: true,
        origin_mode: OriginMode::NoShear,
    };
    let s = settings.to_json().unwrap();
    assert!(s.contains("\"origin_mode\":\"no_shear\""), "{s}");
    assert_eq!(ToolSettings::from_json(&s).unwrap(), settings);

    let partial = ToolSettings::from_json(r#"{"grid": true}"#).unwrap();
    assert!(partial.grid);
    assert!(!partial.outer);
}

#[test]
fn from_json_reports_serde_errors() {
    for bad in [r#"{"outer": 1}"#, r#"{"origin_mode": "sideways"}"#, r#"{"bogus": true}"#, "["] {
        let err = ToolSettings::from_json(bad).unwrap_err();
        assert!(matches!(err, SubperspError::Serde(_)), "{bad}: {err}");
    }
}

#[test]
fn lock_without_plane_is_normalized() {
    let settings = ToolSettings::from_json(r#"{"outer_locked": true}"#).unwrap();
    assert!(!settings.outer_locked);
    assert_eq!(settings.plane_mode(), PlaneMode::Hidden);
}

#[test]
fn toggles_follow_plane_visibility() {
    let mut settings = ToolSettings::default();
    settings.toggle_outer_locked();
    assert!(!settings.outer_locked);

    settings.toggle_outer();
    assert_eq!(settings.plane_mode(), PlaneMode::InnerFollowsOuter);
    settings.toggle_outer_locked();
    assert_eq!(settings.plane_mode(), PlaneMode::OuterFollowsInner);

    settings.toggle_outer();
    assert!(!settings.outer_locked);
    assert_eq!(settings.plane_mode(), PlaneMode::Hidden);
}

#[test]
fn origin_handle_only_in_keep_mode() {
    let mut settings = ToolSettings::default();
    settings.cycle_origin_mode();
    assert!(!settings.has_origin_handle());
    settings.cycle_origin_mode();
    assert!(settings.has_origin_handle());
    settings.cycle_origin_mode();
    assert_eq!(settings.origin_mode, OriginMode::Center);
}
