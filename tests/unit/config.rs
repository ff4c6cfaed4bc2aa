use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = Config::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.layout.box_spacing, 0.6);
    assert_eq!(cfg.timing.text_hold_secs, 0.5);
    assert_eq!(cfg.output.canvas().width, 1280);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg =
        Config::from_json_str(r#"{ "timing": { "animation_secs": 0.25 }, "output": { "fps": 60 } }"#)
            .unwrap();
    assert_eq!(cfg.timing.animation_secs, 0.25);
    assert_eq!(cfg.timing.compare_hold_secs, 0.5);
    assert_eq!(cfg.output.fps, 60);
    assert_eq!(cfg.output.width, 1280);
    assert_eq!(cfg.layout, LayoutConfig::default());
}

#[test]
fn invalid_values_are_rejected() {
    let err = Config::from_json_str(r#"{ "layout": { "box_size": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("layout.box_size"));

    let err = Config::from_json_str(r#"{ "timing": { "after_shift_secs": -1 } }"#).unwrap_err();
    assert!(err.to_string().contains("timing.after_shift_secs"));

    let err = Config::from_json_str(r#"{ "output": { "width": 641 } }"#).unwrap_err();
    assert!(matches!(err, MergeVizError::Validation(_)));

    let err = Config::from_json_str(r#"{ "output": { "fps": 0 } }"#).unwrap_err();
    assert!(matches!(err, MergeVizError::Validation(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Config::from_json_str("{ layout: }").unwrap_err();
    assert!(matches!(err, MergeVizError::Serde(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = Config::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
