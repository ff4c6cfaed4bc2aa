use super::*;

fn tiny_scene() -> Scene {
    Scene {
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 200,
            height: 100,
        },
        unit_px: 10.0,
        background_rgba8: [0, 0, 0, 255],
        duration: FrameIndex(10),
        objects: vec![SceneObject {
            id: "box0".to_string(),
            kind: ObjectKind::Box {
                label: "3".to_string(),
                text_size: 0.25,
            },
            size: Vec2::new(0.8, 0.8),
            z: 1,
            position: Keyframes::constant(FrameIndex(0), Vec2::new(1.0, 2.0)),
            opacity: Keyframes::constant(FrameIndex(0), 1.0),
        }],
    }
}

#[test]
fn tiny_scene_is_valid() {
    tiny_scene().validate().unwrap();
    assert_eq!(tiny_scene().frame_range().len_frames(), 10);
    assert!(tiny_scene().objects.iter().any(|o| o.id == "box0"));
}

#[test]
fn to_px_flips_y_around_the_centre() {
    let s = tiny_scene();
    assert_eq!(s.to_px(Vec2::ZERO), Point::new(100.0, 50.0));
    assert_eq!(s.to_px(Vec2::new(1.0, 2.0)), Point::new(110.0, 30.0));
}

#[test]
fn duplicate_ids_and_zero_duration_are_rejected() {
    let mut s = tiny_scene();
    s.objects.push(s.objects[0].clone());
    assert!(s.validate().unwrap_err().to_string().contains("box0"));

    let mut s = tiny_scene();
    s.duration = FrameIndex(0);
    assert!(s.validate().is_err());

    let mut s = tiny_scene();
    s.unit_px = 0.0;
    assert!(s.validate().is_err());
}

#[test]
fn json_round_trip_preserves_scene() {
    let s = tiny_scene();
    let json = serde_json::to_string(&s).unwrap();
    assert!(json.contains(r#""type":"box""#));
    assert_eq!(Scene::from_json_str(&json).unwrap(), s);
}

#[test]
fn json_round_trip_is_exact_for_arithmetic_positions() {
    let mut scene = tiny_scene();
    let mut xs = Vec::new();
    for i in 0..2000 {
        let x = f64::from(i) * 0.1 - 3.7;
        xs.push(x);
        scene.objects[0]
            .position
            .set(FrameIndex(0), Vec2::new(x, -1.4000000000000004))
            .unwrap();
    }

    let back = Scene::from_json_str(&serde_json::to_string(&scene).unwrap()).unwrap();
    assert_eq!(back, scene);
    let sampled: Vec<f64> = back.objects[0]
        .position
        .keys
        .iter()
        .skip(2)
        .step_by(2)
        .map(|k| k.value.x)
        .collect();
    assert_eq!(sampled, xs);
}
