use super::*;
use crate::{
    foundation::core::{Canvas, Fps},
    scene::{anim::Keyframes, ease::Ease, model::SceneObject},
};

fn object(id: &str, z: i32, opacity: Keyframes<f64>) -> SceneObject {
    SceneObject {
        id: id.to_string(),
        kind: ObjectKind::Highlight,
        size: Vec2::new(1.0, 2.0),
        z,
        position: Keyframes::constant(FrameIndex(0), Vec2::new(-1.0, 1.0)),
        opacity,
    }
}

fn scene(objects: Vec<SceneObject>) -> Scene {
    Scene {
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 640,
            height: 360,
        },
        unit_px: 20.0,
        background_rgba8: [0, 0, 0, 255],
        duration: FrameIndex(20),
        objects,
    }
}

#[test]
fn invisible_objects_are_skipped() {
    let mut fading = Keyframes::constant(FrameIndex(0), 0.0);
    fading
        .animate(FrameIndex(5), FrameIndex(15), 1.0, Ease::Linear)
        .unwrap();
    let s = scene(vec![object("a", 0, fading)]);

    assert!(Evaluator::eval_frame(&s, FrameIndex(5)).unwrap().nodes.is_empty());
    let g = Evaluator::eval_frame(&s, FrameIndex(10)).unwrap();
    assert_eq!(g.nodes.len(), 1);
    assert_eq!(g.nodes[0].opacity, 0.5);
}

#[test]
fn opacity_is_clamped() {
    let s = scene(vec![object("a", 0, Keyframes::constant(FrameIndex(0), 2.0))]);
    let g = Evaluator::eval_frame(&s, FrameIndex(0)).unwrap();
    assert_eq!(g.nodes[0].opacity, 1.0);
}

#[test]
fn nodes_are_in_pixel_space() {
    let s = scene(vec![object("a", 0, Keyframes::constant(FrameIndex(0), 1.0))]);
    let n = &Evaluator::eval_frame(&s, FrameIndex(3)).unwrap().nodes[0];
    assert_eq!(n.anchor, Point::new(300.0, 160.0));
    assert_eq!(n.size, Vec2::new(20.0, 40.0));
}

#[test]
fn draw_order_is_z_then_insertion() {
    let on = || Keyframes::constant(FrameIndex(0), 1.0);
    let s = scene(vec![object("top", 2, on()), object("low", 0, on()), object("mid", 0, on())]);
    let g = Evaluator::eval_frame(&s, FrameIndex(0)).unwrap();
    let ids: Vec<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["low", "mid", "top"]);
}

#[test]
fn frame_past_duration_is_an_error() {
    let s = scene(vec![]);
    let err = Evaluator::eval_frame(&s, FrameIndex(20)).unwrap_err();
    assert!(matches!(err, MergeVizError::Evaluation(_)));
}
