use std::sync::Arc;

use super::*;
use crate::{
    foundation::core::{Canvas, Fps, Vec2},
    scene::{anim::Keyframes, model::SceneObject},
};

fn rasterizer() -> Rasterizer {
    Rasterizer::with_fontdb(Arc::new(usvg::fontdb::Database::new()))
}

fn scene() -> Scene {
    Scene {
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 64,
            height: 48,
        },
        unit_px: 10.0,
        background_rgba8: [0, 0, 0, 255],
        duration: FrameIndex(2),
        objects: vec![SceneObject {
            id: "highlight0".to_string(),
            kind: crate::scene::model::ObjectKind::Highlight,
            size: Vec2::new(2.0, 2.0),
            z: 0,
            position: Keyframes::constant(FrameIndex(0), Vec2::ZERO),
            opacity: Keyframes::constant(FrameIndex(0), 1.0),
        }],
    }
}

#[test]
fn frame_has_canvas_size_and_background() {
    let f = render_frame(&scene(), FrameIndex(0), &rasterizer()).unwrap();
    assert_eq!((f.width, f.height), (64, 48));
    assert_eq!(f.data.len(), 64 * 48 * 4);
    assert!(f.premultiplied);
    assert_eq!(f.pixel(1, 1), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(64, 0), None);
}

#[test]
fn highlight_tints_its_interior() {
    let f = render_frame(&scene(), FrameIndex(0), &rasterizer()).unwrap();
    let [r, g, b, a] = f.pixel(32, 24).unwrap();
    assert_eq!(a, 255);
    assert!(r > 30 && g > 30, "got {r},{g}");
    assert_eq!(b, 0);
}

#[test]
fn out_of_range_frame_is_an_error() {
    let err = render_frame(&scene(), FrameIndex(2), &rasterizer()).unwrap_err();
    assert!(matches!(err, MergeVizError::Evaluation(_)));
}

#[test]
fn render_frames_renders_the_whole_range() {
    let s = scene();
    let frames = render_frames(&s, s.frame_range(), &rasterizer()).unwrap();
    assert_eq!(frames.len(), 2);

    let empty = FrameRange::new(FrameIndex(1), FrameIndex(1)).unwrap();
    assert!(render_frames(&s, empty, &rasterizer()).is_err());
}

#[test]
fn save_png_writes_a_readable_image() {
    let dir = std::env::temp_dir().join(format!("mergeviz_png_{}", std::process::id()));
    let path = dir.join("nested").join("frame.png");
    let f = render_frame(&scene(), FrameIndex(0), &rasterizer()).unwrap();
    save_png(&f, &path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 48));
    assert_eq!(img.get_pixel(1, 1).0, [0, 0, 0, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unpremultiply_restores_straight_colour() {
    assert_eq!(unpremultiply(&[64, 0, 0, 128]), vec![128, 0, 0, 128]);
    assert_eq!(unpremultiply(&[0, 0, 0, 0]), vec![0, 0, 0, 0]);
}

#[test]
fn mp4_requires_integer_fps() {
    let mut s = scene();
    s.fps = Fps::new(30000, 1001).unwrap();
    let err = render_to_mp4(&s, "target/never.mp4", RenderToMp4Opts::default(), &rasterizer())
        .unwrap_err();
    assert!(matches!(err, MergeVizError::Validation(_)));
}
