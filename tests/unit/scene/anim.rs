use super::*;

#[test]
fn constant_holds_before_and_after() {
    let kf = Keyframes::constant(FrameIndex(5), 2.0);
    assert_eq!(kf.sample(FrameIndex(0)).unwrap(), 2.0);
    assert_eq!(kf.sample(FrameIndex(50)).unwrap(), 2.0);
}

#[test]
fn animate_interpolates_between_keys() {
    let mut kf = Keyframes::constant(FrameIndex(0), 0.0);
    kf.animate(FrameIndex(10), FrameIndex(20), 1.0, Ease::Linear)
        .unwrap();

    assert_eq!(kf.sample(FrameIndex(5)).unwrap(), 0.0);
    assert_eq!(kf.sample(FrameIndex(10)).unwrap(), 0.0);
    assert_eq!(kf.sample(FrameIndex(15)).unwrap(), 0.5);
    assert_eq!(kf.sample(FrameIndex(20)).unwrap(), 1.0);
    assert_eq!(kf.sample(FrameIndex(99)).unwrap(), 1.0);
}

#[test]
fn set_is_a_step_not_a_ramp() {
    let mut kf = Keyframes::constant(FrameIndex(0), Vec2::new(0.0, 0.0));
    kf.set(FrameIndex(10), Vec2::new(4.0, -2.0)).unwrap();

    assert_eq!(kf.sample(FrameIndex(9)).unwrap(), Vec2::new(0.0, 0.0));
    assert_eq!(kf.sample(FrameIndex(10)).unwrap(), Vec2::new(4.0, -2.0));
    assert_eq!(kf.last_value(), Some(&Vec2::new(4.0, -2.0)));
}

#[test]
fn animation_starts_from_current_value() {
    let mut kf = Keyframes::constant(FrameIndex(0), 0.0);
    kf.animate(FrameIndex(0), FrameIndex(10), 1.0, Ease::Linear)
        .unwrap();
    kf.animate(FrameIndex(10), FrameIndex(20), 0.0, Ease::InOutCubic)
        .unwrap();
    assert_eq!(kf.sample(FrameIndex(10)).unwrap(), 1.0);
    assert_eq!(kf.sample(FrameIndex(15)).unwrap(), 0.5);
    assert_eq!(kf.sample(FrameIndex(20)).unwrap(), 0.0);
}

#[test]
fn out_of_order_keys_are_rejected() {
    let mut kf = Keyframes::constant(FrameIndex(10), 0.0);
    assert!(kf.set(FrameIndex(5), 1.0).is_err());
    assert!(
        kf.animate(FrameIndex(20), FrameIndex(15), 1.0, Ease::Linear)
            .is_err()
    );

    let bad = Keyframes {
        keys: vec![
            Keyframe {
                frame: FrameIndex(3),
                value: 0.0,
                ease: Ease::Linear,
            },
            Keyframe {
                frame: FrameIndex(1),
                value: 1.0,
                ease: Ease::Linear,
            },
        ],
    };
    assert!(bad.validate().is_err());
    assert!(Keyframes::<f64> { keys: vec![] }.validate().is_err());
}
