use super::*;

const ALL: [Ease; 2] = [Ease::Linear, Ease::InOutCubic];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::InOutCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::InOutCubic.apply(7.0), 1.0);
    assert_eq!(Ease::InOutCubic.apply(0.5), 0.5);
}
