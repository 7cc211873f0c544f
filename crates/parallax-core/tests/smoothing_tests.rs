use glam::Vec2;
use parallax_core::{Activity, ActivityMonitor, SmoothedCursor, QUIET_PERIOD_SEC};

#[test]
fn smoothing_moves_monotonically_toward_target() {
    let mut s = SmoothedCursor::default();
    let target = Vec2::new(1.0, -0.5);
    let mut prev = (target - s.lerp).length();
    for _ in 0..50 {
        s.step(target, 5.0, 1.0 / 60.0);
        let err = (target - s.lerp).length();
        assert!(err < prev);
        prev = err;
    }
    // 50 frames at 60 Hz shrink the error by (1 - 5/60)^50.
    assert!(prev < 0.02);
}

#[test]
fn smoothing_converges_within_tolerance() {
    let mut s = SmoothedCursor::default();
    let target = Vec2::new(0.04, 0.02);
    for _ in 0..50 {
        s.step(target, 5.0, 1.0 / 60.0);
    }
    assert!((target - s.lerp).abs().max_element() < 1e-3);

    let far = Vec2::new(4.0, -2.0);
    for _ in 0..200 {
        s.step(far, 5.0, 1.0 / 60.0);
    }
    assert!((far - s.lerp).abs().max_element() < 1e-3);
}

#[test]
fn long_frame_does_not_overshoot() {
    let mut s = SmoothedCursor::default();
    let out = s.step(Vec2::new(2.0, 2.0), 5.0, 3.0);
    assert_eq!(out, Vec2::new(2.0, 2.0));
}

#[test]
fn zero_dt_holds_position() {
    let mut s = SmoothedCursor {
        lerp: Vec2::new(0.3, 0.1),
    };
    s.step(Vec2::new(5.0, 5.0), 5.0, 0.0);
    assert_eq!(s.lerp, Vec2::new(0.3, 0.1));
}

#[test]
fn constant_value_turns_idle_after_quiet_period() {
    let mut m = ActivityMonitor::new(QUIET_PERIOD_SEC, 1e-4);
    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    assert_eq!(m.observe(0.0, t), Activity::Active);
    while t <= QUIET_PERIOD_SEC {
        t += dt;
        let state = m.observe(0.0, t);
        if t <= QUIET_PERIOD_SEC {
            assert_eq!(state, Activity::Active, "went idle early at {t}");
        }
    }
    t += dt;
    assert_eq!(m.observe(0.0, t), Activity::Idle);
}

#[test]
fn any_change_flips_back_to_active_and_resets_timer() {
    let mut m = ActivityMonitor::new(1.5, 1e-4);
    assert_eq!(m.observe(0.0, 2.0), Activity::Idle);
    assert_eq!(m.observe(0.5, 2.1), Activity::Active);
    // Static again, but the timer restarted at 2.1.
    assert_eq!(m.observe(0.5, 3.5), Activity::Active);
    assert_eq!(m.observe(0.5, 3.7), Activity::Idle);
    assert!((m.static_for(3.7) - 1.6).abs() < 1e-9);
}

#[test]
fn sub_epsilon_jitter_accumulates_against_the_anchor() {
    let mut m = ActivityMonitor::new(1.5, 1e-3);
    m.observe(0.0, 0.0);
    assert_eq!(m.observe(0.0005, 2.0), Activity::Idle);
    // Still within epsilon of the anchor (0.0).
    assert_eq!(m.observe(0.0009, 2.1), Activity::Idle);
    // Crosses it.
    assert_eq!(m.observe(0.0015, 2.2), Activity::Active);
}
