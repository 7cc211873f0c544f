use parallax_core::{FrameLoop, LoopControl, StopToken};

#[test]
fn first_frame_has_zero_delta() {
    let mut lp = FrameLoop::new(StopToken::new());
    let mut seen = Vec::new();
    lp.step(10.0, |t| seen.push(t));
    lp.step(10.5, |t| seen.push(t));
    assert_eq!(seen[0].delta, 0.0);
    assert!((seen[1].delta - 0.5).abs() < 1e-6);
    assert_eq!(seen[1].frame, 1);
}

#[test]
fn bounded_run_executes_exactly_n_frames() {
    let mut lp = FrameLoop::new(StopToken::new());
    let mut count = 0;
    let ran = lp.run_fixed(120, 1.0 / 60.0, |_| count += 1);
    assert_eq!(ran, 120);
    assert_eq!(count, 120);
    assert_eq!(lp.frames(), 120);
}

#[test]
fn cancellation_stops_the_loop_from_inside_a_tick() {
    let stop = StopToken::new();
    let mut lp = FrameLoop::new(stop.clone());
    let ran = lp.run_fixed(1000, 0.016, |t| {
        if t.frame == 9 {
            stop.cancel();
        }
    });
    assert_eq!(ran, 10);
    assert_eq!(lp.step(99.0, |_| panic!("ticked after cancel")), LoopControl::Stop);
}

#[test]
fn external_teardown_prevents_further_ticks() {
    let mut lp = FrameLoop::new(StopToken::new());
    let teardown = lp.stop_token();
    assert_eq!(lp.step(0.0, |_| {}), LoopControl::Continue);
    teardown.cancel();
    assert_eq!(lp.step(0.016, |_| {}), LoopControl::Stop);
    assert_eq!(lp.frames(), 1);
}

#[test]
fn backwards_clock_yields_zero_delta() {
    let mut lp = FrameLoop::new(StopToken::new());
    lp.step(5.0, |_| {});
    lp.step(4.0, |t| assert_eq!(t.delta, 0.0));
}
