use space_invader::pacer::*;

#[test]
fn tick_budget_from_fps() {
    assert_eq!(FramePacer::new(60, ManualClock::new()).tick_budget_ms(), 16);
    assert_eq!(FramePacer::new(50, ManualClock::new()).tick_budget_ms(), 20);
    // A zero rate is treated as one frame per second.
    assert_eq!(FramePacer::new(0, ManualClock::new()).tick_budget_ms(), 1000);
}

#[test]
fn update_sleeps_only_the_remainder() {
    let clock = ManualClock::new();
    let mut pacer = FramePacer::new(50, clock.clone());

    pacer.update();
    assert_eq!(clock.now_ms(), 20);

    clock.advance(5);
    pacer.update();
    assert_eq!(clock.now_ms(), 40);

    // Over budget: no sleep at all.
    clock.advance(30);
    pacer.update();
    assert_eq!(clock.now_ms(), 70);
}

#[test]
fn pauses_are_fixed_lengths() {
    let clock = ManualClock::new();
    let pacer = FramePacer::new(60, clock.clone());
    pacer.pause();
    assert_eq!(clock.now_ms(), 500);
    pacer.final_pause();
    assert_eq!(clock.now_ms(), 2_500);
}

#[test]
fn system_clock_advances_across_sleep() {
    let clock = SystemClock::new();
    let start = clock.now_ms();
    clock.sleep_ms(5);
    assert!(clock.now_ms() >= start + 5);
}
