/// Tick-rate throttling.  The only place the game ever blocks is
/// `Clock::sleep_ms`, so tests can swap in `ManualClock` and run instantly.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const PAUSE_MS: u64 = 500;
const FINAL_PAUSE_MS: u64 = 2000;

pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
    fn sleep_ms(&self, ms: u64);
}

/// Wall-clock time backed by `Instant` and `thread::sleep`.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Virtual time: `sleep_ms` advances the clock instead of blocking.  Clones
/// share the same time so a test can hold a handle while the game owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: u64) {
        self.advance(ms);
    }
}

pub struct FramePacer<C: Clock> {
    clock: C,
    tick_budget_ms: u64,
    last_ms: u64,
}

impl<C: Clock> FramePacer<C> {
    pub fn new(fps: u32, clock: C) -> Self {
        let tick_budget_ms = 1000 / u64::from(fps.max(1));
        let last_ms = clock.now_ms();
        Self {
            clock,
            tick_budget_ms,
            last_ms,
        }
    }

    pub fn tick_budget_ms(&self) -> u64 {
        self.tick_budget_ms
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Block for whatever is left of the tick budget since the last call.
    pub fn update(&mut self) {
        let elapsed = self.clock.now_ms().saturating_sub(self.last_ms);
        if elapsed < self.tick_budget_ms {
            self.clock.sleep_ms(self.tick_budget_ms - elapsed);
        }
        self.last_ms = self.clock.now_ms();
    }

    pub fn pause(&self) {
        self.clock.sleep_ms(PAUSE_MS);
    }

    pub fn final_pause(&self) {
        self.clock.sleep_ms(FINAL_PAUSE_MS);
    }
}
