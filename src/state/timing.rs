//! Elapsed-time animation policies shared by every screen.
//!
//! All policies are driven by accumulated milliseconds rather than frame
//! counts, so the same total elapsed time produces the same number of steps
//! however it is chunked into frames.

use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Accumulates elapsed time and fires once per whole period.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    accumulated: Duration,
}

impl Interval {
    /// Create an interval firing every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            accumulated: Duration::ZERO,
        }
    }

    /// Feed elapsed time, returning how many periods completed.
    ///
    /// Any remainder carries over into the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut fired = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fired += 1;
        }
        fired
    }
}

/// Boolean flipped once per interval (blinking text, cursors).
#[derive(Debug, Clone)]
pub struct Blink {
    interval: Interval,
    on: bool,
}

impl Blink {
    /// Create a blink that starts visible.
    pub fn new(period: Duration) -> Self {
        Self {
            interval: Interval::new(period),
            on: true,
        }
    }

    /// Advance the blink and return the number of toggles that happened.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let fired = self.interval.advance(elapsed);
        if fired % 2 == 1 {
            self.on = !self.on;
        }
        fired
    }

    /// Whether the element is currently shown.
    pub fn is_on(&self) -> bool {
        self.on
    }
}

/// Index advanced once per interval, wrapping at `len` (slideshows, colour cycles).
#[derive(Debug, Clone)]
pub struct Cycle {
    interval: Interval,
    index: usize,
    len: usize,
}

impl Cycle {
    /// Create a cycle over `len` items starting at `start`.
    pub fn new(period: Duration, len: usize, start: usize) -> Self {
        let len = len.max(1);
        Self {
            interval: Interval::new(period),
            index: start % len,
            len,
        }
    }

    /// Advance by the elapsed time.
    pub fn advance(&mut self, elapsed: Duration) {
        let fired = self.interval.advance(elapsed) as usize;
        self.index = (self.index + fired) % self.len;
    }

    /// Current index.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Toggle that runs for a fixed number of cycles and then cancels itself.
///
/// The first `slow_cycles` toggles use `slow`, the rest use `fast`.
#[derive(Debug, Clone)]
pub struct Pulse {
    slow: Duration,
    fast: Duration,
    slow_cycles: u32,
    max_cycles: u32,
    accumulated: Duration,
    cycles: u32,
    on: bool,
    running: bool,
}

impl Pulse {
    /// Pulse with a constant period.
    pub fn uniform(period: Duration, max_cycles: u32, start_on: bool) -> Self {
        Self::accelerating(period, period, 0, max_cycles, start_on)
    }

    /// Pulse that switches from `slow` to `fast` after `slow_cycles` toggles.
    pub fn accelerating(
        slow: Duration,
        fast: Duration,
        slow_cycles: u32,
        max_cycles: u32,
        start_on: bool,
    ) -> Self {
        Self {
            slow: slow.max(MIN_PERIOD),
            fast: fast.max(MIN_PERIOD),
            slow_cycles,
            max_cycles,
            accumulated: Duration::ZERO,
            cycles: 0,
            on: start_on,
            running: true,
        }
    }

    /// Advance the pulse. Returns `true` on the call where it completes.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.accumulated += elapsed;
        loop {
            let period = if self.cycles < self.slow_cycles {
                self.slow
            } else {
                self.fast
            };
            if self.accumulated < period {
                return false;
            }
            self.accumulated -= period;
            self.cycles += 1;
            self.on = !self.on;
            if self.cycles >= self.max_cycles {
                self.finish();
                return true;
            }
        }
    }

    fn finish(&mut self) {
        self.running = false;
        self.on = false;
        self.accumulated = Duration::ZERO;
    }

    /// Whether the pulsed element is currently shown.
    pub fn is_on(&self) -> bool {
        self.on
    }
}

/// Value increased by a fixed step once per interval (scroll acceleration).
#[derive(Debug, Clone)]
pub struct Ramp {
    interval: Interval,
    value: f32,
    step: f32,
}

impl Ramp {
    /// Start at `initial`, adding `step` every `period`.
    pub fn new(period: Duration, initial: f32, step: f32) -> Self {
        Self {
            interval: Interval::new(period),
            value: initial,
            step,
        }
    }

    /// Advance the ramp, returning the updated value.
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        let fired = self.interval.advance(elapsed);
        self.value += self.step * fired as f32;
        self.value
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }
}
