use std::time::Duration;

use crate::{
    dto::{input::Action, scene::Scene},
    state::{
        state_machine::GameEvent,
        timing::{Cycle, Interval},
    },
};

const POLL_PERIOD: Duration = Duration::from_millis(6000);
const SPINNER_PERIOD: Duration = Duration::from_millis(100);
/// Frames in the waiting spinner.
pub const SPINNER_FRAMES: usize = 4;

/// Shown while a previous drink is still pouring. Polls instead of blocking
/// so the spinner keeps moving.
#[derive(Debug, Clone)]
pub struct DispenserWaitScreen {
    poll: Interval,
    spinner: Cycle,
    ready: bool,
}

impl DispenserWaitScreen {
    /// Start waiting, not yet ready.
    pub fn new() -> Self {
        Self {
            poll: Interval::new(POLL_PERIOD),
            spinner: Cycle::new(SPINNER_PERIOD, SPINNER_FRAMES, 0),
            ready: false,
        }
    }

    /// A poll has seen the dispenser free.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// `dispenser_idle` is the dispenser's state this frame; it is only
    /// looked at when a poll is due.
    pub fn update(&mut self, elapsed: Duration, dispenser_idle: bool) -> Option<GameEvent> {
        self.spinner.advance(elapsed);
        if self.poll.advance(elapsed) > 0 && dispenser_idle {
            self.ready = true;
        }
        None
    }

    /// Start releases the player once the dispenser is free.
    pub fn handle(&mut self, action: Action) -> Option<GameEvent> {
        (self.is_ready() && action == Action::Confirm).then_some(GameEvent::DispenserReleased)
    }

    /// Spinner and ready flag.
    pub fn draw(&self) -> Scene {
        Scene::PleaseWaitForDispenser {
            spinner: self.spinner.index(),
            ready: self.ready,
        }
    }
}

impl Default for DispenserWaitScreen {
    fn default() -> Self {
        Self::new()
    }
}
