use std::time::Duration;

use crate::{
    dto::scene::Scene,
    state::{state_machine::GameEvent, timing::Interval},
};

const COUNTDOWN_FROM: u32 = 5;
const STEP: Duration = Duration::from_secs(1);

/// Countdown shown before each player's turn.
#[derive(Debug, Clone)]
pub struct GetReadyScreen {
    player: usize,
    countdown: u32,
    step: Interval,
}

impl GetReadyScreen {
    /// Countdown for the one-based `player`.
    pub fn new(player: usize) -> Self {
        Self {
            player,
            countdown: COUNTDOWN_FROM,
            step: Interval::new(STEP),
        }
    }

    /// Count down one step per second.
    pub fn update(&mut self, elapsed: Duration) -> Option<GameEvent> {
        let steps = self.step.advance(elapsed);
        self.countdown = self.countdown.saturating_sub(steps);
        (self.countdown == 0).then_some(GameEvent::CountdownFinished)
    }

    /// Player and seconds left.
    pub fn draw(&self) -> Scene {
        Scene::GetReady {
            player: self.player,
            countdown: self.countdown,
        }
    }
}
