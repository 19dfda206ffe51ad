use std::time::Duration;

use crate::{
    dto::{input::Action, scene::Scene},
    state::{
        game::{Session, winner_message},
        state_machine::GameEvent,
        timing::Blink,
    },
};

const BLINK_PERIOD: Duration = Duration::from_millis(300);

/// Announces the best score of a multi-player game.
#[derive(Debug, Clone)]
pub struct WinnerScreen {
    message: String,
    blink: Blink,
}

impl WinnerScreen {
    /// Announcement for the finished `session`.
    pub fn new(session: &Session) -> Self {
        Self {
            message: winner_message(&session.winners()),
            blink: Blink::new(BLINK_PERIOD),
        }
    }

    /// Blink the message.
    pub fn update(&mut self, elapsed: Duration) -> Option<GameEvent> {
        self.blink.advance(elapsed);
        None
    }

    /// Start moves on to the game-over banner.
    pub fn handle(&mut self, action: Action) -> Option<GameEvent> {
        (action == Action::Confirm).then_some(GameEvent::WinnerAcknowledged)
    }

    /// Message and blink phase.
    pub fn draw(&self) -> Scene {
        Scene::Winner {
            message: self.message.clone(),
            visible: self.blink.is_on(),
        }
    }
}
