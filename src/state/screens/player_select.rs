use std::time::Duration;

use crate::{
    dto::{input::Action, scene::Scene},
    state::{state_machine::GameEvent, timing::Blink},
};

const HIGHLIGHT_PERIOD: Duration = Duration::from_millis(150);

/// Pick the number of players, wrapping within `1..=max_players`.
#[derive(Debug, Clone)]
pub struct PlayerSelectScreen {
    players: usize,
    max_players: usize,
    highlight: Blink,
}

impl PlayerSelectScreen {
    /// Picker starting at one player.
    pub fn new(max_players: usize) -> Self {
        Self {
            players: 1,
            max_players: max_players.max(1),
            highlight: Blink::new(HIGHLIGHT_PERIOD),
        }
    }

    /// Count currently offered.
    pub fn players(&self) -> usize {
        self.players
    }

    /// Blink the count.
    pub fn update(&mut self, elapsed: Duration) -> Option<GameEvent> {
        self.highlight.advance(elapsed);
        None
    }

    /// Left and right change the count; start confirms it.
    pub fn handle(&mut self, action: Action) -> Option<GameEvent> {
        match action {
            Action::MoveLeft => {
                self.players = if self.players == 1 {
                    self.max_players
                } else {
                    self.players - 1
                };
                None
            }
            Action::MoveRight => {
                self.players = self.players % self.max_players + 1;
                None
            }
            Action::Confirm => Some(GameEvent::PlayersChosen(self.players)),
            _ => None,
        }
    }

    /// Count and blink phase.
    pub fn draw(&self) -> Scene {
        Scene::PlayerSelect {
            players: self.players(),
            highlighted: self.highlight.is_on(),
        }
    }
}
