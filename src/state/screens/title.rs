use std::time::Duration;

use crate::{
    dto::{input::Action, scene::Scene},
    state::{state_machine::GameEvent, timing::Cycle},
};

/// Images in the title slideshow.
pub const SLIDESHOW_FRAMES: usize = 50;
const FRAME_PERIOD: Duration = Duration::from_millis(30);
const TIMEOUT: Duration = Duration::from_millis(8000);

/// Attract-mode slideshow that falls through to the leaderboard.
#[derive(Debug, Clone)]
pub struct TitleScreen {
    slideshow: Cycle,
    shown_for: Duration,
}

impl TitleScreen {
    /// Slideshow from its first frame.
    pub fn new() -> Self {
        Self {
            slideshow: Cycle::new(FRAME_PERIOD, SLIDESHOW_FRAMES, 0),
            shown_for: Duration::ZERO,
        }
    }

    /// Advance the slideshow; moves on to the leaderboard after a while.
    pub fn update(&mut self, elapsed: Duration) -> Option<GameEvent> {
        self.shown_for += elapsed;
        if self.shown_for >= TIMEOUT {
            return Some(GameEvent::ShowHighScores);
        }
        self.slideshow.advance(elapsed);
        None
    }

    /// Start begins a new game.
    pub fn handle(&mut self, action: Action) -> Option<GameEvent> {
        (action == Action::Confirm).then_some(GameEvent::Start)
    }

    /// Current slideshow frame.
    pub fn draw(&self) -> Scene {
        Scene::Title {
            frame: self.slideshow.index(),
        }
    }
}

impl Default for TitleScreen {
    fn default() -> Self {
        Self::new()
    }
}
