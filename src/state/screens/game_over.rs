use std::time::Duration;

use crate::{
    dto::{input::Action, scene::Scene},
    state::{state_machine::GameEvent, timing::Cycle},
};

/// Number of panel colours cycled through.
pub const PANEL_COLORS: usize = 3;
const COLOR_PERIOD: Duration = Duration::from_millis(150);
const TIMEOUT: Duration = Duration::from_millis(6000);

/// "GAME OVER" with two panels cycling colours, offset by one.
#[derive(Debug, Clone)]
pub struct GameOverScreen {
    top: Cycle,
    bottom: Cycle,
    shown_for: Duration,
}

impl GameOverScreen {
    /// Panels start one colour apart.
    pub fn new() -> Self {
        Self {
            top: Cycle::new(COLOR_PERIOD, PANEL_COLORS, 0),
            bottom: Cycle::new(COLOR_PERIOD, PANEL_COLORS, 1),
            shown_for: Duration::ZERO,
        }
    }

    /// Cycle the panels; falls back to the title after a while.
    pub fn update(&mut self, elapsed: Duration) -> Option<GameEvent> {
        self.shown_for += elapsed;
        if self.shown_for >= TIMEOUT {
            return Some(GameEvent::AttractTimeout);
        }
        self.top.advance(elapsed);
        self.bottom.advance(elapsed);
        None
    }

    /// Start begins a new game.
    pub fn handle(&mut self, action: Action) -> Option<GameEvent> {
        (action == Action::Confirm).then_some(GameEvent::Start)
    }

    /// Current panel colours.
    pub fn draw(&self) -> Scene {
        Scene::GameOver {
            top_color: self.top.index(),
            bottom_color: self.bottom.index(),
        }
    }
}

impl Default for GameOverScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_stay_one_colour_apart() {
        let mut screen = GameOverScreen::new();
        for _ in 0..20 {
            screen.update(Duration::from_millis(40));
            let Scene::GameOver {
                top_color,
                bottom_color,
            } = screen.draw()
            else {
                panic!("expected game over scene");
            };
            assert_eq!((top_color + 1) % PANEL_COLORS, bottom_color);
        }
    }

    #[test]
    fn returns_to_title_after_timeout() {
        let mut screen = GameOverScreen::new();
        assert_eq!(screen.update(Duration::from_millis(5999)), None);
        assert_eq!(
            screen.update(Duration::from_millis(1)),
            Some(GameEvent::AttractTimeout)
        );
    }
}
