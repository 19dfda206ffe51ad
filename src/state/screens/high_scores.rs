use std::time::Duration;

use crate::{
    dao::models::ScoreEntry,
    dto::{input::Action, scene::Scene},
    state::{
        state_machine::GameEvent,
        timing::{Blink, Ramp},
    },
};

const SCREEN_HEIGHT: f32 = 600.0;
/// Height of the three podium rows.
const PODIUM_ROW: f32 = 120.0;
const PODIUM_ROWS: usize = 3;
const ROW: f32 = 100.0;
/// Scroll speed in pixels per second.
const INITIAL_SPEED: f32 = 60.0;
const SPEED_STEP: f32 = 30.0;
const SPEED_STEP_PERIOD: Duration = Duration::from_millis(150);
const TOP_BLINK: Duration = Duration::from_millis(80);
const SETTLED_TIMEOUT: Duration = Duration::from_millis(6000);

/// Leaderboard scrolling from off-screen to rest at the top.
#[derive(Debug, Clone)]
pub struct HighScoresScreen {
    rows: Vec<ScoreEntry>,
    offset: f32,
    speed: Ramp,
    settled_for: Option<Duration>,
    top_blink: Blink,
}

impl HighScoresScreen {
    /// Board for `rows`, best first, starting below its resting place.
    pub fn new(rows: Vec<ScoreEntry>) -> Self {
        let offset = SCREEN_HEIGHT - list_height(rows.len());
        Self {
            rows,
            offset,
            speed: Ramp::new(SPEED_STEP_PERIOD, INITIAL_SPEED, SPEED_STEP),
            settled_for: (offset == 0.0).then_some(Duration::ZERO),
            top_blink: Blink::new(TOP_BLINK),
        }
    }

    /// The list has reached the top of the screen.
    pub fn is_settled(&self) -> bool {
        self.settled_for.is_some()
    }

    /// Scroll, then hold for a while before finishing.
    pub fn update(&mut self, elapsed: Duration) -> Option<GameEvent> {
        if self.rows.is_empty() {
            return Some(GameEvent::HighScoresFinished);
        }

        if let Some(settled_for) = &mut self.settled_for {
            *settled_for += elapsed;
            if *settled_for >= SETTLED_TIMEOUT {
                return Some(GameEvent::HighScoresFinished);
            }
            self.top_blink.advance(elapsed);
            return None;
        }

        let distance = self.speed.value() * elapsed.as_secs_f32();
        self.speed.advance(elapsed);
        if self.offset.abs() <= distance {
            self.offset = 0.0;
            self.settled_for = Some(Duration::ZERO);
        } else {
            self.offset -= distance.copysign(self.offset);
        }
        None
    }

    /// Start begins a new game.
    pub fn handle(&mut self, action: Action) -> Option<GameEvent> {
        (action == Action::Confirm).then_some(GameEvent::Start)
    }

    /// Rows and scroll position.
    pub fn draw(&self) -> Scene {
        Scene::HighScores {
            rows: self
                .rows
                .iter()
                .map(|entry| (entry.initials().to_string(), entry.score()))
                .collect(),
            offset: self.offset.round() as i32,
            top_visible: !self.is_settled() || self.top_blink.is_on(),
        }
    }
}

fn list_height(rows: usize) -> f32 {
    let podium = rows.min(PODIUM_ROWS);
    podium as f32 * PODIUM_ROW + (rows - podium) as f32 * ROW
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: usize) -> HighScoresScreen {
        HighScoresScreen::new(
            (0..rows)
                .map(|rank| ScoreEntry::new("AAA", 1000 - rank as u32))
                .collect(),
        )
    }

    fn run_until_settled(screen: &mut HighScoresScreen) -> Duration {
        let frame = Duration::from_millis(33);
        let mut total = Duration::ZERO;
        while !screen.is_settled() {
            assert_eq!(screen.update(frame), None);
            total += frame;
            assert!(total < Duration::from_secs(60), "scroll never settled");
        }
        total
    }

    #[test]
    fn empty_board_is_skipped() {
        let mut screen = HighScoresScreen::new(Vec::new());
        assert_eq!(
            screen.update(Duration::from_millis(1)),
            Some(GameEvent::HighScoresFinished)
        );
    }

    #[test]
    fn short_list_scrolls_up_and_settles() {
        let mut screen = board(2);
        let Scene::HighScores { offset, .. } = screen.draw() else {
            panic!("expected high score scene");
        };
        assert_eq!(offset, 360);

        run_until_settled(&mut screen);
        let Scene::HighScores { offset, .. } = screen.draw() else {
            panic!("expected high score scene");
        };
        assert_eq!(offset, 0);
    }

    #[test]
    fn long_list_scrolls_down_and_settles() {
        let mut screen = board(12);
        let Scene::HighScores { offset, .. } = screen.draw() else {
            panic!("expected high score scene");
        };
        assert_eq!(offset, -660);
        run_until_settled(&mut screen);
        assert!(screen.is_settled());
    }

    #[test]
    fn leaves_six_seconds_after_settling() {
        let mut screen = board(5);
        run_until_settled(&mut screen);
        assert_eq!(screen.update(Duration::from_millis(5999)), None);
        assert_eq!(
            screen.update(Duration::from_millis(1)),
            Some(GameEvent::HighScoresFinished)
        );
    }

    #[test]
    fn confirm_starts_a_game() {
        let mut screen = board(1);
        assert_eq!(screen.handle(Action::Confirm), Some(GameEvent::Start));
    }
}
