use std::time::Duration;

use tracing::debug;

use crate::{
    dto::{input::Action, scene::Scene},
    state::{
        catalog::ScoreCatalog,
        game::Session,
        state_machine::GameEvent,
        timing::{Interval, Pulse},
    },
};

const SECOND: Duration = Duration::from_secs(1);
const PULSE_SLOW: Duration = Duration::from_millis(500);
const PULSE_FAST: Duration = Duration::from_millis(100);
const PULSE_SLOW_TOGGLES: u32 = 2;
const PULSE_TOGGLES: u32 = 10;

/// Points of the latest hit, flashed until the pulse runs out.
#[derive(Debug, Clone)]
struct ScorePulse {
    points: u32,
    pulse: Pulse,
}

/// Timed scoring phase.
#[derive(Debug, Clone)]
pub struct PlayingScreen {
    duration_secs: u32,
    remaining_secs: i64,
    second: Interval,
    hurry: bool,
    pulse: Option<ScorePulse>,
}

impl PlayingScreen {
    /// Turn lasting `duration_secs`.
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: i64::from(duration_secs),
            second: Interval::new(SECOND),
            hurry: false,
            pulse: None,
        }
    }

    /// Run the clock and the score pulse.
    pub fn update(&mut self, elapsed: Duration) -> Option<GameEvent> {
        let pulse_done = self
            .pulse
            .as_mut()
            .is_some_and(|score_pulse| score_pulse.pulse.advance(elapsed));
        if pulse_done {
            self.pulse = None;
        }

        for _ in 0..self.second.advance(elapsed) {
            self.remaining_secs -= 1;
            if !self.hurry && self.remaining_secs <= i64::from(self.duration_secs / 3) {
                self.hurry = true;
                debug!(remaining_secs = self.remaining_secs, "hurry up");
            }
            if self.remaining_secs < 0 {
                return Some(GameEvent::TimeUp);
            }
        }
        None
    }

    /// Score hits add their mapped points; every other action is ignored.
    pub fn handle(
        &mut self,
        action: Action,
        session: &mut Session,
        scores: &ScoreCatalog,
    ) -> Option<GameEvent> {
        let symbol = action.score_symbol()?;
        let points = scores.points_for(&symbol);
        if points > 0 {
            session.score += points;
            self.pulse = Some(ScorePulse {
                points,
                pulse: Pulse::accelerating(
                    PULSE_SLOW,
                    PULSE_FAST,
                    PULSE_SLOW_TOGGLES,
                    PULSE_TOGGLES,
                    true,
                ),
            });
        }
        None
    }

    /// Score, clock and flash of the last hit.
    pub fn draw(&self, session: &Session) -> Scene {
        Scene::Playing {
            player: session.current_player(),
            score: session.score,
            remaining_secs: self.remaining_secs.max(0) as u32,
            hurry: self.hurry,
            flash: self
                .pulse
                .as_ref()
                .filter(|score_pulse| score_pulse.pulse.is_on())
                .map(|score_pulse| score_pulse.points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn scores() -> ScoreCatalog {
        let mut points = IndexMap::new();
        points.insert("1".to_string(), 10);
        points.insert("6".to_string(), 100);
        ScoreCatalog::new(points)
    }

    #[test]
    fn hits_add_points_and_flash() {
        let mut session = Session::default();
        let mut screen = PlayingScreen::new(60);
        screen.handle(Action::Score(1), &mut session, &scores());
        screen.handle(Action::Score(6), &mut session, &scores());
        screen.handle(Action::Score(3), &mut session, &scores());
        assert_eq!(session.score, 110);

        let Scene::Playing { flash, .. } = screen.draw(&session) else {
            panic!("expected playing scene");
        };
        assert_eq!(flash, Some(100));

        screen.update(Duration::from_millis(1800));
        let Scene::Playing { flash, .. } = screen.draw(&session) else {
            panic!("expected playing scene");
        };
        assert_eq!(flash, None);
    }

    #[test]
    fn time_runs_out_after_going_below_zero() {
        let mut screen = PlayingScreen::new(3);
        assert_eq!(screen.update(Duration::from_secs(2)), None);
        assert!(screen.hurry);
        assert_eq!(screen.update(Duration::from_secs(1)), None);
        assert_eq!(screen.update(Duration::from_secs(1)), Some(GameEvent::TimeUp));
    }

    #[test]
    fn hurry_starts_at_a_third_of_the_duration() {
        let mut screen = PlayingScreen::new(60);
        screen.update(Duration::from_secs(39));
        assert!(!screen.hurry);
        screen.update(Duration::from_secs(1));
        assert!(screen.hurry);
    }
}
