use std::time::Duration;

use tracing::info;

use crate::{
    dto::{input::Action, scene::Scene},
    state::{
        catalog::Tier,
        state_machine::GameEvent,
        timing::{Blink, Pulse},
    },
};

const DRINK_BLINK: Duration = Duration::from_millis(150);
const ARROW_PERIOD: Duration = Duration::from_millis(60);
const ARROW_TOGGLES: u32 = 6;
const DENIED_PERIOD: Duration = Duration::from_millis(100);
const DENIED_TOGGLES: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// Move that takes effect once its arrow finishes blinking.
#[derive(Debug, Clone)]
struct PendingMove {
    target: usize,
    direction: Direction,
    arrow: Pulse,
}

/// Browse reward tiers and pick an unlocked one.
#[derive(Debug, Clone)]
pub struct DrinkSelectScreen {
    score: u32,
    tiers: Vec<Tier>,
    current: usize,
    pending: Option<PendingMove>,
    drink_blink: Blink,
    denied: Option<Pulse>,
}

impl DrinkSelectScreen {
    /// `tiers` must be non-empty and already carry locked flags for `score`.
    pub fn new(score: u32, tiers: Vec<Tier>) -> Self {
        let current = initial_tier(&tiers);
        Self {
            score,
            tiers,
            current,
            pending: None,
            drink_blink: Blink::new(DRINK_BLINK),
            denied: None,
        }
    }

    /// Tier currently on display.
    pub fn current(&self) -> &Tier {
        &self.tiers[self.current]
    }

    /// Run the blink, arrow and denial animations. A move lands once its
    /// arrow has finished.
    pub fn update(&mut self, elapsed: Duration) -> Option<GameEvent> {
        self.drink_blink.advance(elapsed);

        let arrived = self
            .pending
            .as_mut()
            .is_some_and(|pending| pending.arrow.advance(elapsed));
        if arrived {
            if let Some(pending) = self.pending.take() {
                self.current = pending.target;
            }
        }

        let denied_done = self
            .denied
            .as_mut()
            .is_some_and(|pulse| pulse.advance(elapsed));
        if denied_done {
            self.denied = None;
        }
        None
    }

    /// Left and right browse tiers; start picks the tier on display.
    pub fn handle(&mut self, action: Action) -> Option<GameEvent> {
        match action {
            Action::MoveLeft => self.start_move(Direction::Left),
            Action::MoveRight => self.start_move(Direction::Right),
            Action::Confirm => return self.choose(),
            _ => {}
        }
        None
    }

    fn start_move(&mut self, direction: Direction) {
        if self.pending.is_some() {
            return;
        }
        let count = self.tiers.len();
        let target = match direction {
            Direction::Left => (self.current + count - 1) % count,
            Direction::Right => (self.current + 1) % count,
        };
        self.pending = Some(PendingMove {
            target,
            direction,
            arrow: Pulse::uniform(ARROW_PERIOD, ARROW_TOGGLES, false),
        });
    }

    fn choose(&mut self) -> Option<GameEvent> {
        let tier = self.current();
        if tier.locked {
            info!(tier = tier.index, score = self.score, "locked tier chosen");
            self.denied = Some(Pulse::uniform(DENIED_PERIOD, DENIED_TOGGLES, true));
            return None;
        }
        Some(GameEvent::DrinkChosen(tier.position()))
    }

    fn arrow_on(&self, direction: Direction) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.direction == direction && pending.arrow.is_on())
    }

    /// Tier on display with its animation state.
    pub fn draw(&self) -> Scene {
        let tier = self.current().clone();
        Scene::DrinkSelect {
            score: self.score,
            drink_visible: tier.locked || self.drink_blink.is_on(),
            tier,
            left_arrow: self.arrow_on(Direction::Left),
            right_arrow: self.arrow_on(Direction::Right),
            denied: self.denied.as_ref().is_some_and(Pulse::is_on),
        }
    }
}

/// Tier shown first: the one right below the first locked tier, the last
/// tier when everything is unlocked, the first when nothing is.
fn initial_tier(tiers: &[Tier]) -> usize {
    match tiers.iter().position(|tier| tier.locked) {
        Some(0) => 0,
        Some(first_locked) => first_locked - 1,
        None => tiers.len().saturating_sub(1),
    }
}
