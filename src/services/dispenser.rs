//! Drink dispenser: one pour at a time, followed by an indicator-light phase.
//!
//! A pour runs for `base_pour / relays` (all relays of a tier open together),
//! or `base_pour / 2` when the board has no mapping for the tier. When it
//! completes the tier relays close, the shared light turns on for the light
//! time, and the controller then returns to idle. The light phase does not
//! block the next pour.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    config::AppConfig,
    error::DispenserError,
    services::{
        relay::RelayBoard,
        scheduler::{Scheduler, TaskId},
    },
};

/// Phase of the current dispense operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispenserState {
    /// Nothing pouring and the light is off.
    Idle,
    /// Relays of a tier are open.
    Pouring {
        /// Zero-based tier being poured.
        tier: usize,
    },
    /// Pour finished; the "drink ready" light is on.
    LightOn,
}

/// Deferred completions consumed by [`DispenserController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispenserEvent {
    /// Pour time of `tier` has elapsed.
    PourDone {
        /// Zero-based tier that was poured.
        tier: usize,
    },
    /// Light phase has elapsed.
    LightDone,
}

/// Drives a [`RelayBoard`] through pour and light phases.
pub struct DispenserController {
    board: Box<dyn RelayBoard>,
    base_pour: Duration,
    light: Duration,
    tiers: usize,
    state: DispenserState,
    light_task: Option<TaskId>,
    scheduler: Scheduler<DispenserEvent>,
}

impl DispenserController {
    /// Controller for `tiers` reward tiers, starting idle.
    pub fn new(
        board: Box<dyn RelayBoard>,
        base_pour: Duration,
        light: Duration,
        tiers: usize,
    ) -> Self {
        Self {
            board,
            base_pour,
            light,
            tiers,
            state: DispenserState::Idle,
            light_task: None,
            scheduler: Scheduler::new(),
        }
    }

    /// Build a controller using the timings from `config`.
    pub fn from_config(board: Box<dyn RelayBoard>, config: &AppConfig, tiers: usize) -> Self {
        Self::new(board, config.base_pour(), config.light_duration(), tiers)
    }

    /// Current phase.
    pub fn state(&self) -> DispenserState {
        self.state
    }

    /// `true` only while relays are open; the light phase counts as not pouring.
    pub fn is_pouring(&self) -> bool {
        matches!(self.state, DispenserState::Pouring { .. })
    }

    /// Backend name of the relay board, for logs.
    pub fn board_name(&self) -> &'static str {
        self.board.name()
    }

    /// How long a zero-based tier takes to pour.
    pub fn pour_duration(&self, tier: usize) -> Duration {
        match self.board.tier_switches(tier) {
            Some(switches) if !switches.is_empty() => self.base_pour / switches.len() as u32,
            _ => self.base_pour / 2,
        }
    }

    /// Start pouring `tier` at game-clock time `now`.
    ///
    /// Returns `Ok(false)` without side effects when a pour is already running;
    /// callers poll and retry.
    pub fn request_pour(&mut self, tier: usize, now: Duration) -> Result<bool, DispenserError> {
        if self.is_pouring() {
            warn!(tier, "pour rejected; dispenser busy");
            return Ok(false);
        }
        if tier >= self.tiers {
            return Err(DispenserError::UnknownTier(tier));
        }

        if let Some(task) = self.light_task.take() {
            self.scheduler.cancel(task);
            self.switch_light(false)?;
        }

        for pin in self.tier_pins(tier) {
            self.board.activate(pin)?;
        }
        let duration = self.pour_duration(tier);
        self.scheduler
            .schedule(now, duration, DispenserEvent::PourDone { tier });
        self.state = DispenserState::Pouring { tier };
        info!(
            tier,
            board = self.board.name(),
            duration_ms = duration.as_millis() as u64,
            "pouring drink"
        );
        Ok(true)
    }

    /// Consume every completion due at `now`, including light phases that
    /// both start and end inside a long frame.
    pub fn tick(&mut self, now: Duration) -> Result<(), DispenserError> {
        loop {
            let due = self.scheduler.take_due(now);
            if due.is_empty() {
                return Ok(());
            }
            for task in due {
                self.handle_event(task.event, task.due)?;
            }
        }
    }

    /// Apply a completion event that fired at game-clock time `at`.
    pub fn handle_event(
        &mut self,
        event: DispenserEvent,
        at: Duration,
    ) -> Result<(), DispenserError> {
        match event {
            DispenserEvent::PourDone { tier } => {
                let DispenserState::Pouring { tier: pouring } = self.state else {
                    return Err(DispenserError::TierMismatch {
                        expected: None,
                        got: tier,
                    });
                };
                if pouring != tier {
                    return Err(DispenserError::TierMismatch {
                        expected: Some(pouring),
                        got: tier,
                    });
                }
                for pin in self.tier_pins(tier) {
                    self.board.deactivate(pin)?;
                }
                self.switch_light(true)?;
                self.light_task = Some(self.scheduler.schedule(
                    at,
                    self.light,
                    DispenserEvent::LightDone,
                ));
                self.state = DispenserState::LightOn;
                info!(tier, "drink poured; light on");
            }
            DispenserEvent::LightDone => {
                self.light_task = None;
                self.switch_light(false)?;
                if self.state == DispenserState::LightOn {
                    self.state = DispenserState::Idle;
                }
                debug!("dispenser light off");
            }
        }
        Ok(())
    }

    fn tier_pins(&self, tier: usize) -> Vec<u8> {
        self.board
            .tier_switches(tier)
            .map(<[u8]>::to_vec)
            .unwrap_or_default()
    }

    fn switch_light(&mut self, on: bool) -> Result<(), DispenserError> {
        let Some(pin) = self.board.light_switch() else {
            return Ok(());
        };
        if on {
            self.board.activate(pin)
        } else {
            self.board.deactivate(pin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::relay::SimulatedBoard;
    use std::sync::{Arc, Mutex};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn simulated() -> DispenserController {
        DispenserController::new(Box::new(SimulatedBoard), ms(1000), ms(200), 3)
    }

    /// Board recording the last value written to each pin.
    struct RecordingBoard {
        pins: Vec<Vec<u8>>,
        log: Arc<Mutex<Vec<(u8, bool)>>>,
    }

    impl RelayBoard for RecordingBoard {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn tier_switches(&self, tier: usize) -> Option<&[u8]> {
            self.pins.get(tier).map(Vec::as_slice)
        }

        fn light_switch(&self) -> Option<u8> {
            Some(26)
        }

        fn activate(&mut self, pin: u8) -> Result<(), DispenserError> {
            self.log.lock().unwrap().push((pin, true));
            Ok(())
        }

        fn deactivate(&mut self, pin: u8) -> Result<(), DispenserError> {
            self.log.lock().unwrap().push((pin, false));
            Ok(())
        }
    }

    #[test]
    fn second_request_while_pouring_is_rejected() {
        let mut dispenser = simulated();
        assert!(dispenser.request_pour(0, ms(0)).unwrap());
        assert!(!dispenser.request_pour(1, ms(10)).unwrap());
        assert_eq!(dispenser.state(), DispenserState::Pouring { tier: 0 });
    }

    #[test]
    fn pour_then_light_then_idle() {
        let mut dispenser = simulated();
        let pour = dispenser.pour_duration(1);
        assert_eq!(pour, ms(500));

        dispenser.request_pour(1, ms(0)).unwrap();
        dispenser.tick(pour - ms(1)).unwrap();
        assert!(dispenser.is_pouring());

        dispenser.tick(pour).unwrap();
        assert!(!dispenser.is_pouring());
        assert_eq!(dispenser.state(), DispenserState::LightOn);

        dispenser.tick(pour + ms(199)).unwrap();
        assert_eq!(dispenser.state(), DispenserState::LightOn);

        dispenser.tick(pour + ms(200)).unwrap();
        assert_eq!(dispenser.state(), DispenserState::Idle);
        assert!(dispenser.request_pour(2, pour + ms(200)).unwrap());
    }

    #[test]
    fn coarse_ticks_keep_exact_light_window() {
        let mut dispenser = simulated();
        dispenser.request_pour(0, ms(0)).unwrap();
        // one late frame covers the pour end; the light still ends 200ms after it
        dispenser.tick(ms(650)).unwrap();
        assert_eq!(dispenser.state(), DispenserState::LightOn);
        dispenser.tick(ms(700)).unwrap();
        assert_eq!(dispenser.state(), DispenserState::Idle);
    }

    #[test]
    fn single_long_frame_runs_both_phases() {
        let mut dispenser = simulated();
        dispenser.request_pour(0, ms(0)).unwrap();
        dispenser.tick(ms(5000)).unwrap();
        assert_eq!(dispenser.state(), DispenserState::Idle);
    }

    #[test]
    fn light_phase_accepts_next_pour() {
        let mut dispenser = simulated();
        dispenser.request_pour(0, ms(0)).unwrap();
        dispenser.tick(ms(500)).unwrap();
        assert_eq!(dispenser.state(), DispenserState::LightOn);

        assert!(dispenser.request_pour(1, ms(550)).unwrap());
        // the cancelled light timer must not knock the new pour back to idle
        dispenser.tick(ms(800)).unwrap();
        assert_eq!(dispenser.state(), DispenserState::Pouring { tier: 1 });
    }

    #[test]
    fn pour_duration_splits_across_relays() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let board = RecordingBoard {
            pins: vec![vec![0, 5], vec![6, 13], vec![19]],
            log: log.clone(),
        };
        let mut dispenser = DispenserController::new(Box::new(board), ms(1200), ms(100), 3);
        assert_eq!(dispenser.pour_duration(0), ms(600));
        assert_eq!(dispenser.pour_duration(2), ms(1200));

        dispenser.request_pour(0, ms(0)).unwrap();
        dispenser.tick(ms(600)).unwrap();
        dispenser.tick(ms(700)).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                (0, true),
                (5, true),
                (0, false),
                (5, false),
                (26, true),
                (26, false)
            ]
        );
    }

    #[test]
    fn completion_for_other_tier_is_fatal() {
        let mut dispenser = simulated();
        dispenser.request_pour(0, ms(0)).unwrap();
        let err = dispenser
            .handle_event(DispenserEvent::PourDone { tier: 2 }, ms(10))
            .unwrap_err();
        assert!(matches!(
            err,
            DispenserError::TierMismatch {
                expected: Some(0),
                got: 2
            }
        ));

        let mut idle = simulated();
        assert!(
            idle.handle_event(DispenserEvent::PourDone { tier: 0 }, ms(0))
                .is_err()
        );
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let mut dispenser = simulated();
        assert!(matches!(
            dispenser.request_pour(3, ms(0)),
            Err(DispenserError::UnknownTier(3))
        ));
    }
}
