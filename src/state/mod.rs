pub mod catalog;
/// Scores and results of the game in progress.
pub mod game;
pub mod screens;
/// Screen transition table.
pub mod state_machine;
pub mod timing;

use std::time::Duration;

use tracing::{info, warn};

use crate::{
    config::AppConfig,
    dao::high_scores::HighScoreRepository,
    dto::{input::Action, scene::Scene},
    error::GameError,
    services::dispenser::DispenserController,
};

use self::{
    catalog::{RewardCatalog, ScoreCatalog},
    game::Session,
    screens::{
        Screen, ScreenContext, dispenser_wait::DispenserWaitScreen,
        drink_select::DrinkSelectScreen, enter_initials::EnterInitialsScreen,
        game_over::GameOverScreen, get_ready::GetReadyScreen, high_scores::HighScoresScreen,
        player_select::PlayerSelectScreen, playing::PlayingScreen, title::TitleScreen,
        winner::WinnerScreen,
    },
    state_machine::{GameEvent, ScreenKind, compute_transition},
};

/// Game rules taken from the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Length of each turn.
    pub duration_secs: u32,
    /// Most players selectable.
    pub max_players: usize,
}

impl From<&AppConfig> for GameSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            duration_secs: config.game_duration_secs,
            max_players: config.max_players,
        }
    }
}

/// Owns the active screen and everything screens share, and swaps screens
/// when one raises a [`GameEvent`].
pub struct Game {
    settings: GameSettings,
    scores: ScoreCatalog,
    rewards: RewardCatalog,
    high_scores: HighScoreRepository,
    dispenser: DispenserController,
    session: Session,
    screen: Screen,
    /// Total elapsed game time; the dispenser schedules against it.
    clock: Duration,
    version: usize,
}

impl Game {
    /// Create a game sitting on the title screen.
    pub fn new(
        settings: GameSettings,
        scores: ScoreCatalog,
        rewards: RewardCatalog,
        high_scores: HighScoreRepository,
        dispenser: DispenserController,
    ) -> Self {
        Self {
            settings,
            scores,
            rewards,
            high_scores,
            dispenser,
            session: Session::default(),
            screen: Screen::Title(TitleScreen::new()),
            clock: Duration::ZERO,
            version: 0,
        }
    }

    /// Kind of the active screen.
    pub fn screen_kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    /// Scores and results of the game in progress.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Dispenser driven by this game.
    pub fn dispenser(&self) -> &DispenserController {
        &self.dispenser
    }

    /// Forward a player action to the active screen. `Quit` is handled by the
    /// frame loop and ignored here.
    pub fn handle_action(&mut self, action: Action) -> Result<(), GameError> {
        if action == Action::Quit {
            return Ok(());
        }
        let mut ctx = ScreenContext {
            session: &mut self.session,
            scores: &self.scores,
            dispenser_idle: !self.dispenser.is_pouring(),
        };
        match self.screen.handle(action, &mut ctx) {
            Some(event) => self.apply(event),
            None => Ok(()),
        }
    }

    /// Advance the game clock, deliver due dispenser completions, then let
    /// the active screen update.
    pub fn update(&mut self, elapsed: Duration) -> Result<(), GameError> {
        self.clock += elapsed;
        self.dispenser.tick(self.clock)?;

        let mut ctx = ScreenContext {
            session: &mut self.session,
            scores: &self.scores,
            dispenser_idle: !self.dispenser.is_pouring(),
        };
        match self.screen.update(elapsed, &mut ctx) {
            Some(event) => self.apply(event),
            None => Ok(()),
        }
    }

    /// Scene of the active screen.
    pub fn draw(&self) -> Scene {
        self.screen.draw(&self.session)
    }

    fn apply(&mut self, event: GameEvent) -> Result<(), GameError> {
        let from = self.screen.kind();

        match &event {
            GameEvent::InitialsEntered(_) => {
                self.pour_pending_drink()?;
            }
            GameEvent::DispenserReleased => {
                if !self.pour_pending_drink()? {
                    warn!("dispenser busy again; waiting for the next poll");
                    self.screen = Screen::PleaseWaitForDispenser(DispenserWaitScreen::new());
                    return Ok(());
                }
            }
            _ => {}
        }

        let to = compute_transition(from, &event, &self.session.turn_status())?;

        match &event {
            GameEvent::PlayersChosen(players) => self.session.start(*players),
            GameEvent::TimeUp => self.session.finish_turn(),
            GameEvent::DrinkChosen(tier) => {
                self.session.drink_tier_to_pour = Some(*tier);
                self.pour_pending_drink()?;
            }
            GameEvent::InitialsEntered(initials) => {
                self.session.record_initials(initials);
                self.high_scores.record(initials, self.session.score);
            }
            _ => {}
        }

        self.screen = self.enter(to);
        self.version += 1;
        info!(from = ?from, to = ?to, event = ?event, version = self.version, "screen transition");
        Ok(())
    }

    /// Hand the chosen drink to the dispenser. Returns `false` while it is
    /// still busy with an earlier pour.
    fn pour_pending_drink(&mut self) -> Result<bool, GameError> {
        let Some(tier) = self.session.drink_tier_to_pour else {
            return Ok(true);
        };
        if self.dispenser.request_pour(tier, self.clock)? {
            self.session.drink_tier_to_pour = None;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Build the screen for `kind`, running its entry action.
    fn enter(&mut self, kind: ScreenKind) -> Screen {
        let score = self.session.score;
        match kind {
            ScreenKind::Title => Screen::Title(TitleScreen::new()),
            ScreenKind::PlayerSelect => {
                Screen::PlayerSelect(PlayerSelectScreen::new(self.settings.max_players))
            }
            ScreenKind::GetReady => {
                Screen::GetReady(GetReadyScreen::new(self.session.current_player()))
            }
            ScreenKind::Playing => {
                self.session.score = 0;
                Screen::Playing(PlayingScreen::new(self.settings.duration_secs))
            }
            ScreenKind::DrinkSelect => Screen::DrinkSelect(DrinkSelectScreen::new(
                score,
                self.rewards.tiers_for(score),
            )),
            ScreenKind::EnterInitials => Screen::EnterInitials(EnterInitialsScreen::new(score)),
            ScreenKind::PleaseWaitForDispenser => {
                Screen::PleaseWaitForDispenser(DispenserWaitScreen::new())
            }
            ScreenKind::Winner => Screen::Winner(WinnerScreen::new(&self.session)),
            ScreenKind::GameOver => Screen::GameOver(GameOverScreen::new()),
            ScreenKind::HighScores => {
                Screen::HighScores(HighScoresScreen::new(self.high_scores.read_all()))
            }
        }
    }
}
