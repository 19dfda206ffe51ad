//! One module per screen. Every screen owns its own timers and cursors,
//! built fresh on entry and dropped on exit.

/// Wait for an earlier pour before the next drink.
pub mod dispenser_wait;
/// Reward tier browser.
pub mod drink_select;
/// Arcade-style initials entry.
pub mod enter_initials;
/// "GAME OVER" banner.
pub mod game_over;
/// Countdown before a turn.
pub mod get_ready;
/// Scrolling leaderboard.
pub mod high_scores;
/// Player count picker.
pub mod player_select;
/// Timed scoring phase.
pub mod playing;
/// Attract-mode slideshow.
pub mod title;
/// Multi-player result.
pub mod winner;

use std::time::Duration;

use crate::{
    dto::{input::Action, scene::Scene},
    state::{
        catalog::ScoreCatalog,
        game::Session,
        state_machine::{GameEvent, ScreenKind},
    },
};

use self::{
    dispenser_wait::DispenserWaitScreen, drink_select::DrinkSelectScreen,
    enter_initials::EnterInitialsScreen, game_over::GameOverScreen, get_ready::GetReadyScreen,
    high_scores::HighScoresScreen, player_select::PlayerSelectScreen, playing::PlayingScreen,
    title::TitleScreen, winner::WinnerScreen,
};

/// What a screen may look at or change while handling a frame.
pub struct ScreenContext<'a> {
    /// Game in progress.
    pub session: &'a mut Session,
    /// Points per score symbol.
    pub scores: &'a ScoreCatalog,
    /// Dispenser is not pouring this frame.
    pub dispenser_idle: bool,
}

/// The active screen with its private state.
#[derive(Debug, Clone)]
pub enum Screen {
    /// See [`ScreenKind::Title`].
    Title(TitleScreen),
    /// See [`ScreenKind::PlayerSelect`].
    PlayerSelect(PlayerSelectScreen),
    /// See [`ScreenKind::GetReady`].
    GetReady(GetReadyScreen),
    /// See [`ScreenKind::Playing`].
    Playing(PlayingScreen),
    /// See [`ScreenKind::DrinkSelect`].
    DrinkSelect(DrinkSelectScreen),
    /// See [`ScreenKind::EnterInitials`].
    EnterInitials(EnterInitialsScreen),
    /// See [`ScreenKind::PleaseWaitForDispenser`].
    PleaseWaitForDispenser(DispenserWaitScreen),
    /// See [`ScreenKind::Winner`].
    Winner(WinnerScreen),
    /// See [`ScreenKind::GameOver`].
    GameOver(GameOverScreen),
    /// See [`ScreenKind::HighScores`].
    HighScores(HighScoresScreen),
}

impl Screen {
    /// Which screen this is, for the transition table.
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Title(_) => ScreenKind::Title,
            Screen::PlayerSelect(_) => ScreenKind::PlayerSelect,
            Screen::GetReady(_) => ScreenKind::GetReady,
            Screen::Playing(_) => ScreenKind::Playing,
            Screen::DrinkSelect(_) => ScreenKind::DrinkSelect,
            Screen::EnterInitials(_) => ScreenKind::EnterInitials,
            Screen::PleaseWaitForDispenser(_) => ScreenKind::PleaseWaitForDispenser,
            Screen::Winner(_) => ScreenKind::Winner,
            Screen::GameOver(_) => ScreenKind::GameOver,
            Screen::HighScores(_) => ScreenKind::HighScores,
        }
    }

    /// Advance timers and animations by `elapsed`.
    pub fn update(&mut self, elapsed: Duration, ctx: &mut ScreenContext<'_>) -> Option<GameEvent> {
        match self {
            Screen::Title(screen) => screen.update(elapsed),
            Screen::PlayerSelect(screen) => screen.update(elapsed),
            Screen::GetReady(screen) => screen.update(elapsed),
            Screen::Playing(screen) => screen.update(elapsed),
            Screen::DrinkSelect(screen) => screen.update(elapsed),
            Screen::EnterInitials(screen) => screen.update(elapsed),
            Screen::PleaseWaitForDispenser(screen) => screen.update(elapsed, ctx.dispenser_idle),
            Screen::Winner(screen) => screen.update(elapsed),
            Screen::GameOver(screen) => screen.update(elapsed),
            Screen::HighScores(screen) => screen.update(elapsed),
        }
    }

    /// React to one player action.
    pub fn handle(&mut self, action: Action, ctx: &mut ScreenContext<'_>) -> Option<GameEvent> {
        match self {
            Screen::Title(screen) => screen.handle(action),
            Screen::PlayerSelect(screen) => screen.handle(action),
            Screen::GetReady(_) => None,
            Screen::Playing(screen) => screen.handle(action, ctx.session, ctx.scores),
            Screen::DrinkSelect(screen) => screen.handle(action),
            Screen::EnterInitials(screen) => screen.handle(action),
            Screen::PleaseWaitForDispenser(screen) => screen.handle(action),
            Screen::Winner(screen) => screen.handle(action),
            Screen::GameOver(screen) => screen.handle(action),
            Screen::HighScores(screen) => screen.handle(action),
        }
    }

    /// Snapshot of what to show this frame.
    pub fn draw(&self, session: &Session) -> Scene {
        match self {
            Screen::Title(screen) => screen.draw(),
            Screen::PlayerSelect(screen) => screen.draw(),
            Screen::GetReady(screen) => screen.draw(),
            Screen::Playing(screen) => screen.draw(session),
            Screen::DrinkSelect(screen) => screen.draw(),
            Screen::EnterInitials(screen) => screen.draw(),
            Screen::PleaseWaitForDispenser(screen) => screen.draw(),
            Screen::Winner(screen) => screen.draw(),
            Screen::GameOver(screen) => screen.draw(),
            Screen::HighScores(screen) => screen.draw(),
        }
    }
}
