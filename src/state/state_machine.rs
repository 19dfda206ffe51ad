use thiserror::Error;

/// Screens the cabinet can show. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    /// Attract-mode slideshow.
    Title,
    /// Choose how many players take turns.
    PlayerSelect,
    /// Countdown before a player's turn.
    GetReady,
    /// Timed scoring phase.
    Playing,
    /// Pick a reward tier unlocked by the score.
    DrinkSelect,
    /// Three-letter name capture.
    EnterInitials,
    /// Blocked on the dispenser finishing a previous pour.
    PleaseWaitForDispenser,
    /// Multi-player result.
    Winner,
    /// Attract-mode colour panels.
    GameOver,
    /// Scrolling leaderboard.
    HighScores,
}

/// Requests raised by screens (or the orchestrator) to leave the active screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Confirm pressed on an attract screen.
    Start,
    /// Title slideshow timed out.
    ShowHighScores,
    /// Leaderboard finished (or had nothing to show).
    HighScoresFinished,
    /// Game-over panels timed out.
    AttractTimeout,
    /// Player count confirmed.
    PlayersChosen(usize),
    /// Get-ready countdown reached zero.
    CountdownFinished,
    /// Scoring phase ran out of time.
    TimeUp,
    /// Unlocked tier confirmed (zero-based position).
    DrinkChosen(usize),
    /// Initials confirmed with the checkmark.
    InitialsEntered(String),
    /// Dispenser became free and the player confirmed.
    DispenserReleased,
    /// Winner announcement dismissed.
    WinnerAcknowledged,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The screen active when the invalid event was raised.
    pub from: ScreenKind,
    /// The event that cannot be applied from this screen.
    pub event: GameEvent,
}

/// Turn bookkeeping needed to resolve where a finished turn goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnStatus {
    /// A chosen drink has not been handed to the dispenser yet.
    pub pour_pending: bool,
    /// Players whose turn is over, including the current one.
    pub players_done: usize,
    /// Players taking part in the game.
    pub total_players: usize,
}

impl TurnStatus {
    /// Where play continues once a turn (and its drink) is done.
    pub fn next_turn(&self) -> ScreenKind {
        if self.players_done < self.total_players {
            ScreenKind::GetReady
        } else if self.total_players > 1 {
            ScreenKind::Winner
        } else {
            ScreenKind::GameOver
        }
    }
}

/// Compute the screen that follows `from` when `event` is raised.
pub fn compute_transition(
    from: ScreenKind,
    event: &GameEvent,
    turn: &TurnStatus,
) -> Result<ScreenKind, InvalidTransition> {
    let next = match (from, event) {
        (ScreenKind::Title | ScreenKind::GameOver | ScreenKind::HighScores, GameEvent::Start) => {
            ScreenKind::PlayerSelect
        }
        (ScreenKind::Title, GameEvent::ShowHighScores) => ScreenKind::HighScores,
        (ScreenKind::HighScores, GameEvent::HighScoresFinished) => ScreenKind::GameOver,
        (ScreenKind::GameOver, GameEvent::AttractTimeout) => ScreenKind::Title,
        (ScreenKind::PlayerSelect, GameEvent::PlayersChosen(_)) => ScreenKind::GetReady,
        (ScreenKind::GetReady, GameEvent::CountdownFinished) => ScreenKind::Playing,
        (ScreenKind::Playing, GameEvent::TimeUp) => ScreenKind::DrinkSelect,
        (ScreenKind::DrinkSelect, GameEvent::DrinkChosen(_)) => ScreenKind::EnterInitials,
        (ScreenKind::EnterInitials, GameEvent::InitialsEntered(_)) => {
            if turn.pour_pending {
                ScreenKind::PleaseWaitForDispenser
            } else {
                turn.next_turn()
            }
        }
        (ScreenKind::PleaseWaitForDispenser, GameEvent::DispenserReleased) => turn.next_turn(),
        (ScreenKind::Winner, GameEvent::WinnerAcknowledged) => ScreenKind::GameOver,
        (from, event) => {
            return Err(InvalidTransition {
                from,
                event: event.clone(),
            });
        }
    };

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(players_done: usize, total_players: usize) -> TurnStatus {
        TurnStatus {
            pour_pending: false,
            players_done,
            total_players,
        }
    }

    fn step(from: ScreenKind, event: GameEvent, status: TurnStatus) -> ScreenKind {
        compute_transition(from, &event, &status).unwrap()
    }

    #[test]
    fn single_player_cycle() {
        let status = turn(1, 1);
        let mut screen = ScreenKind::Title;
        for (event, expected) in [
            (GameEvent::Start, ScreenKind::PlayerSelect),
            (GameEvent::PlayersChosen(1), ScreenKind::GetReady),
            (GameEvent::CountdownFinished, ScreenKind::Playing),
            (GameEvent::TimeUp, ScreenKind::DrinkSelect),
            (GameEvent::DrinkChosen(0), ScreenKind::EnterInitials),
            (GameEvent::InitialsEntered("ABC".into()), ScreenKind::GameOver),
            (GameEvent::AttractTimeout, ScreenKind::Title),
            (GameEvent::ShowHighScores, ScreenKind::HighScores),
            (GameEvent::HighScoresFinished, ScreenKind::GameOver),
        ] {
            screen = step(screen, event, status);
            assert_eq!(screen, expected);
        }
    }

    #[test]
    fn next_turn_depends_on_players_left() {
        assert_eq!(turn(1, 3).next_turn(), ScreenKind::GetReady);
        assert_eq!(turn(3, 3).next_turn(), ScreenKind::Winner);
        assert_eq!(turn(1, 1).next_turn(), ScreenKind::GameOver);
    }

    #[test]
    fn pending_pour_waits_for_dispenser() {
        let status = TurnStatus {
            pour_pending: true,
            players_done: 1,
            total_players: 2,
        };
        let next = step(
            ScreenKind::EnterInitials,
            GameEvent::InitialsEntered("ABC".into()),
            status,
        );
        assert_eq!(next, ScreenKind::PleaseWaitForDispenser);
        assert_eq!(
            step(next, GameEvent::DispenserReleased, status),
            ScreenKind::GetReady
        );
    }

    #[test]
    fn winner_returns_to_game_over() {
        assert_eq!(
            step(ScreenKind::Winner, GameEvent::WinnerAcknowledged, turn(2, 2)),
            ScreenKind::GameOver
        );
    }

    #[test]
    fn invalid_transition_returns_error() {
        let err = compute_transition(ScreenKind::Title, &GameEvent::TimeUp, &turn(0, 1))
            .unwrap_err();
        assert_eq!(err.from, ScreenKind::Title);
        assert_eq!(err.event, GameEvent::TimeUp);
    }
}
