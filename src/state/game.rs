use crate::state::state_machine::TurnStatus;

/// Result of one finished turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerResult {
    /// Points scored in the turn.
    pub score: u32,
    /// Filled in once the player confirms their initials.
    pub initials: Option<String>,
}

/// Mutable data of the game in progress, shared by every screen.
#[derive(Debug, Clone)]
pub struct Session {
    /// Score of the turn being played (or just finished).
    pub score: u32,
    /// Finished turns, in play order.
    pub results: Vec<PlayerResult>,
    /// Players taking part, in `1..=4`.
    pub total_players: usize,
    /// Zero-based tier chosen but not yet handed to the dispenser.
    pub drink_tier_to_pour: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0,
            results: Vec::new(),
            total_players: 1,
            drink_tier_to_pour: None,
        }
    }
}

impl Session {
    /// Reset everything for a new game with `players` players.
    pub fn start(&mut self, players: usize) {
        *self = Self {
            total_players: players.max(1),
            ..Self::default()
        };
    }

    /// One-based number of the player whose turn is next or in progress.
    pub fn current_player(&self) -> usize {
        (self.results.len() + 1).min(self.total_players)
    }

    /// Store the current score as a finished turn.
    pub fn finish_turn(&mut self) {
        self.results.push(PlayerResult {
            score: self.score,
            initials: None,
        });
    }

    /// Attach initials to the most recently finished turn.
    pub fn record_initials(&mut self, initials: &str) {
        if let Some(result) = self.results.last_mut() {
            result.initials = Some(initials.to_string());
        }
    }

    /// Facts the transition table needs about the game in progress.
    pub fn turn_status(&self) -> TurnStatus {
        TurnStatus {
            pour_pending: self.drink_tier_to_pour.is_some(),
            players_done: self.results.len(),
            total_players: self.total_players,
        }
    }

    /// One-based numbers of every player sharing the top score.
    pub fn winners(&self) -> Vec<usize> {
        let Some(best) = self.results.iter().map(|result| result.score).max() else {
            return Vec::new();
        };
        self.results
            .iter()
            .enumerate()
            .filter(|(_, result)| result.score == best)
            .map(|(index, _)| index + 1)
            .collect()
    }
}

/// Announcement for a set of winners: a single winner or a tie.
pub fn winner_message(winners: &[usize]) -> String {
    match winners {
        [] => "No winner!".to_string(),
        [only] => format!("Player {only} wins!"),
        [rest @ .., last] => {
            let rest = rest
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("Tie between players {rest} and {last}!")
        }
    }
}
