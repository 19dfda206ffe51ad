use tracing::{info, warn};

use crate::dao::{
    models::{ScoreEntry, insert_ranked},
    score_store::HighScoreStore,
};

/// Repository for the high-score board.
///
/// Storage failures never reach the game: a failed read shows an empty
/// board and a failed write drops the entry after logging.
pub struct HighScoreRepository {
    store: Box<dyn HighScoreStore>,
}

impl HighScoreRepository {
    /// Repository over `store`.
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        Self { store }
    }

    /// Every recorded score, best first.
    pub fn read_all(&self) -> Vec<ScoreEntry> {
        match self.store.load() {
            Ok(scores) => scores,
            Err(err) => {
                warn!(error = %err, "failed to read high scores; showing an empty board");
                Vec::new()
            }
        }
    }

    /// Rank and persist a new score, returning its zero-based rank.
    pub fn record(&self, initials: &str, score: u32) -> usize {
        let mut scores = self.read_all();
        let rank = insert_ranked(&mut scores, ScoreEntry::new(initials, score));
        match self.store.save(&scores) {
            Ok(()) => info!(initials, score, rank, "recorded high score"),
            Err(err) => warn!(error = %err, initials, score, "failed to persist high score"),
        }
        rank
    }
}
