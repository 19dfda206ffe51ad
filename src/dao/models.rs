use serde::{Deserialize, Serialize};

/// One row of the high-score board.
///
/// Serialised as a two-element array `["ABC", 420]` so the file stays a flat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry(pub String, pub u32);

impl ScoreEntry {
    /// Row for `initials` with `score`.
    pub fn new(initials: impl Into<String>, score: u32) -> Self {
        Self(initials.into(), score)
    }

    /// Player initials.
    pub fn initials(&self) -> &str {
        &self.0
    }

    /// Recorded score.
    pub fn score(&self) -> u32 {
        self.1
    }
}

/// Insert `entry` keeping the list sorted by descending score.
///
/// An entry lands after every existing entry with an equal or higher score, so
/// earlier holders of a tied score keep their rank. Returns the insertion index.
pub fn insert_ranked(scores: &mut Vec<ScoreEntry>, entry: ScoreEntry) -> usize {
    let index = scores
        .iter()
        .position(|existing| entry.score() > existing.score())
        .unwrap_or(scores.len());
    scores.insert(index, entry);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_between_higher_and_lower() {
        let mut scores = vec![ScoreEntry::new("AAA", 900), ScoreEntry::new("BBB", 400)];
        let index = insert_ranked(&mut scores, ScoreEntry::new("NEW", 500));
        assert_eq!(index, 1);
        assert_eq!(
            scores,
            vec![
                ScoreEntry::new("AAA", 900),
                ScoreEntry::new("NEW", 500),
                ScoreEntry::new("BBB", 400),
            ]
        );
    }

    #[test]
    fn ties_keep_first_inserted_ahead() {
        let mut scores = vec![ScoreEntry::new("OLD", 500)];
        insert_ranked(&mut scores, ScoreEntry::new("NEW", 500));
        assert_eq!(scores[0].initials(), "OLD");
        assert_eq!(scores[1].initials(), "NEW");
    }

    #[test]
    fn lowest_score_goes_last() {
        let mut scores = Vec::new();
        assert_eq!(insert_ranked(&mut scores, ScoreEntry::new("ONE", 10)), 0);
        assert_eq!(insert_ranked(&mut scores, ScoreEntry::new("TWO", 5)), 1);
    }

    #[test]
    fn serialises_as_flat_pairs() {
        let json = serde_json::to_string(&vec![ScoreEntry::new("ABC", 42)]).unwrap();
        assert_eq!(json, r#"[["ABC",42]]"#);
    }
}
