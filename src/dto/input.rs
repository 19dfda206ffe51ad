//! Logical input actions and the keyboard mapping that produces them.

/// Everything a player can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start button.
    Confirm,
    /// Left button.
    MoveLeft,
    /// Right button.
    MoveRight,
    /// One of the six scoring holes, numbered 1 to 6.
    Score(u8),
    /// Leave the program from any screen.
    Quit,
}

const ESCAPE: char = '\u{1b}';

impl Action {
    /// Map a single key press.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            ' ' => Some(Action::Confirm),
            ',' => Some(Action::MoveLeft),
            '.' => Some(Action::MoveRight),
            '1'..='6' => key.to_digit(10).map(|digit| Action::Score(digit as u8)),
            'q' | 'Q' | ESCAPE => Some(Action::Quit),
            _ => None,
        }
    }

    /// Map a line of terminal input; every character is one key press and a
    /// bare newline confirms.
    pub fn parse_line(line: &str) -> Vec<Self> {
        if line.is_empty() {
            return vec![Action::Confirm];
        }
        line.chars().filter_map(Self::from_key).collect()
    }

    /// Score-map symbol for scoring actions.
    pub fn score_symbol(&self) -> Option<String> {
        match self {
            Action::Score(hole) => Some(hole.to_string()),
            _ => None,
        }
    }
}
