//! Snapshot of what the active screen wants shown this frame.
//!
//! Renderers decide how to draw a scene; the [`fmt::Display`] impl is the
//! plain-text rendering used by the terminal display and leaves out purely
//! decorative animation (colour cycles, scroll offset).

use std::fmt;

use crate::state::catalog::Tier;

/// Number of rows printed by the text rendering of the high-score board.
const TEXT_HIGH_SCORE_ROWS: usize = 10;

/// What one screen shows this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    /// Attract-mode slideshow.
    Title {
        /// Slideshow frame to show.
        frame: usize,
    },
    /// "GAME OVER" banner with two colour panels.
    GameOver {
        /// Colour index of the upper panel.
        top_color: usize,
        /// Colour index of the lower panel.
        bottom_color: usize,
    },
    /// Player count picker.
    PlayerSelect {
        /// Count currently offered.
        players: usize,
        /// Blink phase of the count.
        highlighted: bool,
    },
    /// Countdown before a turn.
    GetReady {
        /// One-based player about to play.
        player: usize,
        /// Seconds left before play starts.
        countdown: u32,
    },
    /// Scoring phase.
    Playing {
        /// One-based player at the lane.
        player: usize,
        /// Points so far this turn.
        score: u32,
        /// Whole seconds left on the clock.
        remaining_secs: u32,
        /// Final third of the turn.
        hurry: bool,
        /// Points of the last hit while the pulse is visible.
        flash: Option<u32>,
    },
    /// Reward tier browser.
    DrinkSelect {
        /// Score of the turn just finished.
        score: u32,
        /// Tier on display.
        tier: Tier,
        /// Blink phase of the drink name.
        drink_visible: bool,
        /// Left arrow lit while a move to the left is animating.
        left_arrow: bool,
        /// Right arrow lit while a move to the right is animating.
        right_arrow: bool,
        /// Locked tier was just chosen.
        denied: bool,
    },
    /// Initials entry grid.
    EnterInitials {
        /// Score the initials will be recorded with.
        score: u32,
        /// Rendered glyph of each slot; the last one holds the check mark.
        slots: [String; 4],
        /// Slot being edited.
        cursor: usize,
        /// Blink phase of the cursor.
        cursor_visible: bool,
    },
    /// Waiting for an earlier pour to finish.
    PleaseWaitForDispenser {
        /// Spinner frame.
        spinner: usize,
        /// The dispenser is free and start will pour.
        ready: bool,
    },
    /// Multi-player result.
    Winner {
        /// Winner or tie announcement.
        message: String,
        /// Blink phase of the message.
        visible: bool,
    },
    /// Scrolling leaderboard.
    HighScores {
        /// Initials and score, best first.
        rows: Vec<(String, u32)>,
        /// Vertical position of the list's top edge in pixels.
        offset: i32,
        /// Blink phase of the top row once the list has settled.
        top_visible: bool,
    },
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scene::Title { .. } => write!(f, "WHISKEY BALL - press start"),
            Scene::GameOver { .. } => write!(f, "GAME OVER - press start"),
            Scene::PlayerSelect { players, .. } => write!(f, "< PLAYERS: {players} >"),
            Scene::GetReady { player, countdown } => {
                write!(f, "PLAYER {player} GET READY... {countdown}")
            }
            Scene::Playing {
                player,
                score,
                remaining_secs,
                hurry,
                flash,
            } => {
                write!(f, "PLAYER {player}  score: {score}  time: {remaining_secs}")?;
                if *hurry {
                    write!(f, "  HURRY!")?;
                }
                if let Some(points) = flash {
                    write!(f, "  +{points}")?;
                }
                Ok(())
            }
            Scene::DrinkSelect {
                score,
                tier,
                denied,
                ..
            } => {
                write!(
                    f,
                    "Your score: {score} | < Tier {}: {:>3} pts {} >",
                    tier.index, tier.threshold, tier.drink
                )?;
                if tier.locked {
                    write!(f, " [LOCKED]")?;
                }
                if *denied {
                    write!(f, " - not enough points!")?;
                }
                Ok(())
            }
            Scene::EnterInitials {
                score,
                slots,
                cursor,
                ..
            } => {
                write!(f, "Your score: {score} | Enter your initials:")?;
                for (index, slot) in slots.iter().enumerate() {
                    if index == *cursor {
                        write!(f, " [{slot}]")?;
                    } else {
                        write!(f, " {slot}")?;
                    }
                }
                Ok(())
            }
            Scene::PleaseWaitForDispenser { ready, .. } => {
                if *ready {
                    write!(f, "Dispenser ready - press start")
                } else {
                    write!(f, "Please wait for the dispenser...")
                }
            }
            Scene::Winner { message, .. } => write!(f, "{message}"),
            Scene::HighScores { rows, .. } => {
                write!(f, "HIGH SCORES")?;
                for (rank, (initials, score)) in
                    rows.iter().take(TEXT_HIGH_SCORE_ROWS).enumerate()
                {
                    write!(f, " | {}. {initials} {score:>4}", rank + 1)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drink_select_text_marks_locked_tiers() {
        let scene = Scene::DrinkSelect {
            score: 20,
            tier: Tier {
                index: 2,
                threshold: 50,
                drink: "Bourbon".into(),
                locked: true,
            },
            drink_visible: true,
            left_arrow: false,
            right_arrow: false,
            denied: false,
        };
        assert_eq!(
            scene.to_string(),
            "Your score: 20 | < Tier 2:  50 pts Bourbon > [LOCKED]"
        );
    }

    #[test]
    fn initials_text_brackets_cursor() {
        let scene = Scene::EnterInitials {
            score: 5,
            slots: ["C".into(), "A".into(), " ".into(), " ".into()],
            cursor: 1,
            cursor_visible: false,
        };
        assert_eq!(
            scene.to_string(),
            "Your score: 5 | Enter your initials: C [A]    "
        );
    }

    #[test]
    fn wait_text_invites_start_once_dispenser_is_free() {
        let waiting = Scene::PleaseWaitForDispenser {
            spinner: 2,
            ready: false,
        };
        assert_eq!(waiting.to_string(), "Please wait for the dispenser...");

        let ready = Scene::PleaseWaitForDispenser {
            spinner: 0,
            ready: true,
        };
        assert_eq!(ready.to_string(), "Dispenser ready - press start");
    }
}
