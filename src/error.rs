use std::{io, path::PathBuf};

use thiserror::Error;
use validator::ValidationErrors;

use crate::state::state_machine::InvalidTransition;

/// Failures while loading settings or catalogs. All of them abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("failed to read `{path}`")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A configuration file is not valid JSON for its schema.
    #[error("failed to parse `{path}`")]
    Parse {
        /// File that could not be parsed.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// Settings parsed but are out of range.
    #[error("invalid settings: {0}")]
    Invalid(#[from] ValidationErrors),
    /// Reward thresholds and drink names do not line up.
    #[error("reward map lists {tiers} tiers but {drinks} drinks")]
    RewardMismatch {
        /// Number of thresholds.
        tiers: usize,
        /// Number of drink names.
        drinks: usize,
    },
    /// Reward map has no tiers at all.
    #[error("reward map is empty")]
    EmptyRewards,
}

/// Invariant violations raised by the dispenser. These indicate a bug in the
/// screen flow (or broken hardware) and are never swallowed.
#[derive(Debug, Error)]
pub enum DispenserError {
    /// A pour-complete event arrived for a tier that is not pouring.
    #[error("pour completion for tier {got} but {expected:?} is pouring")]
    TierMismatch {
        /// Tier actually pouring, if any.
        expected: Option<usize>,
        /// Tier named by the completion.
        got: usize,
    },
    /// Tier is outside the configured reward range.
    #[error("unknown tier {0}")]
    UnknownTier(usize),
    /// Writing to a GPIO pin failed.
    #[error("gpio pin {pin} write failed")]
    Gpio {
        /// Pin being written.
        pin: u8,
        /// Underlying sysfs failure.
        #[source]
        source: io::Error,
    },
}

/// Fatal errors surfaced by the game orchestrator.
#[derive(Debug, Error)]
pub enum GameError {
    /// The active screen requested a transition the table does not allow.
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    /// The dispenser reported an invariant violation.
    #[error("dispenser failure")]
    Dispenser(#[from] DispenserError),
}
