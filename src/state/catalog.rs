//! Read-only score and reward catalogs.

use indexmap::IndexMap;

use crate::error::ConfigError;

/// Point value awarded for each score symbol.
#[derive(Debug, Clone, Default)]
pub struct ScoreCatalog {
    points: IndexMap<String, u32>,
}

impl ScoreCatalog {
    /// Wrap a symbol to points map.
    pub fn new(points: IndexMap<String, u32>) -> Self {
        Self { points }
    }

    /// Points for `symbol`, zero when the symbol is not mapped.
    pub fn points_for(&self, symbol: &str) -> u32 {
        self.points.get(symbol).copied().unwrap_or(0)
    }

    /// Number of mapped symbols.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no symbol scores anything.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Reward {
    threshold: u32,
    drink: String,
}

/// Prize tiers ordered from cheapest to most expensive.
#[derive(Debug, Clone)]
pub struct RewardCatalog {
    rewards: Vec<Reward>,
}

/// A prize tier as seen by one player's score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    /// One-based tier number shown to players.
    pub index: usize,
    /// Minimum score needed to unlock the tier.
    pub threshold: u32,
    /// Drink poured for this tier.
    pub drink: String,
    /// `true` while the score is below the threshold.
    pub locked: bool,
}

impl Tier {
    /// Zero-based position of the tier inside the catalog.
    pub fn position(&self) -> usize {
        self.index - 1
    }
}

impl RewardCatalog {
    /// Pair thresholds with drinks; both lists must be non-empty and the same length.
    pub fn new(thresholds: Vec<u32>, drinks: Vec<String>) -> Result<Self, ConfigError> {
        if thresholds.len() != drinks.len() {
            return Err(ConfigError::RewardMismatch {
                tiers: thresholds.len(),
                drinks: drinks.len(),
            });
        }
        if thresholds.is_empty() {
            return Err(ConfigError::EmptyRewards);
        }
        let rewards = thresholds
            .into_iter()
            .zip(drinks)
            .map(|(threshold, drink)| Reward { threshold, drink })
            .collect();
        Ok(Self { rewards })
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// Always `false` for a catalog built by [`RewardCatalog::new`].
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Snapshot every tier with its locked flag computed from `score`.
    pub fn tiers_for(&self, score: u32) -> Vec<Tier> {
        self.rewards
            .iter()
            .enumerate()
            .map(|(position, reward)| Tier {
                index: position + 1,
                threshold: reward.threshold,
                drink: reward.drink.clone(),
                locked: score < reward.threshold,
            })
            .collect()
    }
}
