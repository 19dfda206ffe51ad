//! Application settings plus the score and reward catalogs loaded at startup.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use indexmap::IndexMap;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::info;
use validator::Validate;

use crate::{
    error::ConfigError,
    state::catalog::{RewardCatalog, ScoreCatalog},
};

/// Default location on disk where the game looks for its JSON settings.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "WHISKEY_BALL_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
/// Immutable runtime settings.
pub struct AppConfig {
    /// Length of the scoring phase.
    #[validate(range(min = 1))]
    pub game_duration_secs: u32,
    /// Pour time for a tier driven by a single relay.
    #[validate(range(min = 1))]
    pub base_pour_ms: u64,
    /// How long the indicator light stays on after a pour.
    pub light_ms: u64,
    /// Target frames per second of the main loop.
    #[validate(range(min = 1, max = 120))]
    pub frame_rate: u32,
    /// Upper bound offered on the player-select screen.
    #[validate(range(min = 1, max = 4))]
    pub max_players: usize,
    /// JSON object mapping score symbols to points.
    pub score_map_path: PathBuf,
    /// JSON object with parallel `tiers` and `drinks` lists.
    pub reward_map_path: PathBuf,
    /// JSON list of `[initials, score]` pairs, best first.
    pub high_scores_path: PathBuf,
    /// Sysfs GPIO directory probed for dispenser hardware.
    pub gpio_root: PathBuf,
    /// Relay pins per tier, in tier order.
    pub tier_pins: Vec<Vec<u8>>,
    /// Pin of the shared "drink ready" light.
    pub light_pin: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game_duration_secs: 60,
            base_pour_ms: 120_000,
            light_ms: 10_000,
            frame_rate: 30,
            max_players: 4,
            score_map_path: PathBuf::from("config/scoremap.json"),
            reward_map_path: PathBuf::from("config/rewardmap.json"),
            high_scores_path: PathBuf::from("scores.json"),
            gpio_root: PathBuf::from("/sys/class/gpio"),
            tier_pins: vec![vec![0, 5], vec![6, 13], vec![19]],
            light_pin: 26,
        }
    }
}

impl AppConfig {
    /// Load settings from the configured path, using built-in defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&resolve_config_path())
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self =
                    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                        path: path.to_path_buf(),
                        source,
                    })?;
                info!(path = %path.display(), "loaded settings");
                config
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "settings file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the score map and reward map referenced by these settings.
    pub fn load_catalogs(&self) -> Result<(ScoreCatalog, RewardCatalog), ConfigError> {
        let points: IndexMap<String, u32> = read_json(&self.score_map_path)?;
        let scores = ScoreCatalog::new(points);

        let raw: RawRewardMap = read_json(&self.reward_map_path)?;
        let rewards = RewardCatalog::new(raw.tiers, raw.drinks)?;

        info!(
            symbols = scores.len(),
            tiers = rewards.len(),
            "loaded score and reward maps"
        );
        Ok((scores, rewards))
    }

    /// Pour time for a single-relay tier.
    pub fn base_pour(&self) -> Duration {
        Duration::from_millis(self.base_pour_ms)
    }

    /// How long the indicator light stays on.
    pub fn light_duration(&self) -> Duration {
        Duration::from_millis(self.light_ms)
    }

    /// Time budget of a single frame.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the reward map file.
struct RawRewardMap {
    tiers: Vec<u32>,
    drinks: Vec<String>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the settings path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let dir = env::temp_dir().join(format!("whiskey-ball-config-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_settings_file_uses_defaults() {
        let dir = scratch_dir();
        let config = AppConfig::load_from(&dir.join("absent.json")).unwrap();
        assert_eq!(config.game_duration_secs, 60);
        assert_eq!(config.tier_pins.len(), 3);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn partial_settings_keep_defaults_for_missing_keys() {
        let dir = scratch_dir();
        let path = dir.join("app.json");
        fs::write(&path, r#"{"game_duration_secs": 3, "light_ms": 500}"#).unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.game_duration_secs, 3);
        assert_eq!(config.light_duration(), Duration::from_millis(500));
        assert_eq!(config.base_pour_ms, 120_000);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn out_of_range_settings_are_rejected() {
        let dir = scratch_dir();
        let path = dir.join("app.json");
        fs::write(&path, r#"{"max_players": 9}"#).unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn reward_map_length_mismatch_is_fatal() {
        let dir = scratch_dir();
        let scores = dir.join("scoremap.json");
        let rewards = dir.join("rewardmap.json");
        fs::write(&scores, r#"{"1": 10, "2": 20}"#).unwrap();
        fs::write(&rewards, r#"{"tiers": [0, 100], "drinks": ["Rye"]}"#).unwrap();

        let config = AppConfig {
            score_map_path: scores,
            reward_map_path: rewards,
            ..AppConfig::default()
        };
        let err = config.load_catalogs().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RewardMismatch {
                tiers: 2,
                drinks: 1
            }
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn catalogs_load_from_disk() {
        let dir = scratch_dir();
        let scores = dir.join("scoremap.json");
        let rewards = dir.join("rewardmap.json");
        fs::write(&scores, r#"{"1": 10, "6": 100}"#).unwrap();
        fs::write(&rewards, r#"{"tiers": [0, 100], "drinks": ["Rye", "Scotch"]}"#).unwrap();

        let config = AppConfig {
            score_map_path: scores,
            reward_map_path: rewards,
            ..AppConfig::default()
        };
        let (scores, rewards) = config.load_catalogs().unwrap();
        assert_eq!(scores.points_for("6"), 100);
        assert_eq!(rewards.len(), 2);
        fs::remove_dir_all(dir).unwrap();
    }
}
