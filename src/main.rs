//! Whiskey Ball binary entrypoint wiring settings, catalogs, the dispenser and
//! the frame loop together.

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whiskey_ball::{
    config::AppConfig,
    dao::{high_scores::HighScoreRepository, score_store::JsonFileStore},
    services::{dispenser::DispenserController, display::TerminalDisplay, game_loop, relay},
    state::{Game, GameSettings},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load().context("loading settings")?;
    let (scores, rewards) = config.load_catalogs().context("loading catalogs")?;

    let board = relay::probe(&config);
    let dispenser = DispenserController::from_config(board, &config, rewards.len());
    info!(board = dispenser.board_name(), tiers = rewards.len(), "dispenser ready");

    let high_scores =
        HighScoreRepository::new(Box::new(JsonFileStore::new(config.high_scores_path.clone())));

    let game = Game::new(
        GameSettings::from(&config),
        scores,
        rewards,
        high_scores,
        dispenser,
    );

    let (tx, rx) = mpsc::unbounded_channel();
    game_loop::spawn_input(tx).context("starting input thread")?;

    game_loop::run(game, config.frame_period(), rx, TerminalDisplay::stdout())
        .await
        .context("running game")?;

    info!("bye");
    Ok(())
}

/// Log to stderr so the terminal display keeps stdout.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
