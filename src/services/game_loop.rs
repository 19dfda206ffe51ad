//! Frame loop: ticks the game at a fixed rate, applies keyboard actions as
//! they arrive and stops on `Quit` or a shutdown signal.

use std::{
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{dto::input::Action, error::GameError, services::display::TerminalDisplay, state::Game};

/// Read stdin line by line on its own thread and forward the decoded actions.
///
/// A blocking read never holds up the runtime, so the process can exit while
/// the thread is still waiting for a key.
pub fn spawn_input(tx: UnboundedSender<Action>) -> io::Result<thread::JoinHandle<()>> {
    spawn_reader(io::BufReader::new(io::stdin()), tx)
}

/// Forward actions decoded from `reader` until it ends or the loop hangs up.
pub fn spawn_reader<R>(
    reader: R,
    tx: UnboundedSender<Action>,
) -> io::Result<thread::JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("input".into())
        .spawn(move || forward_lines(reader, &tx))
}

fn forward_lines<R: BufRead>(reader: R, tx: &UnboundedSender<Action>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                for action in Action::parse_line(&line) {
                    if tx.send(action).is_err() {
                        return;
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to read input");
                return;
            }
        }
    }
    debug!("input closed");
}

/// Run the game until the player quits or the process is asked to stop.
/// Returns the game so callers can inspect where it ended.
pub async fn run<W: Write>(
    mut game: Game,
    frame_period: Duration,
    mut actions: UnboundedReceiver<Action>,
    mut display: TerminalDisplay<W>,
) -> Result<Game, GameError> {
    let mut ticker = tokio::time::interval(frame_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();
    let mut input_open = true;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    info!(?frame_period, "game loop started");
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received");
                break;
            }
            action = actions.recv(), if input_open => match action {
                Some(Action::Quit) => {
                    info!("quit requested");
                    break;
                }
                Some(action) => game.handle_action(action)?,
                None => input_open = false,
            },
            now = ticker.tick() => {
                let elapsed = now.duration_since(last);
                last = now;
                game.update(elapsed)?;
                if let Err(err) = display.present(&game.draw()) {
                    warn!(error = %err, "failed to draw frame");
                }
            }
        }
    }

    Ok(game)
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "cannot listen for SIGTERM");
                ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
