use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

use serde_json::json;
use uuid::Uuid;

const EXIT_DEADLINE: Duration = Duration::from_secs(5);

fn scratch_dir() -> PathBuf {
    let dir = env::temp_dir().join(format!("whiskey-ball-quit-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Settings that keep the binary away from real GPIO and the shared score file.
fn write_settings(dir: &Path) -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    let settings = json!({
        "gpio_root": dir.join("no-gpio"),
        "score_map_path": manifest.join("config/scoremap.json"),
        "reward_map_path": manifest.join("config/rewardmap.json"),
        "high_scores_path": dir.join("scores.json"),
    });
    let path = dir.join("app.json");
    fs::write(&path, settings.to_string()).unwrap();
    path
}

fn wait_with_deadline(child: &mut Child) -> Option<ExitStatus> {
    let started = Instant::now();
    while started.elapsed() < EXIT_DEADLINE {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        thread::sleep(Duration::from_millis(50));
    }
    None
}

#[test]
fn quit_key_exits_while_stdin_stays_open() {
    let dir = scratch_dir();
    let mut child = Command::new(env!("CARGO_BIN_EXE_whiskey-ball"))
        .env("WHISKEY_BALL_CONFIG_PATH", write_settings(&dir))
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    // Keep the write end open so the input thread stays blocked on a read.
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"q\n").unwrap();
    stdin.flush().unwrap();

    let status = wait_with_deadline(&mut child);
    if status.is_none() {
        let _ = child.kill();
        let _ = child.wait();
    }
    drop(stdin);
    let _ = fs::remove_dir_all(&dir);

    let status = status.expect("process still running after quit");
    assert!(status.success());
}
