use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("maze-chase-cli-{}-{name}", std::process::id()))
}

fn maze_chase(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_maze-chase"))
        .args(args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch maze-chase");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("maze-chase exits")
}

#[test]
fn training_requires_a_config_file() {
    let missing = scratch("missing.toml");
    let output = maze_chase(&["--config", missing.to_str().expect("utf-8 path"), "train"], "");
    assert!(!output.status.success());
}

#[test]
fn unknown_menu_choice_fails() {
    let output = maze_chase(&["--config", "unused.toml"], "9\n");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Replay"));
}

#[test]
fn headless_training_saves_a_policy_that_replays() {
    let config = scratch("train.toml");
    let policy = scratch("winner.json");
    std::fs::write(
        &config,
        format!(
            "[game]\nmax_training_ticks = 600\n\n\
             [training]\ngenerations = 1\npopulation = 2\nelite = 1\nhidden = 4\n\
             policy_path = {:?}\n",
            policy.to_str().expect("utf-8 path")
        ),
    )
    .expect("write config");
    let config_arg = config.to_str().expect("utf-8 path");

    let trained = maze_chase(&["--config", config_arg, "train"], "");
    assert!(trained.status.success(), "{}", String::from_utf8_lossy(&trained.stderr));
    assert!(String::from_utf8_lossy(&trained.stdout).contains("generation    1"));
    assert!(policy.exists());

    let replayed = maze_chase(&["--config", config_arg, "replay"], "");
    assert!(replayed.status.success(), "{}", String::from_utf8_lossy(&replayed.stderr));
    assert!(String::from_utf8_lossy(&replayed.stdout).contains("score: "));

    let _ = std::fs::remove_file(&config);
    let _ = std::fs::remove_file(&policy);
}
