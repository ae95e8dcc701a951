use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

fn sosindex_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sosindex"));
    cmd.env("HOME", home);
    cmd.env_remove("SOSINDEX_CONFIG");
    cmd.env_remove("SOSINDEX_UI_COLOR");
    cmd.env_remove("SOSINDEX_RENDER_FORMAT");
    cmd.env_remove("SOSINDEX_RENDER_PRETTY_JSON");
    cmd.env_remove("SOSINDEX_LOG_ENABLED");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    sosindex_cmd(home).args(args).output().expect("run sosindex")
}

fn make_temp_home() -> PathBuf {
    static HOME_SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = HOME_SEQ.fetch_add(1, Ordering::Relaxed);
    let home =
        std::env::temp_dir().join(format!("sosindex-exit-test-{}-{seq}", std::process::id()));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("create home");
    home
}

#[test]
fn completion_unknown_shell_exits_2() {
    let home = make_temp_home();
    let out = run(&home, &["completion", "nope"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn completion_bash_succeeds() {
    let home = make_temp_home();
    let out = run(&home, &["completion", "bash"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("sosindex"));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn missing_explicit_config_exits_2() {
    let home = make_temp_home();
    let missing = home.join("nope.toml");
    let out = run(
        &home,
        &["--config", missing.to_str().expect("utf-8 path"), "config", "--show"],
    );
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn render_missing_input_exits_10() {
    let home = make_temp_home();
    let missing = home.join("missing.json");
    let out = run(&home, &["render", missing.to_str().expect("utf-8 path")]);
    assert_eq!(out.status.code(), Some(10));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed to read index"), "stderr={stderr}");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn render_malformed_input_exits_10() {
    let home = make_temp_home();
    let index = home.join("index.json");
    std::fs::write(&index, b"{\"s\": {\"warnings\": []}}").expect("write");
    let out = run(&home, &["render", index.to_str().expect("utf-8 path")]);
    assert_eq!(out.status.code(), Some(10));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn build_unnamed_section_exits_2() {
    let home = make_temp_home();
    let manifest = home.join("manifest.toml");
    std::fs::write(&manifest, b"[[sections]]\nnotes = [\"x\"]\n").expect("write");
    let out = run(&home, &["build", manifest.to_str().expect("utf-8 path")]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn failed_run_still_writes_error_log() {
    let home = make_temp_home();
    let missing = home.join("missing.json");
    let out = {
        let mut cmd = sosindex_cmd(&home);
        cmd.env("SOSINDEX_LOG_ENABLED", "true");
        cmd.args(["render", missing.to_str().expect("utf-8 path")]);
        cmd.output().expect("run sosindex")
    };
    assert_eq!(out.status.code(), Some(10));

    let logs: Vec<PathBuf> = std::fs::read_dir(home.join(".config/sosindex/logs"))
        .expect("logs dir")
        .map(|e| e.expect("entry").path())
        .collect();
    assert_eq!(logs.len(), 1, "logs={logs:?}");
    let v: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&logs[0]).expect("read log")).expect("parse log");
    assert_eq!(v["status"], "error");
    assert!(v["error"].as_str().is_some_and(|e| e.contains("failed to read index")));

    let _ = std::fs::remove_dir_all(&home);
}
