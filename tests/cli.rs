//! CLI behavior tests: exit codes, output formats, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CLEAN_REPLY: &str = "To stay safe, open the shield menu.\n\nThen choose Protect. It blocks risky sites.";
const STARRY_REPLY: &str = "Here is how it works:\n**How to use:** *Click* the shield.";

fn plainspeak_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_plainspeak"))
}

fn write_replies(dir: &TempDir) {
    fs::write(dir.path().join("clean.txt"), CLEAN_REPLY).unwrap();
    fs::write(dir.path().join("starry.md"), STARRY_REPLY).unwrap();
}

#[test]
fn clean_stdin_exit_0() {
    let mut cmd = plainspeak_cmd();
    cmd.write_stdin(CLEAN_REPLY);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn asterisks_on_stdin_exit_1() {
    let mut cmd = plainspeak_cmd();
    cmd.arg("-").write_stdin(STARRY_REPLY);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("asterisks found"));
}

#[test]
fn json_output_valid() {
    let mut cmd = plainspeak_cmd();
    cmd.arg("--json").write_stdin("This is **bold** text.");
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(parsed["analysis"]["asteriskCount"], 4);
    assert_eq!(parsed["analysis"]["isClean"], false);
    assert_eq!(parsed["label"], "<stdin>");
}

#[test]
fn quiet_mode_one_line_per_file() {
    let dir = TempDir::new().unwrap();
    write_replies(&dir);
    let mut cmd = plainspeak_cmd();
    cmd.arg(dir.path()).arg("--quiet");
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let s = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("clean.txt") && lines[0].ends_with("(PASS)"));
    assert!(lines[1].contains("starry.md") && lines[1].ends_with("(FAIL)"));
}

#[test]
fn directory_json_has_summary() {
    let dir = TempDir::new().unwrap();
    write_replies(&dir);
    fs::write(dir.path().join("notes.log"), "*ignored by extension*").unwrap();
    let mut cmd = plainspeak_cmd();
    cmd.arg(dir.path()).arg("--json");
    let output = cmd.output().unwrap();
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["summary"]["passed"], 1);
    assert_eq!(parsed["summary"]["goalAchieved"], false);
}

#[test]
fn config_ignore_skips_files() {
    let dir = TempDir::new().unwrap();
    write_replies(&dir);
    fs::write(
        dir.path().join(".plainspeakrc.json"),
        r#"{ "ignore": ["**/starry.md"] }"#,
    )
    .unwrap();
    let mut cmd = plainspeak_cmd();
    cmd.arg(dir.path()).arg("--quiet");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("clean.txt").and(predicate::str::contains("starry").not()));
}

#[test]
fn relative_config_resolves_from_current_dir() {
    let dir = TempDir::new().unwrap();
    let replies = dir.path().join("replies");
    fs::create_dir(&replies).unwrap();
    fs::write(replies.join("clean.txt"), CLEAN_REPLY).unwrap();
    fs::write(replies.join("starry.md"), STARRY_REPLY).unwrap();
    fs::write(dir.path().join("my.json"), r#"{ "ignore": ["**/starry.md"] }"#).unwrap();

    let mut cmd = plainspeak_cmd();
    cmd.current_dir(dir.path())
        .arg("replies")
        .arg("--config")
        .arg("my.json")
        .arg("--quiet");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("clean.txt").and(predicate::str::contains("starry").not()));
}

#[test]
fn threshold_applies_to_each_input() {
    let mut cmd = plainspeak_cmd();
    cmd.arg("--threshold")
        .arg("96")
        .write_stdin("Run `scan` now.");
    // 100 - 5 (inline code) + 1 (line start) = 96, which meets the threshold
    cmd.assert().success();

    let mut cmd = plainspeak_cmd();
    cmd.arg("--threshold")
        .arg("97")
        .write_stdin("Run `scan` now.");
    cmd.assert().failure().code(1);
}

#[test]
fn locate_lists_lines() {
    let mut cmd = plainspeak_cmd();
    cmd.arg("--locate").arg("--no-color").write_stdin(STARRY_REPLY);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Line 2: **How to use:** *Click* the shield."));
}

#[test]
fn file_not_found_exit_2() {
    let mut cmd = plainspeak_cmd();
    cmd.arg("nonexistent-reply.txt");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nonexistent-reply.txt"));
}

#[test]
fn empty_directory_exit_2() {
    let dir = TempDir::new().unwrap();
    let mut cmd = plainspeak_cmd();
    cmd.arg(dir.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No text files found"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join(".plainspeakrc.json");
    let mut cmd = plainspeak_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path()).arg("--threshold").arg("90");
    cmd.assert().success();
    assert!(config_path.exists(), ".plainspeakrc.json should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["threshold"], 90);
    assert_eq!(parsed["provider"]["model"], "gemini-2.5-flash");
}

#[test]
fn init_does_not_overwrite() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join(".plainspeakrc.json");
    fs::write(&config_path, "{}").unwrap();
    let mut cmd = plainspeak_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "{}");
}

#[test]
fn run_without_provider_exit_2() {
    let dir = TempDir::new().unwrap();
    let mut cmd = plainspeak_cmd();
    cmd.current_dir(dir.path())
        .env_remove("GEMINI_API_KEY")
        .arg("run");
    cmd.assert().failure().code(2).stderr(
        predicate::str::contains("ai feature").or(predicate::str::contains("GEMINI_API_KEY")),
    );
}
