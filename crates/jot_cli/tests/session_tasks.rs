use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("jot-{nanos}-{file_name}"))
}

fn run_session(input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_jot");
    let config_path = temp_path("session-tasks-config.json");

    let mut child = Command::new(exe)
        .env("JOT_CONFIG_PATH", &config_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read session output")
}

#[test]
fn add_renders_the_new_task_and_counters() {
    let output = run_session("add \"Buy milk\"\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Buy milk"));
    assert!(stdout.contains("[ ]"));
    assert!(stdout.contains("total=1 completed=0 pending=1"));
}

#[test]
fn add_with_blank_text_renders_nothing() {
    let output = run_session("add \"   \"\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.is_empty());
}

#[test]
fn newest_task_is_listed_first() {
    let output = run_session("add \"first\"\nadd \"second\"\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let second_pos = stdout.rfind("second").expect("second rendered");
    let first_pos = stdout.rfind("first").expect("first rendered");
    assert!(second_pos < first_pos);
}

#[test]
fn toggle_marks_the_task_completed() {
    let output = run_session("add \"demo\"\ntoggle 1\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[x]"));
    assert!(stdout.contains("total=1 completed=1 pending=0"));
}

#[test]
fn toggle_twice_returns_to_pending() {
    let output = run_session("add \"demo\"\ntoggle 1\ntoggle 1\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("total=1 completed=0 pending=1"));
}

#[test]
fn toggle_unknown_id_still_renders() {
    let output = run_session("add \"demo\"\ntoggle 999\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("total=1 completed=0 pending=1"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.is_empty());
}

#[test]
fn delete_removes_the_task() {
    let output = run_session("add \"gone\"\ndelete 1\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks yet"));
    assert!(stdout.contains("total=0 completed=0 pending=0"));
}

#[test]
fn edit_with_inline_text_replaces_the_task_text() {
    let output = run_session("add \"old text\"\nedit 1 \"new text\"\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("new text"));
    let after_edit = stdout.rfind("new text").expect("edited text rendered");
    let last_old = stdout.rfind("old text").expect("original text rendered");
    assert!(last_old < after_edit);
}

#[test]
fn interactive_edit_reads_the_next_line() {
    let output = run_session("add \"old text\"\nedit 1\nreplacement\nlist\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Editing 1: old text"));
    assert!(stdout.contains("replacement"));
}

#[test]
fn interactive_edit_with_blank_line_keeps_the_original_text() {
    let output = run_session("add \"keep me\"\nedit 1\n\nlist\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Editing 1: keep me"));
    let renders = stdout.matches("keep me").count();
    assert!(renders >= 3);
}

#[test]
fn edit_unknown_id_renders_nothing() {
    let output = run_session("edit 42 \"text\"\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().is_empty());
}
