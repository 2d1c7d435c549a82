//! Integration tests for the `kb` CLI.
//!
//! Each test runs `kb` as a subprocess against a temp data directory and
//! checks stdout and/or the stored JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `kb` binary.
fn kb_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("kb");
    path
}

/// Run `kb` with the given args against `data_dir`, returning (stdout, stderr, success).
fn run_kb(data_dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(kb_bin())
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("KANBAN_DIR")
        .env_remove("KANBAN_LOG")
        .output()
        .expect("failed to run kb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `kb` expecting success, return stdout.
fn run_kb_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_kb(data_dir, args);
    if !success {
        panic!(
            "kb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `kb` expecting failure, return stderr.
fn run_kb_err(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_kb(data_dir, args);
    if success {
        panic!("kb {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

fn stored_boards(data_dir: &Path) -> serde_json::Value {
    let content = fs::read_to_string(data_dir.join("boards_data.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn show_json(data_dir: &Path, board: &str) -> serde_json::Value {
    let out = run_kb_ok(data_dir, &["show", board, "--json"]);
    serde_json::from_str(&out).unwrap()
}

fn column_titles(board: &serde_json::Value, column: &str) -> Vec<String> {
    board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == column)
        .unwrap()["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_boards_default_dataset() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_kb_ok(tmp.path(), &["boards"]);
    assert!(out.contains("Platform Launch"));
    assert!(out.contains("Marketing Plan"));
    assert!(out.contains("Roadmap"));
    assert!(out.contains("3 columns, 10 tasks"));
    // reads don't write anything
    assert!(!tmp.path().join("boards_data.json").exists());
}

#[test]
fn test_boards_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_kb_ok(tmp.path(), &["boards", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0]["position"], 1);
    assert_eq!(arr[0]["name"], "Platform Launch");
    assert_eq!(arr[1]["tasks"], 3);
}

#[test]
fn test_show_text_with_subtasks() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_kb_ok(tmp.path(), &["show", "Platform Launch", "--subtasks"]);
    assert!(out.starts_with("Platform Launch\n"));
    assert!(out.contains("  Todo (4)"));
    assert!(out.contains("- Build UI for onboarding flow  [1 of 3 subtasks]"));
    assert!(out.contains("[x] Sign up page"));
    assert!(out.contains("[ ] Sign in page"));
}

#[test]
fn test_show_unknown_board_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_kb_err(tmp.path(), &["show", "Nope"]);
    assert!(err.contains("error: board not found: Nope"));
}

// ---------------------------------------------------------------------------
// Write command tests
// ---------------------------------------------------------------------------

#[test]
fn test_add_board_and_column() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_kb_ok(tmp.path(), &["add-board", "  Hiring ", "--columns", "Sourcing, , Interview"]);
    assert!(out.contains("Board created: Hiring (4)"));

    run_kb_ok(tmp.path(), &["add-column", "Hiring", "Offer"]);
    let board = show_json(tmp.path(), "4");
    let names: Vec<&str> = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Sourcing", "Interview", "Offer"]);

    let stored = stored_boards(tmp.path());
    assert_eq!(stored["boards"].as_array().unwrap().len(), 4);
}

#[test]
fn test_add_board_validation() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_kb_err(tmp.path(), &["add-board", "   "]);
    assert!(err.contains("Please provide a name for the board."));
    let err = run_kb_err(tmp.path(), &["add-board", "Empty", "--columns", " , "]);
    assert!(err.contains("Please add at least one column for the new board."));
    let err = run_kb_err(tmp.path(), &["add-column", "1", "  "]);
    assert!(err.contains("Please provide a name for the new column."));
    assert!(!tmp.path().join("boards_data.json").exists());
}

#[test]
fn test_add_task_defaults_to_first_column() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_kb_ok(
        tmp.path(),
        &["add-task", "Roadmap", "Write docs", "--subtask", "Outline", "--subtask", " "],
    );
    let board = show_json(tmp.path(), "Roadmap");
    let first = board["columns"][0]["tasks"].as_array().unwrap();
    let task = first.last().unwrap();
    assert_eq!(task["title"], "Write docs");
    assert_eq!(task["status"], board["columns"][0]["name"]);
    assert_eq!(task["subtasks"].as_array().unwrap().len(), 1);
    assert!(task["id"].as_u64().unwrap() > 0);
}

#[test]
fn test_mv_moves_and_sets_status() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_kb_ok(tmp.path(), &["mv", "1", "Build UI for search", "Done"]);
    assert!(out.contains("Task moved: Build UI for search → Done"));

    let board = show_json(tmp.path(), "1");
    assert!(!column_titles(&board, "Todo").contains(&"Build UI for search".to_string()));
    assert_eq!(
        column_titles(&board, "Done").last().map(String::as_str),
        Some("Build UI for search")
    );
    let stored = stored_boards(tmp.path());
    let done = &stored["boards"][0]["columns"][2]["tasks"];
    let moved = done.as_array().unwrap().last().unwrap();
    assert_eq!(moved["status"], "Done");
}

#[test]
fn test_mv_same_column_is_a_no_op() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_kb_ok(tmp.path(), &["mv", "1", "Build UI for search", "Todo"]);
    assert!(out.contains("already in Todo"));
    assert!(!tmp.path().join("boards_data.json").exists());
}

#[test]
fn test_mv_unknown_column_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_kb_err(tmp.path(), &["mv", "1", "Build UI for search", "Later"]);
    assert!(err.contains("has no column named 'Later'"));
}

#[test]
fn test_toggle_subtask_twice() {
    let tmp = tempfile::TempDir::new().unwrap();
    let args = ["toggle", "1", "Build UI for onboarding flow", "Sign in page"];
    let out = run_kb_ok(tmp.path(), &args);
    assert_eq!(out.trim(), "[x] Sign in page");
    let out = run_kb_ok(tmp.path(), &["show", "1"]);
    assert!(out.contains("Build UI for onboarding flow  [2 of 3 subtasks]"));

    let out = run_kb_ok(tmp.path(), &args);
    assert_eq!(out.trim(), "[ ] Sign in page");
}

#[test]
fn test_toggle_unknown_subtask_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_kb_err(tmp.path(), &["toggle", "1", "Build UI for search", "Nope"]);
    assert!(err.contains("has no subtask named 'Nope'"));
}

#[test]
fn test_edit_task_renames_and_moves() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_kb_ok(
        tmp.path(),
        &[
            "edit-task",
            "1",
            "Build settings UI",
            "--title",
            "Build settings screens",
            "--status",
            "Doing",
        ],
    );
    assert!(out.contains("Task updated: Build settings screens (moved to Doing)"));

    let board = show_json(tmp.path(), "1");
    assert!(!column_titles(&board, "Todo").contains(&"Build settings UI".to_string()));
    assert_eq!(
        column_titles(&board, "Doing").last().map(String::as_str),
        Some("Build settings screens")
    );
}

#[test]
fn test_edit_task_duplicate_title_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_kb_err(
        tmp.path(),
        &["edit-task", "1", "Build settings UI", "--title", "Build UI for search"],
    );
    assert!(err.contains("already exists in Todo"));
}

#[test]
fn test_edit_task_move_cannot_shadow_source_title() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_kb_err(
        tmp.path(),
        &[
            "edit-task",
            "1",
            "Build UI for search",
            "--title",
            "Build UI for onboarding flow",
            "--status",
            "Doing",
        ],
    );
    assert!(err.contains("already exists in Todo"));
    assert!(!tmp.path().join("boards_data.json").exists());
}

#[test]
fn test_delete_task_and_board() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_kb_ok(tmp.path(), &["delete-task", "1", "Build UI for search"]);
    let board = show_json(tmp.path(), "1");
    assert_eq!(column_titles(&board, "Todo").len(), 3);

    let out = run_kb_ok(tmp.path(), &["delete-board", "Platform Launch"]);
    assert!(out.contains("Board deleted: Platform Launch"));
    let out = run_kb_ok(tmp.path(), &["boards", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["name"], "Marketing Plan");
    assert_eq!(parsed[0]["position"], 1);
}

#[test]
fn test_edit_board_keeps_matching_columns() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_kb_ok(
        tmp.path(),
        &["edit-board", "2", "--name", "Go To Market", "--columns", "Todo, Review"],
    );
    let board = show_json(tmp.path(), "2");
    assert_eq!(board["name"], "Go To Market");
    assert_eq!(column_titles(&board, "Todo").len(), 3);
    assert!(column_titles(&board, "Review").is_empty());
    assert_eq!(board["columns"].as_array().unwrap().len(), 2);
}

#[test]
fn test_reset_restores_sample_data() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_kb_ok(tmp.path(), &["delete-board", "1"]);
    run_kb_ok(tmp.path(), &["delete-board", "1"]);
    let out = run_kb_ok(tmp.path(), &["reset"]);
    assert!(out.contains("3 boards"));
    let out = run_kb_ok(tmp.path(), &["boards"]);
    assert!(out.contains("Platform Launch"));
}

#[test]
fn test_legacy_snapshot_without_ids_loads() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("boards_data.json"),
        r#"{"boards":[{"name":"Legacy","columns":[{"name":"Now","tasks":[{"title":"Old task"}]},{"name":"Later","tasks":[]}]}]}"#,
    )
    .unwrap();
    run_kb_ok(tmp.path(), &["mv", "Legacy", "Old task", "Later"]);
    let stored = stored_boards(tmp.path());
    let task = &stored["boards"][0]["columns"][1]["tasks"][0];
    assert_eq!(task["title"], "Old task");
    assert_eq!(task["status"], "Later");
    assert!(task["id"].as_u64().unwrap() > 0);
}

#[test]
fn test_corrupt_snapshot_falls_back_to_defaults() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("boards_data.json"), "{not json").unwrap();
    let out = run_kb_ok(tmp.path(), &["boards"]);
    assert!(out.contains("Platform Launch"));
}

// ---------------------------------------------------------------------------
// Session command tests
// ---------------------------------------------------------------------------

#[test]
fn test_login_whoami_logout() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_kb_ok(tmp.path(), &["whoami"]);
    assert!(out.contains("Not logged in"));

    run_kb_ok(tmp.path(), &["login", "--name", "Ada", "--email", "ada@example.com"]);
    let out = run_kb_ok(tmp.path(), &["whoami", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["logged_in"], true);
    assert_eq!(parsed["user"]["name"], "Ada");
    assert_eq!(parsed["theme"], "light");

    run_kb_ok(tmp.path(), &["logout"]);
    let out = run_kb_ok(tmp.path(), &["whoami"]);
    assert!(out.contains("Not logged in"));
}

#[test]
fn test_theme_set_and_toggle() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_kb_ok(tmp.path(), &["theme", "DARK"]);
    assert_eq!(out.trim(), "Theme: dark");
    assert_eq!(
        fs::read_to_string(tmp.path().join("app_theme.json")).unwrap(),
        "dark"
    );
    let out = run_kb_ok(tmp.path(), &["theme"]);
    assert_eq!(out.trim(), "Theme: light");

    let err = run_kb_err(tmp.path(), &["theme", "sepia"]);
    assert!(err.contains("unknown theme 'sepia'"));
}

#[test]
fn test_theme_toggle_starts_from_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[ui]\ntheme = \"dark\"\n").unwrap();
    let out = run_kb_ok(tmp.path(), &["theme"]);
    assert_eq!(out.trim(), "Theme: light");
}
