//! End-to-end tests for the `opp` binary.
//!
//! Every test runs the binary against the bundled dataset with its own
//! temporary home, config and data directories, so persisted state never
//! leaks between tests. Date-dependent assertions accept the dates on either
//! side of the run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use chrono::Utc;
use serde_json::Value;
use tempfile::TempDir;

struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn config_path(&self) -> PathBuf {
        self.path().join("config").join("opp").join("config.toml")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_opp"));
        cmd.args(args)
            .env("HOME", self.path())
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("OPP_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("OPP_DATA")
            .current_dir(self.path());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().unwrap()
    }

    fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }

    fn json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(output.status.success(), "{}", stderr(&output));
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn ids(list: &Value) -> Vec<String> {
    list["applications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|app| app["id"].as_str().unwrap().to_string())
        .collect()
}

// ==================== list ====================

#[test]
fn test_list_all_applications() {
    let env = TestEnv::new();
    let list = env.json(&["list"]);
    assert_eq!(ids(&list).len(), 12);
    assert_eq!(list["total"], 12);
}

#[test]
fn test_list_by_agency_sorted_by_due_date() {
    let env = TestEnv::new();
    let list = env.json(&["list", "--agency", "GSA"]);
    assert_eq!(ids(&list), vec!["APP-001", "APP-011"]);
}

#[test]
fn test_list_quick_filters_combine() {
    let env = TestEnv::new();
    let list = env.json(&["list", "--gsa-only", "--high-fit"]);
    assert_eq!(ids(&list), vec!["APP-001"]);
}

#[test]
fn test_list_sort_persists() {
    let env = TestEnv::new();
    let list = env.json(&["list", "--sort", "fit", "--desc", "--limit", "2"]);
    assert_eq!(ids(&list), vec!["APP-006", "APP-003"]);

    let list = env.json(&["list", "--limit", "1"]);
    assert_eq!(ids(&list), vec!["APP-006"]);
}

#[test]
fn test_list_table_output() {
    let env = TestEnv::new();
    let output = env.run(&["list", "--agency", "DHS"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("APP-003"));
    assert!(out.contains("Cybersecurity Operations Center Support"));
    assert!(!out.contains("APP-001"));
}

#[test]
fn test_list_no_matches() {
    let env = TestEnv::new();
    let output = env.run(&["list", "--agency", "NASA"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No applications match the current filters."));
}

#[test]
fn test_list_inverted_ceiling_fails() {
    let env = TestEnv::new();
    let output = env.run(&[
        "--json",
        "list",
        "--min-ceiling",
        "9000000",
        "--max-ceiling",
        "1000000",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let error: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error"]["code"], "FILTER_ERROR");
}

#[test]
fn test_list_from_url() {
    let env = TestEnv::new();
    let list = env.json(&["list", "--url", "?agency=USDA&minCeiling=2500000"]);
    assert_eq!(ids(&list), vec!["APP-012"]);
}

// ==================== show / submit ====================

#[test]
fn test_show_unknown_id_suggests() {
    let env = TestEnv::new();
    let output = env.run(&["show", "APP-0003"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("APP-003"));
}

#[test]
fn test_show_details() {
    let env = TestEnv::new();
    let details = env.json(&["show", "APP-002"]);
    assert_eq!(details["id"], "APP-002");
    assert_eq!(details["can_submit"], true);
}

#[test]
fn test_submit_outcomes() {
    let env = TestEnv::new();

    let output = env.run(&["submit", "APP-002"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("APP-002 marked as Submitted."));

    let output = env.run(&["submit", "APP-001"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("was not submitted"));

    let output = env.run(&["--json", "submit", "APP-999"]);
    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["result"], "not_found");
}

// ==================== dashboard / share ====================

#[test]
fn test_dashboard_counts_filtered_view() {
    let env = TestEnv::new();
    let summary = env.json(&["dashboard", "--agency", "USDA"]);
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["query"], "agency=USDA&periodType=custom");
}

#[test]
fn test_share_prints_query_string() {
    let env = TestEnv::new();
    let output = env.run(&["share", "--agency", "GSA", "--period", "60"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "agency=GSA&periodType=60");
}

#[test]
fn test_share_without_filters() {
    let env = TestEnv::new();
    let output = env.run(&["share"]);
    assert!(stdout(&output).contains("(no filters applied)"));
}

// ==================== export ====================

#[test]
fn test_export_writes_csv() {
    let env = TestEnv::new();
    let out_dir = env.path().join("exports");

    let output = env.run(&[
        "export",
        "--agency",
        "GSA",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("(2 rows)"));

    let files: Vec<_> = fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(files.len(), 1);
    let path = files[0].as_ref().unwrap().path();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("gsa-applications-"));
    assert!(name.ends_with(".csv"));

    let csv = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("APP-001,"));
}

#[test]
fn test_export_file_name_uses_utc_date() {
    let env = TestEnv::new();
    let out_dir = env.path().join("exports");

    let before = Utc::now().date_naive();
    let output = env.run(&["export", "--agency", "DHS", "-o", out_dir.to_str().unwrap()]);
    let after = Utc::now().date_naive();
    assert!(output.status.success(), "{}", stderr(&output));

    let entry = fs::read_dir(&out_dir).unwrap().next().unwrap().unwrap();
    let name = entry.file_name().to_string_lossy().into_owned();
    let expected: Vec<String> = [before, after]
        .iter()
        .map(|date| format!("gsa-applications-{}.csv", date.format("%Y-%m-%d")))
        .collect();
    assert!(expected.contains(&name), "{name} not in {expected:?}");
}

#[test]
fn test_export_quotes_commas() {
    let env = TestEnv::new();
    let out_dir = env.path().join("exports");
    let output = env.run(&[
        "export",
        "--agency",
        "SSA",
        "-o",
        out_dir.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let entry = fs::read_dir(&out_dir).unwrap().next().unwrap().unwrap();
    let csv = fs::read_to_string(entry.path()).unwrap();
    assert!(csv.contains("\"Customer Contact Center Chatbot, Phase I\""));
}

// ==================== preset / theme ====================

#[test]
fn test_preset_round_trip() {
    let env = TestEnv::new();

    let output = env.run(&["preset", "save", "--name", "GSA only", "--agency", "GSA"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Saved preset 'GSA only'."));

    let output = env.run(&["preset", "show"]);
    let out = stdout(&output);
    assert!(out.contains("GSA only"));
    assert!(out.contains("agency=GSA"));

    let list = env.json(&["list", "--preset"]);
    assert_eq!(ids(&list), vec!["APP-001", "APP-011"]);

    let output = env.run(&["preset", "clear"]);
    assert!(stdout(&output).contains("Preset cleared."));
    let output = env.run(&["preset", "show"]);
    assert!(stdout(&output).contains("No preset saved."));
}

#[test]
fn test_theme_persists() {
    let env = TestEnv::new();
    assert!(stdout(&env.run(&["theme"])).contains("Theme: light"));
    assert!(stdout(&env.run(&["theme", "--dark"])).contains("Theme: dark"));
    assert!(stdout(&env.run(&["theme"])).contains("Theme: dark"));
}

// ==================== config / data ====================

#[test]
fn test_config_set_and_path() {
    let env = TestEnv::new();

    let output = env.run(&["config", "path"]);
    assert_eq!(
        stdout(&output).trim(),
        env.config_path().display().to_string()
    );

    let output = env.run(&["config", "set", "filters.debounce_ms", "50"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let content = fs::read_to_string(env.config_path()).unwrap();
    assert!(content.contains("debounce_ms = 50"));

    let output = env.run(&["config", "set", "filters.debounce_ms", "20000"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_data_flag_overrides_dataset() {
    let env = TestEnv::new();
    let data = env.path().join("apps.json");
    fs::write(
        &data,
        r#"[{
            "id": "X-1",
            "title": "Custom opportunity",
            "agency": "NASA",
            "naics": "541715",
            "dueDate": "2027-05-01",
            "status": "Draft"
        }]"#,
    )
    .unwrap();

    let list = env.json(&["--data", data.to_str().unwrap(), "list"]);
    assert_eq!(ids(&list), vec!["X-1"]);

    let output = env.run(&["--data", "missing.json", "list"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_list_runs_without_home() {
    let env = TestEnv::new();
    let output = env
        .command(&["--json", "list", "--agency", "GSA"])
        .env_remove("HOME")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let list: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ids(&list), vec!["APP-001", "APP-011"]);
}

#[test]
fn test_piped_diagnostics_are_plain() {
    let env = TestEnv::new();
    let data = env.path().join("apps.json");
    fs::write(&data, "[]").unwrap();

    let output = env
        .command(&["--verbose", "--data", data.to_str().unwrap(), "list"])
        .env_remove("NO_COLOR")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let err = stderr(&output);
    assert!(err.contains("loaded dataset"));
    assert!(!err.contains('\u{1b}'));
}

#[test]
fn test_completions() {
    let env = TestEnv::new();
    let output = env.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("opp"));
}

// ==================== session ====================

#[test]
fn test_session_applies_after_debounce() {
    let env = TestEnv::new();
    let output = env.run_with_stdin(
        &["session"],
        "set agency GSA\napply\nwait\nlist\nsubmit APP-011\nquit\n",
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Draft: agency=GSA"));
    assert!(out.contains("View updated: 2 applications"));
    assert!(out.contains("APP-011 marked as Submitted."));
    assert!(!out.contains("APP-003"));
}

#[test]
fn test_session_reports_bad_input_and_continues() {
    let env = TestEnv::new();
    let output = env.run_with_stdin(&["session"], "frobnicate\nurl\n");
    assert!(output.status.success());
    assert!(stderr(&output).contains("unknown command 'frobnicate'"));
    assert!(stdout(&output).contains("(no filters applied)"));
}
