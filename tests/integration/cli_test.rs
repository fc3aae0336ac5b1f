use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const TODAY: &str = "2024-01-10";

fn tally() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("tally-cli").unwrap();
    cmd.env("TALLY_TODAY", TODAY).env_remove("TALLY_LOG");
    cmd
}

fn init_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    tally().arg("init").current_dir(dir.path()).assert().success();
    dir
}

fn json_of(dir: &TempDir, args: &[&str]) -> Value {
    let output = tally()
        .args(args)
        .arg("--json")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "command failed: {:?}", args);
    serde_json::from_slice(&output.stdout).unwrap()
}

fn texts(list: &Value) -> Vec<String> {
    list["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["object"]["text"].as_str().unwrap().to_string())
        .collect()
}

fn add(dir: &TempDir, args: &[&str]) -> String {
    let mut full = vec!["add"];
    full.extend_from_slice(args);
    let added = json_of(dir, &full);
    added["id"].as_str().unwrap().to_string()
}

/// Start from an empty collection instead of the seeded examples.
fn clear_seed(dir: &TempDir) {
    let list = json_of(dir, &["list"]);
    for task in list["tasks"].as_array().unwrap() {
        let id = task["id"].as_str().unwrap();
        tally()
            .args(["rm", id])
            .current_dir(dir.path())
            .assert()
            .success();
    }
}

#[test]
fn init_creates_tally_dir() {
    let dir = TempDir::new().unwrap();
    tally()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains(".tally"));

    assert!(dir.path().join(".tally/config.json").exists());
    assert!(dir.path().join(".tally/data").is_dir());
}

#[test]
fn init_twice_fails() {
    let dir = init_workspace();
    tally()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn commands_outside_workspace_fail() {
    let dir = TempDir::new().unwrap();
    tally()
        .arg("list")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("not a tally workspace"));
}

#[test]
fn first_run_seeds_examples() {
    let dir = init_workspace();
    let list = json_of(&dir, &["list"]);
    assert_eq!(texts(&list), vec!["Finish the report", "Buy groceries"]);
    assert_eq!(list["tasks"][0]["object"]["priority"], "High");
    assert_eq!(list["tasks"][0]["object"]["date"], TODAY);
    assert_eq!(list["tasks"][1]["object"]["priority"], "Medium");
    assert_eq!(list["tasks"][1]["object"]["date"], "2024-01-11");
    assert!(dir.path().join(".tally/data/tasks_v1.json").exists());
}

#[test]
fn add_prepends_with_defaults() {
    let dir = init_workspace();
    add(&dir, &["  Walk the dog  "]);
    let list = json_of(&dir, &["list"]);
    assert_eq!(list["total"], 3);
    let first = &list["tasks"][0]["object"];
    assert_eq!(first["text"], "Walk the dog");
    assert_eq!(first["priority"], "Medium");
    assert_eq!(first["date"], TODAY);
    assert_eq!(first["category"], "General");
    assert_eq!(first["completed"], false);
}

#[test]
fn add_with_fields() {
    let dir = init_workspace();
    add(
        &dir,
        &["File taxes", "--priority", "high", "--date", "2024-04-15", "--category", "Finance"],
    );
    let first = &json_of(&dir, &["list"])["tasks"][0]["object"];
    assert_eq!(first["priority"], "High");
    assert_eq!(first["date"], "2024-04-15");
    assert_eq!(first["category"], "Finance");
}

#[test]
fn add_blank_text_fails_and_changes_nothing() {
    let dir = init_workspace();
    let before = json_of(&dir, &["list"]);
    tally()
        .args(["add", "   "])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("empty"));
    assert_eq!(json_of(&dir, &["list"])["tasks"], before["tasks"]);
}

#[test]
fn add_rejects_bad_priority_and_date() {
    let dir = init_workspace();
    tally()
        .args(["add", "x", "--priority", "urgent"])
        .current_dir(dir.path())
        .assert()
        .failure();
    tally()
        .args(["add", "x", "--date", "next week"])
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn toggle_by_prefix_updates_stats() {
    let dir = init_workspace();
    clear_seed(&dir);
    let id = add(&dir, &["One"]);
    add(&dir, &["Two"]);

    tally()
        .args(["toggle", &id[..8]])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Completed"));

    let stats = json_of(&dir, &["stats"]);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["completed_count"], 1);
    assert_eq!(stats["percent"], 50.0);

    tally()
        .args(["toggle", &id])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Reopened"));
    assert_eq!(json_of(&dir, &["stats"])["completed_count"], 0);
}

#[test]
fn empty_collection_reports_zero_percent() {
    let dir = init_workspace();
    clear_seed(&dir);
    tally()
        .arg("stats")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("0/1 done (0%)"));
}

#[test]
fn rm_deletes_once() {
    let dir = init_workspace();
    let id = add(&dir, &["Temporary"]);
    tally()
        .args(["rm", &id])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Deleted"));

    let list = json_of(&dir, &["list"]);
    assert!(!texts(&list).contains(&"Temporary".to_string()));
    assert_eq!(list["total"], 2);

    tally()
        .args(["rm", &id])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("not found"));
}

#[test]
fn rm_json_output() {
    let dir = init_workspace();
    let id = add(&dir, &["Temporary"]);
    let removed = json_of(&dir, &["rm", &id]);
    assert_eq!(removed["id"], id.as_str());
    assert_eq!(removed["deleted"], true);
    assert_eq!(json_of(&dir, &["list"])["total"], 2);
}

#[test]
fn add_fails_when_write_is_locked() {
    let dir = init_workspace();
    json_of(&dir, &["list"]);
    let lock = dir.path().join(".tally/data/tasks_v1.json.lock");
    fs::write(&lock, "").unwrap();

    tally()
        .args(["add", "Important"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("not saved"));

    fs::remove_file(&lock).unwrap();
    let list = json_of(&dir, &["list"]);
    assert_eq!(list["total"], 2);
    add(&dir, &["Important"]);
    assert_eq!(texts(&json_of(&dir, &["list"]))[0], "Important");
}

#[test]
fn edit_changes_given_fields_only() {
    let dir = init_workspace();
    let id = add(&dir, &["Draft memo", "--priority", "low", "--category", "Work"]);
    tally()
        .args(["toggle", &id])
        .current_dir(dir.path())
        .assert()
        .success();

    let edited = json_of(&dir, &["edit", &id, "--text", "Final memo", "--date", "2024-02-01"]);
    let task = &edited["object"];
    assert_eq!(task["text"], "Final memo");
    assert_eq!(task["date"], "2024-02-01");
    assert_eq!(task["priority"], "Low");
    assert_eq!(task["category"], "Work");
    assert_eq!(task["completed"], true);
    assert_eq!(edited["id"], id.as_str());

    let list = json_of(&dir, &["list"]);
    assert_eq!(list["tasks"][0]["object"]["text"], "Final memo");
}

#[test]
fn edit_with_blank_text_fails() {
    let dir = init_workspace();
    let id = add(&dir, &["Keep me"]);
    tally()
        .args(["edit", &id, "--text", "  "])
        .current_dir(dir.path())
        .assert()
        .failure();
    assert_eq!(json_of(&dir, &["list"])["tasks"][0]["object"]["text"], "Keep me");
}

#[test]
fn list_filters_and_sorts() {
    let dir = init_workspace();
    clear_seed(&dir);
    add(&dir, &["Low later", "--priority", "low", "--date", "2024-01-12"]);
    let done = add(&dir, &["High past done", "--priority", "high", "--date", "2024-01-01"]);
    add(&dir, &["Medium past", "--date", "2024-01-05"]);
    add(&dir, &["High today", "--priority", "high"]);
    tally()
        .args(["toggle", &done])
        .current_dir(dir.path())
        .assert()
        .success();

    let overdue = json_of(&dir, &["list", "--filter", "overdue"]);
    assert_eq!(texts(&overdue), vec!["Medium past"]);
    assert_eq!(overdue["tasks"][0]["overdue"], true);

    let today = json_of(&dir, &["list", "--filter", "today"]);
    assert_eq!(texts(&today), vec!["High today"]);

    let completed = json_of(&dir, &["list", "--filter", "completed"]);
    assert_eq!(texts(&completed), vec!["High past done"]);

    let by_priority = json_of(&dir, &["list", "--sort", "priority"]);
    assert_eq!(
        texts(&by_priority),
        vec!["High today", "High past done", "Medium past", "Low later"]
    );

    let by_date = json_of(&dir, &["list", "--sort", "date"]);
    assert_eq!(
        texts(&by_date),
        vec!["High past done", "Medium past", "High today", "Low later"]
    );

    let searched = json_of(&dir, &["list", "--search", "PAST", "--sort", "date"]);
    assert_eq!(texts(&searched), vec!["High past done", "Medium past"]);
    assert_eq!(searched["shown"], 2);
    assert_eq!(searched["total"], 4);
    assert_eq!(searched["stats"]["completed_count"], 1);
}

#[test]
fn list_rejects_unknown_modes() {
    let dir = init_workspace();
    tally()
        .args(["list", "--filter", "someday"])
        .current_dir(dir.path())
        .assert()
        .failure();
    tally()
        .args(["list", "--sort", "alphabetical"])
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn list_text_output() {
    let dir = init_workspace();
    let output = tally()
        .arg("list")
        .current_dir(dir.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Finish the report"));
    assert!(stdout.contains("2 shown • 2 total"));
    assert!(stdout.contains("0/2 done (0%)"));
    assert!(stdout.find("Finish the report").unwrap() < stdout.find("Buy groceries").unwrap());
}

#[test]
fn corrupt_data_falls_back_to_seed() {
    let dir = init_workspace();
    add(&dir, &["Will be lost"]);
    fs::write(dir.path().join(".tally/data/tasks_v1.json"), "{ definitely not json").unwrap();

    let list = json_of(&dir, &["list"]);
    assert_eq!(texts(&list), vec!["Finish the report", "Buy groceries"]);
}

#[test]
fn theme_show_and_set() {
    let dir = init_workspace();
    tally()
        .arg("theme")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Theme: light"));

    tally()
        .args(["theme", "dark"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Theme: dark"));

    let theme = json_of(&dir, &["theme"]);
    assert_eq!(theme["dark"], true);

    tally()
        .args(["theme", "sepia"])
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn works_from_subdirectory() {
    let dir = init_workspace();
    let sub = dir.path().join("notes").join("2024");
    fs::create_dir_all(&sub).unwrap();
    tally()
        .args(["add", "From below"])
        .current_dir(&sub)
        .assert()
        .success();
    assert_eq!(json_of(&dir, &["list"])["tasks"][0]["object"]["text"], "From below");
}
