//! End-to-end tests for the `pocketlens` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TODAY: &str = "2024-03-15";

fn pocketlens(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pocketlens").unwrap();
    cmd.env("POCKETLENS_DATA_DIR", dir.path())
        .env_remove("POCKETLENS_LOG")
        .args(["--as-of", TODAY]);
    cmd
}

fn add(dir: &TempDir, kind: &str, amount: &str, category: &str, date: &str) {
    pocketlens(dir)
        .args(["transaction", "add", kind, amount, category, "--date", date])
        .assert()
        .success();
}

#[test]
fn test_init_creates_settings() {
    let dir = TempDir::new().unwrap();
    pocketlens(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("transactions.json").exists());
}

#[test]
fn test_add_and_list_transactions() {
    let dir = TempDir::new().unwrap();
    pocketlens(&dir)
        .args(["transaction", "add", "expense", "42.50", "Food", "-m", "Market"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Recorded expense of $42.50 in Food on 2024-03-15",
        ));

    pocketlens(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Market"))
        .stdout(predicate::str::contains("$42.50"));
}

#[test]
fn test_negative_amount_rejected() {
    let dir = TempDir::new().unwrap();
    pocketlens(&dir)
        .args(["transaction", "add", "expense", "--", "-5", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be negative"));
}

#[test]
fn test_insights_report_json() {
    let dir = TempDir::new().unwrap();
    add(&dir, "income", "3000", "Salary", "2024-03-01");
    add(&dir, "expense", "1200", "Rent", "2024-03-02");
    add(&dir, "expense", "300", "Food", "2024-03-05");
    add(&dir, "expense", "999", "Food", "2023-01-05");

    let output = pocketlens(&dir)
        .args(["report", "insights", "--period", "current-month", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["period"], "current-month");
    assert_eq!(report["transaction_count"], 3);
    assert_eq!(report["totals"]["income"], 3000.0);
    assert_eq!(report["totals"]["expense"], 1500.0);
    assert_eq!(report["expense_categories"][0]["category"], "Rent");
}

#[test]
fn test_invalid_period_lists_tokens() {
    let dir = TempDir::new().unwrap();
    pocketlens(&dir)
        .args(["report", "insights", "--period", "last-week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid period 'last-week'"))
        .stderr(predicate::str::contains("last-6-months"));
}

#[test]
fn test_import_dry_run_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let statement = dir.path().join("statement.txt");
    std::fs::write(
        &statement,
        r#"Extracted transactions:
[
  {"date": "2024-03-01", "description": "Payroll", "amount": "3,000.00", "type": "income", "category": "Salary"},
  {"date": "2024-03-03", "description": "Market", "amount": 80, "type": "expense", "category": "Food"},
  {"date": "2024-03-04", "description": "Bad", "amount": 10, "type": "transfer", "category": "Misc"}
]"#,
    )
    .unwrap();

    pocketlens(&dir)
        .args(["import", statement.to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: nothing was saved."))
        .stdout(predicate::str::contains("Imported 2 transaction(s)"))
        .stdout(predicate::str::contains("Rejected 1 row(s):"));

    pocketlens(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));

    pocketlens(&dir)
        .args(["import", statement.to_str().unwrap()])
        .assert()
        .success();
    pocketlens(&dir)
        .args(["import", statement.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 0 transaction(s)"))
        .stdout(predicate::str::contains("Skipped 2 duplicate(s)"));
}

#[test]
fn test_budget_report_shows_exceeded() {
    let dir = TempDir::new().unwrap();
    pocketlens(&dir)
        .args(["budget", "set", "Food", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set budget for Food in 2024-03: $100.00"));
    add(&dir, "expense", "120", "Food", "2024-03-04");

    pocketlens(&dir)
        .args(["report", "budget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Status: 2024-03"))
        .stdout(predicate::str::contains("Food: over budget, $120.00 of $100.00 (120%)"));
}

#[test]
fn test_report_written_to_file() {
    let dir = TempDir::new().unwrap();
    add(&dir, "expense", "25", "Food", "2024-03-02");
    let out = dir.path().join("monthly.csv");

    pocketlens(&dir)
        .args(["report", "monthly", "--format", "csv", "--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Written to:"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("category,current,previous,change\n"));
    assert!(text.contains("Food,25.0,0.0,100.0"));
}

#[test]
fn test_recurring_and_goal_in_plan() {
    let dir = TempDir::new().unwrap();
    pocketlens(&dir)
        .args(["recurring", "add", "Gym", "40", "Health", "--next", "2024-03-20"])
        .assert()
        .success();
    pocketlens(&dir)
        .args(["goal", "add", "Trip", "1000", "--due", "2024-12-01", "--saved", "250"])
        .assert()
        .success();
    add(&dir, "expense", "50", "Food", "2024-03-03");

    pocketlens(&dir)
        .args(["report", "plan", "--period", "current-month"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food is 100% of your spending"))
        .stdout(predicate::str::contains("1 active, $40.00 per month"))
        .stdout(predicate::str::contains("due 2024-03-20"))
        .stdout(predicate::str::contains("$250.00 of $1000.00 saved"));
}

#[test]
fn test_export_json() {
    let dir = TempDir::new().unwrap();
    add(&dir, "expense", "10", "Food", "2024-03-02");

    let output = pocketlens(&dir).args(["export"]).output().unwrap();
    assert!(output.status.success());

    let export: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(export["metadata"]["transaction_count"], 1);
    assert_eq!(export["transactions"][0]["category"], "Food");
}
