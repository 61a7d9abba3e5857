use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const QUOTES: &str = r#"[
    {"_id": "q1", "quote_title": "Lagos run", "quote_date": "2024-03-23T09:00:00Z",
     "sections": [
        {"section_name": "Freight", "section_currency": "USD",
         "section_data": [{"basis": "Airfreight", "unit_of_measurement": "kg",
                           "unit": 10, "rate": 10, "amount": 100}]},
        {"section_name": "Handling",
         "section_currency": {"currency": "USD", "customer_currency": "NGN",
                              "exchange_rate": 1500, "is_base_currency": false},
         "section_data": [{"basis": "Documentation", "amount": 50}]}
     ]},
    {"_id": "q2", "quote_title": "Apapa clearing", "quote_date": "2024-03-24T10:30:00Z",
     "sections": [
        {"section_name": "Port", "section_currency": "NGN",
         "section_data": [{"basis": "Terminal charges", "amount": 250000}]}
     ]}
]"#;

fn fquote(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fquote").unwrap();
    cmd.env("FREIGHT_QUOTE_DIR", home.path())
        .env_remove("FQUOTE_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_validate_invalid_header_fails() {
    let home = TempDir::new().unwrap();
    let data = write(home.path(), "header.json", r#"{"title": "", "start_time": "08:00 am"}"#);

    fquote(&home)
        .args(["validate", "--schema", "header"])
        .arg(&data)
        .assert()
        .failure()
        .stdout(predicate::str::contains("title:"))
        .stdout(predicate::str::contains("Invalid"));
}

#[test]
fn test_validate_valid_header_succeeds() {
    let home = TempDir::new().unwrap();
    let data = write(
        home.path(),
        "header.json",
        r#"{"title": "Lagos run", "start_time": "08:00 am", "end_time": "10:00 am"}"#,
    );

    fquote(&home)
        .args(["validate", "--schema", "header", "--json"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""is_empty": true"#));
}

#[test]
fn test_validate_unknown_schema_errors() {
    let home = TempDir::new().unwrap();
    let data = write(home.path(), "header.json", "{}");

    fquote(&home)
        .args(["validate", "--schema", "no-such-schema"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-schema"));
}

#[test]
fn test_totals_per_currency() {
    let home = TempDir::new().unwrap();
    let quotes = write(home.path(), "quotes.json", QUOTES);

    fquote(&home)
        .arg("totals")
        .arg(&quotes)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 Quotes"))
        .stdout(predicate::str::contains("$150.00, ₦250,000.00"));
}

#[test]
fn test_totals_for_one_day() {
    let home = TempDir::new().unwrap();
    let quotes = write(home.path(), "quotes.json", QUOTES);

    fquote(&home)
        .arg("totals")
        .arg(&quotes)
        .args(["--day", "2024-03-23"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 Quotes"))
        .stdout(predicate::str::contains("$150.00"))
        .stdout(predicate::str::contains("₦").not());
}

#[test]
fn test_totals_json_export() {
    let home = TempDir::new().unwrap();
    let quotes = write(home.path(), "quotes.json", QUOTES);

    fquote(&home)
        .arg("totals")
        .arg(&quotes)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "totals""#))
        .stdout(predicate::str::contains(r#""count": 2"#));
}

#[test]
fn test_preview_csv_export() {
    let home = TempDir::new().unwrap();
    let quotes = write(home.path(), "quotes.json", QUOTES);
    let output = home.path().join("preview.csv");

    fquote(&home)
        .arg("preview")
        .arg(&quotes)
        .args(["--id", "q1", "--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to:"));

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Quote ID,"));
    assert!(csv.contains("Airfreight"));
    assert!(csv.contains("Sub Total"));
}

#[test]
fn test_preview_unknown_quote() {
    let home = TempDir::new().unwrap();
    let quotes = write(home.path(), "quotes.json", QUOTES);

    fquote(&home)
        .arg("preview")
        .arg(&quotes)
        .args(["--id", "missing"])
        .assert()
        .failure();
}

#[test]
fn test_calendar_csv_is_rejected() {
    let home = TempDir::new().unwrap();
    let quotes = write(home.path(), "quotes.json", QUOTES);

    fquote(&home)
        .arg("calendar")
        .arg(&quotes)
        .args(["--month", "2024-03", "--format", "csv"])
        .assert()
        .failure();
}

#[test]
fn test_day_listing() {
    let home = TempDir::new().unwrap();
    let quotes = write(home.path(), "quotes.json", QUOTES);

    fquote(&home)
        .arg("day")
        .arg(&quotes)
        .args(["--date", "2024-03-24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Apapa clearing"))
        .stdout(predicate::str::contains("Lagos run").not());
}

#[test]
fn test_init_creates_settings_and_example_schema() {
    let home = TempDir::new().unwrap();

    fquote(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(home.path().join("config.json").exists());

    fquote(&home)
        .arg("schemas")
        .assert()
        .success()
        .stdout(predicate::str::contains("quote-header"));
}

#[test]
fn test_preview_into_directory_uses_title_and_date() {
    let home = TempDir::new().unwrap();
    let quotes = write(home.path(), "quotes.json", QUOTES);

    fquote(&home)
        .arg("preview")
        .arg(&quotes)
        .args(["--id", "q1", "--format", "json", "--output"])
        .arg(home.path())
        .assert()
        .success();

    let exported = home.path().join("Lagos run - 2024-03-23.json");
    let text = std::fs::read_to_string(exported).unwrap();
    assert!(text.contains(r#""kind": "preview""#));
}
