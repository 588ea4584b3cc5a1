use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_malformed_csv_handling() {
    let csv = tempfile::NamedTempFile::new().unwrap();
    common::write_revenue_csv(
        csv.path(),
        &[
            ("loan-0", "1000"),
            // not a number
            ("loan-0", "lots"),
            // missing revenue
            ("loan-0", ""),
            ("loan-0", "3000"),
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("revshare"));
    cmd.arg(csv.path()).env_remove("REVSHARE_RATE_BPS");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading revenue event"))
        .stdout(predicate::str::contains("loan-0,1000,2500,250,tx-000001"))
        .stdout(predicate::str::contains("loan-0,3000,2500,750,tx-000002"));
}

#[test]
fn test_invalid_events_are_skipped() {
    let csv = tempfile::NamedTempFile::new().unwrap();
    common::write_revenue_csv(
        csv.path(),
        &[
            ("loan-0", "-1"),
            ("loan-0", "100.5"),
            ("", "1000"),
            ("loan-1", "2000"),
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("revshare"));
    cmd.arg(csv.path()).env_remove("REVSHARE_RATE_BPS");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error processing revenue event").count(3))
        .stderr(predicate::str::contains("Invalid argument"))
        .stdout(predicate::str::contains("loan-1,2000,2500,500,tx-000001"))
        .stdout(predicate::str::contains("loan-0").not());
}

#[test]
fn test_loan_reference_whitespace_is_preserved() -> Result<(), Box<dyn std::error::Error>> {
    let csv = tempfile::NamedTempFile::new()?;
    common::write_revenue_csv(csv.path(), &[(" loan-0 ", " 1000 ")])?;

    let output = Command::new(cargo_bin!("revshare"))
        .arg(csv.path())
        .arg("--format")
        .arg("json")
        .env_remove("REVSHARE_RATE_BPS")
        .output()?;
    assert!(output.status.success());

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["loan"], " loan-0 ");
    assert_eq!(records[0]["amount"], 250);

    Ok(())
}
