use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn header(file: &mut NamedTempFile) {
    writeln!(file, "type, member, booking, amount, points, method").unwrap();
}

#[test]
fn test_full_discount_reaches_zero() {
    let mut file = NamedTempFile::new().unwrap();
    header(&mut file);
    writeln!(file, "pay, , 1, 120, , Debit Card").unwrap();
    writeln!(file, "discount, , 1, 120, ,").unwrap();

    let mut cmd = Command::new(cargo_bin!("royal-stay"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",1,0.00,Debit Card,Pending"));
}

#[test]
fn test_invalid_discounts_leave_amount() {
    let mut file = NamedTempFile::new().unwrap();
    header(&mut file);
    writeln!(file, "pay, , 1, 100, , Cash").unwrap();
    writeln!(file, "discount, , 1, 100.01, ,").unwrap(); // Exceeds amount
    writeln!(file, "discount, , 1, -5, ,").unwrap(); // Negative
    writeln!(file, "discount, , 2, 5, ,").unwrap(); // Unknown booking

    let mut cmd = Command::new(cargo_bin!("royal-stay"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(",1,100.00,Cash,Pending"));
}

#[test]
fn test_unknown_payment_method_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    header(&mut file);
    writeln!(file, "pay, , 1, 50, , Bitcoin").unwrap();
    writeln!(file, "pay, , 2, 50, , Mobile Wallet").unwrap();

    let mut cmd = Command::new(cargo_bin!("royal-stay"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bitcoin").not())
        .stdout(predicate::str::contains(",2,50.00,Mobile Wallet,Pending"));
}

#[test]
fn test_invoice_only_after_processing() {
    let mut file = NamedTempFile::new().unwrap();
    header(&mut file);
    writeln!(file, "pay, , 1, 200, , Bank Transfer").unwrap();
    writeln!(file, "invoice, , 1, , ,").unwrap(); // Pending, rejected
    writeln!(file, "process, , 1, , ,").unwrap();
    writeln!(file, "invoice, , 1, , ,").unwrap();

    let mut cmd = Command::new(cargo_bin!("royal-stay"));
    cmd.arg(file.path()).arg("--format").arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    let payment_id = report["payments"][0]["payment"].as_str().unwrap();
    assert_eq!(report["payments"][0]["status"], "Successful");
    assert_eq!(report["invoices"].as_array().unwrap().len(), 1);
    assert_eq!(report["invoices"][0], payment_id);
}
