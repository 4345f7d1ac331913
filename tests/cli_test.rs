mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;

fn run(policy: &str) -> Value {
    let mut cmd = Command::new(cargo_bin!("orderbulk"));
    cmd.arg(common::ORDERS)
        .arg("--catalog")
        .arg(common::CATALOG)
        .arg("--error-policy")
        .arg(policy);

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_cli_end_to_end() {
    let response = run("ignore-failed");
    assert_eq!(response["count"], 2);

    let first = &response["results"][0]["order"];
    assert_eq!(first["number"], "1");
    assert_eq!(first["externalReference"], "ext-1");
    assert_eq!(first["userEmail"], "customer@example.com");
    assert_eq!(first["total"]["gross"]["amount"], "34.6");
    assert_eq!(first["total"]["gross"]["currency"], "PLN");
    assert_eq!(first["shippingMethodName"], "DHL");
    assert_eq!(first["chargeStatus"], "FULL");
    assert_eq!(first["lines"][0]["taxClassName"], "Default");

    let guest = &response["results"][1]["order"];
    assert_eq!(guest["number"], "2");
    assert_eq!(guest["userEmail"], "guest@example.com");
    assert_eq!(guest["languageCode"], "en-US");
    assert_eq!(guest["collectionPointName"], "Main");
    assert_eq!(guest["billingAddress"]["country"], "PL");
    assert_eq!(guest["lines"][0]["productName"], "Mug");
    assert_eq!(guest["lines"][0]["unitPrice"]["gross"]["amount"], "3.333");
    assert_eq!(guest["total"]["gross"]["amount"], "10");

    let failed = &response["results"][2];
    assert!(failed["order"].is_null());
    assert_eq!(failed["errors"][0]["field"], "lines.0.variantSku");
    assert_eq!(failed["errors"][0]["code"], "NOT_FOUND");
}

#[test]
fn test_cli_rejects_everything_by_default() {
    let response = run("reject-everything");
    assert_eq!(response["count"], 0);
    for result in response["results"].as_array().unwrap() {
        assert!(result["order"].is_null());
    }
    assert!(response["results"][0]["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_cli_csv_summary() {
    let mut cmd = Command::new(cargo_bin!("orderbulk"));
    cmd.arg(common::ORDERS)
        .arg("--format")
        .arg("csv")
        .arg("--error-policy")
        .arg("reject-failed-rows")
        .env("ORDERBULK_CATALOG", common::CATALOG);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "index,status,id,number,total_gross,currency,errors",
        ))
        .stdout(predicate::str::contains(",1,34.6,PLN,"))
        .stdout(predicate::str::contains(",2,10,PLN,"))
        .stdout(predicate::str::contains(
            "2,rejected,,,,,lines.0.variantSku: ProductVariant instance with sku=MISSING doesn't exist. (NOT_FOUND)",
        ));
}

#[test]
fn test_cli_missing_catalog() {
    let mut cmd = Command::new(cargo_bin!("orderbulk"));
    cmd.arg(common::ORDERS).env_remove("ORDERBULK_CATALOG");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--catalog"));
}
