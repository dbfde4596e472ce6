//! Integration tests for the validobj binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

fn validobj() -> Command {
    let mut cmd = Command::cargo_bin("validobj").unwrap();
    cmd.env_remove("VALIDOBJ_ROOT").env_remove("RUST_LOG");
    cmd
}

const ORDER_SCHEMA: &str = r#"{
    "name": ["required", "isString"],
    "items": [{"sku": "isNumber", "quantity": "isNumber"}]
}"#;

#[test]
fn valid_document_exits_zero() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "order.json", ORDER_SCHEMA);
    let doc = write(&dir, "doc.json", r#"{"name": "john", "items": [{"sku": 1, "quantity": 2}]}"#);

    validobj()
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn invalid_document_lists_messages() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "order.json", ORDER_SCHEMA);
    let doc = write(&dir, "doc.json", r#"{"items": [{"sku": "123", "quantity": 2}]}"#);

    validobj()
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("it.name is required"))
        .stdout(predicate::str::contains("it.items[0].sku is not number"));
}

#[test]
fn reads_stdin_and_honours_root() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "age.json", r#"{"age": "isNumber"}"#);

    validobj()
        .args(["check", "--schema", &schema, "--root", "person", "--format", "json"])
        .write_stdin(r#"{"age": "27"}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("person.age is not number"))
        .stdout(predicate::str::contains("\"valid\": false"));
}

#[test]
fn malformed_schema_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "bad.json", r#"{"tags": [["isString"], ["isNumber"]]}"#);
    let doc = write(&dir, "doc.json", r#"{"tags": []}"#);

    validobj()
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("one and only one validation expression"));
}

#[test]
fn unconfigured_parameterized_check_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "color.json", r#"{"color": "isIn"}"#);
    let doc = write(&dir, "doc.json", r#"{"color": "red"}"#);

    validobj()
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("isIn has to have parameters"));
}

#[test]
fn list_shows_builtins() {
    validobj()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isCreditCard\""))
        .stdout(predicate::str::contains("isIn(['option1', 'option2'])"));
}
