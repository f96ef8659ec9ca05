//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("paramstore-config"));
    cmd.current_dir(dir)
        .env_remove("PARAMSTORE_ENVIRONMENT")
        .env_remove("PARAMSTORE_SERVICE")
        .env_remove("PARAMSTORE_STORE_PATH")
        .env_remove("PARAMSTORE_PAGE_SIZE")
        .env_remove("PARAMSTORE_LOCAL_OVERRIDE")
        .env_remove("PARAMSTORE_LOCAL_USER")
        .env_remove("PARAMSTORE_LOCAL_PLACEMENT")
        .env_remove("CONFIG_USER");
    cmd
}

fn stored(store: &Path) -> Value {
    let content = fs::read_to_string(store).expect("read store");
    serde_json::from_str(&content).expect("store json")
}

#[test]
fn test_cli_version() {
    let tmp = TempDir::new().expect("tmp");
    cmd(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("paramstore-config"));
}

#[test]
fn test_cli_help() {
    let tmp = TempDir::new().expect("tmp");
    cmd(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hierarchical service configuration"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("get"));
}

#[test]
fn test_import_requires_file() {
    let tmp = TempDir::new().expect("tmp");
    cmd(tmp.path())
        .args(["import", "--env", "dev", "--service", "profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing parameter --file"))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_import_requires_env_and_service() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("config.json"), "{}").expect("write json");

    cmd(tmp.path())
        .args(["import", "--file", "config.json", "--service", "profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing parameter --env"));

    cmd(tmp.path())
        .args(["import", "--file", "config.json", "--env", "dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing parameter --service"));
}

#[test]
fn test_import_reports_missing_file() {
    let tmp = TempDir::new().expect("tmp");
    cmd(tmp.path())
        .args(["import", "--file", "absent.json", "--env", "dev", "--service", "profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Given file does not exist: absent.json"));
}

#[test]
fn test_import_writes_parameters_under_service_prefix() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("config.json"),
        r#"{"foo":"bar","empty":"","int":1234567890,"bool":true,"skip":null}"#,
    )
    .expect("write json");

    cmd(tmp.path())
        .args(["import", "-f", "config.json", "-e", "dev", "-s", "profile", "--store", "store.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Json from config.json successfully loaded"));

    let doc = stored(&tmp.path().join("store.json"));
    let params = &doc["parameters"];
    assert_eq!(params["/dev/profile/foo"]["value"], "bar");
    assert_eq!(params["/dev/profile/empty"]["value"], " ");
    assert_eq!(params["/dev/profile/int"]["value"], "1234567890");
    assert_eq!(params["/dev/profile/bool"]["value"], "true");
    assert_eq!(params["/dev/profile/foo"]["kind"], "SecureString");
    assert!(params.get("/dev/profile/skip").is_none());
}

#[test]
fn test_import_rejects_invalid_json() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("config.json"), "[1, 2, 3]").expect("write json");

    cmd(tmp.path())
        .args(["import", "--file", "config.json", "--env", "dev", "--service", "profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error importing data"))
        .stderr(predicate::str::contains("Unable to parse json data"));
}

#[test]
fn test_show_merges_global_and_service_tiers() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("store.json"),
        r#"{"parameters":{
            "/dev/global/a":{"value":"1"},
            "/dev/global/b":{"value":"2"},
            "/dev/profile/b":{"value":"3"},
            "/dev/profile/c":{"value":" 4 "},
            "/prod/profile/c":{"value":"other"}
        }}"#,
    )
    .expect("write store");

    cmd(tmp.path())
        .args(["show", "--env", "dev", "--service", "profile", "--store", "store.json"])
        .args(["--page-size", "1"])
        .assert()
        .success()
        .stdout("a=1\nb=3\nc=4\n");
}

#[test]
fn test_show_json_output() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("store.json"),
        r#"{"parameters":{"/dev/profile/foo":{"value":"bar"}}}"#,
    )
    .expect("write store");

    let output = cmd(tmp.path())
        .args(["show", "--json", "--env", "dev", "--service", "profile", "--store", "store.json"])
        .output()
        .expect("run show");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value["foo"], "bar");
}

#[test]
fn test_import_then_get_recovers_empty_string() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("config.json"), r#"{"e":"","foo":"bar"}"#).expect("write json");

    cmd(tmp.path())
        .args(["import", "--file", "config.json", "--env", "dev", "--service", "profile"])
        .assert()
        .success();

    cmd(tmp.path())
        .args(["get", "e", "--env", "dev", "--service", "profile"])
        .assert()
        .success()
        .stdout("\n");

    cmd(tmp.path())
        .args(["get", "foo", "--env", "dev", "--service", "profile"])
        .assert()
        .success()
        .stdout("bar\n");
}

#[test]
fn test_get_missing_key_fails() {
    let tmp = TempDir::new().expect("tmp");
    cmd(tmp.path())
        .args(["get", "nope", "--env", "dev", "--service", "profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[profile] Could not find value for key: nope"));
}

#[test]
fn test_settings_file_supplies_identity_and_local_tier() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("paramstore.toml"),
        "environment = \"dev\"\nservice = \"profile\"\nstore_path = \"params.json\"\n\
         local_override = \"fixed\"\nlocal_user = \"ana\"\nlocal_placement = \"above-service\"\n",
    )
    .expect("write settings");
    fs::write(
        tmp.path().join("params.json"),
        r#"{"parameters":{
            "/dev/profile/db":{"value":"shared-db"},
            "/local/ana/db":{"value":"my-db"}
        }}"#,
    )
    .expect("write store");

    cmd(tmp.path()).args(["get", "db"]).assert().success().stdout("my-db\n");
}
