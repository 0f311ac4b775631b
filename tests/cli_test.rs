//! Integration tests for the extdoctor binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_extension(root: &Path, dir: &str, manifest: &str) {
    let path = root.join("extensions").join(dir);
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("package.json"), manifest).unwrap();
}

fn extdoctor(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("extdoctor"));
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--extensions-dir")
        .arg(temp.path().join("extensions"));
    cmd
}

const CLEAN: &str = r#"{
  "name": "clean",
  "publisher": "acme",
  "activationEvents": ["onCommand:clean.run"],
  "contributes": { "commands": [{ "command": "clean.run" }] }
}"#;

const LAZY: &str = r#"{
  "name": "lazy",
  "publisher": "acme",
  "contributes": {
    "commands": [{ "command": "lazy.run" }],
    "keybindings": [{ "key": "ctrl+shift+f1", "command": "lazy.run" }]
  }
}"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("extdoctor"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("suggest"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("extdoctor"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn analyze_clean_extensions() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write_extension(temp.path(), "clean", CLEAN);

    extdoctor(&temp)
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflicts found"));
    Ok(())
}

#[test]
fn analyze_fails_on_command_collision() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write_extension(temp.path(), "clean", CLEAN);
    write_extension(
        temp.path(),
        "copycat",
        &CLEAN.replace("\"name\": \"clean\"", "\"name\": \"copycat\""),
    );

    extdoctor(&temp)
        .arg("analyze")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("command clean.run"))
        .stdout(predicate::str::contains("1 error(s)"));
    Ok(())
}

#[test]
fn analyze_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write_extension(temp.path(), "lazy", LAZY);

    let output = extdoctor(&temp).args(["analyze", "--json"]).output()?;
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed[0]["code"], "missing-activation-event");
    assert_eq!(parsed[0]["type"], "registration");
    assert_eq!(parsed[0]["componentId"], "acme.lazy");
    Ok(())
}

#[test]
fn fix_dry_run_leaves_manifests_alone() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write_extension(temp.path(), "lazy", LAZY);

    extdoctor(&temp)
        .args(["fix", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would update"));

    let text = fs::read_to_string(temp.path().join("extensions/lazy/package.json"))?;
    assert_eq!(text, LAZY);
    Ok(())
}

#[test]
fn fix_writes_activation_events() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write_extension(temp.path(), "lazy", LAZY);

    extdoctor(&temp).arg("fix").assert().success();

    let text = fs::read_to_string(temp.path().join("extensions/lazy/package.json"))?;
    assert!(text.contains("onCommand:lazy.run"));

    extdoctor(&temp)
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflicts found"));
    Ok(())
}

#[test]
fn config_file_can_disable_auto_apply() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write_extension(temp.path(), "lazy", LAZY);
    fs::write(
        temp.path().join(".extdoctor.yml"),
        "remediation:\n  auto_apply: false\n",
    )?;

    extdoctor(&temp).arg("fix").assert().success();

    let text = fs::read_to_string(temp.path().join("extensions/lazy/package.json"))?;
    assert_eq!(text, LAZY);
    Ok(())
}

#[test]
fn remediate_prints_fragment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write_extension(temp.path(), "lazy", LAZY);

    extdoctor(&temp)
        .args(["remediate", "lazy.run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"onCommand:lazy.run\""));

    let text = fs::read_to_string(temp.path().join("extensions/lazy/package.json"))?;
    assert_eq!(text, LAZY);
    Ok(())
}

#[test]
fn suggest_skips_declared_bindings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write_extension(temp.path(), "lazy", LAZY);

    let output = extdoctor(&temp)
        .args(["suggest", "ctrl+shift+k", "--json"])
        .output()?;
    assert!(output.status.success());

    let parsed: Vec<String> = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed.len(), 10);
    assert_eq!(parsed[0], "ctrl+shift+f2");
    Ok(())
}

#[test]
fn errors_reads_log_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::create_dir_all(temp.path().join("extensions"))?;
    let logs = temp.path().join("logs").join("git");
    fs::create_dir_all(&logs)?;
    fs::write(
        logs.join("1.log"),
        "[2024-01-01T00:00:00.000] [git] [error] push rejected\n  remote: denied\n",
    )?;

    extdoctor(&temp)
        .arg("--log-dir")
        .arg(temp.path().join("logs"))
        .arg("errors")
        .assert()
        .success()
        .stdout(predicate::str::contains("push rejected"))
        .stdout(predicate::str::contains("remote: denied"));
    Ok(())
}

#[test]
fn missing_extensions_dir_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("extdoctor"));
    cmd.current_dir(temp.path())
        .env_remove("EXTDOCTOR_EXTENSIONS_DIR")
        .arg("analyze");
    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("extensions directory"));
    Ok(())
}

#[test]
fn completions_generate() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("extdoctor"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("extdoctor"));
    Ok(())
}

#[test]
fn no_color_output_has_no_escape_codes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write_extension(temp.path(), "lazy", LAZY);

    let output = extdoctor(&temp).arg("analyze").output()?;
    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
    assert!(!output.stdout.contains(&0x1b));
    Ok(())
}
