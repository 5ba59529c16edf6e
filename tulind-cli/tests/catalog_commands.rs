use std::io::Write;

use anyhow::Result;
use assert_cmd::Command;

fn tulind() -> Result<Command> {
    let mut cmd = Command::cargo_bin("tulind")?;
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn start_prints_first_output_index() -> Result<()> {
    let output = tulind()?.args(["start", "sma", "5"]).output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "4\n");
    Ok(())
}

#[test]
fn list_covers_the_full_catalog() -> Result<()> {
    let output = tulind()?.arg("list").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.lines().count(), 104);
    assert!(stdout.lines().any(|line| line.starts_with("bbands")));
    Ok(())
}

#[test]
fn json_info_uses_engine_field_names() -> Result<()> {
    let output = tulind()?
        .args(["--format", "json", "info", "stoch"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["name"], "stoch");
    assert_eq!(value["type"], "indicator");
    assert_eq!(value["inputs"], 3);
    assert_eq!(value["options"], 3);
    assert_eq!(value["outputs"], 2);
    Ok(())
}

#[test]
fn unknown_indicator_exits_with_failure() -> Result<()> {
    let output = tulind()?.args(["info", "notreal"]).output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("notreal"));
    Ok(())
}

#[test]
fn wrong_option_count_exits_with_failure() -> Result<()> {
    let output = tulind()?.args(["start", "sma", "5", "6"]).output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("expects 1 options, got 2"));
    Ok(())
}

#[test]
fn config_file_selects_output_format() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[output]\nformat = \"json\"")?;
    let output = tulind()?
        .arg("--config")
        .arg(file.path())
        .args(["start", "rsi", "14"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["indicator"], "rsi");
    assert_eq!(value["start"], 14);
    Ok(())
}
