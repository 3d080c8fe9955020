//! Integration test: run the `pwa-studio` binary and check exit codes and
//! output streams for each subcommand.

use std::path::Path;
use std::process::{Command, Output};

const PACKAGEABLE: &str = r##"{
    "name": "My App",
    "short_name": "App",
    "start_url": "/",
    "display": "standalone",
    "background_color": "#fff",
    "theme_color": "#fff",
    "icons": [{ "src": "a.png", "sizes": "512x512", "type": "image/png" }]
}"##;

fn studio(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pwa-studio"))
        .args(args)
        .output()
        .expect("run pwa-studio")
}

fn write(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn validate_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.json", PACKAGEABLE);
    let empty = write(dir.path(), "empty.json", "{}");
    let broken = write(dir.path(), "broken.json", "{ \"name\": ");

    assert_eq!(studio(&["validate", &good]).status.code(), Some(0));
    assert_eq!(studio(&["validate", &empty]).status.code(), Some(1));

    let output = studio(&["validate", &broken]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("manifest is not valid JSON"), "{stderr}");
}

#[test]
fn validate_json_output_is_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.json", PACKAGEABLE);

    let output = studio(&["validate", &good, "--format", "json"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["results"].as_array().unwrap().len(), 22);
    assert_eq!(report["score"]["required_fail_count"], 0);
}

#[test]
fn config_file_raises_gate() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.json", PACKAGEABLE);
    let config = write(dir.path(), "studio.yaml", "gate: recommended\n");

    assert_eq!(studio(&["--config", &config, "validate", &good]).status.code(), Some(1));
}

#[test]
fn fix_writes_installable_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write(dir.path(), "manifest.json", "{}");
    let out = dir.path().join("fixed.json").to_string_lossy().into_owned();

    assert_eq!(studio(&["fix", &empty, "--out", &out]).status.code(), Some(0));
    assert_eq!(studio(&["validate", &out]).status.code(), Some(0));
}

#[test]
fn field_and_rules() {
    assert_eq!(studio(&["field", "theme_color", "#abc"]).status.code(), Some(0));
    assert_eq!(studio(&["field", "theme_color", "#abcd"]).status.code(), Some(1));
    assert_eq!(studio(&["field", "short_name", "2048"]).status.code(), Some(0));

    let output = studio(&["rules"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Total: 22 rules"));
}
