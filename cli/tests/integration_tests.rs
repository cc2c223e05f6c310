use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn helpwrap(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_helpwrap"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("helpwrap binary must run")
}

fn workspace_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("cli crate lives inside the workspace")
        .to_path_buf()
}

fn help_fixture(name: &str) -> PathBuf {
    workspace_dir()
        .join("discovery")
        .join("tests")
        .join("fixtures")
        .join("docker")
        .join(name)
}

fn schema_fixture() -> PathBuf {
    workspace_dir()
        .join("codegen")
        .join("tests")
        .join("fixtures")
        .join("metadata.json")
}

#[test]
fn test_parse_file_prints_parsed_help() {
    let input = help_fixture("compose_up.txt");
    let output = helpwrap(&[
        "parse-file",
        "--command",
        "docker compose up",
        "--input",
        input.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["hasUsage"], true);
    assert_eq!(parsed["inlineArgs"]["[SERVICE...]"]["paramName"], "service");
    assert_eq!(parsed["args"]["--detach"]["paramName"], "detach");
    assert_eq!(parsed["args"]["--timeout"]["type"]["semantic"], "Int");
    assert_eq!(parsed["droppedContinuations"], 1);
}

#[test]
fn test_parse_file_missing_input_fails() {
    let output = helpwrap(&[
        "parse-file",
        "--command",
        "docker ps",
        "--input",
        "/nonexistent/help.txt",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: Failed to read"), "stderr: {stderr}");
}

#[test]
fn test_classes_writes_modules() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("docker");
    let schema = schema_fixture();

    let output = helpwrap(&[
        "classes",
        "--schema",
        schema.to_str().unwrap(),
        "--output-dir",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let root = fs::read_to_string(out.join("mod.rs")).unwrap();
    assert!(root.contains("pub struct Docker<'r, R: Runner> {"));
    assert!(root.contains("pub mod compose;"));
    let compose = fs::read_to_string(out.join("compose.rs")).unwrap();
    assert!(compose.contains("pub struct DockerCompose<'r, R: Runner> {"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Generated 2 files"));
}

#[test]
fn test_classes_uses_config_names() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("generated");
    let config = dir.path().join("helpwrap.yaml");
    fs::write(
        &config,
        format!(
            "binary: podman\nschema_path: {}\noutput_dir: {}\ngeneration:\n  runtime_path: crate::runtime\n",
            schema_fixture().display(),
            out.display()
        ),
    )
    .unwrap();

    let output = helpwrap(&["classes", "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let root = fs::read_to_string(out.join("mod.rs")).unwrap();
    assert!(root.contains("pub struct Podman<'r, R: Runner> {"));
    assert!(root.contains("use crate::runtime::{CommandLine, Runner};"));
    assert!(root.contains("CommandLine::new(\"podman\")"));
}

#[test]
fn test_classes_binary_flag_overrides_program() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("podman");
    let schema = schema_fixture();

    let output = helpwrap(&[
        "classes",
        "--binary",
        "podman",
        "--schema",
        schema.to_str().unwrap(),
        "--output-dir",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let root = fs::read_to_string(out.join("mod.rs")).unwrap();
    assert!(root.contains("CommandLine::new(\"podman\")"));
    assert!(root.contains("pub struct Podman<'r, R: Runner> {"));
    assert!(!root.contains("docker"), "{root}");
    let compose = fs::read_to_string(out.join("compose.rs")).unwrap();
    assert!(compose.contains("pub struct PodmanCompose<'r, R: Runner> {"));
}

#[test]
fn test_classes_rejects_invalid_schema() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("metadata.json");
    fs::write(&schema, "{\"args\": [], \"methods\": {\"bad name\": {\"description\": \"\"}}}").unwrap();

    let output = helpwrap(&[
        "classes",
        "--schema",
        schema.to_str().unwrap(),
        "--output-dir",
        dir.path().join("out").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_metadata_missing_binary_fails() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("metadata.json");

    let output = helpwrap(&[
        "metadata",
        "--binary",
        "/nonexistent/helpwrap-test-binary",
        "--output",
        schema.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: "), "stderr: {stderr}");
    assert!(!schema.exists());
}

#[test]
fn test_bad_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("helpwrap.yaml");
    fs::write(&config, "extraction: [not, a, map]\n").unwrap();

    let output = helpwrap(&["metadata", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: Failed to load config"));
}
