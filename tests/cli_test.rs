use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn afs_split_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("afs-split"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_input_prints_single_error_and_succeeds() {
    let temp_dir = TempDir::new().unwrap();

    afs_split_cmd(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::eq("Error: advanced-filter-search.js not found\n"))
        .stderr(predicate::str::is_empty());

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_partial_split_still_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("advanced-filter-search.js"),
        "const Utils = {\n  a: 1\n};\nconst StateManager = {\n  b: 2\n};\n",
    )
    .unwrap();

    afs_split_cmd(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "Module splitting tool\n{}\n",
            "=".repeat(50)
        )))
        .stdout(predicate::str::contains("✓ afs-utils.js: "))
        .stdout(predicate::str::contains("✓ afs-state.js: "))
        .stdout(predicate::str::contains("✗ afs-url.js: Section not found\n"));

    assert!(temp_dir.path().join("afs-utils.js").exists());
    assert!(!temp_dir.path().join("afs-url.js").exists());
}

#[test]
fn test_pattern_strategy_flag_splits_all_blocks() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("advanced-filter-search.js"),
        "const Utils = {\n  a: 1\n};\nconst StateManager = {\n  b: 2\n};\nconst URLManager = {\n  c: 3\n};\n",
    )
    .unwrap();

    afs_split_cmd(temp_dir.path())
        .args(["--strategy", "pattern"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ afs-utils.js: "))
        .stdout(predicate::str::contains("✓ afs-state.js: "))
        .stdout(predicate::str::contains("✓ afs-url.js: "))
        .stdout(predicate::str::contains("Section not found").not());

    let state = fs::read_to_string(temp_dir.path().join("afs-state.js")).unwrap();
    assert!(state.contains("const StateManager = {\n  b: 2\n};"));
    assert!(!state.contains("const Utils"));
}

#[test]
fn test_toml_sections_replace_builtin_list() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("bundle.js"),
        "var Logger = {\n  log() {}\n};\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("split.toml"),
        "[split]\ninput = \"bundle.js\"\n\n[[sections]]\nname = \"Logger\"\nstart = 'var Logger = \\{'\nfile = \"afs-logger.js\"\n",
    )
    .unwrap();

    afs_split_cmd(temp_dir.path())
        .args(["--config", "split.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Input file: bundle.js\n"))
        .stdout(predicate::str::contains("✓ afs-logger.js: "))
        .stdout(predicate::str::contains("afs-utils.js").not());

    let module = fs::read_to_string(temp_dir.path().join("afs-logger.js")).unwrap();
    assert!(module.contains("window.AFS.Logger = Logger;"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();

    afs_split_cmd(temp_dir.path())
        .args(["--size-limit-kb", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("size_limit_kb"));
}
