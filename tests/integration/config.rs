//! Configuration file handling.

use crate::common::TestProject;
use predicates::prelude::*;

#[test]
fn test_config_skip_dirs_are_not_descended() {
    let project = TestProject::new().unwrap();
    project.stubs.add("npm", 0).unwrap();
    project.tree.file("web/package.json").unwrap();
    project.tree.file("web/node_modules/left-pad/package.json").unwrap();
    project.write_config("skip_dirs = [\"node_modules\"]\n").unwrap();

    project.run_autodeps(&["--scan"]).unwrap().assert_success();

    let calls = project.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].dir, project.path("web"));
}

#[test]
fn test_config_only_is_overridden_by_flag() {
    let project = TestProject::new().unwrap();
    project.stubs.add("go", 0).unwrap();
    project.stubs.add("npm", 0).unwrap();
    project.tree.file("a/go.mod").unwrap();
    project.tree.file("b/package.json").unwrap();
    project.write_config("only = [\"go\"]\n").unwrap();

    project.run_autodeps(&["--scan"]).unwrap().assert_success();
    let calls = project.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command, "go mod download");

    project.run_autodeps(&["--scan", "--only", "npm"]).unwrap().assert_success();
    let calls = project.invocations();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].command, "npm install");
}

#[test]
fn test_config_venv_dir_and_python() {
    let project = TestProject::new().unwrap();
    project.stubs.add_venv_creator("python3.12").unwrap();
    project.stubs.add("pip", 0).unwrap();
    project.tree.file("api/requirements.txt").unwrap();
    project.write_config("venv_dir = \"env\"\npython = \"python3.12\"\n").unwrap();

    project.run_autodeps(&["--scan"]).unwrap().assert_success();

    let calls = project.invocations();
    assert_eq!(calls[0].command, "python3.12 -m venv env");
    assert_eq!(calls[1].command, "pip install -r requirements.txt");
    assert!(project.path("api/env/bin/activate").is_file());
}

#[test]
fn test_config_venv_dir_with_space() {
    let project = TestProject::new().unwrap();
    project.stubs.add("pip", 0).unwrap();
    project.tree.file("api/requirements.txt").unwrap();
    project.tree.file("api/my env/bin/activate").unwrap();
    project.write_config("venv_dir = \"my env\"\n").unwrap();

    project
        .run_autodeps(&["--scan"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("No errors encountered.");

    let calls = project.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command, "pip install -r requirements.txt");
    assert_eq!(calls[0].dir, project.path("api"));
}

#[test]
fn test_explicit_config_via_env() {
    let project = TestProject::new().unwrap();
    project.stubs.add("go", 0).unwrap();
    project.tree.file("a/go.mod").unwrap();
    let config = project.home().join("custom.toml");
    std::fs::write(&config, "only = [\"npm\"]\n").unwrap();

    project
        .command()
        .arg("--scan")
        .env("AUTODEPS_CONFIG", &config)
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching project files found."));

    assert!(project.invocations().is_empty());
}

#[test]
fn test_missing_explicit_config_fails() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["--scan", "--config", "does-not-exist.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist.toml"));
}

#[test]
fn test_malformed_config_fails() {
    let project = TestProject::new().unwrap();
    project.write_config("only = [\"go\"\n").unwrap();

    project
        .command()
        .arg("--scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid TOML"));
}
