//! End-to-end scans with stub package managers.

use crate::common::TestProject;
use predicates::prelude::*;

#[test]
fn test_scan_runs_one_install_per_directory() {
    let project = TestProject::new().unwrap();
    project.stubs.add("go", 0).unwrap();
    project.stubs.add("npm", 0).unwrap();
    project.tree.file("a/go.mod").unwrap();
    project.tree.file("b/package.json").unwrap();

    let output = project.run_autodeps(&["--scan"]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("Found go.mod in")
        .assert_stdout_contains("Found package.json in")
        .assert_stdout_contains("Installed (2)")
        .assert_stdout_contains("No errors encountered.");

    let calls = project.invocations();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].dir, project.path("a"));
    assert_eq!(calls[0].command, "go mod download");
    assert_eq!(calls[1].dir, project.path("b"));
    assert_eq!(calls[1].command, "npm install");
}

#[test]
fn test_first_manifest_wins_within_a_directory() {
    let project = TestProject::new().unwrap();
    project.stubs.add("go", 0).unwrap();
    project.stubs.add("npm", 0).unwrap();
    project.tree.file("svc/go.mod").unwrap();
    project.tree.file("svc/package.json").unwrap();

    project.run_autodeps(&["--scan"]).unwrap().assert_success();

    let calls = project.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command, "go mod download");
}

#[test]
fn test_only_restricts_dispatch() {
    let project = TestProject::new().unwrap();
    project.stubs.add("go", 0).unwrap();
    project.stubs.add("npm", 0).unwrap();
    project.tree.file("svc/go.mod").unwrap();
    project.tree.file("svc/package.json").unwrap();
    project.tree.file("web/package.json").unwrap();

    project
        .run_autodeps(&["--scan", "--only=npm"])
        .unwrap()
        .assert_success()
        .assert_stdout_not_contains("Found go.mod");

    let calls = project.invocations();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|call| call.command == "npm install"));
    assert_eq!(calls[0].dir, project.path("svc"));
    assert_eq!(calls[1].dir, project.path("web"));
}

#[test]
fn test_dry_run_spawns_nothing() {
    let project = TestProject::new().unwrap();
    project.stubs.add("go", 0).unwrap();
    project.stubs.add("python3", 0).unwrap();
    project.tree.file("a/go.mod").unwrap();
    project.tree.file("py/requirements.txt").unwrap();

    project
        .command()
        .args(["--scan", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry-run: go mod download"))
        .stdout(predicate::str::contains("Dry-run: python3 -m venv .venv"))
        .stdout(predicate::str::contains("Skipped (dry-run) (3)"))
        .stdout(predicate::str::contains("No errors encountered."));

    assert!(project.invocations().is_empty());
    assert!(!project.path("py/.venv").exists());
}

#[test]
fn test_verbose_prints_resolved_path() {
    let project = TestProject::new().unwrap();
    let go = project.stubs.add("go", 0).unwrap();
    project.tree.file("a/go.mod").unwrap();

    project
        .command()
        .args(["--scan", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Executing: {} mod download", go.display())));
}

#[test]
fn test_missing_package_manager_is_reported_and_scan_continues() {
    let project = TestProject::new().unwrap();
    project.stubs.add("yarn", 0).unwrap();
    project.tree.file("a/pnpm-lock.yaml").unwrap();
    project.tree.file("b/yarn.lock").unwrap();

    project
        .command()
        .arg("--scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("command not found: pnpm"))
        .stdout(predicate::str::contains("Installed (1)"))
        .stdout(predicate::str::contains("Failed (1)"));

    let calls = project.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command, "yarn install");
}

#[test]
fn test_failing_install_does_not_change_exit_status() {
    let project = TestProject::new().unwrap();
    project.stubs.add("conda", 1).unwrap();
    project.tree.file("env/environment.yml").unwrap();

    project
        .command()
        .arg("--scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error running Conda"))
        .stdout(predicate::str::contains("Failed (1)"));

    assert_eq!(project.invocations()[0].command, "conda env update --file environment.yml");
}

#[test]
fn test_python_directory_gets_virtual_environment() {
    let project = TestProject::new().unwrap();
    project.stubs.add_venv_creator("python3").unwrap();
    project.stubs.add("pip", 0).unwrap();
    project.tree.file("api/requirements.txt").unwrap();

    project.run_autodeps(&["--scan"]).unwrap().assert_success();

    let calls = project.invocations();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].command, "python3 -m venv .venv");
    assert_eq!(calls[0].dir, project.path("api"));
    assert_eq!(calls[1].command, "pip install -r requirements.txt");
    assert_eq!(calls[1].dir, project.path("api"));
    assert!(project.path("api/.venv/bin/activate").is_file());
}

#[test]
fn test_existing_virtual_environment_is_reused() {
    let project = TestProject::new().unwrap();
    project.stubs.add("python3", 0).unwrap();
    project.stubs.add("pip", 0).unwrap();
    project.tree.file("api/requirements.txt").unwrap();
    project.tree.file("api/.venv/bin/activate").unwrap();

    project.run_autodeps(&["--scan"]).unwrap().assert_success();

    let calls = project.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command, "pip install -r requirements.txt");
}

#[test]
fn test_missing_pip_is_reported_as_not_found() {
    let project = TestProject::new().unwrap();
    project.tree.file("api/requirements.txt").unwrap();
    project.tree.file("api/.venv/bin/activate").unwrap();

    project
        .command()
        .arg("--scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("command not found: pip"))
        .stdout(predicate::str::contains("Failed (1)"));

    assert!(project.invocations().is_empty());
}

#[test]
fn test_no_manifests_found() {
    let project = TestProject::new().unwrap();
    project.tree.file("README.md").unwrap();

    project
        .run_autodeps(&["--scan"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("No matching project files found.")
        .assert_stdout_contains("No errors encountered.");
}
