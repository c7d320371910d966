//! manyrepo バイナリのエンドツーエンドテスト

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::{workspace_with_manifest, SAMPLE_MANIFEST};

fn manyrepo() -> Command {
    let mut cmd = Command::cargo_bin("manyrepo").expect("binary should be built");
    cmd.env_remove("MANYREPO_MANIFEST").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_manifest_exits_with_status_one() {
    let dir = tempfile::TempDir::new().unwrap();

    manyrepo()
        .arg("--no-color")
        .arg("-C")
        .arg(dir.path())
        .arg("clone")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Starting to clone repositories."))
        .stderr(predicate::str::contains("No manifest file in"))
        .stderr(predicate::str::contains("manyrepo.yml"));
}

#[test]
fn test_clone_plans_every_repository() {
    let dir = workspace_with_manifest("manyrepo.yml", SAMPLE_MANIFEST);

    manyrepo()
        .current_dir(dir.path())
        .args(["--no-color", "clone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting to clone repositories."))
        .stdout(predicate::str::contains("https://github.com/example/frontend.git"))
        .stdout(predicate::str::contains("services/backend"))
        .stdout(predicate::str::contains("3 repositories planned"));
}

#[test]
fn test_manifest_from_environment() {
    let dir = workspace_with_manifest("team.yml", "repos:\n  - git: https://github.com/example/solo.git\n");

    manyrepo()
        .current_dir(dir.path())
        .env("MANYREPO_MANIFEST", "team.yml")
        .args(["--no-color", "clone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 repositories planned"));
}

#[test]
fn test_invalid_manifest_exits_with_status_one() {
    let dir = workspace_with_manifest("broken.yml", "repos: [ {git: \n");

    manyrepo()
        .current_dir(dir.path())
        .args(["--no-color", "clone", "--manifest", "broken.yml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse manifest"))
        .stderr(predicate::str::contains("line"));
}

#[test]
fn test_empty_manifest_exits_with_status_one() {
    let dir = workspace_with_manifest("manyrepo.yml", "");

    manyrepo()
        .current_dir(dir.path())
        .args(["--no-color", "clone"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is empty"))
        .stdout(predicate::str::contains("repositories planned").not());
}

#[test]
fn test_version_includes_build_metadata() {
    manyrepo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "manyrepo {}",
            env!("CARGO_PKG_VERSION")
        )));
}
