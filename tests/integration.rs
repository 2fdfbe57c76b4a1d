// Integration testing can be done either by calling library functions directly or by invoking your CLI as a subprocess.
use predicates::prelude::*;
use std::fs;

const DIRECTORIES: [&str; 9] = [
    "src/contracts",
    "src/components/ui",
    "src/components/web3",
    "src/context",
    "src/hooks",
    "src/styles",
    "src/utils",
    "public",
    "scripts",
];

fn dappinit() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("dappinit").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn empty_project_gets_full_layout() {
    let project = tempfile::tempdir().unwrap();

    dappinit()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "project structure created successfully",
        ));

    for dir in DIRECTORIES {
        assert!(project.path().join(dir).is_dir(), "{dir} missing");
    }
    assert!(!project.path().join(".env").exists());
    assert!(!project.path().join("tailwind.config.js").exists());
}

#[test]
fn env_template_is_copied_and_missing_tailwind_warns() {
    let project = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join(".env.example"),
        "NEXT_PUBLIC_CHAIN_ID=250\n",
    )
    .unwrap();

    dappinit()
        .current_dir(project.path())
        .assert()
        .success()
        .stderr(predicates::str::contains("tailwind.config.js"));

    assert_eq!(
        fs::read_to_string(project.path().join(".env")).unwrap(),
        "NEXT_PUBLIC_CHAIN_ID=250\n"
    );
    assert!(!project.path().join("tailwind.config.js").exists());
}

#[test]
fn running_twice_is_idempotent() {
    let project = tempfile::tempdir().unwrap();
    fs::write(project.path().join(".env.example"), "KEY=value\n").unwrap();

    dappinit().current_dir(project.path()).assert().success();
    dappinit().current_dir(project.path()).assert().success();

    for dir in DIRECTORIES {
        assert!(project.path().join(dir).is_dir());
    }
    assert_eq!(
        fs::read_to_string(project.path().join(".env")).unwrap(),
        "KEY=value\n"
    );
}

#[test]
fn stale_destination_is_overwritten() {
    let project = tempfile::tempdir().unwrap();
    fs::write(project.path().join(".env.example"), "FRESH=1\n").unwrap();
    fs::write(project.path().join(".env"), "STALE=1\n").unwrap();

    dappinit().current_dir(project.path()).assert().success();

    assert_eq!(
        fs::read_to_string(project.path().join(".env")).unwrap(),
        "FRESH=1\n"
    );
}

#[test]
fn tailwind_config_survives_being_its_own_template() {
    let project = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join("tailwind.config.js"),
        "module.exports = { content: [] }\n",
    )
    .unwrap();

    dappinit().current_dir(project.path()).assert().success();

    assert_eq!(
        fs::read_to_string(project.path().join("tailwind.config.js")).unwrap(),
        "module.exports = { content: [] }\n"
    );
}

#[test]
fn file_blocking_a_directory_fails() {
    let project = tempfile::tempdir().unwrap();
    fs::write(project.path().join("public"), "oops").unwrap();

    dappinit()
        .current_dir(project.path())
        .assert()
        .failure()
        .stdout(predicates::str::contains("created successfully").not())
        .stderr(predicates::str::contains("dappinit::filesystem_conflict"));

    assert_eq!(
        fs::read_to_string(project.path().join("public")).unwrap(),
        "oops"
    );
}

#[test]
fn root_flag_targets_another_directory() {
    let workspace = tempfile::tempdir().unwrap();
    let project = workspace.path().join("dapp");

    dappinit()
        .current_dir(workspace.path())
        .arg("--root")
        .arg("dapp")
        .assert()
        .success();

    assert!(project.join("src/components/web3").is_dir());
    assert!(!workspace.path().join("src").exists());
}

#[test]
fn manifest_replaces_built_in_layout() {
    let project = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join("dappinit.toml"),
        r#"
directories = ["app/abi"]

[files]
"foundry.example.toml" = "foundry.toml"
"#,
    )
    .unwrap();
    fs::write(project.path().join("foundry.example.toml"), "[profile.default]\n").unwrap();

    dappinit()
        .current_dir(project.path())
        .args(["--config", "dappinit.toml"])
        .assert()
        .success();

    assert!(project.path().join("app/abi").is_dir());
    assert!(!project.path().join("src").exists());
    assert_eq!(
        fs::read_to_string(project.path().join("foundry.toml")).unwrap(),
        "[profile.default]\n"
    );
}

#[test]
fn invalid_manifest_fails_before_touching_disk() {
    let project = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join("dappinit.toml"),
        r#"directories = ["../escape"]"#,
    )
    .unwrap();

    dappinit()
        .current_dir(project.path())
        .args(["--config", "dappinit.toml"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("dappinit::config::invalid_path"));

    assert!(!project.path().join("src").exists());
}

#[test]
fn dry_run_previews_without_writing() {
    let project = tempfile::tempdir().unwrap();
    fs::write(project.path().join(".env.example"), "A=1\n").unwrap();

    dappinit()
        .current_dir(project.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicates::str::contains("contracts (new)"))
        .stdout(predicates::str::contains(".env (copy from .env.example)"));

    assert!(!project.path().join("src").exists());
    assert!(!project.path().join(".env").exists());
}
