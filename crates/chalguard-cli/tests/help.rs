use assert_cmd::Command;

/// Helper to get a Command for the chalguard binary.
#[allow(deprecated)]
fn chalguard_cmd() -> Command {
    Command::cargo_bin("chalguard").unwrap()
}

#[test]
fn help_works() {
    chalguard_cmd().arg("--help").assert().success();
}

#[test]
fn explain_known_identifier_succeeds() {
    chalguard_cmd()
        .args(["explain", "sops.envelope"])
        .assert()
        .success();
}

#[test]
fn explain_unknown_identifier_fails_with_listing() {
    use predicates::prelude::*;

    chalguard_cmd()
        .args(["explain", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Available check_ids:"));
}
