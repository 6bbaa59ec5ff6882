use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("taquilla")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("events"))
        .stdout(predicate::str::contains("orders"))
        .stdout(predicate::str::contains("checkin"))
        .stdout(predicate::str::contains("admin"));
}

#[test]
fn test_events_help_shows_subcommands() {
    cargo_bin_cmd!("taquilla")
        .args(["events", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_admin_help_shows_subcommands() {
    cargo_bin_cmd!("taquilla")
        .args(["admin", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("events"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("attendees"));
}

#[test]
fn test_orders_buy_help_shows_flags() {
    cargo_bin_cmd!("taquilla")
        .args(["orders", "buy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--event"))
        .stdout(predicate::str::contains("--quantity"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("taquilla")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.0"));
}
