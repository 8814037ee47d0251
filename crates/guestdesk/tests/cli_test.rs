#![allow(clippy::unwrap_used)]
// CLI surface smoke tests — no backend required.

use assert_cmd::Command;
use predicates::prelude::*;

fn guestdesk() -> Command {
    Command::cargo_bin("guestdesk").unwrap()
}

#[test]
fn help_lists_entity_commands() {
    guestdesk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("orders"))
        .stdout(predicate::str::contains("rooms"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("products"));
}

#[test]
fn orders_list_help_shows_filter_flags() {
    guestdesk()
        .args(["orders", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--search"))
        .stdout(predicate::str::contains("--status"))
        .stdout(predicate::str::contains("--range"))
        .stdout(predicate::str::contains("--page"));
}

#[test]
fn no_subcommand_is_a_usage_error() {
    guestdesk()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_range_value_is_rejected() {
    guestdesk()
        .args(["orders", "list", "--range", "fortnight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fortnight"));
}

#[test]
fn completions_generate_for_bash() {
    guestdesk()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("guestdesk"));
}
