//! CLI help output specs

use crate::prelude::*;

#[test]
fn jobby_no_args_shows_usage_and_fails() {
    cli().fails().code(2).stderr_has("Usage:");
}

#[test]
fn jobby_help_lists_public_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("tick")
        .stdout_has("check")
        .stdout_lacks("run-job");
}

#[test]
fn jobby_tick_help_shows_flags() {
    cli()
        .args(&["tick", "--help"])
        .passes()
        .stdout_has("--config")
        .stdout_has("--foreground");
}

#[test]
fn jobby_version_prints_version() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_has(env!("CARGO_PKG_VERSION"));
}
