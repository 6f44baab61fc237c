//! `jobby tick` specs

use crate::prelude::*;

#[test]
fn foreground_tick_runs_due_jobs() {
    let project = Project::empty();
    project.file(
        "jobs.toml",
        &format!(
            r#"
[defaults]
output = "{out}"

[jobs.backup]
schedule = "* * * * *"
command = "echo backup ran"

[jobs.paused]
schedule = "* * * * *"
command = "echo paused ran"
enabled = false
"#,
            out = project.abs("out.log"),
        ),
    );

    project
        .jobby()
        .args(&["tick", "--foreground", "-c", &project.abs("jobs.toml")])
        .passes();

    assert_eq!(project.read("out.log"), "backup ran\n");
}

#[test]
fn halted_job_does_not_run() {
    let project = Project::empty();
    project.file("halt/backup", "");
    project.file(
        "jobs.toml",
        &format!(
            r#"
[jobs.backup]
schedule = "* * * * *"
command = "touch {marker}"
halt_dir = "{halt}"
"#,
            marker = project.abs("ran"),
            halt = project.abs("halt"),
        ),
    );

    project
        .jobby()
        .args(&["tick", "--foreground", "-c", &project.abs("jobs.toml")])
        .passes();

    assert!(!project.exists("ran"));
}

#[test]
fn application_env_prefixes_the_lock_file() {
    let project = Project::empty();
    project.file(
        "jobs.toml",
        r#"
[jobs.backup]
schedule = "* * * * *"
command = "true"
"#,
    );

    project
        .jobby()
        .env("APPLICATION_ENV", "staging")
        .args(&["tick", "--foreground", "-c", &project.abs("jobs.toml")])
        .passes();

    assert!(project.exists("locks/staging-backup.lck"));
}

#[test]
fn detached_tick_hands_jobs_to_background_processes() {
    let project = Project::empty();
    project.file(
        "jobs.toml",
        &format!(
            r#"
[dispatcher]
debug_log = "{debug}"

[jobs.first]
schedule = "* * * * *"
command = "touch {first}"

[jobs.second]
schedule = "* * * * *"
command = "touch {second}"
"#,
            debug = project.abs("dispatch.log"),
            first = project.abs("first.done"),
            second = project.abs("second.done"),
        ),
    );

    project
        .jobby()
        .args(&["tick", "-c", &project.abs("jobs.toml")])
        .passes();

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || {
            project.exists("first.done") && project.exists("second.done")
        }),
        "detached jobs did not run\ndispatch log: {}",
        project.read("dispatch.log")
    );
}
