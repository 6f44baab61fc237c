//! `jobby run-job` specs: the process that executes one dispatched job

use crate::prelude::*;
use serde_json::json;

fn ticket(project: &Project, name: &str, command: &str, host: &str) -> String {
    json!({
        "name": name,
        "command": command,
        "settings": {
            "max_runtime_secs": null,
            "run_as": null,
            "host_affinity": host,
            "enabled": true,
            "halt_dir": null,
            "environment": null,
            "output": {
                "stdout": project.abs("out.log"),
                "stderr": project.abs("err.log"),
            },
            "timestamp_format": "%Y-%m-%d %H:%M:%S",
            "alerts": [],
        },
    })
    .to_string()
}

#[test]
fn successful_job_captures_output_and_releases_lock() {
    let project = Project::empty();
    let ticket = ticket(&project, "backup", "echo hello", &host_name());

    project
        .jobby()
        .args(&["run-job", "--ticket", &ticket])
        .passes();

    assert_eq!(project.read("out.log"), "hello\n");
    assert_eq!(project.read("locks/backup.lck"), "");
}

#[test]
fn failing_job_exits_1_and_logs_to_stderr_capture() {
    let project = Project::empty();
    let ticket = ticket(&project, "backup", "echo oops >&2; exit 3", &host_name());

    project
        .jobby()
        .args(&["run-job", "--ticket", &ticket])
        .fails()
        .code(1)
        .stderr_has("job 'backup' failure: Job exited with status '3'.");

    let captured = project.read("err.log");
    assert!(captured.starts_with("oops\n["), "captured: {captured}");
    assert!(
        captured.ends_with("] [backup] ERROR: Job exited with status '3'.\n"),
        "captured: {captured}"
    );
}

#[test]
fn job_for_another_host_is_skipped() {
    let project = Project::empty();
    let ticket = ticket(&project, "backup", "echo hello", "some-other-host.invalid");

    project
        .jobby()
        .args(&["run-job", "--ticket", &ticket])
        .passes();

    assert!(!project.exists("out.log"));
    assert!(!project.exists("locks/backup.lck"));
}

#[test]
fn overlapping_run_is_a_soft_failure() {
    let project = Project::empty();
    let slow = ticket(&project, "backup", "sleep 2", &host_name());
    let mut first = project
        .jobby()
        .args(&["run-job", "--ticket", &slow])
        .command()
        .spawn()
        .unwrap();
    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || !project.read("locks/backup.lck").is_empty()),
        "first run never took the lock"
    );

    let fast = ticket(&project, "backup", "echo second", &host_name());
    project
        .jobby()
        .args(&["run-job", "--ticket", &fast])
        .passes();
    first.wait().unwrap();

    let captured = project.read("err.log");
    assert!(
        captured.contains("] [backup] INFO: Job is still locked (Lockfile: "),
        "captured: {captured}"
    );
    assert!(!project.read("out.log").contains("second"));
}
