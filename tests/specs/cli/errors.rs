//! CLI error handling specs

use crate::prelude::*;

#[test]
fn tick_with_missing_job_file_fails() {
    let project = Project::empty();
    project
        .jobby()
        .args(&["tick", "-c", &project.abs("nope.toml")])
        .fails()
        .code(1)
        .stderr_has("Error: failed to read");
}

#[test]
fn tick_with_unparsable_job_file_fails() {
    let project = Project::with_jobs("[jobs.backup\n");
    project
        .jobby()
        .args(&["tick", "-c", &project.abs("jobs.toml")])
        .fails()
        .stderr_has("Error: failed to parse");
}

#[test]
fn job_file_is_taken_from_the_environment() {
    let project = Project::with_jobs(
        r#"
[jobs.backup]
schedule = "* * * * *"
command = "true"
"#,
    );
    project
        .jobby()
        .env("JOBBY_CONFIG", project.jobs_file())
        .args(&["check"])
        .passes()
        .stdout_has("backup");
}

#[test]
fn run_job_rejects_a_malformed_ticket() {
    let project = Project::empty();
    project
        .jobby()
        .args(&["run-job", "--ticket", "{not json"])
        .fails()
        .code(1)
        .stderr_has("invalid job ticket");
}
