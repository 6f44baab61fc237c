//! `jobby check` specs

use crate::prelude::*;

#[test]
fn check_lists_every_job() {
    let project = Project::with_jobs(
        r#"
[jobs.backup]
schedule = "* * * * *"
command = "backup.sh"

[jobs.paused]
schedule = "0 3 * * *"
command = "cleanup.sh"
enabled = false
"#,
    );
    project
        .jobby()
        .args(&["check", "-c", &project.abs("jobs.toml")])
        .passes()
        .stdout_has("NAME    SCHEDULE   STATUS    COMMAND\n")
        .stdout_has("backup  * * * * *  due       backup.sh\n")
        .stdout_has("paused  0 3 * * *  disabled  cleanup.sh\n");
}

#[test]
fn check_reports_invalid_jobs_and_exits_2() {
    let project = Project::with_jobs(
        r#"
[jobs.backup]
schedule = "* * * * *"
command = "backup.sh"

[jobs.broken]
schedule = "every tuesday"
command = "true"

[jobs.empty]
schedule = "* * * * *"
command = ""
"#,
    );
    project
        .jobby()
        .args(&["check", "-c", &project.abs("jobs.toml")])
        .fails()
        .code(2)
        .stdout_has("backup")
        .stdout_has("invalid job 'broken'")
        .stdout_has("invalid job 'empty'")
        .stderr_has("2 invalid job(s)");
}
