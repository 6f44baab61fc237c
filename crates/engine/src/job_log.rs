// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Writer for a job's capture files.

use chrono::NaiveDateTime;
use jobby_core::{JobSettings, OutputPaths, TimestampFormat};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::Stdio;

/// Append-only access to one job's stdout and stderr capture files.
///
/// Lifecycle lines go to the stderr capture as
/// `[<timestamp>] [<job>] <message>`; raw output is appended verbatim.
/// Unset paths swallow everything. Write failures are reported through
/// tracing and never propagate: a broken log must not change a job's outcome.
pub struct JobLog<'a> {
    job: &'a str,
    format: &'a TimestampFormat,
    output: &'a OutputPaths,
}

impl<'a> JobLog<'a> {
    pub fn new(job: &'a str, settings: &'a JobSettings) -> Self {
        Self {
            job,
            format: &settings.timestamp_format,
            output: &settings.output,
        }
    }

    /// Append a lifecycle line stamped with `at`
    pub fn line(&self, at: NaiveDateTime, message: &str) {
        let line = format!("[{}] [{}] {}\n", self.format.render(at), self.job, message);
        self.append_stderr(line.as_bytes());
    }

    pub fn append_stdout(&self, bytes: &[u8]) {
        self.append(self.output.stdout.as_deref(), bytes);
    }

    pub fn append_stderr(&self, bytes: &[u8]) {
        self.append(self.output.stderr.as_deref(), bytes);
    }

    /// Handles for a subprocess's stdout and stderr.
    ///
    /// Both streams share one append handle when they point at the same file.
    pub fn capture_stdio(&self) -> std::io::Result<(Stdio, Stdio)> {
        match (self.output.stdout.as_deref(), self.output.stderr.as_deref()) {
            (Some(out), Some(err)) if out == err => {
                let file = open_append(out)?;
                Ok((Stdio::from(file.try_clone()?), Stdio::from(file)))
            }
            (out, err) => Ok((capture(out)?, capture(err)?)),
        }
    }

    /// Delete the stdout capture if the run left it empty (or holding `[]`).
    pub fn remove_if_empty(&self) {
        let Some(path) = self.output.stdout.as_deref() else {
            return;
        };
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return,
            Err(e) => {
                tracing::warn!(job = self.job, path = %path.display(), error = %e, "failed to inspect job output");
                return;
            }
        };
        if !(content.is_empty() || content == b"[]") {
            return;
        }
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!(job = self.job, path = %path.display(), "removed empty job output"),
            Err(e) => {
                tracing::warn!(job = self.job, path = %path.display(), error = %e, "failed to remove empty job output")
            }
        }
    }

    fn append(&self, path: Option<&Path>, bytes: &[u8]) {
        let Some(path) = path else {
            return;
        };
        let written = open_append(path).and_then(|mut file| file.write_all(bytes));
        if let Err(e) = written {
            tracing::warn!(job = self.job, path = %path.display(), error = %e, "failed to write job log");
        }
    }
}

fn capture(path: Option<&Path>) -> std::io::Result<Stdio> {
    match path {
        Some(path) => Ok(Stdio::from(open_append(path)?)),
        None => Ok(Stdio::null()),
    }
}

/// Open for appending, creating the file and its parent directories.
fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
#[path = "job_log_tests.rs"]
mod tests;
