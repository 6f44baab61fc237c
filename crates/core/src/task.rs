// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process callable work units.

use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// What a callable returns: `Ok(Value::Bool(true))` is the only success.
pub type TaskResult = Result<Value, Box<dyn std::error::Error + Send + Sync>>;

type TaskFn = dyn Fn(&mut dyn Write) -> TaskResult + Send + Sync;

/// A callable job body.
///
/// The callable writes its standard output to the writer it is handed; the
/// executor owns that buffer for the duration of the call and flushes it to
/// the job's stdout capture file afterwards, panics included. Only that
/// writer is captured: `println!` and other writes to the process's own
/// standard output bypass the capture file.
#[derive(Clone)]
pub struct CallableTask {
    func: Arc<TaskFn>,
}

impl CallableTask {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&mut dyn Write) -> TaskResult + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    pub fn call(&self, out: &mut dyn Write) -> TaskResult {
        (self.func)(out)
    }
}

impl fmt::Debug for CallableTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallableTask(..)")
    }
}

/// Whether a callable's return value is the success sentinel
pub fn is_success(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

/// Render a return value for a failure message. Strings are shown bare.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
