// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock identities: the deterministic key naming a job's lock file.

use std::fmt;

/// Reduce an arbitrary string to a file-name-safe token.
///
/// Lowercases ASCII, drops everything outside `[a-z0-9_. -]`, trims, turns
/// spaces into underscores and collapses runs of underscores. Distinct inputs
/// can map to the same token (`"Backup!"` and `"backup"`); that collision is
/// accepted rather than defended against.
pub fn sanitize(input: &str) -> String {
    let kept: String = input
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | ' ' | '-'))
        .collect();

    let mut out = String::with_capacity(kept.len());
    for c in kept.trim_matches(' ').chars() {
        let c = if c == ' ' { '_' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Key naming a job's lock file, derived from `(environment?, name)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LockIdentity(String);

impl LockIdentity {
    /// An empty or missing environment label does not prefix the identity.
    pub fn new(environment: Option<&str>, name: &str) -> Self {
        match environment.filter(|env| !env.is_empty()) {
            Some(env) => Self(format!("{}-{}", sanitize(env), sanitize(name))),
            None => Self(sanitize(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the backing lock file (`<identity>.lck`)
    pub fn file_name(&self) -> String {
        format!("{}.lck", self.0)
    }
}

impl fmt::Display for LockIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "lock_id_tests.rs"]
mod tests;
