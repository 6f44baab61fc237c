// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule evaluation.
//!
//! A schedule is an exact minute (`2026-05-01 03:00:00`), a classic 5-field
//! cron expression, or a predicate over the current instant. Evaluation is a
//! pure function of the schedule and `now`; everything matches at minute
//! granularity.

use chrono::{NaiveDateTime, TimeZone, Timelike, Utc};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Format of exact-instant schedules.
pub const EXACT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("malformed schedule '{expr}': {reason}")]
    Malformed { expr: String, reason: String },
}

impl ScheduleError {
    fn malformed(expr: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}

/// Predicate schedule: due whenever it returns `true` for the given instant
pub type SchedulePredicate = Arc<dyn Fn(NaiveDateTime) -> bool + Send + Sync>;

/// When a job is due
#[derive(Clone)]
pub enum ScheduleSpec {
    /// Due during exactly one minute
    At(NaiveDateTime),
    /// 5-field cron expression, parsed on evaluation
    Cron(String),
    Predicate(SchedulePredicate),
}

impl ScheduleSpec {
    /// Classify schedule text: an exact timestamp if it parses as one,
    /// otherwise a cron expression (validated separately).
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match NaiveDateTime::parse_from_str(text, EXACT_FORMAT) {
            Ok(at) => Self::At(at),
            Err(_) => Self::Cron(text.to_string()),
        }
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Check that a cron expression parses. Other schedules are always valid.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        match self {
            Self::Cron(expr) => CronMatcher::parse(expr).map(|_| ()),
            Self::At(_) | Self::Predicate(_) => Ok(()),
        }
    }
}

impl fmt::Debug for ScheduleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(at) => f.debug_tuple("At").field(at).finish(),
            Self::Cron(expr) => f.debug_tuple("Cron").field(expr).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl fmt::Display for ScheduleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(at) => write!(f, "{}", at.format(EXACT_FORMAT)),
            Self::Cron(expr) => f.write_str(expr),
            Self::Predicate(_) => f.write_str("<predicate>"),
        }
    }
}

impl FromStr for ScheduleSpec {
    type Err = ScheduleError;

    /// Parse and validate schedule text in one step.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let spec = Self::parse(text);
        spec.validate()?;
        Ok(spec)
    }
}

/// Whether `spec` is due at `now`.
///
/// A malformed cron expression is an error for this schedule only; callers
/// evaluating many jobs keep going with the rest.
pub fn is_due(spec: &ScheduleSpec, now: NaiveDateTime) -> Result<bool, ScheduleError> {
    match spec {
        ScheduleSpec::Predicate(predicate) => Ok(predicate(now)),
        ScheduleSpec::At(at) => Ok(truncate_to_minute(*at) == truncate_to_minute(now)),
        ScheduleSpec::Cron(expr) => Ok(CronMatcher::parse(expr)?.matches(now)),
    }
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

/// Classic cron expression evaluated with the `cron` crate.
///
/// The crate wants a seconds field and numbers weekdays from 1 (Sunday), so
/// expressions are rewritten: a `0` seconds field is prepended and the
/// day-of-week field is expanded into day names. When both day-of-month and
/// day-of-week are restricted, a day matches if either does.
struct CronMatcher {
    schedules: Vec<cron::Schedule>,
}

impl CronMatcher {
    fn parse(expr: &str) -> Result<Self, ScheduleError> {
        let expanded = expand_macro(expr.trim());
        let fields: Vec<&str> = expanded.split_whitespace().collect();
        let [minute, hour, dom, month, dow] = fields[..] else {
            return Err(ScheduleError::malformed(
                expr,
                format!("expected 5 fields, found {}", fields.len()),
            ));
        };

        let dow = day_of_week_names(dow).map_err(|reason| ScheduleError::malformed(expr, reason))?;
        let restricted = |field: &str| field != "*" && field != "?";

        let variants = if restricted(dom) && dow != "*" {
            vec![
                format!("0 {minute} {hour} {dom} {month} *"),
                format!("0 {minute} {hour} * {month} {dow}"),
            ]
        } else {
            vec![format!("0 {minute} {hour} {dom} {month} {dow}")]
        };

        let schedules = variants
            .iter()
            .map(|v| cron::Schedule::from_str(v))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ScheduleError::malformed(expr, e.to_string()))?;
        Ok(Self { schedules })
    }

    fn matches(&self, now: NaiveDateTime) -> bool {
        // Only the wall-clock fields matter, so the naive time is read as UTC.
        let at = Utc.from_utc_datetime(&truncate_to_minute(now));
        self.schedules.iter().any(|s| s.includes(at))
    }
}

fn expand_macro(expr: &str) -> &str {
    match expr.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => "0 0 1 1 *",
        "@monthly" => "0 0 1 * *",
        "@weekly" => "0 0 * * 0",
        "@daily" | "@midnight" => "0 0 * * *",
        "@hourly" => "0 * * * *",
        _ => expr,
    }
}

/// Rewrite a classic day-of-week field (0-7, names, ranges, steps) as a
/// comma-separated list of day names. `*` and `?` pass through as `*`.
fn day_of_week_names(field: &str) -> Result<String, String> {
    if field == "*" || field == "?" {
        return Ok("*".to_string());
    }

    let mut days = [false; 7];
    for part in field.split(',') {
        let (range, step) = match part.split_once('/') {
            Some((range, step)) => {
                let step: usize = step
                    .parse()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| format!("invalid day-of-week step '{step}'"))?;
                (range, step)
            }
            None => (part, 1),
        };

        let (start, end) = if range == "*" {
            (0, 6)
        } else if let Some((a, b)) = range.split_once('-') {
            (day_number(a)?, day_number(b)?)
        } else {
            let day = day_number(range)?;
            // `5/2` means "from 5 to the end of the week, every 2 days"
            if part.contains('/') {
                (day, 7)
            } else {
                (day, day)
            }
        };
        if start > end {
            return Err(format!("invalid day-of-week range '{range}'"));
        }

        for day in (start..=end).step_by(step) {
            days[day % 7] = true;
        }
    }

    let names: Vec<&str> = DAY_NAMES
        .iter()
        .zip(days)
        .filter_map(|(name, on)| on.then_some(*name))
        .collect();
    Ok(names.join(","))
}

/// Day number in 0..=7 (both 0 and 7 are Sunday), from a digit or a name
fn day_number(token: &str) -> Result<usize, String> {
    if let Ok(n) = token.parse::<usize>() {
        return if n <= 7 {
            Ok(n)
        } else {
            Err(format!("day-of-week '{token}' out of range"))
        };
    }
    let upper = token.to_ascii_uppercase();
    DAY_NAMES
        .iter()
        .position(|name| upper == *name)
        .ok_or_else(|| format!("unknown day-of-week '{token}'"))
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
