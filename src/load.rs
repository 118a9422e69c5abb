//! Loading task-sets from text.
//!
//! Each non-empty line describes one task as comma-separated fields:
//!
//! ```text
//! name,computation time,period[,deadline]
//! ```
//!
//! The deadline defaults to the period. Lines starting with `#` are comments.
//! Any malformed line aborts loading; no field is ever defaulted to zero.

use crate::{
    task::{Task, Time},
    error::Error
};

use std::{
    collections::HashSet,
    fs,
    path::Path
};

fn field<'a>(fields: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<&'a str, String> {
    match fields.next() {
        Some("") | None => Err(format!("missing {what}")),
        Some(value) => Ok(value)
    }
}

fn number(value: &str, what: &str) -> Result<Time, String> {
    value.parse()
         .map_err(|e| format!("invalid {what} `{value}`: {e}"))
}

fn parse_line(line: &str) -> Result<Task, String> {
    let mut fields = line.split(',').map(str::trim);

    let name = field(&mut fields, "name")?;
    let cost = number(field(&mut fields, "computation time")?, "computation time")?;
    let period = number(field(&mut fields, "period")?, "period")?;

    let mut task = Task::new(name, cost, period);

    if let Some(deadline) = fields.next() {
        task = task.with_deadline(number(deadline, "deadline")?);
    }

    if fields.next().is_some() {
        return Err("too many fields".into());
    }

    Ok(task)
}

/// Parses a task-set from its textual description `src`.
///
/// Tasks are returned in the order they appear, which is also their priority
/// order for analyses that take one.
///
/// # Errors
///
/// Returns [`Error::Parse`] for the first line that is malformed, describes
/// an invalid task (see [`Task::check`]) or repeats an earlier task name.
pub fn parse(src: &str) -> Result<Box<[Task]>, Error> {
    let mut names = HashSet::new();
    let mut tasks = Vec::new();

    for (i, line) in src.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fail = |reason| Error::Parse { line: i + 1, reason };

        let task = parse_line(line).map_err(fail)?;
        task.check().map_err(|e| fail(e.to_string()))?;

        if !names.insert(task.name.clone()) {
            return Err(fail(format!("duplicate task `{}`", task.name)));
        }

        tasks.push(task);
    }

    tracing::debug!(tasks = tasks.len(), "task-set loaded");

    Ok(tasks.into_boxed_slice())
}

/// Reads and parses the task-set stored in the file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any error of [`parse`].
pub fn read(path: impl AsRef<Path>) -> Result<Box<[Task]>, Error> {
    parse(&fs::read_to_string(path)?)
}
