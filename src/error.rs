//! The crate error type.

use crate::task::Time;

use std::io;

/// Errors produced while loading or analyzing a task-set.
///
/// Deadline misses and failed response-time or priority searches are _not_
/// errors; they are regular results of the respective analyses.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A task violates one of the invariants of the task model.
    #[error("invalid task `{name}`: {reason}")]
    InvalidTask {
        name: String,
        reason: &'static str
    },

    /// A line of a task-set description could not be turned into a task.
    #[error("line {line}: {reason}")]
    Parse {
        line: usize,
        reason: String
    },

    /// The task-set description could not be read.
    #[error("could not read task-set: {0}")]
    Io(#[from] io::Error),

    /// An analysis that needs at least one task was given none.
    #[error("task-set is empty")]
    EmptyTaskSet,

    /// The least common multiple of all periods does not fit in a [`Time`].
    #[error("hyperperiod overflows after including period {period}")]
    HyperperiodOverflow {
        period: Time
    }
}
