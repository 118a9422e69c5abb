//! Response-time analysis for fixed-priority scheduling.
//!
//! The worst-case response time of a task is the least fixed point of
//!
//! ```text
//! R = C_k + Σ_{j < k} ⌈R / P_j⌉ · C_j
//! ```
//!
//! over the tasks of higher priority. Iteration starts from `C_k` and is
//! abandoned as soon as `R` exceeds the task's deadline, so it terminates
//! even for overloaded task-sets.

use crate::task::{Task, Time};

use tracing::trace;

use std::{
    borrow::Borrow,
    iter
};

/// Result of the response-time analysis of a single task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Response {
    /// The converged response time, or the first bound found to exceed the
    /// deadline.
    pub time: Time,
    /// Whether the response time is within the task's deadline.
    pub schedulable: bool
}

/// Returns the successive approximations of the response time of the task
/// at index `k` of `ordered`, which is sorted by decreasing priority.
///
/// The first item is the task's cost. The sequence is non-decreasing; it ends
/// either at the fixed point or at the first value exceeding the deadline.
///
/// # Panics
///
/// Panics if `k` is out of bounds for `ordered`.
pub fn iterations<'a, T: Borrow<Task>>(ordered: &'a [T], k: usize) -> impl Iterator<Item = Time> + 'a {
    let task = ordered[k].borrow();
    let higher = &ordered[.. k];

    iter::successors(Some(task.cost), move |&r| {
        if r > task.deadline {
            return None;
        }

        let next = higher.iter()
                         .map(Borrow::<Task>::borrow)
                         .fold(task.cost, |acc, hp| {
            acc.saturating_add(r.div_ceil(hp.period).saturating_mul(hp.cost))
        });

        (next != r).then_some(next)
    })
}

/// Computes the worst-case response time of the task at index `k` of
/// `ordered`, which is sorted by decreasing priority.
///
/// # Panics
///
/// Panics if `k` is out of bounds for `ordered`.
pub fn response_time<T: Borrow<Task>>(ordered: &[T], k: usize) -> Response {
    let task = ordered[k].borrow();

    let time = iterations(ordered, k)
        .inspect(|r| trace!(task = %task.name, r, "response-time iteration"))
        .last()
        .unwrap_or(task.cost);

    Response { time, schedulable: time <= task.deadline }
}

/// Computes the worst-case response time of every task of `ordered`, which
/// is sorted by decreasing priority.
///
/// The results are returned in the same order.
pub fn analyze_all<T: Borrow<Task>>(ordered: &[T]) -> Box<[Response]> {
    (0 .. ordered.len()).map(|k| response_time(ordered, k))
                        .collect()
}
