//! Discrete-time simulation of uniprocessor schedulers.
//!
//! A single loop advances time one unit at a time over one hyperperiod,
//! asking a [`Policy`] which task to run at each step. Fixed-priority
//! policies (rate- and deadline-monotonic) and EDF differ only in how they
//! pick the task; release and deadline bookkeeping is shared.

use crate::{
    task::{Task, Time},
    error::Error
};

use tracing::{debug, trace, warn};

/// Mutable state of a task during a single simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskState {
    /// Absolute deadline of the current job.
    pub deadline: Time,
    /// Execution already received by the current job.
    pub consumed: Time
}

impl TaskState {
    /// Constructs the state of `task` at time `0`, i.e. at its first release.
    pub fn new(task: &Task) -> Self {
        Self {
            deadline: task.deadline,
            consumed: 0
        }
    }
}

/// Task-selection policy of a uniprocessor scheduler.
///
/// Every policy only considers tasks whose current job is unfinished and
/// breaks ties in favour of the task that comes first in the task-set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Shortest period first.
    RateMonotonic,
    /// Shortest relative deadline first.
    DeadlineMonotonic,
    /// Earliest absolute deadline first.
    EarliestDeadlineFirst
}

impl Policy {
    /// Picks the task to run among `tasks`, whose runtime state is `states`.
    ///
    /// Returns the index of the chosen task, or `None` if no task has
    /// pending work.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `tasks` and `states` differ in length.
    pub fn select(self, tasks: &[Task], states: &[TaskState]) -> Option<usize> {
        debug_assert_eq!(tasks.len(), states.len());

        let ready = tasks.iter()
                         .zip(states)
                         .enumerate()
                         .filter(|(_, (task, state))| state.consumed < task.cost);

        // `min_by_key` keeps the first of equal minima
        let chosen = match self {
            Policy::RateMonotonic         => ready.min_by_key(|(_, (task, _))| task.period),
            Policy::DeadlineMonotonic     => ready.min_by_key(|(_, (task, _))| task.deadline),
            Policy::EarliestDeadlineFirst => ready.min_by_key(|(_, (_, state))| state.deadline)
        };

        chosen.map(|(i, _)| i)
    }

    /// Returns the name of the scheduler implementing the policy.
    pub fn name(self) -> &'static str {
        match self {
            Policy::RateMonotonic         => "RM",
            Policy::DeadlineMonotonic     => "DM",
            Policy::EarliestDeadlineFirst => "EDF"
        }
    }
}

/// A job that had not completed when its task reached a period boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Miss {
    /// The task in question, as an index into the simulated task-set.
    pub task: usize,
    /// The period boundary at which the miss was detected.
    pub time: Time,
    /// Execution the job still needed at that point.
    pub remaining: Time
}

/// Result of a simulation over one hyperperiod.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    /// The task run during each time unit, `None` if the processor idled.
    ///
    /// Entry `t` covers the interval from `t` to `t + 1`.
    pub trace: Box<[Option<usize>]>,
    /// All deadline misses, in order of detection.
    pub misses: Box<[Miss]>,
    /// Length of the simulation, equal to the hyperperiod of the task-set.
    pub hyperperiod: Time
}

impl Schedule {
    /// Tests if no job missed its deadline.
    pub fn schedulable(&self) -> bool {
        self.misses.is_empty()
    }

    /// Returns the number of time units task `task` ran for.
    pub fn executed(&self, task: usize) -> Time {
        self.trace.iter()
                  .filter(|&&slot| slot == Some(task))
                  .count() as Time
    }

    /// Returns the number of time units the processor was idle.
    pub fn idle(&self) -> Time {
        self.trace.iter()
                  .filter(|slot| slot.is_none())
                  .count() as Time
    }
}

fn gcd(mut a: Time, mut b: Time) -> Time {
    while b != 0 {
        (a, b) = (b, a % b);
    }

    a
}

/// Computes the hyperperiod of `tasks`, i.e. the least common multiple of
/// their periods.
///
/// # Errors
///
/// Returns [`Error::EmptyTaskSet`] if there are no tasks,
/// [`Error::InvalidTask`] if a period is zero and
/// [`Error::HyperperiodOverflow`] if the result does not fit in a [`Time`].
pub fn hyperperiod(tasks: &[Task]) -> Result<Time, Error> {
    if tasks.is_empty() {
        return Err(Error::EmptyTaskSet);
    }

    tasks.iter().try_fold(1, |acc: Time, task| {
        if task.period == 0 {
            return Err(Error::InvalidTask {
                name: task.name.clone(),
                reason: "period must be positive"
            });
        }

        (acc / gcd(acc, task.period))
            .checked_mul(task.period)
            .ok_or(Error::HyperperiodOverflow { period: task.period })
    })
}

/// Simulates `tasks` under `policy` for one hyperperiod, starting with all
/// tasks released at time `0`.
///
/// At every period boundary of a task its current job is checked for
/// completion; an unfinished job is recorded as a [`Miss`] and dropped, and
/// the simulation goes on. The schedule repeats identically after the
/// hyperperiod, so the returned [`Schedule`] describes the whole run.
///
/// # Errors
///
/// Fails if the hyperperiod cannot be computed; see [`hyperperiod`].
pub fn simulate(tasks: &[Task], policy: Policy) -> Result<Schedule, Error> {
    let hyperperiod = hyperperiod(tasks)?;

    debug!(policy = policy.name(), tasks = tasks.len(), hyperperiod, "simulating");

    let mut states = tasks.iter()
                          .map(TaskState::new)
                          .collect::<Box<_>>();

    let mut trace = Vec::new();
    let mut misses = Vec::new();
    let mut time: Time = 0;

    loop {
        time += 1;

        let chosen = policy.select(tasks, &states);

        match chosen {
            Some(i) => states[i].consumed += 1,
            None    => trace!(time, "idle")
        }

        trace.push(chosen);

        for (i, (task, state)) in tasks.iter().zip(states.iter_mut()).enumerate() {
            if time % task.period != 0 {
                continue;
            }

            if state.consumed < task.cost {
                let remaining = task.cost - state.consumed;

                warn!(policy = policy.name(), task = %task.name, time, remaining,
                      "deadline miss");

                misses.push(Miss { task: i, time, remaining });
            }

            state.consumed = 0;
            state.deadline = state.deadline.saturating_add(task.period);
        }

        if tasks.iter().all(|task| time % task.period == 0) {
            break;
        }
    }

    debug_assert_eq!(time, hyperperiod);

    Ok(Schedule {
        trace: trace.into_boxed_slice(),
        misses: misses.into_boxed_slice(),
        hyperperiod
    })
}
