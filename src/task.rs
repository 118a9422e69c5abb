//! The task model.

use crate::error::Error;

use dashu::{
    rational::Relaxed,
    integer::Sign
};

/// Type of time instants and durations.
///
/// The intended semantics of this type are left to the user and do not
/// interfere with use of this library as long as it relates to integral
/// multiples of a constant time interval; every simulated step advances
/// time by exactly one such unit.
pub type Time = u64;

/// A single periodic task.
///
/// Tasks are template data: no analysis ever modifies them, and all per-run
/// state lives in the analysis itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// The task's name, unique within its task-set.
    pub name: String,
    /// The task's period.
    pub period: Time,
    /// The task's cost, also known as WCET (worst-case execution time).
    pub cost: Time,
    /// The task's relative deadline.
    pub deadline: Time
}

impl Task {
    /// Constructs a new `Task` with the given `name`, `cost` and `period`,
    /// and implicit deadline (equal to `period`).
    pub fn new(name: impl Into<String>, cost: Time, period: Time) -> Self {
        Self {
            name: name.into(),
            period,
            cost,
            deadline: period
        }
    }

    /// Returns the task with new relative deadline `deadline`.
    #[must_use]
    pub fn with_deadline(self, deadline: Time) -> Self {
        Self { deadline, ..self }
    }

    /// Checks the task against the invariants of the task model.
    ///
    /// Period, cost and deadline must be positive and the cost may not
    /// exceed the period. A deadline outside `cost ..= period` is accepted,
    /// since the analyses remain well-defined, but is reported as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTask`] naming the first violated invariant.
    pub fn check(&self) -> Result<(), Error> {
        let reason = if self.period == 0 {
            "period must be positive"
        } else if self.cost == 0 {
            "computation time must be positive"
        } else if self.deadline == 0 {
            "deadline must be positive"
        } else if self.cost > self.period {
            "computation time exceeds period"
        } else {
            if self.deadline > self.period {
                tracing::warn!(task = %self.name, "deadline {} exceeds period {}",
                               self.deadline, self.period);
            } else if self.deadline < self.cost {
                tracing::warn!(task = %self.name, "deadline {} is shorter than computation time {}",
                               self.deadline, self.cost);
            }

            return Ok(());
        };

        Err(Error::InvalidTask { name: self.name.clone(), reason })
    }
}

/// Trait for tasks and collections of tasks (task-sets).
pub trait Set {
    /// Returns the exact value of the total utilization of the task-set.
    ///
    /// For this value to be computed exactly it is required that the return type
    /// be an arbitrary-precision (non-negative) rational; since its main use is to be
    /// summed or compared, it is not immediately returned as a
    /// [`RBig`](`dashu::rational::RBig`); use [`Relaxed::canonicalize`] to convert
    /// to it if needed.
    fn utilization(self) -> Relaxed;

    /// Tests if the task-set has all implicit tasks, i.e. if all their deadlines
    /// are equal to their periods.
    fn implicit(self) -> bool;

    /// Tests if every task of the set fits in its own period, i.e. if no
    /// task has a cost greater than its period.
    fn feasible(self) -> bool;
}

/// A `Task` is in and of itself a `Set` of one element and is treated accordingly.
impl Set for &'_ Task {
    fn utilization(self) -> Relaxed {
        Relaxed::from_parts_const(
            Sign::Positive,
            self.cost.into(),
            self.period.into()
        )
    }

    fn implicit(self) -> bool {
        self.period == self.deadline
    }

    fn feasible(self) -> bool {
        self.cost <= self.period
    }
}

/// Any collection of `Set`s (including [`Task`]) is a `Set`, and is treated as if each
/// of its elements were a task.
impl<I, T: Set> Set for I where I: IntoIterator<Item = T> {
    fn utilization(self) -> Relaxed {
        let mut out = Relaxed::default();

        for x in self {
            out += x.utilization();
        }

        out
    }

    fn implicit(self) -> bool {
        self.into_iter()
            .all(T::implicit)
    }

    fn feasible(self) -> bool {
        self.into_iter()
            .all(T::feasible)
    }
}
