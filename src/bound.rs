//! Utilization-based schedulability tests.
//!
//! These complement simulation and response-time analysis: they only look
//! at utilizations and are computed exactly.

use crate::task::{Task, Set};

use dashu::rational::Relaxed;
use num_order::NumOrd;

/// Tests whether task-set `ts` is schedulable under uniprocessor EDF.
///
/// For implicit deadlines EDF is optimal and the test is exact: the
/// total utilization must not exceed `1`.
///
/// Returns the result of the test if `ts` is implicit, otherwise `None`.
pub fn edf(ts: impl Set + Clone) -> Option<bool> {
    ts.clone().implicit().then(|| {
        ts.clone().utilization().num_le(&1usize) && ts.feasible()
    })
}

/// Tests whether `tasks` is schedulable under rate-monotonic scheduling
/// using Bini, Buttazzo and Buttazzo's hyperbolic bound, `Π (U_i + 1) <= 2`.
///
/// The test is sufficient but not necessary; a `false` result should be
/// confirmed with [`rta`](`crate::rta`) or [`sim`](`crate::sim`).
///
/// Returns the result of the test if `tasks` is implicit, otherwise `None`.
pub fn hyperbolic<'a>(tasks: impl IntoIterator<Item = &'a Task> + Clone) -> Option<bool> {
    tasks.clone().implicit().then(|| {
        let mut product = Relaxed::ONE;

        for task in tasks {
            product = product * (task.utilization() + Relaxed::ONE);
        }

        product.num_le(&2usize)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edf_bound_is_exact() {
        let full = [Task::new("A", 1, 2), Task::new("B", 2, 4)];
        let over = [Task::new("A", 3, 4), Task::new("B", 2, 6)];

        assert_eq!(edf(&full), Some(true));
        assert_eq!(edf(&over), Some(false));
        assert_eq!(edf(&[Task::new("A", 1, 4).with_deadline(3)]), None);
    }

    #[test]
    fn hyperbolic_bound() {
        // (1 + 2/5) (1 + 1/8) = 63/40
        let light = [Task::new("A", 2, 5), Task::new("B", 1, 8)];
        // (1 + 1/2) (1 + 1/2) = 9/4, though the set is RM-schedulable
        let harmonic = [Task::new("A", 1, 2), Task::new("B", 2, 4)];

        assert_eq!(hyperbolic(&light), Some(true));
        assert_eq!(hyperbolic(&harmonic), Some(false));
        assert_eq!(hyperbolic(&[Task::new("A", 1, 4).with_deadline(3)]), None);
    }
}
