//! Search for a feasible fixed-priority assignment.

use crate::{
    task::Task,
    order, rta
};

use tracing::{debug, info};

/// Outcome of a priority-assignment search.
///
/// Orders are permutations of indices into the searched task-set, with the
/// highest priority first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Assignment {
    /// Every task meets its deadline under `order` according to
    /// response-time analysis.
    Feasible(Box<[usize]>),
    /// No task could be placed at priority level `level`; `order` is the
    /// arrangement the search had reached at that point.
    ///
    /// Levels below `level` had already been assigned and are final.
    Infeasible {
        order: Box<[usize]>,
        level: usize
    }
}

impl Assignment {
    /// Returns the order reached by the search, feasible or not.
    pub fn order(&self) -> &[usize] {
        match self {
            Assignment::Feasible(order) | Assignment::Infeasible { order, .. } => order
        }
    }

    /// Tests if the search found a feasible assignment.
    pub fn feasible(&self) -> bool {
        matches!(self, Assignment::Feasible(_))
    }
}

/// Searches for a priority assignment under which response-time analysis
/// deems every task of `tasks` schedulable.
///
/// The search starts from the rate-monotonic order and fills priority levels
/// from the lowest upwards: for each level it tries the task currently there
/// and then, in turn, every higher-placed task swapped into it, keeping the
/// first one that meets its deadline. A level once filled is never revisited.
///
/// This explores a single path of exchanges. An [`Assignment::Infeasible`]
/// result means the search failed on that path, not that no feasible
/// ordering of `tasks` exists.
pub fn optimize(tasks: &[Task]) -> Assignment {
    let mut order = order::by_period(tasks);
    let mut ordered = order::arrange(tasks, &order);

    for level in (0 .. order.len()).rev() {
        let mut found = false;

        for candidate in (0 ..= level).rev() {
            order.swap(level, candidate);
            ordered.swap(level, candidate);

            if rta::response_time(&ordered, level).schedulable {
                debug!(level, task = %ordered[level].name, "priority level assigned");
                found = true;
                break;
            }

            order.swap(level, candidate);
            ordered.swap(level, candidate);
        }

        if !found {
            info!(level, "no task can be assigned to priority level");
            return Assignment::Infeasible { order, level };
        }
    }

    Assignment::Feasible(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::gen;

    #[test]
    fn keeps_rate_monotonic_order_when_it_works() {
        let tasks = [Task::new("B", 1, 8), Task::new("A", 2, 5)];

        assert_eq!(optimize(&tasks), Assignment::Feasible(Box::new([1, 0])));
    }

    #[test]
    fn finds_order_rate_monotonic_misses() {
        // RM puts A first, but only B-first meets B's tight deadline
        let tasks = [
            Task::new("A", 2, 5),
            Task::new("B", 2, 6).with_deadline(2)
        ];

        let rm = order::arrange(&tasks, &order::by_period(&tasks));
        assert!(!rta::response_time(&rm, 1).schedulable);

        assert_eq!(optimize(&tasks), Assignment::Feasible(Box::new([1, 0])));
    }

    #[test]
    fn overload_is_infeasible() {
        let tasks = [Task::new("A", 4, 4), Task::new("B", 4, 4)];

        let result = optimize(&tasks);

        assert!(!result.feasible());
        assert!(matches!(result, Assignment::Infeasible { level: 1, .. }));
        assert_eq!(result.order().len(), 2);
    }

    #[test]
    fn empty_set_is_trivially_feasible() {
        assert_eq!(optimize(&[]), Assignment::Feasible(Box::new([])));
    }

    #[test]
    fn feasible_orders_pass_analysis() {
        for tasks in gen::task_sets(0x0B7, 300) {
            let tasks = gen::constrain(tasks, 0x0B7);

            match optimize(&tasks) {
                Assignment::Feasible(order) => {
                    let mut sorted = order.to_vec();
                    sorted.sort_unstable();
                    assert!(sorted.into_iter().eq(0 .. tasks.len()));

                    let ordered = order::arrange(&tasks, &order);
                    assert!(rta::analyze_all(&ordered).iter().all(|r| r.schedulable));
                },

                Assignment::Infeasible { order, level } => {
                    let ordered = order::arrange(&tasks, &order);
                    assert!(!rta::response_time(&ordered, level).schedulable);
                }
            }
        }
    }
}
