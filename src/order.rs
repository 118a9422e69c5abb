//! Fixed-priority orderings.
//!
//! An ordering is a permutation of indices into a task-set; position `0`
//! holds the highest-priority task.

use crate::task::{Task, Time};

fn sorted_by_key(tasks: &[Task], key: impl Fn(&Task) -> Time) -> Box<[usize]> {
    let mut order = (0 .. tasks.len()).collect::<Box<_>>();

    // stable: equal keys keep input order
    order.sort_by_key(|&i| key(&tasks[i]));
    order
}

/// Returns the rate-monotonic ordering of `tasks`, i.e. by ascending period.
///
/// Tasks with equal periods keep their relative order in `tasks`.
pub fn by_period(tasks: &[Task]) -> Box<[usize]> {
    sorted_by_key(tasks, |t| t.period)
}

/// Returns the deadline-monotonic ordering of `tasks`, i.e. by ascending
/// relative deadline.
///
/// Tasks with equal deadlines keep their relative order in `tasks`.
pub fn by_deadline(tasks: &[Task]) -> Box<[usize]> {
    sorted_by_key(tasks, |t| t.deadline)
}

/// Arranges `tasks` in priority order according to `order`.
///
/// # Panics
///
/// Panics if `order` contains an index out of bounds for `tasks`.
pub fn arrange<'a>(tasks: &'a [Task], order: &[usize]) -> Vec<&'a Task> {
    order.iter()
         .map(|&i| &tasks[i])
         .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_order_is_stable() {
        let tasks = [
            Task::new("A", 1, 10),
            Task::new("B", 1, 5),
            Task::new("C", 1, 10),
            Task::new("D", 1, 5),
            Task::new("E", 1, 7)
        ];

        assert_eq!(&*by_period(&tasks), &[1, 3, 4, 0, 2]);
    }

    #[test]
    fn deadline_order_ignores_period() {
        let tasks = [
            Task::new("A", 1, 5).with_deadline(5),
            Task::new("B", 1, 8).with_deadline(3),
            Task::new("C", 1, 6).with_deadline(3)
        ];

        assert_eq!(&*by_deadline(&tasks), &[1, 2, 0]);
        assert_eq!(&*by_period(&tasks), &[0, 2, 1]);
    }

    #[test]
    fn arrange_follows_order() {
        let tasks = [Task::new("A", 1, 10), Task::new("B", 1, 5)];
        let names = arrange(&tasks, &by_period(&tasks))
                    .into_iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>();

        assert_eq!(names, ["B", "A"]);
    }
}
