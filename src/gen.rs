//! Generators for random task-sets.
//!
//! Periods are drawn from a small set of harmonic-ish values so that
//! hyperperiods stay short enough to simulate exhaustively.

use crate::task::{Task, Time};

use rand::{
    rngs::StdRng,
    seq::SliceRandom,
    Rng, SeedableRng
};

const PERIODS: [Time; 9] = [2, 3, 4, 5, 6, 8, 10, 12, 15];

/// Generates `count` task-sets of one to five implicit-deadline tasks,
/// reproducibly from `seed`.
///
/// Each task's cost is picked uniformly between `1` and half its period,
/// so the generated sets straddle full utilization.
pub fn task_sets(seed: u64, count: usize) -> impl Iterator<Item = Box<[Task]>> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0 .. count).map(move |_| {
        let num = rng.gen_range(1 ..= 5);

        (0 .. num).map(|i| {
            let period = *PERIODS.choose(&mut rng).unwrap();
            let cost = rng.gen_range(1 ..= (period / 2).max(1));

            Task::new(format!("T{i}"), cost, period)
        }).collect()
    })
}

/// Gives every task of `tasks` a random constrained deadline between its
/// cost and its period.
pub fn constrain(tasks: Box<[Task]>, seed: u64) -> Box<[Task]> {
    let mut rng = StdRng::seed_from_u64(seed);

    tasks.into_vec().into_iter().map(|task| {
        let deadline = rng.gen_range(task.cost ..= task.period);
        task.with_deadline(deadline)
    }).collect()
}
