#![warn(clippy::pedantic)]

use unisched::{
    task::{Task, Set},
    sim::{self, Policy, Schedule},
    rta::{self, Response},
    opt::{self, Assignment},
    order, bound, load
};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;

use std::{
    fmt,
    path::PathBuf
};

/// Schedulability analysis of periodic tasks on a single processor.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Task-set file, one `name,computation time,period[,deadline]` task per line
    file: PathBuf,
    #[command(subcommand)]
    command: Option<Command>
}

#[derive(Subcommand)]
enum Command {
    /// Simulate one hyperperiod under the given scheduler
    Sim {
        #[arg(value_enum, short = 'p')]
        /// Scheduling policy
        policy: Scheduler
    },
    /// Compute worst-case response times under fixed priorities
    Rta {
        #[arg(value_enum, short = 'o', default_value_t = Priority::Rm)]
        /// Priority order to analyze
        order: Priority
    },
    /// Search for a priority order under which every task meets its deadline
    Optimize,
    /// Run every analysis (default)
    All
}

#[derive(Clone, Copy, ValueEnum)]
enum Scheduler {
    Rm,
    Dm,
    Edf
}

impl From<Scheduler> for Policy {
    fn from(s: Scheduler) -> Self {
        match s {
            Scheduler::Rm  => Policy::RateMonotonic,
            Scheduler::Dm  => Policy::DeadlineMonotonic,
            Scheduler::Edf => Policy::EarliestDeadlineFirst
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Priority {
    /// Rate-monotonic (shortest period first)
    Rm,
    /// Deadline-monotonic (shortest deadline first)
    Dm,
    /// The order of the task-set file
    Given
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Rm    => write!(f, "rm"),
            Priority::Dm    => write!(f, "dm"),
            Priority::Given => write!(f, "given")
        }
    }
}

impl Priority {
    fn order(self, tasks: &[Task]) -> Box<[usize]> {
        match self {
            Priority::Rm    => order::by_period(tasks),
            Priority::Dm    => order::by_deadline(tasks),
            Priority::Given => (0 .. tasks.len()).collect()
        }
    }
}

fn names<'a>(tasks: &'a [Task], order: &'a [usize]) -> impl fmt::Display + 'a {
    order.iter()
         .map(|&i| &tasks[i].name)
         .format(" ")
}

struct ScheduleReport<'a> {
    tasks: &'a [Task],
    policy: Policy,
    sched: &'a Schedule
}

impl fmt::Display for ScheduleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { tasks, policy, sched } = self;

        writeln!(f, "{} schedule over hyperperiod {}:", policy.name(), sched.hyperperiod)?;
        writeln!(f, "{}", sched.trace.iter().map(|slot| match slot {
            Some(i) => tasks[*i].name.as_str(),
            None    => "_"
        }).format(" "))?;

        for miss in sched.misses.iter() {
            writeln!(f, "deadline miss: {} at {} ({} unit(s) short)",
                     tasks[miss.task].name, miss.time, miss.remaining)?;
        }

        if sched.schedulable() {
            write!(f, "schedulable")
        } else {
            write!(f, "not schedulable ({} miss(es))", sched.misses.len())
        }
    }
}

struct ResponseReport<'a> {
    ordered: &'a [&'a Task],
    responses: &'a [Response]
}

impl fmt::Display for ResponseReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task\tR\tD\tverdict")?;

        for (task, res) in self.ordered.iter().zip(self.responses) {
            let verdict = if res.schedulable { "ok" } else { "MISS" };

            writeln!(f)?;
            write!(f, "{}\t{}\t{}\t{verdict}", task.name, res.time, task.deadline)?;
        }

        Ok(())
    }
}

fn run_sim(tasks: &[Task], policy: Policy) -> anyhow::Result<()> {
    let sched = sim::simulate(tasks, policy)
        .with_context(|| format!("cannot simulate {}", policy.name()))?;

    println!("{}", ScheduleReport { tasks, policy, sched: &sched });
    Ok(())
}

fn run_rta(tasks: &[Task], priority: Priority) {
    let ordered = order::arrange(tasks, &priority.order(tasks));
    let responses = rta::analyze_all(&ordered);

    println!("Response times ({priority} order):");
    println!("{}", ResponseReport { ordered: &ordered, responses: &responses });
}

fn run_optimize(tasks: &[Task]) {
    match opt::optimize(tasks) {
        Assignment::Feasible(order) => {
            println!("Feasible priority order: {}", names(tasks, &order));
        },

        Assignment::Infeasible { order, level } => {
            println!("No feasible priority order found along the search path");
            println!("  stuck at level {level}, partial order: {}", names(tasks, &order));
        }
    }
}

fn run_bounds(tasks: &[Task]) {
    println!("Utilization: {}", tasks.iter().utilization().canonicalize());

    let verdict = |test: Option<bool>| match test {
        Some(true)  => "pass",
        Some(false) => "fail",
        None        => "n/a (constrained deadlines)"
    };

    println!("EDF utilization test: {}", verdict(bound::edf(tasks)));
    println!("RM hyperbolic bound: {}", verdict(bound::hyperbolic(tasks)));
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let tasks = load::read(&args.file)
        .with_context(|| format!("error while loading {}", args.file.display()))?;

    match args.command.unwrap_or(Command::All) {
        Command::Sim { policy } => run_sim(&tasks, policy.into())?,

        Command::Rta { order } => run_rta(&tasks, order),

        Command::Optimize => run_optimize(&tasks),

        Command::All => {
            run_bounds(&tasks);

            for policy in [Policy::RateMonotonic, Policy::DeadlineMonotonic, Policy::EarliestDeadlineFirst] {
                println!();
                run_sim(&tasks, policy)?;
            }

            println!();
            run_rta(&tasks, Priority::Rm);
            println!();
            run_optimize(&tasks);
        }
    }

    Ok(())
}
