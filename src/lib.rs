//! Offline schedulability analysis of periodic task-sets on a single
//! processor.
//!
//! A task-set is a slice of [`Task`](`task::Task`)s; where a fixed priority
//! order is needed, the slice order is the priority order, highest first.
//! Every analysis borrows the task-set immutably and keeps its own runtime
//! state, so any number of analyses can be run on the same set.
//!
//! - [`sim`] simulates rate-monotonic, deadline-monotonic and EDF
//!   scheduling over one hyperperiod;
//! - [`rta`] computes worst-case response times under fixed priorities;
//! - [`opt`] searches for a priority order that passes [`rta`];
//! - [`bound`] provides utilization-based tests;
//! - [`load`] reads task-sets from their textual description.

pub mod task;
pub mod error;
pub mod order;
pub mod sim;
pub mod rta;
pub mod opt;
pub mod bound;
pub mod load;

#[cfg(test)]
mod gen;

pub use error::Error;
