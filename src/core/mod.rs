//! Runtime core: the pool, its channels, and the run lifecycle.
//!
//! The public entry point is [`Manager`], which owns one run from spawn to
//! supervisor close and returns a [`RunSummary`].
//!
//! Internal modules:
//! - [`queue`]: shared FIFO of parcels and stop markers;
//! - [`report`]: write-only / read-only report channel endpoints;
//! - [`worker`]: pulls items, delivers parcels, reports back;
//! - [`supervisor`]: consumes reports until the Close marker;
//! - [`deadline`]: the fixed time budget;
//! - [`manager`]: spawn, deadline wait, termination, two-phase shutdown;
//! - [`shutdown`]: OS signal handling for early interrupts.

mod builder;
mod deadline;
mod manager;
mod queue;
mod report;
mod shutdown;
mod summary;
mod supervisor;
mod worker;

pub use builder::ManagerBuilder;
pub use deadline::Deadline;
pub use manager::Manager;
pub use queue::WorkQueue;
pub use report::{Report, ReportReader, ReportWriter, channel as report_channel};
pub use shutdown::wait_for_shutdown_signal;
pub use summary::{RunSummary, WorkerOutcome};
pub use supervisor::{Ledger, Supervisor};
pub use worker::{Worker, WorkerExit};
