//! # Run summary returned by [`Manager::run`](crate::Manager::run).

use crate::{
    core::{report::Report, supervisor::Ledger, worker::WorkerExit},
    parcel::{Parcel, WorkerId},
};

/// Final state of one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerOutcome {
    pub id: WorkerId,
    pub exit: WorkerExit,
}

/// What happened during a run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Supervisor's record of the report channel.
    pub ledger: Ledger,
    /// One entry per spawned worker, in spawn order.
    pub outcomes: Vec<WorkerOutcome>,
    /// Source of the interrupt that cut the deadline wait short, if any.
    pub interrupted: Option<String>,
    /// Stop markers still queued at the end (never consumed).
    pub stop_markers_left: usize,
}

impl RunSummary {
    /// Workers aborted at the deadline.
    pub fn terminated(&self) -> Vec<WorkerId> {
        self.outcomes
            .iter()
            .filter(|o| o.exit == WorkerExit::Terminated)
            .map(|o| o.id)
            .collect()
    }

    /// Workers that left their loop on their own.
    pub fn voluntary(&self) -> Vec<WorkerId> {
        self.outcomes
            .iter()
            .filter(|o| o.exit.is_voluntary())
            .map(|o| o.id)
            .collect()
    }

    /// Parcels reported as delivered, in report order.
    pub fn delivered(&self) -> Vec<&Parcel> {
        self.ledger.delivered().filter_map(Report::parcel).collect()
    }
}
