//! # Worker: one member of the delivery pool.
//!
//! ```text
//! loop {
//!   ├─► queue.get(idle_timeout)
//!   │     ├─ Err(Empty/Closed) ─► exit (Drained)
//!   │     ├─ Ok(Stop)          ─► exit (Stopped)
//!   │     └─ Ok(Parcel(p))     ─► log "Delivering p..."
//!   │                             courier.deliver(p).await
//!   │                             reports.send(Delivered{p, worker, elapsed})
//! }
//! reports.send(Finished{worker})
//! ```
//!
//! ## Rules
//! - A voluntary exit always sends exactly one `Finished` report.
//! - A worker aborted by the manager stops at its current `await`; no further
//!   reports are sent and the parcel in hand is abandoned.
//! - A closed report channel is logged and ignored; the loop carries on.

use std::time::Duration;

use tracing::{debug, info};

use crate::{
    core::{
        queue::WorkQueue,
        report::{Report, ReportWriter},
    },
    couriers::CourierRef,
    error::QueueError,
    events::{Bus, Event, EventKind},
    parcel::{Item, Parcel, WorkerId},
};

/// Why a worker's loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerExit {
    /// No parcel arrived within the idle timeout.
    Drained,
    /// Took a stop marker.
    Stopped,
    /// Aborted by the manager after the deadline.
    Terminated,
    /// The worker task panicked.
    Panicked,
}

impl WorkerExit {
    /// `true` for exits taken by the worker itself.
    pub fn is_voluntary(&self) -> bool {
        matches!(self, WorkerExit::Drained | WorkerExit::Stopped)
    }
}

/// A pool member; consumed by [`Worker::run`].
pub struct Worker {
    id: WorkerId,
    queue: WorkQueue,
    reports: ReportWriter,
    courier: CourierRef,
    idle_timeout: Duration,
    bus: Bus,
}

impl Worker {
    pub fn new(
        id: WorkerId,
        queue: WorkQueue,
        reports: ReportWriter,
        courier: CourierRef,
        idle_timeout: Duration,
        bus: Bus,
    ) -> Self {
        Self {
            id,
            queue,
            reports,
            courier,
            idle_timeout,
            bus,
        }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Runs the retrieval loop until the queue drains or a stop marker arrives.
    pub async fn run(self) -> WorkerExit {
        let exit = loop {
            match self.queue.get(self.idle_timeout).await {
                Ok(Item::Parcel(parcel)) => self.deliver(parcel).await,
                Ok(Item::Stop) => break WorkerExit::Stopped,
                Err(QueueError::Empty { .. }) | Err(QueueError::Closed) => {
                    break WorkerExit::Drained;
                }
            }
        };

        let kind = match exit {
            WorkerExit::Stopped => EventKind::WorkerStopped,
            _ => EventKind::WorkerDrained,
        };
        self.bus.publish(Event::now(kind).with_worker(self.id));
        self.send(Report::Finished { worker: self.id });
        exit
    }

    async fn deliver(&self, parcel: Parcel) {
        info!("[{}] Delivering {}...", self.id, parcel);
        self.bus.publish(
            Event::now(EventKind::ParcelDelivering)
                .with_worker(self.id)
                .with_parcel(parcel.label()),
        );

        let elapsed = self.courier.deliver(&parcel).await;

        self.bus.publish(
            Event::now(EventKind::ParcelDelivered)
                .with_worker(self.id)
                .with_parcel(parcel.label())
                .with_elapsed(elapsed),
        );
        self.send(Report::Delivered {
            parcel,
            worker: self.id,
            elapsed,
        });
    }

    fn send(&self, report: Report) {
        if let Err(e) = self.reports.send(report) {
            debug!(worker = %self.id, error = %e, "report dropped");
        }
    }
}
