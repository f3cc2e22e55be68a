//! # Supervisor: sole consumer of the report channel.
//!
//! ```text
//!            ┌──────────── Report ───────────┐
//!            ▼                               │
//!     ┌─────────────┐   Close marker   ┌──────────┐
//!     │  Receiving  │ ───────────────► │  Closed  │
//!     └─────────────┘                  └──────────┘
//! ```
//!
//! Every report is logged as `Update: <report>` and recorded in the [`Ledger`].
//! Only the Close marker ends the loop; it is therefore always the last
//! message processed. If every writer disappears without a Close marker the
//! loop ends too, with [`Ledger::closed`] left `false`.

use tracing::{info, warn};

use crate::{
    core::report::{Envelope, Report, ReportReader},
    events::{Bus, Event, EventKind},
    parcel::WorkerId,
};

/// Everything the supervisor received during one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    /// Reports in the order they were received.
    pub updates: Vec<Report>,
    /// Whether the Close marker ended the loop.
    pub closed: bool,
}

impl Ledger {
    /// Delivery reports only.
    pub fn delivered(&self) -> impl Iterator<Item = &Report> {
        self.updates
            .iter()
            .filter(|r| matches!(r, Report::Delivered { .. }))
    }

    /// Workers that sent a `Finished` report.
    pub fn finished(&self) -> Vec<WorkerId> {
        self.updates
            .iter()
            .filter_map(|r| match r {
                Report::Finished { worker } => Some(*worker),
                Report::Delivered { .. } => None,
            })
            .collect()
    }
}

/// Reads the report channel until it is closed.
pub struct Supervisor {
    reader: ReportReader,
    bus: Bus,
}

impl Supervisor {
    pub fn new(reader: ReportReader, bus: Bus) -> Self {
        Self { reader, bus }
    }

    /// Receives and logs reports until the Close marker arrives.
    pub async fn run(mut self) -> Ledger {
        let mut ledger = Ledger::default();

        while let Some(envelope) = self.reader.recv().await {
            match envelope {
                Envelope::Report(report) => {
                    info!("[Supervisor] Update: {report}");
                    ledger.updates.push(report);
                }
                Envelope::Close => {
                    ledger.closed = true;
                    break;
                }
            }
        }

        if ledger.closed {
            info!("[Supervisor] Shutting down.");
        } else {
            warn!("[Supervisor] report channel ended without a close marker");
        }
        self.bus.publish(Event::now(EventKind::SupervisorClosed));
        ledger
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::report;
    use crate::parcel::Parcel;

    #[tokio::test]
    async fn close_marker_is_the_last_message_processed() {
        let (writer, reader) = report::channel();
        let late = writer.clone();

        writer
            .send(Report::Delivered {
                parcel: Parcel::new("Book"),
                worker: WorkerId(1),
                elapsed: Duration::from_secs(2),
            })
            .unwrap();
        writer.close().unwrap();
        late.send(Report::Finished {
            worker: WorkerId(1),
        })
        .unwrap();

        let ledger = Supervisor::new(reader, Bus::new(8)).run().await;

        assert!(ledger.closed);
        assert_eq!(ledger.updates.len(), 1);
        assert_eq!(ledger.delivered().count(), 1);
        assert!(ledger.finished().is_empty());
    }

    #[tokio::test]
    async fn ends_without_close_when_all_writers_drop() {
        let (writer, reader) = report::channel();
        writer
            .send(Report::Finished {
                worker: WorkerId(2),
            })
            .unwrap();
        drop(writer);

        let ledger = Supervisor::new(reader, Bus::new(8)).run().await;

        assert!(!ledger.closed);
        assert_eq!(ledger.finished(), vec![WorkerId(2)]);
    }

    #[tokio::test]
    async fn publishes_supervisor_closed() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let (writer, reader) = report::channel();
        writer.close().unwrap();

        Supervisor::new(reader, bus).run().await;

        assert_eq!(rx.recv().await.unwrap().kind, EventKind::SupervisorClosed);
    }
}
