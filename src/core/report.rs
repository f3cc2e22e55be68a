//! # Report channel: workers → supervisor side channel.
//!
//! A unidirectional channel with exactly two kinds of endpoint:
//! - [`ReportWriter`] - write-only, cloned into every worker (and kept by the manager);
//! - [`ReportReader`] - read-only, owned by the supervisor.
//!
//! ```text
//! Worker-1 ──┐
//! Worker-2 ──┼── ReportWriter ──► [mpsc] ──► ReportReader ──► Supervisor
//! Worker-N ──┘                       ▲
//! Manager ─── ReportWriter::close ───┘  (Close marker, exactly once)
//! ```
//!
//! ## Rules
//! - Writes never block (unbounded).
//! - Concurrent writes are linearized by the channel; nothing is lost or torn.
//! - `close` consumes the writer, so one writer can send at most one Close marker.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::{
    error::ReportError,
    parcel::{Parcel, WorkerId},
};

/// Status report emitted by a worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    /// A parcel was delivered.
    Delivered {
        parcel: Parcel,
        worker: WorkerId,
        elapsed: Duration,
    },
    /// The worker left its loop voluntarily.
    Finished { worker: WorkerId },
}

impl Report {
    /// Worker that produced the report.
    pub fn worker(&self) -> WorkerId {
        match self {
            Report::Delivered { worker, .. } | Report::Finished { worker } => *worker,
        }
    }

    /// Delivered parcel, if any.
    pub fn parcel(&self) -> Option<&Parcel> {
        match self {
            Report::Delivered { parcel, .. } => Some(parcel),
            Report::Finished { .. } => None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Delivered {
                parcel,
                worker,
                elapsed,
            } => write!(f, "{parcel} delivered by {worker} in {elapsed:?}"),
            Report::Finished { worker } => write!(f, "{worker} finished."),
        }
    }
}

/// What travels on the channel; `Close` is never constructed by workers.
#[derive(Debug)]
pub(crate) enum Envelope {
    Report(Report),
    Close,
}

/// Creates a connected writer/reader pair.
pub fn channel() -> (ReportWriter, ReportReader) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ReportWriter { tx }, ReportReader { rx })
}

/// Write endpoint shared by all workers.
#[derive(Clone, Debug)]
pub struct ReportWriter {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl ReportWriter {
    /// Sends a status report.
    pub fn send(&self, report: Report) -> Result<(), ReportError> {
        self.tx
            .send(Envelope::Report(report))
            .map_err(|_| ReportError::Closed)
    }

    /// Sends the Close marker and gives up this writer.
    pub fn close(self) -> Result<(), ReportError> {
        self.tx.send(Envelope::Close).map_err(|_| ReportError::Closed)
    }
}

/// Read endpoint owned by the supervisor.
#[derive(Debug)]
pub struct ReportReader {
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl ReportReader {
    /// Waits for the next message; `None` once every writer is gone.
    pub(crate) async fn recv(&mut self) -> Option<Envelope> {
        self.rx.recv().await
    }

    #[cfg(test)]
    pub(crate) fn try_recv(&mut self) -> Option<Envelope> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_console_format() {
        let delivered = Report::Delivered {
            parcel: Parcel::new("Shoes"),
            worker: WorkerId(2),
            elapsed: Duration::from_secs(4),
        };
        assert_eq!(delivered.to_string(), "Shoes delivered by Worker-2 in 4s");

        let finished = Report::Finished {
            worker: WorkerId(3),
        };
        assert_eq!(finished.to_string(), "Worker-3 finished.");
    }

    #[tokio::test]
    async fn many_writers_one_reader() {
        let (writer, mut reader) = channel();

        let mut handles = Vec::new();
        for n in 1..=4 {
            let w = writer.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    w.send(Report::Finished {
                        worker: WorkerId(n),
                    })
                    .unwrap();
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        writer.close().unwrap();

        let mut reports = 0;
        loop {
            match reader.recv().await {
                Some(Envelope::Report(_)) => reports += 1,
                Some(Envelope::Close) => break,
                None => panic!("channel ended without Close"),
            }
        }
        assert_eq!(reports, 100);
    }

    #[test]
    fn send_fails_once_reader_dropped() {
        let (writer, reader) = channel();
        drop(reader);
        assert_eq!(
            writer.send(Report::Finished {
                worker: WorkerId(1)
            }),
            Err(ReportError::Closed)
        );
    }
}
