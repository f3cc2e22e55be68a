//! # LogWriter: event tracer
//!
//! A minimal subscriber that renders incoming [`Event`]s as `tracing` records at
//! `debug` level. The console lines of the simulation itself are emitted by the
//! components directly; this writer only adds the structured event trail.
//!
//! ## Example output
//! ```text
//! DEBUG parcelvisor::events: [spawned] worker=Worker-1
//! DEBUG parcelvisor::events: [delivering] worker=Worker-1 parcel=Laptop
//! DEBUG parcelvisor::events: [delivered] worker=Worker-1 parcel=Laptop elapsed_ms=4000
//! DEBUG parcelvisor::events: [deadline-reached]
//! DEBUG parcelvisor::events: [terminated] worker=Worker-3
//! ```

use async_trait::async_trait;
use tracing::debug;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

const TARGET: &str = "parcelvisor::events";

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let worker = e.worker.map(|w| w.to_string()).unwrap_or_default();
        let parcel = e.parcel.as_deref().unwrap_or_default();
        let reason = e.reason.as_deref().unwrap_or_default();

        match e.kind {
            EventKind::WorkerSpawned => debug!(target: TARGET, "[spawned] worker={worker}"),
            EventKind::WorkerDrained => debug!(target: TARGET, "[drained] worker={worker}"),
            EventKind::WorkerStopped => debug!(target: TARGET, "[stopped] worker={worker}"),
            EventKind::WorkerTerminated => debug!(target: TARGET, "[terminated] worker={worker}"),
            EventKind::ParcelQueued => debug!(target: TARGET, "[queued] parcel={parcel}"),
            EventKind::ParcelDelivering => {
                debug!(target: TARGET, "[delivering] worker={worker} parcel={parcel}")
            }
            EventKind::ParcelDelivered => debug!(
                target: TARGET,
                "[delivered] worker={worker} parcel={parcel} elapsed_ms={}",
                e.elapsed_ms.unwrap_or(0)
            ),
            EventKind::DeadlineReached => debug!(target: TARGET, "[deadline-reached]"),
            EventKind::InterruptReceived => debug!(target: TARGET, "[interrupted] reason={reason}"),
            EventKind::StopMarkersQueued => debug!(target: TARGET, "[stop-markers] {reason}"),
            EventKind::SupervisorClosed => debug!(target: TARGET, "[supervisor-closed]"),
            EventKind::RunFinished => debug!(target: TARGET, "[run-finished]"),
            EventKind::SubscriberOverflow => {
                debug!(target: TARGET, "[subscriber-overflow] {reason}")
            }
            EventKind::SubscriberPanicked => {
                debug!(target: TARGET, "[subscriber-panicked] {reason}")
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
