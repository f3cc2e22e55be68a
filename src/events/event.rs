//! # Runtime events emitted by the manager, workers and supervisor.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Pool events**: worker lifecycle (spawned, drained, stopped, terminated)
//! - **Delivery events**: parcel flow (queued, delivering, delivered)
//! - **Shutdown events**: deadline, interrupt, stop markers, supervisor close
//! - **Subscriber events**: overflow and panic inside the fan-out
//!
//! Events are telemetry only: the console log and the report channel never
//! depend on them.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use parcelvisor::{Event, EventKind, WorkerId};
//!
//! let ev = Event::now(EventKind::ParcelDelivered)
//!     .with_worker(WorkerId(2))
//!     .with_parcel("Camera")
//!     .with_elapsed(Duration::from_secs(3));
//!
//! assert_eq!(ev.kind, EventKind::ParcelDelivered);
//! assert_eq!(ev.parcel.as_deref(), Some("Camera"));
//! assert_eq!(ev.elapsed_ms, Some(3000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::parcel::WorkerId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Pool events ===
    /// Worker task spawned.
    ///
    /// Sets: `worker`
    WorkerSpawned,

    /// Worker left its loop because the queue stayed empty past the idle timeout.
    ///
    /// Sets: `worker`
    WorkerDrained,

    /// Worker left its loop after taking a stop marker.
    ///
    /// Sets: `worker`
    WorkerStopped,

    /// Worker was still alive at the deadline and has been aborted.
    ///
    /// Sets: `worker`
    WorkerTerminated,

    // === Delivery events ===
    /// Parcel placed on the work queue.
    ///
    /// Sets: `parcel`
    ParcelQueued,

    /// Worker took a parcel and started delivering it.
    ///
    /// Sets: `worker`, `parcel`
    ParcelDelivering,

    /// Worker finished a delivery.
    ///
    /// Sets: `worker`, `parcel`, `elapsed_ms`
    ParcelDelivered,

    // === Shutdown events ===
    /// Time budget elapsed.
    DeadlineReached,

    /// Deadline wait was cut short (OS signal or cancelled token).
    ///
    /// Sets: `reason`
    InterruptReceived,

    /// Stop markers pushed for the whole pool.
    ///
    /// Sets: `reason` (marker count)
    StopMarkersQueued,

    /// Supervisor observed the close marker and exited.
    SupervisorClosed,

    /// Last event of a run; the listener stops after delivering it.
    RunFinished,

    // === Subscriber events ===
    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `reason` (`subscriber=<name> reason=<full|closed>`)
    SubscriberOverflow,

    /// Subscriber panicked during event processing.
    ///
    /// Sets: `reason` (panic message)
    SubscriberPanicked,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Worker the event concerns, if any.
    pub worker: Option<WorkerId>,
    /// Parcel label, if applicable.
    pub parcel: Option<Arc<str>>,
    /// Delivery time in milliseconds (compact).
    pub elapsed_ms: Option<u32>,
    /// Human-readable detail (signal source, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            worker: None,
            parcel: None,
            elapsed_ms: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_worker(mut self, worker: WorkerId) -> Self {
        self.worker = Some(worker);
        self
    }

    #[inline]
    pub fn with_parcel(mut self, parcel: impl Into<Arc<str>>) -> Self {
        self.parcel = Some(parcel.into());
        self
    }

    /// Attaches a delivery time (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.elapsed_ms = Some(ms);
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::now(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::now(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} info={info}"))
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::now(EventKind::DeadlineReached);
        let b = Event::now(EventKind::DeadlineReached);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn elapsed_is_clamped_to_u32_millis() {
        let ev = Event::now(EventKind::ParcelDelivered).with_elapsed(Duration::from_secs(u64::MAX));
        assert_eq!(ev.elapsed_ms, Some(u32::MAX));
    }
}
