//! # Example: custom_subscriber
//!
//! Demonstrates how to build and attach a custom event subscriber.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait.
//! - Inspect [`Event`] / [`EventKind`] for delivery and termination metrics.
//! - Wire the subscriber into [`Manager::builder`].
//!
//! ## Flow
//! ```text
//! Manager::run()
//!     ├─► publish(WorkerSpawned × N, ParcelQueued × M)
//!     ├─► Worker::run()
//!     │     └─► publish(ParcelDelivering / ParcelDelivered / WorkerDrained / ...)
//!     ├─► publish(DeadlineReached, WorkerTerminated × alive)
//!     └─► listener (in Manager)
//!           └─► SubscriberSet.emit() ──► Tally.on_event()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use parcelvisor::{Config, Event, EventKind, Manager, Parcel, ServiceTime, Subscribe};

/// Prints selected events and keeps a few counters.
/// In real life, you could export metrics, ship logs, or trigger alerts.
#[derive(Default)]
struct Tally {
    delivered: AtomicU64,
    delivered_ms: AtomicU64,
    terminated: AtomicU64,
}

#[async_trait::async_trait]
impl Subscribe for Tally {
    async fn on_event(&self, ev: &Event) {
        let worker = ev.worker.map(|w| w.to_string()).unwrap_or_default();
        match ev.kind {
            // === Delivery ===
            EventKind::ParcelDelivering => {
                println!(
                    "[sub] delivering: {} by {worker}",
                    ev.parcel.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::ParcelDelivered => {
                let ms = u64::from(ev.elapsed_ms.unwrap_or(0));
                self.delivered.fetch_add(1, Ordering::Relaxed);
                self.delivered_ms.fetch_add(ms, Ordering::Relaxed);
                println!(
                    "[sub] delivered:  {} by {worker} in {ms}ms",
                    ev.parcel.as_deref().unwrap_or("<unknown>")
                );
            }

            // === Pool ===
            EventKind::WorkerDrained | EventKind::WorkerStopped => {
                println!("[sub] left:       {worker}");
            }
            EventKind::WorkerTerminated => {
                self.terminated.fetch_add(1, Ordering::Relaxed);
                println!("[sub] terminated: {worker}");
            }

            // === Shutdown ===
            EventKind::DeadlineReached => println!("[sub] deadline reached"),
            EventKind::InterruptReceived => {
                println!(
                    "[sub] interrupted: {}",
                    ev.reason.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::SupervisorClosed => println!("[sub] supervisor closed"),

            // === Ignored ===
            EventKind::WorkerSpawned
            | EventKind::ParcelQueued
            | EventKind::StopMarkersQueued
            | EventKind::RunFinished
            | EventKind::SubscriberOverflow
            | EventKind::SubscriberPanicked => {}
        }
    }

    fn name(&self) -> &'static str {
        "tally"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("custom_subscriber demo\n");

    let cfg = Config {
        workers: 2,
        budget: Duration::from_secs(2),
        idle_timeout: Duration::from_millis(500),
        service_time: ServiceTime::new(Duration::from_millis(300), Duration::from_millis(1500))
            .with_seed(7),
        ..Config::default()
    };

    let tally = Arc::new(Tally::default());
    let subs: Vec<Arc<dyn Subscribe>> = vec![tally.clone()];

    let summary = Manager::builder(cfg)
        .with_subscribers(subs)
        .build()
        .run(Parcel::batch(["Laptop", "Mobile", "Shoes", "Book"]))
        .await?;

    let delivered = tally.delivered.load(Ordering::Relaxed);
    let avg = tally
        .delivered_ms
        .load(Ordering::Relaxed)
        .checked_div(delivered)
        .unwrap_or(0);
    println!(
        "\nfinished: delivered={delivered} avg={avg}ms terminated={} stop_markers_left={}",
        tally.terminated.load(Ordering::Relaxed),
        summary.stop_markers_left
    );
    Ok(())
}
