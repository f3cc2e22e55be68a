//! # parcelvisor
//!
//! **Parcelvisor** simulates a parcel-delivery pool: a fixed set of async
//! workers drains a shared queue under one global deadline, while a supervisor
//! collects their status reports through a separate channel.
//!
//! The crate is small on purpose: one run, one deadline, no retries. What it
//! shows is the lifecycle around the work: spawning, preemption of whatever is
//! still running at the deadline, and a two-phase shutdown where stop markers
//! go to the workers and a single Close marker goes to the supervisor.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                      ┌──────────────────────────────┐
//!                      │   Manager (run orchestrator) │
//!                      │   - Deadline (fixed budget)  │
//!                      │   - Bus (broadcast events)   │
//!                      │   - SubscriberSet listener   │
//!                      └──┬──────────────┬─────────┬──┘
//!           put(Parcel/Stop)             │ spawn   │ spawn
//!                         ▼              ▼         ▼
//!                ┌─────────────────┐  ┌──────────┐ ┌──────────┐
//!                │    WorkQueue    │─►│ Worker-1 │ │ Worker-N │ ...
//!                │ (MPMC, FIFO)    │─►│          │ │          │
//!                └─────────────────┘  └────┬─────┘ └────┬─────┘
//!                                          │ Report     │ Report
//!                                          ▼            ▼
//!                                   ┌─────────────────────────┐
//!     Manager ── ReportWriter::close ─►      report channel    │
//!                                   └────────────┬────────────┘
//!                                                ▼
//!                                        ┌──────────────┐
//!                                        │  Supervisor  │──► Ledger
//!                                        └──────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Manager::run(parcels)
//!   ├─► spawn workers, spawn supervisor, enqueue parcels
//!   ├─► wait: deadline │ interrupt token │ OS signal
//!   ├─► for each worker still running: log "too slow", abort
//!   ├─► join all workers
//!   ├─► enqueue one Stop per worker
//!   ├─► send Close, join supervisor
//!   └─► RunSummary { ledger, outcomes, interrupted, stop_markers_left }
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                       |
//! |-------------------|----------------------------------------------------------|------------------------------------------|
//! | **Run**           | Drive one simulation end to end.                         | [`Manager`], [`ManagerBuilder`]          |
//! | **Work**          | Plug in what "delivering" means.                         | [`Courier`], [`CourierFn`]               |
//! | **Channels**      | Queue of items, write/read report endpoints.             | [`WorkQueue`], [`ReportWriter`]          |
//! | **Subscriber API**| Observe lifecycle events.                                | [`Subscribe`], [`LogWriter`]             |
//! | **Errors**        | Typed setup and channel errors.                          | [`RuntimeError`], [`ConfigError`]        |
//! | **Configuration** | Pool size, budget, service times, env overrides.         | [`Config`], [`ServiceTime`]              |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use parcelvisor::{Config, Manager, Parcel, ServiceTime};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config {
//!         workers: 2,
//!         budget: Duration::from_millis(300),
//!         service_time: ServiceTime::fixed(Duration::from_millis(50)),
//!         handle_signals: false,
//!         ..Config::default()
//!     };
//!
//!     let summary = Manager::builder(cfg)
//!         .build()
//!         .run(Parcel::batch(["Laptop", "Mobile"]))
//!         .await?;
//!
//!     assert!(summary.ledger.closed);
//!     assert_eq!(summary.delivered().len(), 2);
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod couriers;
mod error;
mod events;
mod parcel;
mod policies;
mod subscribers;

pub mod logger;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{
    Deadline, Ledger, Manager, ManagerBuilder, Report, ReportReader, ReportWriter, RunSummary,
    Supervisor, WorkQueue, Worker, WorkerExit, WorkerOutcome, report_channel,
    wait_for_shutdown_signal,
};
pub use couriers::{Courier, CourierFn, CourierRef, SimulatedCourier};
pub use error::{ConfigError, QueueError, ReportError, RuntimeError};
pub use events::{Bus, Event, EventKind};
pub use parcel::{Item, Parcel, WorkerId};
pub use policies::ServiceTime;
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
