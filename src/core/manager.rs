//! # Manager: builds the pool, enforces the deadline, drives shutdown.
//!
//! The [`Manager`] owns one run end to end. It creates the work queue and the
//! report channel, spawns the workers and the supervisor, hands out the parcels
//! and then waits out the time budget. Whatever is still running at the
//! deadline is aborted; afterwards the two-phase shutdown stops the pool and
//! closes the supervisor.
//!
//! ## Sequence
//! ```text
//! run(parcels)
//!   1. WorkQueue::new(), report::channel()
//!   2. spawn Worker-1..Worker-N        (queue clone + ReportWriter clone each)
//!   3. spawn Supervisor                (ReportReader)
//!   4. queue.put(Parcel) for each parcel, in order
//!   5. sleep_until(deadline)  ◄── or interrupt (token / OS signal)
//!   6. snapshot alive workers ─► abort each ─► join all
//!   7. queue.put(Stop) × N             (one per spawned worker)
//!   8. ReportWriter::close()  ─► join Supervisor ─► Ledger
//! ```
//!
//! ## Rules
//! - The full budget is always consumed unless an interrupt arrives; finishing
//!   early does not wake the manager.
//! - Termination is unconditional: an aborted worker stops at its current
//!   `await` and its parcel is abandoned (never requeued).
//! - The Close marker is sent strictly after every worker has been joined, so
//!   it is the last thing the supervisor sees.
//! - Events reach subscribers before `run` returns: the listener forwards the
//!   bus until `RunFinished`, then drains the [`SubscriberSet`].

use std::sync::Arc;

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{
    config::Config,
    core::{
        builder::ManagerBuilder,
        deadline::Deadline,
        queue::WorkQueue,
        report::{self, ReportWriter},
        shutdown,
        summary::{RunSummary, WorkerOutcome},
        supervisor::{Ledger, Supervisor},
        worker::{Worker, WorkerExit},
    },
    couriers::CourierRef,
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    parcel::{Item, Parcel, WorkerId},
    subscribers::{Subscribe, SubscriberSet},
};

/// Spawned worker and its join handle.
struct PoolEntry {
    id: WorkerId,
    join: JoinHandle<WorkerExit>,
}

/// Orchestrates one simulation run.
pub struct Manager {
    cfg: Config,
    bus: Bus,
    subscribers: Vec<Arc<dyn Subscribe>>,
    courier: CourierRef,
    interrupt: CancellationToken,
}

impl Manager {
    /// Creates a manager with the default courier and its own interrupt token.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        ManagerBuilder::new(cfg)
            .with_subscribers(subscribers)
            .build()
    }

    /// Returns a builder for configuring a manager.
    pub fn builder(cfg: Config) -> ManagerBuilder {
        ManagerBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        subscribers: Vec<Arc<dyn Subscribe>>,
        courier: CourierRef,
        interrupt: CancellationToken,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg,
            bus,
            subscribers,
            courier,
            interrupt,
        }
    }

    /// Token that ends the deadline wait early when cancelled.
    pub fn interrupt_token(&self) -> CancellationToken {
        self.interrupt.clone()
    }

    /// Runs the full sequence for `parcels` and reports what happened.
    ///
    /// Fails only on setup problems (invalid config, unusable queue) or if the
    /// supervisor task dies before confirming the close.
    pub async fn run(self, parcels: Vec<Parcel>) -> Result<RunSummary, RuntimeError> {
        self.cfg.validate()?;
        let listener = self.spawn_listener();

        let result = self.drive(parcels).await;
        self.finish(listener, result).await
    }

    async fn drive(&self, parcels: Vec<Parcel>) -> Result<RunSummary, RuntimeError> {
        let queue = WorkQueue::new();
        let (reports, reader) = report::channel();

        let pool = self.spawn_workers(&queue, &reports);
        let supervisor = tokio::spawn(Supervisor::new(reader, self.bus.clone()).run());

        self.enqueue(&queue, parcels)?;

        let deadline = Deadline::after(self.cfg.budget);
        let interrupted = self.wait_for_deadline(&deadline).await;

        let outcomes = self.terminate_slow(pool).await;
        self.queue_stop_markers(&queue)?;

        let ledger = self.close_supervisor(reports, supervisor).await?;

        Ok(RunSummary {
            ledger,
            outcomes,
            interrupted,
            stop_markers_left: queue.len(),
        })
    }

    /// Ends the event stream and waits for subscribers, whatever the outcome.
    async fn finish<T>(
        &self,
        listener: JoinHandle<()>,
        result: Result<T, RuntimeError>,
    ) -> Result<T, RuntimeError> {
        let mut ev = Event::now(EventKind::RunFinished);
        if let Err(e) = &result {
            ev = ev.with_reason(e.as_label());
        }
        self.bus.publish(ev);

        if let Err(e) = listener.await {
            warn!(error = %e, "[Manager] event listener ended abnormally");
        }
        result
    }

    /// Forwards bus events to the subscriber set until `RunFinished`, then drains it.
    fn spawn_listener(&self) -> JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        let set = SubscriberSet::new(self.subscribers.clone(), self.bus.clone());

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => {
                        let last = ev.kind == EventKind::RunFinished;
                        set.emit(&ev);
                        if last {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            set.shutdown().await;
        })
    }

    fn spawn_workers(&self, queue: &WorkQueue, reports: &ReportWriter) -> Vec<PoolEntry> {
        (1..=self.cfg.workers)
            .map(|n| {
                let id = WorkerId(u32::try_from(n).unwrap_or(u32::MAX));
                let worker = Worker::new(
                    id,
                    queue.clone(),
                    reports.clone(),
                    Arc::clone(&self.courier),
                    self.cfg.idle_timeout,
                    self.bus.clone(),
                );
                self.bus
                    .publish(Event::now(EventKind::WorkerSpawned).with_worker(id));
                PoolEntry {
                    id,
                    join: tokio::spawn(worker.run()),
                }
            })
            .collect()
    }

    fn enqueue(&self, queue: &WorkQueue, parcels: Vec<Parcel>) -> Result<(), RuntimeError> {
        for parcel in parcels {
            self.bus
                .publish(Event::now(EventKind::ParcelQueued).with_parcel(parcel.label()));
            queue.put(Item::Parcel(parcel))?;
        }
        Ok(())
    }

    /// Sleeps until the deadline; returns the interrupt source if woken early.
    async fn wait_for_deadline(&self, deadline: &Deadline) -> Option<String> {
        let interrupted = tokio::select! {
            _ = deadline.elapsed() => None,
            _ = self.interrupt.cancelled() => Some("cancelled".to_string()),
            name = os_signal(self.cfg.handle_signals) => Some(name.to_string()),
        };

        match &interrupted {
            None => {
                self.bus.publish(Event::now(EventKind::DeadlineReached));
                info!("[Manager] Time's up! Checking worker speed...");
            }
            Some(source) => {
                self.bus
                    .publish(Event::now(EventKind::InterruptReceived).with_reason(source.as_str()));
                info!(
                    "[Manager] Interrupted ({source}) with {:?} left. Checking worker speed...",
                    deadline.remaining()
                );
            }
        }
        interrupted
    }

    /// Aborts every worker alive right now, then joins the whole pool.
    async fn terminate_slow(&self, pool: Vec<PoolEntry>) -> Vec<WorkerOutcome> {
        let alive: Vec<bool> = pool.iter().map(|e| !e.join.is_finished()).collect();

        for (entry, _) in pool.iter().zip(&alive).filter(|(_, alive)| **alive) {
            warn!("[Manager] {} too slow → Terminating.", entry.id);
            self.bus
                .publish(Event::now(EventKind::WorkerTerminated).with_worker(entry.id));
            entry.join.abort();
        }

        let mut outcomes = Vec::with_capacity(pool.len());
        for (entry, was_alive) in pool.into_iter().zip(alive) {
            let joined = join_worker(entry.id, entry.join).await;
            let exit = if was_alive {
                WorkerExit::Terminated
            } else {
                joined
            };
            outcomes.push(WorkerOutcome { id: entry.id, exit });
        }
        outcomes
    }

    /// One stop marker per spawned worker, whether or not it is still around.
    fn queue_stop_markers(&self, queue: &WorkQueue) -> Result<usize, RuntimeError> {
        let n = self.cfg.workers;
        for _ in 0..n {
            queue.put(Item::Stop)?;
        }
        self.bus
            .publish(Event::now(EventKind::StopMarkersQueued).with_reason(format!("count={n}")));
        Ok(n)
    }

    async fn close_supervisor(
        &self,
        reports: ReportWriter,
        supervisor: JoinHandle<Ledger>,
    ) -> Result<Ledger, RuntimeError> {
        if let Err(e) = reports.close() {
            warn!(error = %e, "[Manager] close marker not delivered");
        }
        supervisor
            .await
            .map_err(|e| RuntimeError::SupervisorLost {
                reason: e.to_string(),
            })
    }
}

async fn join_worker(id: WorkerId, join: JoinHandle<WorkerExit>) -> WorkerExit {
    match join.await {
        Ok(exit) => exit,
        Err(e) if e.is_panic() => {
            error!("[Manager] {id} panicked");
            WorkerExit::Panicked
        }
        Err(_) => WorkerExit::Terminated,
    }
}

/// Resolves with the signal name; never resolves when disabled or unavailable.
async fn os_signal(enabled: bool) -> &'static str {
    if enabled {
        match shutdown::wait_for_shutdown_signal().await {
            Ok(name) => return name,
            Err(e) => warn!(error = %e, "signal handlers unavailable"),
        }
    }
    std::future::pending().await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::policies::ServiceTime;

    #[derive(Default)]
    struct Finishes(AtomicUsize);

    #[async_trait]
    impl Subscribe for Finishes {
        async fn on_event(&self, ev: &Event) {
            if ev.kind == EventKind::RunFinished {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn name(&self) -> &'static str {
            "finishes"
        }
    }

    fn cfg(workers: usize, budget: u64, service: ServiceTime) -> Config {
        Config {
            workers,
            budget: Duration::from_secs(budget),
            idle_timeout: Duration::from_secs(3),
            service_time: service,
            bus_capacity: 1024,
            handle_signals: false,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn zero_workers_is_a_setup_error() {
        let err = Manager::builder(cfg(0, 1, ServiceTime::default()))
            .build()
            .run(Parcel::batch(["A"]))
            .await
            .unwrap_err();
        assert_eq!(err.as_label(), "runtime_invalid_config");
    }

    #[tokio::test(start_paused = true)]
    async fn always_consumes_the_full_budget() {
        let start = tokio::time::Instant::now();
        let summary = Manager::builder(cfg(2, 20, ServiceTime::fixed(Duration::from_secs(1))))
            .build()
            .run(Parcel::batch(["A", "B"]))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_secs(20));
        assert!(summary.terminated().is_empty());
        assert_eq!(summary.voluntary().len(), 2);
        assert_eq!(summary.delivered().len(), 2);
        assert_eq!(summary.stop_markers_left, 2);
        assert!(summary.interrupted.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_token_cuts_the_wait_short() {
        let manager = Manager::builder(cfg(1, 60, ServiceTime::fixed(Duration::from_secs(30))))
            .build();
        let token = manager.interrupt_token();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            token.cancel();
        });

        let start = tokio::time::Instant::now();
        let summary = manager.run(Parcel::batch(["A"])).await.unwrap();

        assert!(start.elapsed() < Duration::from_secs(30));
        assert_eq!(summary.interrupted.as_deref(), Some("cancelled"));
        assert_eq!(summary.terminated(), vec![WorkerId(1)]);
        assert!(summary.delivered().is_empty());
        assert!(summary.ledger.closed);
    }

    #[tokio::test(start_paused = true)]
    async fn huge_budget_from_env_runs_until_interrupted() {
        let max = u64::MAX.to_string();
        let mut cfg = Config::from_lookup(|key: &str| {
            (key == "PARCELVISOR_BUDGET_SECS").then(|| max.clone())
        })
        .unwrap();
        cfg.handle_signals = false;

        let manager = Manager::builder(cfg).build();
        manager.interrupt_token().cancel();

        let summary = manager.run(Parcel::batch(["A"])).await.unwrap();
        assert_eq!(summary.interrupted.as_deref(), Some("cancelled"));
        assert!(summary.ledger.closed);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_run_still_flushes_subscribers() {
        let seen = Arc::new(Finishes::default());
        let manager = Manager::new(
            cfg(1, 1, ServiceTime::default()),
            vec![seen.clone() as Arc<dyn Subscribe>],
        );
        let listener = manager.spawn_listener();
        let lost: Result<(), RuntimeError> = Err(RuntimeError::SupervisorLost {
            reason: "task panicked".into(),
        });

        let res = tokio::time::timeout(Duration::from_secs(5), manager.finish(listener, lost))
            .await
            .expect("listener should stop after RunFinished");

        assert_eq!(res.unwrap_err().as_label(), "runtime_supervisor_lost");
        assert_eq!(seen.0.load(Ordering::SeqCst), 1);
    }
}
