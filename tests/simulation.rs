use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use parcelvisor::{
    Config, CourierFn, Event, EventKind, Manager, Parcel, Report, RunSummary, RuntimeError,
    ServiceTime, Subscribe, WorkerExit, WorkerId,
};

const SCENARIO: [&str; 6] = ["Laptop", "Mobile", "Shoes", "Book", "Camera", "Watch"];

fn scenario_cfg() -> Config {
    Config {
        handle_signals: false,
        ..Config::default()
    }
}

async fn run(cfg: Config) -> RunSummary {
    Manager::builder(cfg)
        .build()
        .run(Parcel::batch(SCENARIO))
        .await
        .expect("run should succeed")
}

#[derive(Default)]
struct Recorder {
    terminated: AtomicUsize,
    delivered: AtomicUsize,
    finished: AtomicUsize,
}

#[async_trait::async_trait]
impl Subscribe for Recorder {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::WorkerTerminated => self.terminated.fetch_add(1, Ordering::SeqCst),
            EventKind::ParcelDelivered => self.delivered.fetch_add(1, Ordering::SeqCst),
            EventKind::RunFinished => self.finished.fetch_add(1, Ordering::SeqCst),
            _ => 0,
        };
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}

#[tokio::test(start_paused = true)]
async fn reference_scenario_closes_cleanly() {
    let summary = run(scenario_cfg()).await;

    assert!(summary.ledger.closed);
    assert_eq!(summary.outcomes.len(), 3);
    assert_eq!(summary.stop_markers_left, 3);

    let delivered = summary.delivered();
    assert!(delivered.len() <= SCENARIO.len());
    for parcel in &delivered {
        assert!(SCENARIO.contains(&parcel.label()));
    }

    let mut labels: Vec<_> = delivered.iter().map(|p| p.label()).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), delivered.len(), "no parcel delivered twice");
}

#[tokio::test(start_paused = true)]
async fn deadline_below_min_service_time_terminates_everyone() {
    let cfg = Config {
        budget: Duration::from_secs(1),
        ..scenario_cfg()
    };
    let summary = run(cfg).await;

    assert_eq!(
        summary.terminated(),
        vec![WorkerId(1), WorkerId(2), WorkerId(3)]
    );
    assert!(summary.delivered().is_empty());
    assert!(summary.ledger.finished().is_empty());
    assert!(summary.ledger.closed);
}

#[tokio::test(start_paused = true)]
async fn seeded_runs_pair_parcels_with_the_same_durations() {
    let cfg = || Config {
        service_time: ServiceTime::default().with_seed(42),
        ..scenario_cfg()
    };

    let pairs = |s: &RunSummary| {
        let mut v: Vec<(String, Duration)> = s
            .ledger
            .delivered()
            .filter_map(|r| match r {
                Report::Delivered {
                    parcel, elapsed, ..
                } => Some((parcel.label().to_string(), *elapsed)),
                Report::Finished { .. } => None,
            })
            .collect();
        v.sort();
        v
    };

    let first = run(cfg()).await;
    let second = run(cfg()).await;

    assert_eq!(pairs(&first), pairs(&second));

    let st = ServiceTime::default().with_seed(42);
    for (label, elapsed) in pairs(&first) {
        assert_eq!(elapsed, st.sample(&Parcel::new(label.as_str())));
    }
}

#[tokio::test(start_paused = true)]
async fn voluntary_exits_report_finished_exactly_once() {
    let cfg = Config {
        budget: Duration::from_secs(30),
        service_time: ServiceTime::fixed(Duration::from_secs(2)),
        ..scenario_cfg()
    };
    let summary = run(cfg).await;

    assert!(summary.terminated().is_empty());
    assert_eq!(summary.delivered().len(), SCENARIO.len());

    let finished = summary.ledger.finished();
    for id in summary.voluntary() {
        assert_eq!(finished.iter().filter(|w| **w == id).count(), 1);
    }
    assert!(
        summary
            .outcomes
            .iter()
            .all(|o| o.exit == WorkerExit::Drained)
    );
}

#[tokio::test(start_paused = true)]
async fn reports_from_terminated_workers_stop_at_abort() {
    let cfg = Config {
        workers: 2,
        budget: Duration::from_secs(10),
        ..scenario_cfg()
    };
    // Whoever takes "Slow" is still on it at the deadline.
    let courier = CourierFn::arc(|parcel: Parcel| async move {
        let d = if parcel.label() == "Slow" {
            Duration::from_secs(60)
        } else {
            Duration::from_secs(1)
        };
        tokio::time::sleep(d).await;
        d
    });

    let summary = Manager::builder(cfg)
        .with_courier(courier)
        .build()
        .run(Parcel::batch(["Slow", "A", "B"]))
        .await
        .unwrap();

    let labels: Vec<_> = summary.delivered().iter().map(|p| p.label()).collect();
    assert!(!labels.contains(&"Slow"));
    assert_eq!(labels.len(), 2);
    assert_eq!(summary.terminated().len(), 1);
    assert_eq!(summary.voluntary().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_every_termination_before_run_returns() {
    let recorder = Arc::new(Recorder::default());
    let cfg = Config {
        budget: Duration::from_secs(1),
        ..scenario_cfg()
    };

    let summary = Manager::builder(cfg)
        .with_subscribers(vec![recorder.clone() as Arc<dyn Subscribe>])
        .build()
        .run(Parcel::batch(SCENARIO))
        .await
        .unwrap();

    assert_eq!(
        recorder.terminated.load(Ordering::SeqCst),
        summary.terminated().len()
    );
    assert_eq!(recorder.delivered.load(Ordering::SeqCst), 0);
    assert_eq!(recorder.finished.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_parcel_list_drains_and_closes() {
    let summary = Manager::builder(scenario_cfg())
        .build()
        .run(Vec::new())
        .await
        .unwrap();

    assert!(summary.ledger.closed);
    assert!(summary.delivered().is_empty());
    assert_eq!(summary.ledger.finished().len(), 3);
    assert!(summary.terminated().is_empty());
}

#[tokio::test(start_paused = true)]
async fn invalid_service_range_is_rejected_before_spawning() {
    let cfg = Config {
        service_time: ServiceTime::new(Duration::from_secs(5), Duration::from_secs(1)),
        ..scenario_cfg()
    };
    let err = Manager::builder(cfg)
        .build()
        .run(Parcel::batch(SCENARIO))
        .await
        .unwrap_err();

    assert!(matches!(err, RuntimeError::InvalidConfig(_)));
}
