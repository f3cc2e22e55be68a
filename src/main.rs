//! # parcelvisor binary
//!
//! Runs the reference scenario: three workers, six parcels, a ten second
//! budget. Every knob can be overridden through `PARCELVISOR_*` variables
//! (see [`Config::from_env`]).
//!
//! | Variable                 | Meaning                          | Default |
//! |--------------------------|----------------------------------|---------|
//! | `PARCELVISOR_LOG`        | `EnvFilter` directive            | `info`  |
//! | `PARCELVISOR_LOG_FORMAT` | `text` or `json`                 | `text`  |

use std::sync::Arc;

use parcelvisor::{
    Config, LogWriter, Manager, Parcel, Subscribe,
    logger::{LoggerConfig, LoggerFormat, logger_init},
};

const PARCELS: [&str; 6] = ["Laptop", "Mobile", "Shoes", "Book", "Camera", "Watch"];

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let mut log_cfg = LoggerConfig::console();
    if let Ok(level) = std::env::var("PARCELVISOR_LOG") {
        log_cfg.level = level;
    }
    if let Ok(format) = std::env::var("PARCELVISOR_LOG_FORMAT") {
        log_cfg.format = format.parse::<LoggerFormat>()?;
    }
    logger_init(&log_cfg)?;

    let cfg = Config::from_env()?;
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];

    println!("=== Parcel Delivery Simulation ===");

    let summary = Manager::builder(cfg)
        .with_subscribers(subs)
        .build()
        .run(Parcel::batch(PARCELS))
        .await?;

    println!("=== Simulation Ended ===");

    tracing::debug!(
        delivered = summary.delivered().len(),
        terminated = summary.terminated().len(),
        stop_markers_left = summary.stop_markers_left,
        "run summary"
    );
    Ok(())
}
