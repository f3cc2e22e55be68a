//! # Simulated courier: sleeps for a [`ServiceTime`] sample.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::{couriers::courier::Courier, parcel::Parcel, policies::ServiceTime};

/// Default courier used by the manager.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedCourier {
    service_time: ServiceTime,
}

impl SimulatedCourier {
    pub fn new(service_time: ServiceTime) -> Self {
        Self { service_time }
    }
}

#[async_trait]
impl Courier for SimulatedCourier {
    async fn deliver(&self, parcel: &Parcel) -> Duration {
        let d = self.service_time.sample(parcel);
        time::sleep(d).await;
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sleeps_for_the_sampled_duration() {
        let courier = SimulatedCourier::new(ServiceTime::fixed(Duration::from_secs(4)));
        let start = time::Instant::now();

        let d = courier.deliver(&Parcel::new("Book")).await;

        assert_eq!(d, Duration::from_secs(4));
        assert!(start.elapsed() >= Duration::from_secs(4));
    }
}
