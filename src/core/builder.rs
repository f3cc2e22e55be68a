use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    couriers::{CourierRef, SimulatedCourier},
    subscribers::Subscribe,
};

use super::manager::Manager;

/// Builder for constructing a [`Manager`] with optional parts.
pub struct ManagerBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    courier: Option<CourierRef>,
    interrupt: Option<CancellationToken>,
}

impl ManagerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            courier: None,
            interrupt: None,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Replaces the default [`SimulatedCourier`].
    pub fn with_courier(mut self, courier: CourierRef) -> Self {
        self.courier = Some(courier);
        self
    }

    /// Uses an external token to interrupt the deadline wait.
    pub fn with_interrupt(mut self, token: CancellationToken) -> Self {
        self.interrupt = Some(token);
        self
    }

    /// Builds the manager; the default courier samples `cfg.service_time`.
    pub fn build(self) -> Manager {
        let courier = self
            .courier
            .unwrap_or_else(|| Arc::new(SimulatedCourier::new(self.cfg.service_time)));
        let interrupt = self.interrupt.unwrap_or_default();

        Manager::new_internal(self.cfg, self.subscribers, courier, interrupt)
    }
}
