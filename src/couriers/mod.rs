//! # Courier abstractions.
//!
//! - [`Courier`] - trait for performing one delivery
//! - [`CourierRef`] - shared reference to a courier (`Arc<dyn Courier>`)
//! - [`CourierFn`] - closure-backed courier
//! - [`SimulatedCourier`] - sleeps for a random [`ServiceTime`](crate::ServiceTime)

mod courier;
mod courier_fn;
mod simulated;

pub use courier::{Courier, CourierRef};
pub use courier_fn::CourierFn;
pub use simulated::SimulatedCourier;
