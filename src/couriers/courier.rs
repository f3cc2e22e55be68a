//! # Courier abstraction.
//!
//! A [`Courier`] performs the actual "work" a worker does with a parcel. The
//! worker only drives the loop (retrieve → deliver → report); what delivery
//! means is up to the courier.
//!
//! Delivery is an `await`: a worker aborted at the deadline is dropped at that
//! suspension point and never reaches its report.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::parcel::Parcel;

/// # Asynchronous delivery of one parcel.
///
/// Returns the elapsed delivery time that ends up in the completion report.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use parcelvisor::{Courier, Parcel};
///
/// struct Teleport;
///
/// #[async_trait]
/// impl Courier for Teleport {
///     async fn deliver(&self, _parcel: &Parcel) -> Duration {
///         Duration::ZERO
///     }
/// }
/// ```
#[async_trait]
pub trait Courier: Send + Sync + 'static {
    async fn deliver(&self, parcel: &Parcel) -> Duration;
}

/// Shared handle to a courier (`Arc<dyn Courier>`).
pub type CourierRef = Arc<dyn Courier>;
