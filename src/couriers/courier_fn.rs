//! # Function-backed courier (`CourierFn`)
//!
//! [`CourierFn`] wraps a closure `F: Fn(Parcel) -> Fut`, producing a fresh
//! future per delivery. Shared state, if needed, goes into an explicit `Arc`
//! captured by the closure.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use parcelvisor::{CourierFn, CourierRef, Parcel};
//!
//! let c: CourierRef = CourierFn::arc(|parcel: Parcel| async move {
//!     let d = Duration::from_millis(100 * parcel.label().len() as u64);
//!     tokio::time::sleep(d).await;
//!     d
//! });
//! # let _ = c;
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::couriers::courier::Courier;
use crate::parcel::Parcel;

/// Function-backed courier implementation.
pub struct CourierFn<F> {
    f: F,
}

impl<F> CourierFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the courier and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Courier for CourierFn<F>
where
    F: Fn(Parcel) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Duration> + Send + 'static,
{
    async fn deliver(&self, parcel: &Parcel) -> Duration {
        (self.f)(parcel.clone()).await
    }
}
