//! Policies shaping simulated work.
//!
//! - [`ServiceTime`] how long a single delivery takes.

mod service_time;

pub use service_time::ServiceTime;
