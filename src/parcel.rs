//! # Work items carried through the simulation.
//!
//! - [`Parcel`] - one unit of deliverable work, identified only by its label.
//! - [`Item`] - what actually travels on the work queue: a parcel or a stop marker.
//! - [`WorkerId`] - stable identity of a pool member, used in logs and reports.

use std::fmt;
use std::sync::Arc;

/// A unit of deliverable work.
///
/// Cloning is cheap (shared label). Two parcels are equal when their labels are.
///
/// ```
/// use parcelvisor::Parcel;
///
/// let p = Parcel::new("Laptop");
/// assert_eq!(p.label(), "Laptop");
/// assert_eq!(p.to_string(), "Laptop");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Parcel(Arc<str>);

impl Parcel {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    /// Builds a parcel list from labels, preserving order.
    pub fn batch<I, S>(labels: I) -> Vec<Parcel>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        labels.into_iter().map(Parcel::new).collect()
    }
}

impl fmt::Display for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Parcel {
    fn from(s: &str) -> Self {
        Parcel::new(s)
    }
}

/// Entry of the work queue.
///
/// `Stop` is a tagged variant rather than a reserved label, so no real parcel
/// can ever be mistaken for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    /// Deliver this parcel.
    Parcel(Parcel),
    /// Leave the retrieval loop.
    Stop,
}

/// Identity of a worker within one run (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub u32);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Worker-{}", self.0)
    }
}
