//! # rmai-core
//!
//! Types shared by every rmai crate:
//!
//! - [`Location`], [`Resident`] and [`Origin`], the records served by the
//!   upstream dataset and consumed by generation, scoring and search.
//! - [`RetryPolicy`] and [`retry`], the bounded exponential backoff used for
//!   every remote call.

pub mod location;
pub mod retry;

pub use location::{Location, Origin, Resident};
pub use retry::{RetryExhausted, RetryPolicy, retry};
