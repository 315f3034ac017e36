//! Reputation aggregator — queries two independent scoring services for an
//! address set, tolerates partial failures per address, and reduces the
//! per-target results to one maximum-confidence score per provider.
//!
//! The two providers are independently optional (each enabled by the
//! presence of a credential) and independent in failure: a dead stamp
//! service never blocks the builder score, and vice versa. Per-target
//! sub-requests within a provider run concurrently and the provider waits
//! for all of them before reducing — no early cancellation.

pub mod aggregate;
pub mod builder;
pub mod error;
pub mod stamp;

pub use aggregate::ReputationAggregator;
pub use builder::{BuilderClient, ScoreTarget};
pub use error::ReputationError;
pub use stamp::StampClient;
