//! lt-core: stable foundation for labtrack.
//!
//! Contains:
//! - numeric (Real + finiteness guard)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{LtError, LtResult};
pub use numeric::*;
