//! pn-core: stable foundation for pipenet.
//!
//! Contains:
//! - ids (asset identities + monotonic id sequences)
//! - capacity (pipe diameter / capacity class)
//! - units (uom length types + constructors)
//! - numeric (Real + float and name checks)
//! - error (shared error types)

pub mod capacity;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use capacity::CapacityClass;
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
