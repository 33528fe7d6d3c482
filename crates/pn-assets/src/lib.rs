//! pn-assets: asset records and the pipe allocator.
//!
//! Provides:
//! - Pipe segments and compressor stations with validated constructors
//! - `AssetRegistry`: identity-keyed record collections with search and batch edits
//! - `PipeAllocator`: resolves a capacity class to an eligible or synthesized pipe
//!
//! # Example
//!
//! ```
//! use pn_assets::{AssetRegistry, FirstEligible, NewPipe, PipeAllocator};
//! use pn_core::CapacityClass;
//!
//! let mut registry = AssetRegistry::new();
//! let class = CapacityClass::from_mm(700).unwrap();
//! let existing = registry
//!     .add_pipe(NewPipe { name: "Trunk".into(), length_km: 12.0, diameter: class })
//!     .unwrap();
//!
//! let allocation = PipeAllocator::default()
//!     .allocate(&mut registry, class, &mut FirstEligible)
//!     .unwrap();
//! assert_eq!(allocation.pipe, existing);
//! assert!(!allocation.created);
//! ```

pub mod allocator;
pub mod error;
pub mod pipe;
pub mod registry;
pub mod station;

// Re-exports for ergonomics
pub use allocator::{
    AlwaysCreate, Allocation, DEFAULT_AUTO_PIPE_LENGTH_KM, DEFAULT_AUTO_PIPE_PREFIX, FirstEligible,
    PipeAllocator, PipeSelector, eligible_pipes,
};
pub use error::{AssetError, AssetResult};
pub use pipe::{NewPipe, PipeSegment};
pub use registry::AssetRegistry;
pub use station::{CompressorStation, NewStation};
