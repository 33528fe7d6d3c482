//! Pipe allocation for new connections.
//!
//! Allocation looks for an existing segment of the requested capacity class
//! that is neither under repair nor in use, and lets a [`PipeSelector`] pick
//! among the candidates. When nothing is picked a new segment is synthesized
//! and appended to the registry.
//!
//! Allocation never marks the segment in use. The connection that commits
//! the edge owns that step (see `AssetRegistry::mark_in_use`).

use pn_core::{CapacityClass, PipeId, ensure_positive};

use crate::error::{AssetError, AssetResult};
use crate::pipe::{NewPipe, PipeSegment};
use crate::registry::AssetRegistry;

/// Length given to synthesized segments. A policy value, not a physical one.
pub const DEFAULT_AUTO_PIPE_LENGTH_KM: f64 = 50.0;

/// Name prefix for synthesized segments; the identity is appended.
pub const DEFAULT_AUTO_PIPE_PREFIX: &str = "Auto_Pipe_";

/// Eligible segments for `class`, in registry order.
pub fn eligible_pipes(registry: &AssetRegistry, class: CapacityClass) -> Vec<&PipeSegment> {
    registry
        .pipes()
        .iter()
        .filter(|p| p.diameter == class && p.is_available())
        .collect()
}

/// Chooses one of the eligible candidates, or none to request a new segment.
pub trait PipeSelector {
    fn select(&mut self, candidates: &[&PipeSegment]) -> AssetResult<Option<PipeId>>;
}

/// Non-interactive selector: always takes the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEligible;

impl PipeSelector for FirstEligible {
    fn select(&mut self, candidates: &[&PipeSegment]) -> AssetResult<Option<PipeId>> {
        Ok(candidates.first().map(|p| p.id))
    }
}

/// Selector that never reuses an existing segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCreate;

impl PipeSelector for AlwaysCreate {
    fn select(&mut self, _candidates: &[&PipeSegment]) -> AssetResult<Option<PipeId>> {
        Ok(None)
    }
}

/// Outcome of an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub pipe: PipeId,
    pub class: CapacityClass,
    /// True when the segment was synthesized by this allocation.
    pub created: bool,
}

/// Resolves a capacity class to a pipe segment.
#[derive(Debug, Clone)]
pub struct PipeAllocator {
    auto_length_km: f64,
    auto_prefix: String,
}

impl Default for PipeAllocator {
    fn default() -> Self {
        Self {
            auto_length_km: DEFAULT_AUTO_PIPE_LENGTH_KM,
            auto_prefix: DEFAULT_AUTO_PIPE_PREFIX.to_string(),
        }
    }
}

impl PipeAllocator {
    /// Allocator with a custom synthesis policy.
    pub fn new(auto_length_km: f64, auto_prefix: impl Into<String>) -> AssetResult<Self> {
        let auto_length_km = ensure_positive(auto_length_km, "auto pipe length")?;
        Ok(Self {
            auto_length_km,
            auto_prefix: auto_prefix.into(),
        })
    }

    pub fn auto_length_km(&self) -> f64 {
        self.auto_length_km
    }

    /// Find or synthesize a segment for `class`.
    ///
    /// A selection outside the candidate set is rejected and nothing is
    /// created.
    pub fn allocate(
        &self,
        registry: &mut AssetRegistry,
        class: CapacityClass,
        selector: &mut dyn PipeSelector,
    ) -> AssetResult<Allocation> {
        let chosen = {
            let candidates = eligible_pipes(registry, class);
            tracing::debug!(%class, candidates = candidates.len(), "allocating pipe");
            if candidates.is_empty() {
                None
            } else {
                let choice = selector.select(&candidates)?;
                if let Some(id) = choice {
                    if !candidates.iter().any(|p| p.id == id) {
                        return Err(AssetError::IneligiblePipe { pipe: id, class });
                    }
                }
                choice
            }
        };

        if let Some(pipe) = chosen {
            return Ok(Allocation {
                pipe,
                class,
                created: false,
            });
        }

        let prefix = &self.auto_prefix;
        let length_km = self.auto_length_km;
        let pipe = registry.add_pipe_with(|id| NewPipe {
            name: format!("{prefix}{id}"),
            length_km,
            diameter: class,
        })?;
        tracing::debug!(%pipe, %class, "synthesized pipe");
        Ok(Allocation {
            pipe,
            class,
            created: true,
        })
    }
}
