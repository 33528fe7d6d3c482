//! Structured events produced by network operations.
//!
//! The service layer never writes logs itself; it records events and the
//! session renders them with `Display` into the activity log.

use std::fmt;
use std::path::PathBuf;

use pn_core::{CapacityClass, PipeId, StationId};

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkEvent {
    PipeAdded {
        id: PipeId,
        name: String,
    },
    StationAdded {
        id: StationId,
        name: String,
    },
    PipesSearchedByName {
        query: String,
        hits: usize,
    },
    PipesSearchedByRepair {
        under_repair: bool,
        hits: usize,
    },
    StationsSearchedByName {
        query: String,
        hits: usize,
    },
    StationsSearchedByUnused {
        min_percent: f64,
        hits: usize,
    },
    RepairToggled {
        count: usize,
    },
    PipesDeleted {
        count: usize,
    },
    WorkshopAdjusted {
        station: StationId,
        delta: i32,
        working: u32,
    },
    PipeAllocated {
        pipe: PipeId,
        class: CapacityClass,
        created: bool,
    },
    StationsConnected {
        source: StationId,
        target: StationId,
        pipe: PipeId,
    },
    OrderComputed {
        ordered: usize,
        known: usize,
    },
    Saved {
        path: PathBuf,
        pipes: usize,
        stations: usize,
    },
    Loaded {
        path: PathBuf,
        pipes: usize,
        stations: usize,
    },
}

impl fmt::Display for NetworkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkEvent::PipeAdded { id, name } => {
                write!(f, "Added pipe - ID: {}, Name: {}", id, name)
            }
            NetworkEvent::StationAdded { id, name } => {
                write!(f, "Added station - ID: {}, Name: {}", id, name)
            }
            NetworkEvent::PipesSearchedByName { query, hits } => {
                write!(f, "Search pipes by name: '{}' -> {}", query, hits)
            }
            NetworkEvent::PipesSearchedByRepair { under_repair, hits } => {
                let flag = if *under_repair { "yes" } else { "no" };
                write!(f, "Search pipes by repair: {} -> {}", flag, hits)
            }
            NetworkEvent::StationsSearchedByName { query, hits } => {
                write!(f, "Search stations by name: '{}' -> {}", query, hits)
            }
            NetworkEvent::StationsSearchedByUnused { min_percent, hits } => {
                write!(
                    f,
                    "Search stations by unused >= {}% -> {}",
                    min_percent.trunc(),
                    hits
                )
            }
            NetworkEvent::RepairToggled { count } => {
                write!(f, "Batch: toggled repair on {} pipe(s)", count)
            }
            NetworkEvent::PipesDeleted { count } => {
                write!(f, "Batch: deleted {} pipe(s)", count)
            }
            NetworkEvent::WorkshopAdjusted {
                station,
                delta,
                working,
            } => {
                let verb = if *delta >= 0 { "started" } else { "stopped" };
                write!(
                    f,
                    "Station {}: {} workshop (working: {})",
                    station, verb, working
                )
            }
            NetworkEvent::PipeAllocated {
                pipe,
                class,
                created,
            } => {
                if *created {
                    write!(f, "Created pipe {} for {} connection", pipe, class)
                } else {
                    write!(f, "Reused pipe {} for {} connection", pipe, class)
                }
            }
            NetworkEvent::StationsConnected {
                source,
                target,
                pipe,
            } => {
                write!(
                    f,
                    "Connected stations: {} -> {} using pipe {}",
                    source, target, pipe
                )
            }
            NetworkEvent::OrderComputed { ordered, known } => {
                if ordered == known {
                    write!(f, "Topological sort completed: {} station(s)", ordered)
                } else {
                    write!(
                        f,
                        "Topological sort found a cycle: {} of {} station(s) ordered",
                        ordered, known
                    )
                }
            }
            NetworkEvent::Saved {
                path,
                pipes,
                stations,
            } => {
                write!(
                    f,
                    "Saved to '{}' - pipes:{}, stations:{}",
                    path.display(),
                    pipes,
                    stations
                )
            }
            NetworkEvent::Loaded {
                path,
                pipes,
                stations,
            } => {
                write!(
                    f,
                    "Loaded from '{}' - pipes:{}, stations:{}",
                    path.display(),
                    pipes,
                    stations
                )
            }
        }
    }
}
