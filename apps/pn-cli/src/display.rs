//! One-line renderings of records and graph rows.

use pn_assets::{CompressorStation, PipeSegment};
use pn_graph::AdjacencyRow;

pub fn pipe_line(pipe: &PipeSegment) -> String {
    format!(
        "[ID:{}] {} | {}km, D{}mm | {} | {}",
        pipe.id,
        pipe.name,
        pipe.length_km(),
        pipe.diameter.mm(),
        if pipe.under_repair { "REPAIR" } else { "OK" },
        if pipe.is_in_use() { "IN USE" } else { "AVAILABLE" }
    )
}

pub fn station_line(station: &CompressorStation) -> String {
    format!(
        "[ID:{}] {} | {}/{} working | Unused: {}% | Class:{}",
        station.id,
        station.name,
        station.working_workshops(),
        station.total_workshops(),
        station.unused_percent().trunc(),
        station.class
    )
}

pub fn adjacency_line(row: &AdjacencyRow) -> String {
    let targets: Vec<String> = row
        .edges
        .iter()
        .map(|e| format!("Station {} (Pipe {}, D:{}mm)", e.target, e.pipe, e.class.mm()))
        .collect();
    format!("Station {} -> {}", row.source, targets.join(" "))
}
