//! Flat line format for pipes and stations.
//!
//! ```text
//! PIPES 2
//! 1|Trunk A|12.5|700|0
//! 2|Auto_Pipe_2|50|700|1
//! STATIONS 1
//! 1|North|5|3|2
//! ```
//!
//! Pipe lines are `id|name|length_km|diameter_mm|under_repair`, station lines
//! are `id|name|total|working|class`. In-use flags and network edges are not
//! stored.

use std::str::FromStr;

use pn_assets::{AssetRegistry, CompressorStation, NewPipe, NewStation, PipeSegment};
use pn_core::{CapacityClass, PipeId, StationId};

use crate::{StoreError, StoreResult};

const PIPES: &str = "PIPES";
const STATIONS: &str = "STATIONS";

/// Render every record in the registry.
pub fn render_registry(registry: &AssetRegistry) -> String {
    let pipes = registry.pipes().iter().map(|p| {
        format!(
            "{}|{}|{}|{}|{}",
            p.id,
            p.name,
            p.length_km(),
            p.diameter.mm(),
            u8::from(p.under_repair)
        )
    });
    let stations = registry.stations().iter().map(|s| {
        format!(
            "{}|{}|{}|{}|{}",
            s.id,
            s.name,
            s.total_workshops(),
            s.working_workshops(),
            s.class
        )
    });

    let mut lines = Vec::with_capacity(registry.pipes().len() + registry.stations().len() + 2);
    lines.push(format!("{PIPES} {}", registry.pipes().len()));
    lines.extend(pipes);
    lines.push(format!("{STATIONS} {}", registry.stations().len()));
    lines.extend(stations);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Pipes,
    Stations,
}

/// Parse a full data file into a fresh registry.
pub fn parse_registry(text: &str) -> StoreResult<AssetRegistry> {
    let mut pipes = Vec::new();
    let mut stations = Vec::new();
    let mut declared_pipes = None;
    let mut declared_stations = None;
    let mut section = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if let Some((header, count)) = parse_header(line, line_no)? {
            match header {
                Section::Pipes => declared_pipes = Some(count),
                Section::Stations => declared_stations = Some(count),
            }
            section = Some(header);
            continue;
        }

        match section {
            Some(Section::Pipes) => pipes.push(parse_pipe(line, line_no)?),
            Some(Section::Stations) => stations.push(parse_station(line, line_no)?),
            None => {
                return Err(StoreError::Parse {
                    line: line_no,
                    message: "record before any section header".to_string(),
                });
            }
        }
    }

    check_count(PIPES, declared_pipes, pipes.len())?;
    check_count(STATIONS, declared_stations, stations.len())?;

    Ok(AssetRegistry::from_records(pipes, stations)?)
}

fn check_count(section: &'static str, declared: Option<usize>, found: usize) -> StoreResult<()> {
    match declared {
        Some(declared) if declared != found => Err(StoreError::CountMismatch {
            section,
            declared,
            found,
        }),
        _ => Ok(()),
    }
}

fn parse_header(line: &str, line_no: usize) -> StoreResult<Option<(Section, usize)>> {
    let mut words = line.split_whitespace();
    let section = match words.next() {
        Some(PIPES) => Section::Pipes,
        Some(STATIONS) => Section::Stations,
        _ => return Ok(None),
    };
    let count = words
        .next()
        .and_then(|w| w.parse::<usize>().ok())
        .ok_or_else(|| StoreError::Parse {
            line: line_no,
            message: "section header needs a record count".to_string(),
        })?;
    Ok(Some((section, count)))
}

fn split_fields(line: &str, line_no: usize) -> StoreResult<[&str; 5]> {
    let fields: Vec<&str> = line.split('|').collect();
    <[&str; 5]>::try_from(fields).map_err(|fields| StoreError::Parse {
        line: line_no,
        message: format!("expected 5 '|'-separated fields, found {}", fields.len()),
    })
}

fn field<T: FromStr>(raw: &str, what: &str, line_no: usize) -> StoreResult<T> {
    raw.trim().parse().map_err(|_| StoreError::Parse {
        line: line_no,
        message: format!("invalid {what}: {raw:?}"),
    })
}

fn flag(raw: &str, line_no: usize) -> StoreResult<bool> {
    match raw.trim() {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        other => Err(StoreError::Parse {
            line: line_no,
            message: format!("invalid repair flag: {other:?}"),
        }),
    }
}

fn record_error(line_no: usize, err: pn_assets::AssetError) -> StoreError {
    StoreError::Parse {
        line: line_no,
        message: err.to_string(),
    }
}

fn parse_pipe(line: &str, line_no: usize) -> StoreResult<PipeSegment> {
    let [id, name, length, diameter, repair] = split_fields(line, line_no)?;
    let id = PipeId::new(field(id, "pipe id", line_no)?).ok_or_else(|| StoreError::Parse {
        line: line_no,
        message: "pipe id must be positive".to_string(),
    })?;
    let diameter = CapacityClass::from_mm(field(diameter, "diameter", line_no)?)
        .map_err(|e| record_error(line_no, e.into()))?;
    let spec = NewPipe {
        name: name.to_string(),
        length_km: field(length, "length", line_no)?,
        diameter,
    };
    PipeSegment::restore(id, spec, flag(repair, line_no)?).map_err(|e| record_error(line_no, e))
}

fn parse_station(line: &str, line_no: usize) -> StoreResult<CompressorStation> {
    let [id, name, total, working, class] = split_fields(line, line_no)?;
    let id = StationId::new(field(id, "station id", line_no)?).ok_or_else(|| {
        StoreError::Parse {
            line: line_no,
            message: "station id must be positive".to_string(),
        }
    })?;
    let spec = NewStation {
        name: name.to_string(),
        total_workshops: field(total, "total workshops", line_no)?,
        working_workshops: field(working, "working workshops", line_no)?,
        class: field(class, "station class", line_no)?,
    };
    CompressorStation::new(id, spec).map_err(|e| record_error(line_no, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "PIPES 2\n\
                          1|Trunk A|12.5|700|0\n\
                          3|Spur east|4|500|1\n\
                          STATIONS 1\n\
                          2|North hub|5|3|2\n";

    #[test]
    fn parses_sample() {
        let reg = parse_registry(SAMPLE).unwrap();
        assert_eq!(reg.pipes().len(), 2);
        let spur = reg.pipe(PipeId::new(3).unwrap()).unwrap();
        assert_eq!(spur.name, "Spur east");
        assert!(spur.under_repair);
        assert!(!spur.is_in_use());
        let hub = reg.station(StationId::new(2).unwrap()).unwrap();
        assert_eq!(hub.working_workshops(), 3);
        assert_eq!(hub.class, 2);
    }

    #[test]
    fn render_matches_line_layout() {
        let reg = parse_registry(SAMPLE).unwrap();
        let text = render_registry(&reg);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "PIPES 2",
                "1|Trunk A|12.5|700|0",
                "3|Spur east|4|500|1",
                "STATIONS 1",
                "2|North hub|5|3|2",
            ]
        );
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let text = "PIPES 1\r\n\r\n1|A|1|500|false\r\nSTATIONS 0\r\n";
        let reg = parse_registry(text).unwrap();
        assert_eq!(reg.pipes()[0].name, "A");
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let err = parse_registry("PIPES 1\n1|A|1|500\n").unwrap_err();
        match err {
            StoreError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("5"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn record_before_header_is_rejected() {
        assert!(matches!(
            parse_registry("1|A|1|500|0\n"),
            Err(StoreError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let err = parse_registry("PIPES 2\n1|A|1|500|0\nSTATIONS 0\n").unwrap_err();
        assert!(matches!(
            err,
            StoreError::CountMismatch {
                section: "PIPES",
                declared: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn invalid_station_values_are_rejected() {
        let err = parse_registry("STATIONS 1\n1|S|2|3|1\n").unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 2, .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_registry("PIPES 2\n1|A|1|500|0\n1|B|1|500|0\n").unwrap_err();
        assert!(matches!(err, StoreError::Asset(_)));
    }

    #[test]
    fn empty_text_is_an_empty_registry() {
        let reg = parse_registry("").unwrap();
        assert!(reg.pipes().is_empty());
        assert!(reg.stations().is_empty());
    }

    #[test]
    fn loaded_max_identity_blocks_new_pipes() {
        let mut reg = parse_registry("PIPES 1\n4294967295|Loaded|1|700|1\nSTATIONS 0\n").unwrap();
        let added = reg.add_pipe(NewPipe {
            name: "Fresh".into(),
            length_km: 2.0,
            diameter: CapacityClass::from_mm(700).unwrap(),
        });
        assert!(added.is_err());
        assert_eq!(reg.pipes().len(), 1);
    }
}
