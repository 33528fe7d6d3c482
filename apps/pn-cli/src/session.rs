//! Interactive menu session.
//!
//! The menu is a table of `(key, group, label, action)` entries; the loop
//! reads a key, runs the matching action, then writes every event the
//! network recorded to the activity log.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use pn_app::{AppConfig, AppError, AppResult, PipelineNetwork};
use pn_assets::{AssetError, AssetResult, NewPipe, NewStation, PipeSegment, PipeSelector};
use pn_core::{CapacityClass, PipeId, StationId};
use pn_store::{ActivityLog, DataFile};

use crate::display::{adjacency_line, pipe_line, station_line};
use crate::prompt::Prompter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    AddPipe,
    ViewPipes,
    SearchPipesByName,
    SearchPipesByRepair,
    EditPipes,
    AddStation,
    ViewStations,
    SearchStationsByName,
    SearchStationsByUnused,
    EditStation,
    Connect,
    ViewGraph,
    TopologicalOrder,
    Save,
    Load,
    ViewLog,
    Exit,
}

struct MenuEntry {
    key: u32,
    group: &'static str,
    label: &'static str,
    action: Action,
}

const MENU: &[MenuEntry] = &[
    MenuEntry { key: 1, group: "PIPES", label: "Add", action: Action::AddPipe },
    MenuEntry { key: 2, group: "PIPES", label: "View", action: Action::ViewPipes },
    MenuEntry { key: 3, group: "PIPES", label: "Search by name", action: Action::SearchPipesByName },
    MenuEntry { key: 4, group: "PIPES", label: "Search by repair", action: Action::SearchPipesByRepair },
    MenuEntry { key: 5, group: "PIPES", label: "Edit pipes", action: Action::EditPipes },
    MenuEntry { key: 6, group: "STATIONS", label: "Add", action: Action::AddStation },
    MenuEntry { key: 7, group: "STATIONS", label: "View", action: Action::ViewStations },
    MenuEntry { key: 8, group: "STATIONS", label: "Search by name", action: Action::SearchStationsByName },
    MenuEntry { key: 9, group: "STATIONS", label: "Search by unused", action: Action::SearchStationsByUnused },
    MenuEntry { key: 10, group: "STATIONS", label: "Edit station", action: Action::EditStation },
    MenuEntry { key: 11, group: "NETWORK", label: "Connect stations", action: Action::Connect },
    MenuEntry { key: 12, group: "NETWORK", label: "View graph", action: Action::ViewGraph },
    MenuEntry { key: 13, group: "NETWORK", label: "Topological sort", action: Action::TopologicalOrder },
    MenuEntry { key: 14, group: "FILES", label: "Save", action: Action::Save },
    MenuEntry { key: 15, group: "FILES", label: "Load", action: Action::Load },
    MenuEntry { key: 16, group: "FILES", label: "View log", action: Action::ViewLog },
    MenuEntry { key: 0, group: "", label: "Exit", action: Action::Exit },
];

/// Lets the operator choose among eligible pipes; 0 asks for a new one.
struct PromptSelector<'a, R, W> {
    io: &'a mut Prompter<R, W>,
}

impl<R: BufRead, W: Write> PipeSelector for PromptSelector<'_, R, W> {
    fn select(&mut self, candidates: &[&PipeSegment]) -> AssetResult<Option<PipeId>> {
        let aborted = |e: io::Error| AssetError::SelectionAborted {
            reason: e.to_string(),
        };
        self.io.say("Found available pipes:").map_err(aborted)?;
        for (i, pipe) in candidates.iter().enumerate() {
            self.io
                .say(format_args!("{}. Pipe ID: {}, Name: {}", i + 1, pipe.id, pipe.name))
                .map_err(aborted)?;
        }
        let max = u32::try_from(candidates.len()).unwrap_or(u32::MAX);
        let choice = self
            .io
            .u32_in("Select pipe (0=Create new): ", 0, max)
            .map_err(aborted)?;
        Ok(match choice {
            0 => None,
            n => candidates.get(n as usize - 1).map(|p| p.id),
        })
    }
}

pub struct Session<R, W> {
    config: AppConfig,
    network: PipelineNetwork,
    log: Option<ActivityLog>,
    io: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        config: AppConfig,
        network: PipelineNetwork,
        log: Option<ActivityLog>,
        io: Prompter<R, W>,
    ) -> Self {
        Self {
            config,
            network,
            log,
            io,
        }
    }

    #[cfg(test)]
    pub fn network(&self) -> &PipelineNetwork {
        &self.network
    }

    pub fn into_output(self) -> W {
        self.io.into_output()
    }

    fn log(&mut self, message: &str) {
        if let Some(log) = self.log.as_mut() {
            if let Err(err) = log.record(message) {
                tracing::warn!(%err, "failed to write activity log");
            }
        }
    }

    fn flush_events(&mut self) {
        for event in self.network.take_events() {
            self.log(&event.to_string());
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        self.io.say("")?;
        self.io.say("=== PIPELINE MANAGEMENT ===")?;
        let mut groups: Vec<&'static str> = Vec::new();
        for entry in MENU {
            if !groups.contains(&entry.group) {
                groups.push(entry.group);
            }
        }
        for group in groups {
            let items: Vec<String> = MENU
                .iter()
                .filter(|e| e.group == group)
                .map(|e| format!("{}={}", e.key, e.label))
                .collect();
            if group.is_empty() {
                self.io.say(items.join(", "))?;
            } else {
                self.io.say(format_args!("{}: {}", group, items.join(", ")))?;
            }
        }
        Ok(())
    }

    /// Run the menu loop until the operator exits or input ends.
    pub fn run(&mut self) -> AppResult<()> {
        self.log("=== Program started ===");
        loop {
            self.show_menu()?;
            let raw = match self.io.line("Choice: ") {
                Ok(raw) => raw,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            };
            let Some(entry) = raw
                .parse::<u32>()
                .ok()
                .and_then(|key| MENU.iter().find(|e| e.key == key))
            else {
                self.io.say("Invalid choice")?;
                continue;
            };
            if entry.action == Action::Exit {
                break;
            }
            let outcome = self.dispatch(entry.action);
            self.flush_events();
            match outcome {
                Ok(()) => {}
                Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(AppError::Io(e)) => return Err(e.into()),
                Err(err) => {
                    tracing::debug!(%err, "command failed");
                    self.io.say(format_args!("Error: {err}"))?;
                }
            }
        }
        self.log("=== Program exited ===");
        Ok(())
    }

    fn dispatch(&mut self, action: Action) -> AppResult<()> {
        match action {
            Action::AddPipe => self.add_pipe(),
            Action::ViewPipes => self.view_pipes(),
            Action::SearchPipesByName => self.search_pipes_by_name(),
            Action::SearchPipesByRepair => self.search_pipes_by_repair(),
            Action::EditPipes => self.edit_pipes(),
            Action::AddStation => self.add_station(),
            Action::ViewStations => self.view_stations(),
            Action::SearchStationsByName => self.search_stations_by_name(),
            Action::SearchStationsByUnused => self.search_stations_by_unused(),
            Action::EditStation => self.edit_station(),
            Action::Connect => self.connect(),
            Action::ViewGraph => self.view_graph(),
            Action::TopologicalOrder => self.topological_order(),
            Action::Save => self.save(),
            Action::Load => self.load(),
            Action::ViewLog => self.view_log(),
            Action::Exit => Ok(()),
        }
    }

    fn show_pipes(&mut self, ids: &[PipeId]) -> io::Result<()> {
        let lines: Vec<String> = ids
            .iter()
            .filter_map(|&id| self.network.registry().pipe(id))
            .map(pipe_line)
            .collect();
        for line in lines {
            self.io.say(line)?;
        }
        Ok(())
    }

    fn show_stations(&mut self, ids: &[StationId]) -> io::Result<()> {
        let lines: Vec<String> = ids
            .iter()
            .filter_map(|&id| self.network.registry().station(id))
            .map(station_line)
            .collect();
        for line in lines {
            self.io.say(line)?;
        }
        Ok(())
    }

    fn show_found_pipes(&mut self, ids: &[PipeId]) -> io::Result<()> {
        if ids.is_empty() {
            return self.io.say("Not found");
        }
        self.io.say("\nFound:")?;
        self.show_pipes(ids)
    }

    fn show_found_stations(&mut self, ids: &[StationId]) -> io::Result<()> {
        if ids.is_empty() {
            return self.io.say("Not found");
        }
        self.io.say("\nFound:")?;
        self.show_stations(ids)
    }

    fn add_pipe(&mut self) -> AppResult<()> {
        let name = self.io.name("Enter pipe name: ")?;
        let length_km = self.io.positive_f64("Enter pipe length (km): ")?;
        let diameter = CapacityClass::from_mm(self.io.positive_u32("Enter pipe diameter (mm): ")?)?;
        let id = self.network.add_pipe(NewPipe {
            name,
            length_km,
            diameter,
        })?;
        self.io.say(format_args!("Pipe added (ID: {id})"))?;
        Ok(())
    }

    fn view_pipes(&mut self) -> AppResult<()> {
        let ids: Vec<PipeId> = self.network.registry().pipes().iter().map(|p| p.id).collect();
        if ids.is_empty() {
            self.io.say("No pipes")?;
            return Ok(());
        }
        self.io.say("\n=== PIPES ===")?;
        self.show_pipes(&ids)?;
        Ok(())
    }

    fn search_pipes_by_name(&mut self) -> AppResult<()> {
        let query = self.io.line("Search pipe name: ")?;
        let hits = self.network.find_pipes_by_name(&query);
        self.show_found_pipes(&hits)?;
        Ok(())
    }

    fn search_pipes_by_repair(&mut self) -> AppResult<()> {
        let choice = self.io.u32_in("1=Under repair, 2=Operational: ", 1, 2)?;
        let hits = self.network.find_pipes_by_repair(choice == 1);
        self.show_found_pipes(&hits)?;
        Ok(())
    }

    fn edit_pipes(&mut self) -> AppResult<()> {
        let query = self.io.line("Search pipe name: ")?;
        let hits = self.network.find_pipes_by_name(&query);
        if hits.is_empty() {
            self.io.say("Not found")?;
            return Ok(());
        }
        let action = self.io.u32_in("1=Toggle repair, 2=Delete: ", 1, 2)?;

        self.io.say(format_args!("\nFound {} pipe(s):", hits.len()))?;
        let lines: Vec<String> = hits
            .iter()
            .filter_map(|&id| self.network.registry().pipe(id))
            .enumerate()
            .map(|(i, p)| format!("{}. {}", i + 1, pipe_line(p)))
            .collect();
        for line in lines {
            self.io.say(line)?;
        }

        let selected: Vec<PipeId> = match self.io.u32_in("1=Edit all, 2=Select, 0=Cancel: ", 0, 2)? {
            1 => hits.clone(),
            2 => {
                let prompt = format!("Enter numbers (1-{}) space-separated: ", hits.len());
                self.io
                    .positions(&prompt, hits.len())?
                    .into_iter()
                    .map(|i| hits[i])
                    .collect()
            }
            _ => return Ok(()),
        };
        if selected.is_empty() {
            self.io.say("Nothing selected")?;
            return Ok(());
        }

        if action == 1 {
            let count = self.network.toggle_repair(&selected)?;
            self.io.say(format_args!("Repair status changed: {count} pipe(s)"))?;
        } else {
            let prompt = format!("Delete {} pipe(s)? (y/n): ", selected.len());
            if self.io.yes_no(&prompt)? {
                let count = self.network.delete_pipes(&selected)?;
                self.io.say(format_args!("Deleted: {count} pipe(s)"))?;
            }
        }
        Ok(())
    }

    fn add_station(&mut self) -> AppResult<()> {
        let name = self.io.name("Enter station name: ")?;
        let total = self.io.positive_u32("Enter total workshops: ")?;
        let working = self.io.u32_in("Enter working workshops: ", 0, total)?;
        let class = self.io.positive_u32("Enter station class: ")?;
        let id = self.network.add_station(NewStation {
            name,
            total_workshops: total,
            working_workshops: working,
            class,
        })?;
        self.io.say(format_args!("Station added (ID: {id})"))?;
        Ok(())
    }

    fn view_stations(&mut self) -> AppResult<()> {
        let ids: Vec<StationId> = self
            .network
            .registry()
            .stations()
            .iter()
            .map(|s| s.id)
            .collect();
        if ids.is_empty() {
            self.io.say("No stations")?;
            return Ok(());
        }
        self.io.say("\n=== STATIONS ===")?;
        self.show_stations(&ids)?;
        Ok(())
    }

    fn search_stations_by_name(&mut self) -> AppResult<()> {
        let query = self.io.line("Search station name: ")?;
        let hits = self.network.find_stations_by_name(&query);
        self.show_found_stations(&hits)?;
        Ok(())
    }

    fn search_stations_by_unused(&mut self) -> AppResult<()> {
        let min = self.io.f64_in("Min unused % (0-100): ", 0.0, 100.0)?;
        let hits = self.network.find_stations_by_unused(min);
        self.show_found_stations(&hits)?;
        Ok(())
    }

    fn read_station_id(&mut self, prompt: &str) -> AppResult<StationId> {
        let raw = self.io.positive_u32(prompt)?;
        StationId::new(raw).ok_or_else(|| AppError::InvalidInput("station id must be positive".into()))
    }

    fn edit_station(&mut self) -> AppResult<()> {
        self.view_stations()?;
        if self.network.registry().stations().is_empty() {
            return Ok(());
        }
        let id = self.read_station_id("Enter station ID: ")?;
        if self.network.registry().station(id).is_none() {
            self.io.say("Station not found")?;
            return Ok(());
        }
        let delta = match self.io.u32_in("1=Start workshop, 2=Stop workshop, 0=Back: ", 0, 2)? {
            1 => 1,
            2 => -1,
            _ => return Ok(()),
        };
        self.network.adjust_workshops(id, delta)?;
        if let Some(st) = self.network.registry().station(id) {
            let (working, total) = (st.working_workshops(), st.total_workshops());
            self.io.say(format_args!("Working: {working}/{total}"))?;
        }
        Ok(())
    }

    fn connect(&mut self) -> AppResult<()> {
        self.view_stations()?;
        if self.network.registry().stations().is_empty() {
            self.io.say("No stations available")?;
            return Ok(());
        }
        let source = self.read_station_id("Enter source station ID: ")?;
        let target = self.read_station_id("Enter destination station ID: ")?;
        let (min, max) = self.config.class_range();
        let classes: Vec<String> = self
            .config
            .capacity_classes
            .iter()
            .map(u32::to_string)
            .collect();
        let prompt = format!("Enter required diameter ({}): ", classes.join("/"));
        let class = CapacityClass::from_mm(self.io.u32_in(&prompt, min, max)?)?;

        let mut selector = PromptSelector { io: &mut self.io };
        let connection = self.network.connect(source, target, class, &mut selector)?;
        if connection.created_pipe {
            self.io
                .say(format_args!("New pipe created (ID: {})", connection.pipe))?;
        }
        self.io.say(format_args!(
            "Connection established: Station {} -> Station {} via Pipe {}",
            source, target, connection.pipe
        ))?;
        Ok(())
    }

    fn view_graph(&mut self) -> AppResult<()> {
        let rows = self.network.dump();
        self.io.say("\n=== NETWORK GRAPH ===")?;
        if rows.is_empty() {
            self.io.say("Network is empty")?;
        }
        for row in &rows {
            self.io.say(adjacency_line(row))?;
        }
        Ok(())
    }

    fn topological_order(&mut self) -> AppResult<()> {
        let order = self.network.topological_order();
        self.io.say("\n=== TOPOLOGICAL ORDER ===")?;
        let ids: Vec<String> = order.stations().iter().map(ToString::to_string).collect();
        if order.known_stations() == 0 {
            self.io.say("No stations in network")?;
        } else if order.is_complete() {
            self.io.say(format_args!("Execution order: {}", ids.join(" -> ")))?;
        } else {
            self.io.say(format_args!(
                "Cycle detected: no valid order ({} of {} stations ordered{}{})",
                order.len(),
                order.known_stations(),
                if ids.is_empty() { "" } else { ": " },
                ids.join(" -> ")
            ))?;
        }
        Ok(())
    }

    fn data_file(&mut self, prompt: &str) -> AppResult<DataFile> {
        let raw = self.io.line(prompt)?;
        let path = if raw.is_empty() {
            self.config.data_file.clone()
        } else {
            PathBuf::from(raw)
        };
        Ok(DataFile::new(path))
    }

    fn save(&mut self) -> AppResult<()> {
        let file = self.data_file("Enter filename to save: ")?;
        self.network.save(&file)?;
        self.io
            .say(format_args!("Saved to '{}'", file.path().display()))?;
        Ok(())
    }

    fn load(&mut self) -> AppResult<()> {
        let file = self.data_file("Enter filename to load: ")?;
        self.network.load(&file)?;
        let registry = self.network.registry();
        let (pipes, stations) = (registry.pipes().len(), registry.stations().len());
        self.io.say(format_args!(
            "Loaded from '{}' - {} pipes, {} stations (network cleared)",
            file.path().display(),
            pipes,
            stations
        ))?;
        Ok(())
    }

    fn view_log(&mut self) -> AppResult<()> {
        let entries = match self.log.as_ref().map(ActivityLog::entries) {
            Some(Ok(entries)) => entries,
            _ => {
                self.io.say("No log file")?;
                return Ok(());
            }
        };
        self.io.say("\n=== LOG ===")?;
        for line in entries {
            self.io.say(line)?;
        }
        Ok(())
    }
}
