//! Console front end of the syncytia counter.
//!
//! Reads one command per line from stdin. Points are entered as coordinates,
//! dialogs become prompts (or native dialogs with the `dialogs` feature), and
//! the count panel is refreshed in the background by the count poller.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use syncytia::config::AppConfig;
use syncytia::constants::MAX_GROUP_ID;
use syncytia::model::{AnnotationStore, MarkerShape, MarkerSize, MarkerStyle, Point, Slot};
use syncytia::session::{Dialogs, LoadOutcome, PointTool, SaveOutcome, Session};
use syncytia::state::CountPanel;
use syncytia::table::{ResultsSink, ResultsTable, group_label};

#[derive(Parser, Debug)]
#[command(
    name = "syncytia-counter",
    version,
    about = "Count nuclei in single cells and syncytia"
)]
struct Cli {
    /// Title of the image being counted, used to suggest the save name
    image_title: Option<String>,

    /// Configuration file (defaults to the per-user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Marker file to load on start
    #[arg(long)]
    load: Option<PathBuf>,
}

/// One line of console input.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Group(usize),
    AddGroup,
    Point(Point),
    Clear(Option<usize>),
    ClearAll,
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    Counts,
    Results,
    Style(MarkerStyle),
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  group <g>                   select group g (0 = single cells)
  add-group                   select the next unused syncytium
  point <x> <y>               place a point in the selected group
  clear [g]                   remove the points of g (default: selected group)
  clear-all                   remove every point
  save [path]                 save markers
  load [path]                 load markers
  counts                      show the count panel
  results                     show the results table
  style <size> <shape> <on|off>
                              marker size, shape and group labels
  help                        show this help
  quit                        leave";

fn parse_group(word: &str) -> Result<usize, String> {
    let group: usize = word
        .parse()
        .map_err(|_| format!("'{}' is not a group number", word))?;
    if group > MAX_GROUP_ID {
        return Err(format!("group {} is above the limit of {}", group, MAX_GROUP_ID));
    }
    Ok(group)
}

fn parse_coordinate(word: &str) -> Result<serde_json::Number, String> {
    if let Ok(value) = word.parse::<i64>() {
        return Ok(value.into());
    }
    word.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| format!("'{}' is not a coordinate", word))
}

fn parse_style(words: &[&str]) -> Result<MarkerStyle, String> {
    let [size, shape, labels] = words else {
        return Err("usage: style <size> <shape> <on|off>".to_string());
    };
    let size = MarkerSize::from_name(size).ok_or_else(|| {
        let names: Vec<_> = MarkerSize::all().iter().map(MarkerSize::name).collect();
        format!("unknown size '{}', expected one of {}", size, names.join(", "))
    })?;
    let shape = MarkerShape::from_name(shape).ok_or_else(|| {
        let names: Vec<_> = MarkerShape::all().iter().map(MarkerShape::name).collect();
        format!("unknown shape '{}', expected one of {}", shape, names.join(", "))
    })?;
    let show_labels = match *labels {
        "on" | "yes" | "true" => true,
        "off" | "no" | "false" => false,
        other => return Err(format!("expected on or off, got '{}'", other)),
    };
    Ok(MarkerStyle {
        size,
        shape,
        show_labels,
    })
}

impl Command {
    /// Parse a line; `Ok(None)` for a blank line.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (name, args) {
            ("group" | "g", [group]) => Command::Group(parse_group(group)?),
            ("add-group" | "a", []) => Command::AddGroup,
            ("point" | "p", [x, y]) => Command::Point(Point {
                x: parse_coordinate(x)?,
                y: parse_coordinate(y)?,
            }),
            ("clear", []) => Command::Clear(None),
            ("clear", [group]) => Command::Clear(Some(parse_group(group)?)),
            ("clear-all", []) => Command::ClearAll,
            ("save", []) => Command::Save(None),
            ("save", [path]) => Command::Save(Some(PathBuf::from(path))),
            ("load", []) => Command::Load(None),
            ("load", [path]) => Command::Load(Some(PathBuf::from(path))),
            ("counts", []) => Command::Counts,
            ("results", []) => Command::Results,
            ("style", words) => Command::Style(parse_style(words)?),
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            _ => return Err(format!("unrecognized command '{}', try 'help'", line.trim())),
        };
        Ok(Some(command))
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Dialogs answered on the console.
#[cfg(not(feature = "dialogs"))]
struct ConsoleDialogs {
    start_folder: Option<PathBuf>,
}

#[cfg(not(feature = "dialogs"))]
impl ConsoleDialogs {
    fn resolve(&self, answer: String) -> Option<PathBuf> {
        if answer.is_empty() {
            return None;
        }
        let path = PathBuf::from(answer);
        match &self.start_folder {
            Some(folder) if path.is_relative() => Some(folder.join(path)),
            _ => Some(path),
        }
    }
}

#[cfg(not(feature = "dialogs"))]
impl Dialogs for ConsoleDialogs {
    fn confirm(&self, title: &str, message: &str) -> bool {
        read_line(&format!("{}: {} [y/N] ", title, message))
            .is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    fn choose_open_path(&self) -> Option<PathBuf> {
        read_line("Marker file to load (empty to cancel): ").and_then(|a| self.resolve(a))
    }

    fn choose_save_path(&self, suggested_name: &str) -> Option<PathBuf> {
        let answer = read_line(&format!(
            "Save as [{}] (empty to cancel, '.' for the suggestion): ",
            suggested_name
        ))?;
        if answer == "." {
            return self.resolve(suggested_name.to_string());
        }
        let path = self.resolve(answer)?;
        Some(if path.is_dir() {
            path.join(suggested_name)
        } else {
            path
        })
    }

    fn show_message(&self, title: &str, message: &str) {
        println!("[{}] {}", title, message);
    }
}

/// Reports where the next typed points go.
struct ConsoleTool;

impl PointTool for ConsoleTool {
    fn set_target(&self, group: usize, slot: Slot) {
        log::debug!("Point tool now targets {:?}", slot);
        println!("Placing points in {}", group_label(group));
    }
}

struct ConsoleResults;

impl ResultsSink for ConsoleResults {
    fn show_table(&self, table: &ResultsTable) {
        print!("{}", table);
    }
}

fn init_logging(config: &AppConfig) {
    let level = config.preferences.log_level.to_level_filter();
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn dialogs(start_folder: Option<PathBuf>) -> Box<dyn Dialogs> {
    #[cfg(feature = "dialogs")]
    {
        Box::new(syncytia::native::NativeDialogs::new(start_folder))
    }
    #[cfg(not(feature = "dialogs"))]
    {
        Box::new(ConsoleDialogs { start_folder })
    }
}

fn print_counts(session: &Session, panel: &CountPanel) {
    // The panel is empty until the poller's first refresh.
    let rows = match panel.refreshed_at() {
        Some(_) => panel.rows(),
        None => session.panel_rows(),
    };
    for row in rows {
        let marker = if row.group == session.active_group() { '*' } else { ' ' };
        println!("{} {:<16} {:>5}", marker, row.label, row.count);
    }
}

/// Execute one command; returns false when the session should end.
fn execute(session: &mut Session, panel: &CountPanel, command: Command) -> bool {
    match command {
        Command::Group(group) => {
            session.select_group(group);
        }
        Command::AddGroup => {
            session.add_group();
        }
        Command::Point(point) => {
            if !session.place_point(point.clone()) {
                println!("Point {} is on the reserved sentinel position", point);
            }
        }
        Command::Clear(group) => {
            let group = group.unwrap_or_else(|| session.active_group());
            let removed = session.clear_group(group);
            println!("Removed {} points from {}", removed, group_label(group));
        }
        Command::ClearAll => {
            if session.clear_all() {
                println!("All markers removed");
            }
        }
        Command::Save(path) => {
            let outcome = match path {
                Some(path) => session.save_to(&path),
                None => session.save(),
            };
            if let SaveOutcome::Saved { path, markers } = outcome {
                println!("Saved {} markers to {}", markers, path.display());
            }
        }
        Command::Load(path) => {
            let outcome = match path {
                Some(path) => session.load_path(&path),
                None => session.load(),
            };
            if let LoadOutcome::Loaded { path, markers } = outcome {
                println!("Loaded {} markers from {}", markers, path.display());
            }
        }
        Command::Counts => print_counts(session, panel),
        Command::Results => session.show_results(),
        Command::Style(style) => session.update_markers(style),
        Command::Help => println!("{}", HELP),
        Command::Quit => return !session.close(),
    }
    true
}

fn remember_folder(config: &mut AppConfig, config_path: Option<&Path>, folder: Option<&Path>) {
    let Some(folder) = folder else {
        return;
    };
    let folder = folder.to_string_lossy().into_owned();
    if config.preferences.last_folder == folder {
        return;
    }
    config.preferences.last_folder = folder;
    if let Some(path) = config_path
        && let Err(e) = config.save_to(path)
    {
        log::warn!("Failed to save configuration: {}", e);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(AppConfig::default_path);
    let mut config = match config_path.as_deref().map(AppConfig::load_or_default) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            eprintln!("Ignoring configuration: {}", e);
            AppConfig::default()
        }
        None => AppConfig::default(),
    };
    init_logging(&config);
    log::info!(
        "{} starting (log level {})",
        config.app_name,
        config.preferences.log_level.name()
    );

    let store = AnnotationStore::with_capacity(config.counting.capacity())
        .with_style(config.preferences.marker_style);
    let last_folder = config.preferences.last_folder();
    let mut session = Session::new(
        store,
        dialogs(last_folder.clone()),
        Box::new(ConsoleTool),
        Box::new(ConsoleResults),
    );
    session.set_last_folder(last_folder);
    if let Some(title) = &cli.image_title {
        session.link_image(title.clone());
    }

    let panel = Arc::new(CountPanel::new());
    if let Err(e) = session.start_polling(panel.clone(), config.counting.poll_schedule()) {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    if let Some(path) = &cli.load
        && let LoadOutcome::Failed(_) = session.load_from(path)
    {
        return ExitCode::FAILURE;
    }

    println!("Type 'help' for commands.");
    loop {
        let Some(line) = read_line("> ") else {
            // End of input: leave without prompting again.
            if !session.is_saved() {
                log::warn!("Input closed with unsaved markers");
            }
            break;
        };
        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !execute(&mut session, &panel, command) {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => println!("{}", message),
        }
        remember_folder(&mut config, config_path.as_deref(), session.last_folder());
    }

    ExitCode::SUCCESS
}
