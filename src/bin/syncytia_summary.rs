//! Summarize a folder of marker files into a size histogram and a short
//! summary (single cells, nuclei in syncytia, fusion index).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use syncytia::config::AppConfig;
use syncytia::summary::{SummaryReducer, summarize_folder};
use syncytia::table::ResultsTable;

#[derive(Parser, Debug)]
#[command(
    name = "syncytia-summary",
    version,
    about = "Summarize every *_markers.json file of a folder"
)]
struct Cli {
    /// Folder with marker files (asked for when omitted)
    folder: Option<PathBuf>,

    /// Also write histogram.csv and summary.csv into this folder
    #[arg(long, value_name = "DIR")]
    csv: Option<PathBuf>,
}

fn choose_folder(config: &AppConfig) -> Option<PathBuf> {
    #[cfg(feature = "dialogs")]
    {
        syncytia::native::NativeDialogs::new(config.preferences.last_folder()).pick_folder()
    }
    #[cfg(not(feature = "dialogs"))]
    {
        use std::io::{BufRead, Write};

        match config.preferences.last_folder() {
            Some(folder) => print!("Folder with marker files [{}]: ", folder.display()),
            None => print!("Folder with marker files: "),
        }
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).ok()?;
        match line.trim() {
            "" => config.preferences.last_folder(),
            answer => Some(PathBuf::from(answer)),
        }
    }
}

fn write_csv(dir: &Path, reducer: &SummaryReducer) -> csv::Result<()> {
    std::fs::create_dir_all(dir)?;
    let tables: [(&str, ResultsTable); 2] = [
        ("histogram.csv", reducer.histogram_table()),
        ("summary.csv", reducer.short_table()),
    ];
    for (name, table) in tables {
        let path = dir.join(name);
        table.save_csv(&path)?;
        log::info!("Wrote {:?}", path);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = AppConfig::load_from_default_path().unwrap_or_else(|e| {
        eprintln!("Ignoring configuration: {}", e);
        AppConfig::default()
    });
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let Some(folder) = cli.folder.or_else(|| choose_folder(&config)) else {
        log::error!("No folder chosen");
        return ExitCode::FAILURE;
    };

    let reducer = match summarize_folder(&folder) {
        Ok(reducer) => reducer,
        Err(e) => {
            log::error!("Cannot read {:?}: {}", folder, e);
            return ExitCode::FAILURE;
        }
    };

    for skipped in reducer.skipped() {
        eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    println!("{}", reducer.histogram_table());
    println!("{}", reducer.short_table());

    if let Some(dir) = &cli.csv
        && let Err(e) = write_csv(dir, &reducer)
    {
        log::error!("Failed to write CSV files to {:?}: {}", dir, e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
