use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use walkdir::WalkDir;

use gpx_tabulator::constants::GPX_EXTENSION;
use gpx_tabulator::csv_export::{write_csv, write_csv_file};
use gpx_tabulator::{merge, TabulatorConfig, TrackTable};

/// Flatten GPX tracks into one table with distance, pace and local x/y.
#[derive(Parser, Debug)]
#[command(name = "gpx-tabulator", version, about)]
struct Cli {
    /// GPX files or directories containing GPX files, merged in the given order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write CSV here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip pace, total distance and x/y columns
    #[arg(long)]
    no_enrich: bool,

    /// Skip the heart-rate column
    #[arg(long)]
    no_heart_rate: bool,

    /// Descend into sub-directories
    #[arg(short, long)]
    recursive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn is_gpx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case(GPX_EXTENSION))
}

/// Expand directories into their GPX files, sorted by path.
/// Plain file arguments are kept as given, in order.
fn collect_gpx_files(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut found = Vec::new();
        for entry in WalkDir::new(input).max_depth(max_depth) {
            let entry = entry.with_context(|| format!("Failed to read {}", input.display()))?;
            if entry.file_type().is_file() && is_gpx(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();

        if found.is_empty() {
            warn!("No GPX files in {}", input.display());
        }
        files.extend(found);
    }

    Ok(files)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    let mut config = match &cli.config {
        Some(path) => TabulatorConfig::from_yaml(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => TabulatorConfig::default(),
    };
    if cli.no_enrich {
        config.enrich = false;
    }
    if cli.no_heart_rate {
        config.heart_rate = false;
    }
    if cli.recursive {
        config.recursive = true;
    }

    let files = collect_gpx_files(&cli.inputs, config.recursive)?;
    info!("Processing {} GPX files", files.len());

    let table = merge(&files, config.enrich, config.heart_rate).context("Failed to build track table")?;

    if let TrackTable::Enriched(enriched) = &table {
        if enriched.exceeds_local_range() {
            warn!("x/y columns are only approximate for this extent");
        }
    }

    match &cli.output {
        Some(path) => {
            write_csv_file(&table, path).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} rows to {}", table.len(), path.display());
        }
        None => write_csv(&table, io::stdout().lock()).context("Failed to write CSV")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_inputs_are_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        for name in ["b.gpx", "a.GPX", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::write(nested.join("c.gpx"), "").unwrap();

        let explicit = PathBuf::from("z.gpx");
        let flat = collect_gpx_files(&[explicit.clone(), dir.path().to_path_buf()], false).unwrap();
        assert_eq!(
            flat,
            vec![explicit, dir.path().join("a.GPX"), dir.path().join("b.gpx")]
        );

        let deep = collect_gpx_files(&[dir.path().to_path_buf()], true).unwrap();
        assert_eq!(deep.len(), 3);
        assert!(deep.contains(&nested.join("c.gpx")));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["gpx-tabulator", "--no-enrich", "-vv", "run.gpx"]);

        assert!(cli.no_enrich);
        assert!(!cli.no_heart_rate);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.inputs, vec![PathBuf::from("run.gpx")]);
    }
}
