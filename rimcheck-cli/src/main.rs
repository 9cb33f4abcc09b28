//! rimcheck CLI
//!
//! Compares the active mod list in a local RimWorld `ModsConfig.xml` against
//! a Steam Workshop collection and reports the differences.

use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rimcheck_lib::{CheckError, Settings, SettingsOverrides, read_active_mods, reconcile, scan_workshop_dir};
use rimcheck_steam::{SteamClient, SteamError};

mod report;

#[derive(Parser)]
#[command(name = "rimcheck")]
#[command(version, about = "Check a RimWorld mod list against a Steam Workshop collection")]
struct Cli {
    /// Path to ModsConfig.xml (defaults to the Steam install location)
    #[arg(short, long)]
    mods_config: Option<PathBuf>,

    /// Steam Workshop content directory for RimWorld
    #[arg(short, long)]
    workshop_dir: Option<PathBuf>,

    /// Steam collection id to compare against
    #[arg(short, long)]
    collection: Option<String>,

    /// Settings file to read instead of ~/.config/rimcheck/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also list mods present in both sources
    #[arg(long)]
    show_matched: bool,

    /// List workshop directories skipped during the scan
    #[arg(long)]
    show_skipped: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Check(#[from] CheckError),

    #[error(transparent)]
    Steam(#[from] SteamError),
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!(
                "{} Error: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            std::process::exit(2);
        }
    }
}

/// Run the full check pipeline. Returns whether the two sources are in sync.
fn run(cli: Cli) -> Result<bool, CliError> {
    let overrides = SettingsOverrides {
        mods_config_path: cli.mods_config,
        workshop_dir: cli.workshop_dir,
        collection_id: cli.collection,
    };
    let settings = match cli.config {
        Some(ref path) => Settings::load_from(overrides, Some(path))?,
        None => Settings::load(overrides)?,
    };
    log::debug!(
        "settings: mods_config={}, workshop_dir={}, collection={}",
        settings.mods_config_path.display(),
        settings.workshop_dir.display(),
        settings.collection_id,
    );

    let active = read_active_mods(&settings.mods_config_path)?;
    println!(
        "Active mods in ModsConfig.xml (excluding Core & DLCs): {}",
        active.len().if_supports_color(Stdout, |t| t.bold()),
    );

    let scan = scan_workshop_dir(&settings.workshop_dir)?;
    println!(
        "packageId mappings from the local Workshop folder: {}",
        scan.mapping.len().if_supports_color(Stdout, |t| t.bold()),
    );
    if !scan.skipped.is_empty() && !cli.show_skipped {
        println!(
            "{}",
            format!(
                "({} directories skipped; rerun with --show-skipped for details)",
                scan.skipped.len()
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let client = SteamClient::new()?;

    let pb = spinner(format!("Fetching collection {}...", settings.collection_id));
    let collection = match client.collection_children(&settings.collection_id) {
        Ok(c) => {
            pb.finish_and_clear();
            c
        }
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };
    println!(
        "Mods in the Steam collection: {}",
        collection.len().if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    let result = reconcile(&active, &scan.mapping, &collection);

    let ids = report::eligible_name_ids(&result);
    let names = if ids.is_empty() {
        Default::default()
    } else {
        let pb = spinner(format!("Resolving {} mod names...", ids.len()));
        let names = client.published_file_titles(&ids);
        pb.finish_and_clear();
        names?
    };

    if cli.show_skipped {
        report::print_skipped(&scan.skipped);
    }
    report::print_report(&result, &names, cli.show_matched);

    Ok(result.in_sync())
}

fn spinner(msg: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("/-\\|"),
    );
    pb.set_message(msg);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
