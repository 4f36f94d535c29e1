//! atlas CLI - clusters, date filter and diary links from the terminal
//!
//! Loads an artifact list, applies the requested date range and hidden ids,
//! and prints the same consoles a scene host would show: visible count,
//! cluster summary, and optionally the focus breakdown of one artifact and
//! its diary deep link.

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::warn;
use serde::Serialize;

use tomb_atlas::core::presenter::render_json;
use tomb_atlas::core::temporal::parse_date;
use tomb_atlas::{
    Atlas, AtlasConfig, AtlasView, ConsolePresenter, DateRange, FocusView, FragmentStrategy,
};

/// Cluster and inspect a scanned artifact list.
#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(version = tomb_atlas::version())]
#[command(about = "Spatial clusters, date filtering and diary deep links for tomb artifacts")]
#[command(after_help = "EXAMPLES:
  # Cluster summary with default settings
  atlas artifacts.json

  # Only artifacts excavated in January 1925, on a 5-unit grid
  atlas artifacts.json --from 1925-01-01 --to 1925-01-31 --cell-size 5

  # Focus one artifact and build its diary link
  atlas artifacts.json --focus HU-1234 --link HU-1234
")]
struct Cli {
    /// Artifact list (JSON array, or object with an `artifacts` array)
    #[arg(value_name = "ARTIFACTS.json")]
    artifacts: PathBuf,

    /// Config file path (JSON)
    #[arg(short = 'c', long = "config", value_name = "FILE", help_heading = "CLUSTERING")]
    config: Option<PathBuf>,

    /// Grid cell size in scene units
    #[arg(long = "cell-size", value_name = "F", help_heading = "CLUSTERING")]
    cell_size: Option<f64>,

    /// Smallest cell that counts as a cluster
    #[arg(long = "min-cluster-size", value_name = "N", help_heading = "CLUSTERING")]
    min_cluster_size: Option<usize>,

    /// Start of the active date range
    #[arg(long = "from", value_name = "DATE", help_heading = "VISIBILITY")]
    from: Option<String>,

    /// End of the active date range
    #[arg(long = "to", value_name = "DATE", help_heading = "VISIBILITY")]
    to: Option<String>,

    /// Hide an artifact by id (repeatable)
    #[arg(long = "hide", value_name = "ID", help_heading = "VISIBILITY")]
    hide: Vec<String>,

    /// Show the term breakdown of the cell under this artifact
    #[arg(long = "focus", value_name = "ID", help_heading = "INSPECTION")]
    focus: Option<String>,

    /// Build the diary deep link for this artifact
    #[arg(long = "link", value_name = "ID", help_heading = "INSPECTION")]
    link: Option<String>,

    /// Text-fragment strategy (default: from config)
    #[arg(long = "strategy", value_enum, help_heading = "INSPECTION")]
    strategy: Option<StrategyArg>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text", help_heading = "OUTPUT")]
    format: FormatArg,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, help_heading = "OUTPUT")]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    #[value(name = "best-phrase")]
    BestPhrase,
    #[value(name = "multi-candidate", alias = "multi")]
    MultiCandidate,
}

impl From<StrategyArg> for FragmentStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::BestPhrase => FragmentStrategy::BestPhrase,
            StrategyArg::MultiCandidate => FragmentStrategy::MultiCandidate,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum FormatArg {
    Text,
    Json,
}

/// Everything printed for `--format json`.
#[derive(Serialize)]
struct Report<'a> {
    version: &'static str,
    view: &'a AtlasView,
    #[serde(skip_serializing_if = "Option::is_none")]
    focus: Option<&'a FocusView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<&'a str>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<AtlasConfig> {
    let mut config = match &cli.config {
        Some(path) => AtlasConfig::load(path)?,
        None => AtlasConfig::default(),
    };
    if let Some(cell_size) = cli.cell_size {
        config.cell_size = cell_size;
    }
    if let Some(min) = cli.min_cluster_size {
        config.min_cluster_size = min;
    }
    if let Some(strategy) = cli.strategy {
        config.fragment_strategy = strategy.into();
    }
    config.validate()?;
    Ok(config)
}

fn apply_date_range(cli: &Cli, atlas: &mut Atlas) -> Result<()> {
    if cli.from.is_none() && cli.to.is_none() {
        return Ok(());
    }
    let Some(extent) = atlas.filter().extent() else {
        warn!("no artifact is dated; ignoring --from/--to");
        return Ok(());
    };
    let from = match &cli.from {
        Some(text) => parse_date("from", text)?,
        None => extent.from,
    };
    let to = match &cli.to {
        Some(text) => parse_date("to", text)?,
        None => extent.to,
    };
    atlas.set_date_range(DateRange::new(from, to));
    Ok(())
}

fn render_text(
    atlas: &Atlas,
    view: &AtlasView,
    focus: Option<&FocusView>,
    link: Option<&str>,
) -> String {
    let mut console = ConsolePresenter::new();
    view.publish(&mut console);

    let mut out = String::new();
    out.push_str(&format!(
        "Artifacts: {} loaded, {} visible\n",
        view.total_count,
        console.visible_count()
    ));
    match (view.extent, view.active_range) {
        (Some(extent), Some(active)) => {
            out.push_str(&format!(
                "Date extent: {} .. {}\n",
                extent.from_iso(),
                extent.to_iso()
            ));
            out.push_str(&format!(
                "Active range: {} .. {} ({} days)\n",
                active.from_iso(),
                active.to_iso(),
                active.days()
            ));
        }
        _ => out.push_str("Date extent: none (date filter disabled)\n"),
    }
    out.push_str(&format!(
        "\nClusters (cell size {}, min {}):\n",
        atlas.config().cell_size,
        atlas.config().min_cluster_size
    ));
    out.push_str(&console.cluster_console());
    out.push('\n');

    if let Some(focus) = focus {
        focus.publish(&mut console);
        out.push_str(&format!("\nFocus [{}]: {}\n", focus.key, console.label_console()));
        out.push_str(&console.cluster_console());
        out.push('\n');
    }
    if let Some(link) = link {
        out.push_str(&format!("\nLink: {}\n", link));
    }
    out
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let mut atlas = Atlas::load(&cli.artifacts, config)
        .with_context(|| format!("cannot load {}", cli.artifacts.display()))?;

    apply_date_range(&cli, &mut atlas)?;
    for id in &cli.hide {
        if atlas.artifact(id).is_none() {
            warn!("--hide {}: no such artifact", id);
        }
        atlas.hide(id);
    }

    let view = atlas.recompute();

    let focus = match &cli.focus {
        Some(id) => match atlas.focus(id) {
            Some(focus) => Some(focus),
            None => bail!("cannot focus '{}': unknown or not visible", id),
        },
        None => None,
    };

    let link = match &cli.link {
        Some(id) => {
            if atlas.artifact(id).is_none() {
                bail!("cannot link '{}': unknown artifact", id);
            }
            match atlas.link(id) {
                Some(url) => Some(url),
                None => bail!("cannot link '{}': artifact has no source_url", id),
            }
        }
        None => None,
    };

    let output = match cli.format {
        FormatArg::Text => render_text(&atlas, &view, focus.as_ref(), link.as_deref()),
        FormatArg::Json => {
            let report = Report {
                version: tomb_atlas::version(),
                view: &view,
                focus: focus.as_ref(),
                link: link.as_deref(),
            };
            render_json(&report)? + "\n"
        }
    };
    print!("{}", output);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
