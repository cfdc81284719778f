//! Literacy metrics CLI
//!
//! Analyzes writing-activity submissions and prints metric reports as JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use literacy_telemetry::{
    audit::AnalysisLog,
    capture::Submission,
    config::Config,
    core::{AnalysisEngine, BlockingAnalysisEngine, MetricReport},
    linguistic::Lexicon,
    VERSION,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "literacy-metrics")]
#[command(version = VERSION)]
#[command(about = "Telemetry and text analytics for student writing submissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a submission file (one submission or an array)
    Analyze {
        /// Submission JSON file
        file: PathBuf,

        /// Merge findings from the remote grammar checker (requires remote feature)
        #[arg(long)]
        remote: bool,

        /// Write reports here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Validate and summarize a lexicon
    Lexicon {
        /// Lexicon JSON file (defaults to the configured or embedded lexicon)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Show cumulative analysis statistics
    Status,

    /// Show configuration
    Config,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Jsonl,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            remote,
            output,
            format,
        } => cmd_analyze(&file, remote, output, format),
        Commands::Lexicon { path } => cmd_lexicon(path),
        Commands::Status => cmd_status(),
        Commands::Config => cmd_config(),
    }
}

fn cmd_analyze(
    file: &Path,
    remote: bool,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Could not load config, using defaults");
        Config::default()
    });

    let submissions = read_submissions(file)?;
    let engine = build_engine(&config, remote || config.augmentation.enabled)?;

    let reports: Vec<MetricReport> = submissions.iter().map(|s| engine.analyze(s)).collect();
    info!(count = reports.len(), "Analyzed submissions");

    let rendered = render(&reports, format)?;
    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote reports");
        }
        None => println!("{rendered}"),
    }

    if let Err(e) = config.ensure_directories() {
        warn!(error = %e, "Could not create data directory");
    }
    let log = AnalysisLog::with_persistence(&config.data_path);
    for report in &reports {
        log.record_report(report);
    }
    if let Err(e) = log.save() {
        warn!(error = %e, "Could not save analysis log");
    }

    Ok(())
}

/// Accept either a single submission object or an array of them.
fn read_submissions(file: &Path) -> Result<Vec<Submission>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let submissions = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Submission>, _>>(),
        other => serde_json::from_value(other).map(|s| vec![s]),
    }
    .with_context(|| format!("{} does not contain submissions", file.display()))?;

    if submissions.is_empty() {
        bail!("{} contains no submissions", file.display());
    }
    Ok(submissions)
}

fn load_lexicon(config: &Config) -> Result<Lexicon> {
    match &config.lexicon_path {
        Some(path) => Lexicon::from_path(path)
            .with_context(|| format!("Failed to load lexicon {}", path.display())),
        None => Ok(Lexicon::builtin().clone()),
    }
}

fn build_engine(config: &Config, remote: bool) -> Result<BlockingAnalysisEngine> {
    let mut engine =
        AnalysisEngine::new(config.engine_config()).with_lexicon(load_lexicon(config)?);

    if remote {
        engine = attach_checker(engine, config)?;
    }

    BlockingAnalysisEngine::new(engine).context("Failed to create async runtime")
}

#[cfg(feature = "remote")]
fn attach_checker(engine: AnalysisEngine, config: &Config) -> Result<AnalysisEngine> {
    use literacy_telemetry::linguistic::language_tool::{LanguageToolClient, LanguageToolConfig};
    use std::sync::Arc;

    let client = LanguageToolClient::new(LanguageToolConfig {
        endpoint: config.augmentation.endpoint.clone(),
        level: config.augmentation.level.clone(),
        timeout: engine.augmentation_timeout(),
    })?;
    info!(endpoint = client.endpoint(), "Remote augmentation enabled");
    Ok(engine.with_checker(Arc::new(client)))
}

#[cfg(not(feature = "remote"))]
fn attach_checker(engine: AnalysisEngine, _config: &Config) -> Result<AnalysisEngine> {
    warn!("Remote augmentation ignored (remote feature not enabled at compile time)");
    Ok(engine)
}

fn render(reports: &[MetricReport], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Jsonl => reports
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
        OutputFormat::Json if reports.len() == 1 => serde_json::to_string_pretty(&reports[0])?,
        OutputFormat::Json => serde_json::to_string_pretty(reports)?,
    };
    Ok(rendered)
}

fn cmd_lexicon(path: Option<PathBuf>) -> Result<()> {
    let lexicon = match path {
        Some(path) => Lexicon::from_path(&path)
            .with_context(|| format!("Failed to load lexicon {}", path.display()))?,
        None => load_lexicon(&Config::load().unwrap_or_default())?,
    };

    println!("{}", lexicon.summary());
    Ok(())
}

fn cmd_status() -> Result<()> {
    let config = Config::load().unwrap_or_default();

    println!("Literacy Metrics Status");
    println!("=======================");
    println!();
    println!("Locale: {}", config.locale);
    println!(
        "Remote augmentation: {}",
        if config.augmentation.enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!();
    println!("{}", AnalysisLog::with_persistence(&config.data_path).summary());
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
