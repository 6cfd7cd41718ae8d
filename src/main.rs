// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use lexstore::app_config::{Config, LogLevel};
use lexstore::language_utils::language_display_name;
use lexstore::search::SearchCoordinator;
use lexstore::seed;
use lexstore::store::TranslationStore;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Seed the store with dictionary entries
    Seed {
        /// Number of random records to generate (in addition to the sample set)
        #[arg(short, long, default_value_t = 0)]
        count: u64,

        /// First id assigned to generated records
        #[arg(long, default_value_t = 10)]
        start_id: i64,
    },

    /// Search for entries whose surface form starts with a prefix
    Search {
        /// Source language tag (e.g. 'en', 'ind')
        lang: String,

        /// Surface-form prefix (matched case-insensitively)
        prefix: String,

        /// Restrict printed variants to this target language
        #[arg(short, long)]
        target_language: Option<String>,
    },

    /// Interactive lookup: type prefixes on stdin, one per line
    Watch {
        /// Source language tag
        lang: String,
    },

    /// Remove all records from the store
    Clear,

    /// Show store statistics
    Stats,

    /// Generate shell completions for lexstore
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lexstore - local translation store with incremental prefix search
///
/// Persists bilingual dictionary entries in a local SQLite store and looks
/// them up by surface-form prefix, case-insensitively, as you type.
#[derive(Parser, Debug)]
#[command(name = "lexstore")]
#[command(version = "0.1.0")]
#[command(about = "Local translation store with incremental prefix search")]
#[command(long_about = "lexstore persists bilingual dictionary entries locally and answers
case-insensitive prefix lookups over them.

EXAMPLES:
    lexstore seed                        # Load the five-entry sample dictionary
    lexstore seed -c 50000               # Also generate 50k random records
    lexstore search en d                 # Entries whose English surface starts with 'd'
    lexstore search en du -t de          # ... printing only German variants
    lexstore watch en                    # Interactive lookup loop
    lexstore clear                       # Wipe the store
    lexstore completions bash > lexstore.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, default_value = "conf.json")]
    config_path: String,

    /// Database file path (overrides the named store from the config)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Custom logger implementation writing colored lines to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    // Completions need no config or store
    if let Commands::Completions { shell } = &options.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "lexstore", &mut std::io::stdout());
        return Ok(());
    }

    let cli_level = options
        .log_level
        .clone()
        .map(|level| to_level_filter(&level.into()));
    CustomLogger::init(cli_level.unwrap_or(LevelFilter::Info))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    let config = load_config(&options)?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let store = match &options.db_path {
        Some(path) => TranslationStore::open_at_path(path, config.schema_version).await?,
        None => TranslationStore::open(&config.database_name, config.schema_version).await?,
    };

    match options.command {
        Commands::Seed { count, start_id } => run_seed(&store, count, start_id).await,
        Commands::Search {
            lang,
            prefix,
            target_language,
        } => run_search(&store, &lang, &prefix, target_language.as_deref()).await,
        Commands::Watch { lang } => run_watch(&store, &config, &lang).await,
        Commands::Clear => {
            store.clear().await?;
            info!("Store cleared");
            Ok(())
        }
        Commands::Stats => {
            println!("{}", store.stats()?);
            Ok(())
        }
        Commands::Completions { .. } => unreachable!("handled before config load"),
    }
}

/// Load config from file, creating a default one if it does not exist
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let config_path = &options.config_path;

    let mut config = if std::path::Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config
            .save_to_file(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn to_level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Size of each seed batch; each batch is one transaction
const SEED_BATCH_SIZE: usize = 2000;

async fn run_seed(store: &TranslationStore, count: u64, start_id: i64) -> Result<()> {
    info!("Loading sample dictionary");
    store.add_translations(&seed::sample_records()).await?;

    if count > 0 {
        info!("Generating {} random records", count);
        let progress = ProgressBar::new(count);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records",
            )?
            .progress_chars("#>-"),
        );

        let mut next_id = start_id;
        let mut remaining = count as usize;
        while remaining > 0 {
            let batch_size = remaining.min(SEED_BATCH_SIZE);
            let batch = seed::random_records(next_id, batch_size);
            store.add_translations(&batch).await?;

            next_id += batch_size as i64;
            remaining -= batch_size;
            progress.inc(batch_size as u64);
        }
        progress.finish_with_message("done");
    }

    info!("Store now holds {} records", store.count().await?);
    Ok(())
}

async fn run_search(
    store: &TranslationStore,
    lang: &str,
    prefix: &str,
    target_language: Option<&str>,
) -> Result<()> {
    let target = target_language.map(|t| t.to_string());
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let scan = store.for_each_match(lang, prefix, move |record| {
        let _ = tx.send(record);
    });

    // Print matches as the scan emits them
    let printer = async {
        let mut matched = 0usize;
        while let Some(record) = rx.recv().await {
            matched += 1;
            let variants: Vec<String> = match &target {
                Some(target_lang) => record
                    .variants_for(target_lang)
                    .iter()
                    .map(|v| v.surface.clone())
                    .collect(),
                None => record
                    .translations
                    .iter()
                    .map(|v| format!("{}: {}", v.lang, v.surface))
                    .collect(),
            };
            println!("{} [{}] -> {}", record.surface, record.lang, variants.join(", "));
        }
        matched
    };

    let (scan_result, matched) = tokio::join!(scan, printer);
    scan_result?;

    info!(
        "{} matches for '{}' in {}",
        matched,
        prefix,
        language_display_name(lang)
    );
    Ok(())
}

async fn run_watch(store: &TranslationStore, config: &Config, lang: &str) -> Result<()> {
    let coordinator = SearchCoordinator::new(
        store.clone(),
        Duration::from_millis(config.debounce_ms),
    );

    println!(
        "Searching {} entries; type a prefix and press enter (empty line quits).",
        language_display_name(lang)
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let prefix = line.trim().to_string();
        if prefix.is_empty() {
            break;
        }

        let coordinator = coordinator.clone();
        let lang = lang.to_string();
        tokio::spawn(async move {
            match coordinator.submit(&lang, &prefix).await {
                Ok(Some(results)) => {
                    for record in &results {
                        println!("  {} -> {} variants", record.surface, record.translations.len());
                    }
                    println!("  ({} matches for '{}')", results.len(), prefix);
                }
                // Superseded by a newer prefix; stay quiet
                Ok(None) => {}
                Err(e) => warn!("Search failed: {}", e),
            }
        });
    }

    Ok(())
}
