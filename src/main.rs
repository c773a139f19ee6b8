// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use mdsegment::app_config::{self, Config};
use mdsegment::app_controller::Controller;
use mdsegment::database::{DatabaseConnection, Repository};
use mdsegment::export::ExportFormat;
use mdsegment::extraction::collect_segments;
use mdsegment::file_utils::FileManager;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract translatable segments from a file or directory
    Extract(ExtractArgs),

    /// Print the segments of one document
    Inspect {
        /// Markdown file to scan
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completions for mdsegment
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Markdown file or directory to process
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Catalog file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Catalog format
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Also write segments to the translation-memory store
    #[arg(long)]
    store: bool,

    /// Translation-memory database file
    #[arg(long, value_name = "PATH")]
    db_path: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(long)]
    force: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// mdsegment - translatable segment extraction for markdown documentation
#[derive(Parser, Debug)]
#[command(name = "mdsegment")]
#[command(version)]
#[command(about = "Extract translatable segments from markdown documents")]
#[command(long_about = "mdsegment splits markdown documents into headings, paragraphs, list items and
blockquotes, protects inline code, links, URLs, HTML and variables with placeholder
tokens, and writes the segments as a JSON or PO catalog.

EXAMPLES:
    mdsegment extract docs/                          # Write segments.json from a docs tree
    mdsegment extract docs/ -f po -o fr.po           # Write a gettext catalog
    mdsegment extract docs/ --store                  # Also update the translation memory
    mdsegment inspect README.md                      # Show the segments of one file
    mdsegment completions bash > mdsegment.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::decoration(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "mdsegment", &mut std::io::stdout());
            Ok(())
        }
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Extract(args) => run_extract(args).await,
    }
}

async fn run_extract(options: ExtractArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path)?;

    // Command line wins over the file
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(format) = options.format {
        config.export.format = format;
    }
    if let Some(output) = &options.output {
        config.export.output_path = output.to_string_lossy().into_owned();
    }
    if options.store {
        config.database.enabled = true;
    }
    if let Some(db_path) = &options.db_path {
        config.database.path = Some(db_path.to_string_lossy().into_owned());
    }

    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let repository = if config.database.enabled {
        let connection = match config.database_path() {
            Some(path) => DatabaseConnection::new(path)?,
            None => DatabaseConnection::new_default()?,
        };
        info!("Translation memory: {}", connection.path().display());
        Some(Repository::new(connection))
    } else {
        None
    };

    let format = config.export.format;
    let output = PathBuf::from(&config.export.output_path);
    let controller = Controller::with_config(config)?;

    controller
        .run(&options.input, Some(&output), format, repository.as_ref(), options.force)
        .await?;

    if let Some(repository) = &repository {
        info!("{}", repository.connection().stats()?);
    }

    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let text = FileManager::read_to_string(file)?;
    let relative = FileManager::relative_posix_path(file, file);

    let mut stdout = std::io::stdout().lock();
    for segment in collect_segments(&text, &relative) {
        writeln!(
            stdout,
            "{:>4}  {}  {}",
            segment.order,
            segment.identifier,
            segment.msgid.replace('\n', "\\n")
        )?;
    }

    Ok(())
}

fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        return Config::from_file(config_path);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();
    config.save_to_file(config_path)?;
    Ok(config)
}
