// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::{Config, LogLevel};
use crate::orchestrator::{RephraseStyle, TranslationOutcome};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod gateway;
mod history;
mod languages;
mod orchestrator;
mod parser;
mod providers;
mod rephrase;

/// CLI Wrapper for ProviderKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProvider {
    DeepL,
    OpenAI,
    DeepSeek,
}

impl From<CliProvider> for providers::ProviderKind {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::DeepL => providers::ProviderKind::DeepL,
            CliProvider::OpenAI => providers::ProviderKind::OpenAI,
            CliProvider::DeepSeek => providers::ProviderKind::DeepSeek,
        }
    }
}

/// CLI Wrapper for RephraseStyle to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliStyle {
    Simple,
    Business,
    Casual,
}

impl From<CliStyle> for RephraseStyle {
    fn from(cli_style: CliStyle) -> Self {
        match cli_style {
            CliStyle::Simple => RephraseStyle::Simple,
            CliStyle::Business => RephraseStyle::Business,
            CliStyle::Casual => RephraseStyle::Casual,
        }
    }
}

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

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text and rephrase the original (default command)
    Translate(TextArgs),

    /// Translate already-translated text back into the source language
    Back(TextArgs),

    /// Rephrase text in the source language
    Rephrase {
        #[command(flatten)]
        args: TextArgs,

        /// Rephrase style
        #[arg(long, value_enum)]
        style: Option<CliStyle>,
    },

    /// Show, merge or clear the translation history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommands {
    /// Show the most recent history entries
    Show {
        /// Maximum number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Merge entries from another history file
    Merge {
        /// History file to merge from
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Back up the history to a timestamped file and clear it
    Clear,
}

#[derive(Parser, Debug)]
struct TextArgs {
    /// Text to process
    #[arg(value_name = "TEXT")]
    text: String,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliProvider>,

    /// Model name to use (LLM providers only)
    #[arg(short, long)]
    model: Option<String>,

    /// Source language display name (e.g., 'English', 'Turkish')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language display name (e.g., 'English', 'Turkish')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// YATR - Yet Another Translator & Rephraser
///
/// Translates text between languages and rephrases it using AI providers
/// (DeepL, OpenAI, DeepSeek).
#[derive(Parser, Debug)]
#[command(name = "yatr")]
#[command(author = "YATR Team")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered translation and rephrasing tool")]
#[command(long_about = "YATR translates text between languages and rephrases it using AI providers.

EXAMPLES:
    yatr translate \"Good morning\"               # Translate using default config
    yatr translate -p deepl \"Good morning\"      # Use a specific provider
    yatr translate -s English -t Turkish \"Hi\"   # Override the language pair
    yatr back \"Günaydın\"                        # Translate back to the source language
    yatr rephrase --style business \"Hi there\"   # Rephrase with a style
    yatr history show                            # Show recent history
    yatr history merge old_history.json          # Merge another history file
    yatr history clear                           # Back up and clear the history

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically; add your API keys before use.

SUPPORTED PROVIDERS:
    deepl     - DeepL API (translation only; rephrasing is synthesized)
    openai    - OpenAI API (default: gpt-3.5-turbo)
    deepseek  - DeepSeek API (default: deepseek-chat)")]
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

    // @returns: ANSI color code for log level
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
                "{}{} [{}] {}\x1B[0m",
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Translate(args) => {
            let mut controller = build_controller(&args)?;
            finish(controller.translate(&args.text).await)
        }
        Commands::Back(args) => {
            let mut controller = build_controller(&args)?;
            finish(controller.translate_back(&args.text).await)
        }
        Commands::Rephrase { args, style } => {
            let mut controller = build_controller(&args)?;
            if let Some(style) = style {
                controller.set_style(style.into());
            }
            finish(controller.rephrase(&args.text).await)
        }
        Commands::History { command } => {
            let controller = Controller::with_config(Config::load_or_create("conf.json")?)?;
            match command {
                HistoryCommands::Show { limit } => controller.show_history(limit),
                HistoryCommands::Merge { file } => {
                    let merged = controller.merge_history(&file)?;
                    println!("Merged {} new entries.", merged);
                }
                HistoryCommands::Clear => match controller.clear_history()? {
                    Some(backup) => println!("History backed up to {:?} and cleared.", backup),
                    None => println!("History was already empty."),
                },
            }
            Ok(())
        }
    }
}

/// Load the configuration, apply CLI overrides, and build a controller.
fn build_controller(args: &TextArgs) -> Result<Controller> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &args.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&level));
    }

    let mut config = Config::load_or_create(&args.config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = args.provider.clone() {
        config.provider = provider.into();
    }

    if let Some(model) = &args.model {
        let provider = config.provider;
        if let Some(provider_config) = config
            .available_providers
            .iter_mut()
            .find(|p| p.provider == provider)
        {
            provider_config.model = model.clone();
        }
    }

    if let Some(source_lang) = &args.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &args.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone().into();
    } else {
        // Log level was not set via command line, apply it from config
        log::set_max_level(level_filter(&config.log_level));
    }

    Controller::with_config(config)
}

/// Map an action outcome to the process exit status.
fn finish(outcome: TranslationOutcome) -> Result<()> {
    match outcome {
        TranslationOutcome::Success { .. } => Ok(()),
        TranslationOutcome::Error { kind, message } => {
            bail!("{} ({})", message, kind)
        }
    }
}
