use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::gateway::ProviderGateway;
use crate::history::{HistoryEntry, HistoryStore};
use crate::orchestrator::{
    ActionKind, CompletionSink, Orchestrator, RephraseStyle, SessionContext, TranslationOutcome,
};

// @module: Application controller wiring config, gateway, orchestrator and history

/// Completion sink that prints results to stdout and failures to the log.
pub struct ConsoleSink;

impl CompletionSink for ConsoleSink {
    fn on_action_complete(
        &self,
        outcome: &TranslationOutcome,
        _original_input: &str,
        action: ActionKind,
    ) {
        match outcome {
            TranslationOutcome::Success {
                translated,
                rephrased,
            } => match action {
                ActionKind::Translate => {
                    println!("Translated:\n{}", translated);
                    if let Some(rephrased) = rephrased {
                        println!("\nRephrased:\n{}", rephrased);
                    }
                }
                ActionKind::TranslateBack => {
                    println!("Back translation:\n{}", translated);
                }
                ActionKind::RephraseAgain => {
                    if let Some(rephrased) = rephrased {
                        println!("Rephrased alternatives:\n{}", rephrased);
                    }
                }
            },
            TranslationOutcome::Error { kind, message } => {
                error!("{} failed ({}): {}", action, kind, message);
            }
        }
    }
}

/// Main application controller for the translation engine.
pub struct Controller {
    /// App configuration
    config: Config,
    /// Action router
    orchestrator: Orchestrator,
    /// History log shared with the orchestrator
    history: Arc<HistoryStore>,
    /// Per-run session state
    session: SessionContext,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let gateway = ProviderGateway::from_config(&config)?;
        let history = Arc::new(
            HistoryStore::open(&config.history_file)
                .map_err(|e| anyhow::anyhow!("Failed to open history: {}", e))?,
        );
        let session = SessionContext::new(
            config.provider,
            config.source_language.clone(),
            config.target_language.clone(),
        );
        let orchestrator = Orchestrator::new(
            Arc::new(gateway),
            Arc::clone(&history),
            Arc::new(ConsoleSink),
        );

        Ok(Self {
            config,
            orchestrator,
            history,
            session,
        })
    }

    /// Set the rephrase style for subsequent actions.
    pub fn set_style(&mut self, style: RephraseStyle) {
        self.session.style = style;
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate text forward with the configured provider.
    pub async fn translate(&mut self, text: &str) -> TranslationOutcome {
        let spinner = Self::spinner("Translating");
        let outcome = self.orchestrator.translate(&mut self.session, text).await;
        spinner.finish_and_clear();
        outcome
    }

    /// Translate text back into the configured source language.
    pub async fn translate_back(&mut self, text: &str) -> TranslationOutcome {
        let spinner = Self::spinner("Translating back");
        let outcome = self
            .orchestrator
            .translate_back(&mut self.session, text)
            .await;
        spinner.finish_and_clear();
        outcome
    }

    /// Rephrase text with the configured provider.
    ///
    /// A one-shot invocation has no prior translation in the session, so
    /// the given text is seeded as the retained source text first.
    pub async fn rephrase(&mut self, text: &str) -> TranslationOutcome {
        let text = text.trim();
        if !text.is_empty() {
            self.session.last_source_text = Some(text.to_string());
        }

        let spinner = Self::spinner("Rephrasing");
        let outcome = self.orchestrator.rephrase_again(&mut self.session).await;
        spinner.finish_and_clear();
        outcome
    }

    /// Print the most recent history entries, newest first.
    pub fn show_history(&self, limit: usize) {
        let entries = self.history.entries();
        if entries.is_empty() {
            println!("History is empty.");
            return;
        }

        info!("{} entries in {:?}", entries.len(), self.history.path());
        for entry in entries.iter().take(limit) {
            print_entry(entry);
        }
        if entries.len() > limit {
            println!("... ({} more entries)", entries.len() - limit);
        }
    }

    /// Merge entries from an external history file, returning the count
    /// of newly merged entries.
    pub fn merge_history(&self, path: &Path) -> Result<usize> {
        self.history
            .merge_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to merge history: {}", e))
    }

    /// Back up and clear the history, returning the backup path if a
    /// file existed.
    pub fn clear_history(&self) -> Result<Option<PathBuf>> {
        self.history
            .backup_and_clear()
            .map_err(|e| anyhow::anyhow!("Failed to clear history: {}", e))
    }

    /// Spinner shown while a provider call is in flight.
    fn spinner(message: &'static str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message(message);
        pb
    }
}

fn print_entry(entry: &HistoryEntry) {
    println!("[{}] {} ({})", entry.time, entry.provider, entry.direction);
    println!("  original:   {}", entry.original);
    println!("  translated: {}", entry.translated);
    if !entry.rephrased.is_empty() {
        println!("  rephrased:  {}", entry.rephrased);
    }
    println!();
}
