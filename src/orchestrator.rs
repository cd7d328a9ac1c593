/*!
 * Action orchestration over the provider gateway.
 *
 * The orchestrator owns the three user-facing actions (translate,
 * translate back, rephrase again), routes each one to the right provider
 * technique, records completed actions in history, and reports every
 * outcome through a completion sink exactly once.
 */

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::{EngineError, ErrorKind};
use crate::history::{HistoryEntry, HistoryStore};
use crate::languages::{deepl_source_code, deepl_target_code, language_code};
use crate::parser::{parse_dual_sections, rephrase_label, translation_label};
use crate::providers::{ProviderKind, TranslateApi};
use crate::rephrase::{fanout_rephrase, two_hop_translate_rephrase, DEFAULT_WORKER_TIMEOUT};

/// Rephrased column value for reverse translations, which have no
/// rephrase leg.
pub const NOT_APPLICABLE_REVERSE: &str = "[N/A for reverse translation]";

/// Translated column value for a rephrase recorded before any forward
/// translation result was kept.
pub const PREVIOUS_TRANSLATION_MISSING: &str = "[Previous translation missing]";

/// Collapses runs of blank lines; DeepSeek pads its numbered lists with them.
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// The three actions the engine exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Forward translation plus rephrase of the original text
    Translate,
    /// Reverse translation of already-translated text
    TranslateBack,
    /// Fresh rephrase of the last successfully translated source text
    RephraseAgain,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Translate => "translate",
            Self::TranslateBack => "translate_back",
            Self::RephraseAgain => "rephrase_again",
        };
        write!(f, "{}", name)
    }
}

/// Tone applied to LLM rephrase instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RephraseStyle {
    #[default]
    Simple,
    Business,
    Casual,
}

impl RephraseStyle {
    /// Instruction fragment spliced into the LLM prompts.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Simple => "in simple and clear English",
            Self::Business => "in professional business English",
            Self::Casual => "in casual conversational English",
        }
    }
}

/// Result of one completed action.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    /// The action produced text
    Success {
        /// The translated text (for a rephrase, the retained previous translation)
        translated: String,
        /// The rephrased text, when the action has a rephrase leg
        rephrased: Option<String>,
    },
    /// The action failed
    Error {
        /// Failure classification
        kind: ErrorKind,
        /// Human-readable description
        message: String,
    },
}

impl TranslationOutcome {
    fn from_engine_error(error: &EngineError) -> Self {
        Self::Error {
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// Whether the action succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Mutable per-session state threaded through the actions.
///
/// Carries the active provider, the language pair, the retained text from
/// the last successful forward translation, and the rephrase style.
/// Nothing here is global; each front end owns its own context.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Active provider
    pub provider: ProviderKind,
    /// Source language display name
    pub source_language: String,
    /// Target language display name
    pub target_language: String,
    /// Source text of the last forward translation that produced real content
    pub last_source_text: Option<String>,
    /// Result of the last forward or reverse translation with real content
    pub last_translation: Option<String>,
    /// Tone for LLM rephrase prompts
    pub style: RephraseStyle,
}

impl SessionContext {
    /// Create a fresh context for a provider and language pair.
    pub fn new(
        provider: ProviderKind,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            source_language: source_language.into(),
            target_language: target_language.into(),
            last_source_text: None,
            last_translation: None,
            style: RephraseStyle::default(),
        }
    }

    /// Direction string for forward actions, "SOURCE -> TARGET".
    fn direction(&self) -> String {
        format!("{} -> {}", self.source_language, self.target_language)
    }

    /// Direction string for the reverse action, "TARGET -> SOURCE".
    fn reverse_direction(&self) -> String {
        format!("{} -> {}", self.target_language, self.source_language)
    }
}

/// Receiver for completed actions.
///
/// The orchestrator calls `on_action_complete` exactly once per invoked
/// action, success or failure, after history has been written.
pub trait CompletionSink: Send + Sync {
    /// Handle the outcome of one action.
    fn on_action_complete(
        &self,
        outcome: &TranslationOutcome,
        original_input: &str,
        action: ActionKind,
    );
}

/// Routes actions to provider techniques and records the results.
pub struct Orchestrator {
    /// Provider call surface
    api: Arc<dyn TranslateApi>,
    /// History log, written on completed actions
    history: Arc<HistoryStore>,
    /// Outcome receiver
    sink: Arc<dyn CompletionSink>,
    /// Per-worker bound for the fan-out rephrase
    worker_timeout: Duration,
}

impl Orchestrator {
    /// Create an orchestrator with the default fan-out worker timeout.
    pub fn new(
        api: Arc<dyn TranslateApi>,
        history: Arc<HistoryStore>,
        sink: Arc<dyn CompletionSink>,
    ) -> Self {
        Self {
            api,
            history,
            sink,
            worker_timeout: DEFAULT_WORKER_TIMEOUT,
        }
    }

    /// Override the fan-out worker timeout.
    pub fn with_worker_timeout(mut self, worker_timeout: Duration) -> Self {
        self.worker_timeout = worker_timeout;
        self
    }

    /// Translate `text` forward and rephrase the original.
    ///
    /// DeepL runs the two-hop technique; the freeform providers get one
    /// dual-instruction prompt whose response is split into its labeled
    /// sections. A result with real content updates the session's retained
    /// text for later rephrase and reverse actions.
    pub async fn translate(&self, session: &mut SessionContext, text: &str) -> TranslationOutcome {
        let text = text.trim();
        if text.is_empty() {
            let outcome = TranslationOutcome::Error {
                kind: ErrorKind::PreconditionUnmet,
                message: "No text to translate".to_string(),
            };
            return self.finish(outcome, text, ActionKind::Translate);
        }

        info!(
            "Translating with {} ({})",
            session.provider.display_name(),
            session.direction()
        );

        let (translated, rephrased) = if session.provider.is_freeform() {
            match self.llm_translate_rephrase(session, text).await {
                Ok(sections) => sections,
                Err(e) => {
                    warn!("Translation failed: {}", e);
                    let outcome = TranslationOutcome::from_engine_error(&e);
                    return self.finish(outcome, text, ActionKind::Translate);
                }
            }
        } else {
            match two_hop_translate_rephrase(
                self.api.as_ref(),
                text,
                &session.source_language,
                &session.target_language,
            )
            .await
            {
                Ok(outcome) => (outcome.translated, outcome.rephrased),
                Err(e) => {
                    warn!("Translation failed: {}", e);
                    let outcome = TranslationOutcome::from_engine_error(&e.into());
                    return self.finish(outcome, text, ActionKind::Translate);
                }
            }
        };

        if has_real_content(&translated) {
            session.last_source_text = Some(text.to_string());
            session.last_translation = Some(translated.clone());
        } else {
            debug!("Translation produced no real content; retained text unchanged");
        }

        self.record(HistoryEntry::now(
            session.provider.display_name(),
            text,
            &translated,
            &rephrased,
            session.direction(),
        ));

        let outcome = TranslationOutcome::Success {
            translated,
            rephrased: Some(rephrased),
        };
        self.finish(outcome, text, ActionKind::Translate)
    }

    /// Translate `text` back into the session's source language.
    ///
    /// The direction is reversed for the duration of the call and in the
    /// recorded history entry. A result with real content updates the
    /// retained translation but never the retained source text.
    pub async fn translate_back(
        &self,
        session: &mut SessionContext,
        text: &str,
    ) -> TranslationOutcome {
        let text = text.trim();
        if text.is_empty() {
            let outcome = TranslationOutcome::Error {
                kind: ErrorKind::PreconditionUnmet,
                message: "No text to translate back".to_string(),
            };
            return self.finish(outcome, text, ActionKind::TranslateBack);
        }

        info!(
            "Translating back with {} ({})",
            session.provider.display_name(),
            session.reverse_direction()
        );

        let result = if session.provider.is_freeform() {
            let source_name = language_code(session.provider, &session.source_language);
            let prompt = back_translate_prompt(text, &source_name);
            match self.api.complete(&prompt, session.provider).await {
                Ok(raw) => Ok(strip_back_translation(&raw, &session.source_language)),
                Err(e) => Err(e),
            }
        } else {
            self.api
                .translate(
                    text,
                    Some(&deepl_source_code(&session.target_language)),
                    &deepl_target_code(&session.source_language),
                    session.provider,
                )
                .await
        };

        let translated = match result {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Back translation failed: {}", e);
                let outcome = TranslationOutcome::from_engine_error(&e.into());
                return self.finish(outcome, text, ActionKind::TranslateBack);
            }
        };

        if has_real_content(&translated) {
            session.last_translation = Some(translated.clone());
        }

        self.record(HistoryEntry::now(
            session.provider.display_name(),
            text,
            &translated,
            NOT_APPLICABLE_REVERSE,
            session.reverse_direction(),
        ));

        let outcome = TranslationOutcome::Success {
            translated,
            rephrased: None,
        };
        self.finish(outcome, text, ActionKind::TranslateBack)
    }

    /// Rephrase the retained source text again.
    ///
    /// Requires a prior forward translation with real content; without one
    /// the action fails before any provider call. DeepL fans out across
    /// the intermediate languages and always records the run, even when
    /// every worker failed. The freeform providers get a numbered-list
    /// prompt and are recorded on success only.
    pub async fn rephrase_again(&self, session: &mut SessionContext) -> TranslationOutcome {
        let Some(source_text) = session.last_source_text.clone().filter(|t| !t.is_empty())
        else {
            let outcome = TranslationOutcome::Error {
                kind: ErrorKind::PreconditionUnmet,
                message: "Cannot rephrase because no translated source text is available"
                    .to_string(),
            };
            return self.finish(outcome, "", ActionKind::RephraseAgain);
        };

        info!(
            "Rephrasing with {} ({})",
            session.provider.display_name(),
            session.style.instruction()
        );

        let retained_translation = session
            .last_translation
            .clone()
            .unwrap_or_else(|| PREVIOUS_TRANSLATION_MISSING.to_string());

        let rephrased = if session.provider.is_freeform() {
            let source_name = language_code(session.provider, &session.source_language);
            let prompt = rephrase_again_prompt(&source_text, &source_name, session.style);
            match self.api.complete(&prompt, session.provider).await {
                Ok(raw) => {
                    let mut cleaned = raw.trim().to_string();
                    if session.provider == ProviderKind::DeepSeek {
                        cleaned = BLANK_LINES.replace_all(&cleaned, "\n").to_string();
                    }
                    cleaned
                }
                Err(e) => {
                    warn!("Rephrase failed: {}", e);
                    let outcome = TranslationOutcome::from_engine_error(&e.into());
                    return self.finish(outcome, &source_text, ActionKind::RephraseAgain);
                }
            }
        } else {
            // Fan-out results are recorded even when empty so the attempt
            // itself shows up in history.
            fanout_rephrase(
                Arc::clone(&self.api),
                &source_text,
                &session.source_language,
                self.worker_timeout,
            )
            .await
            .format()
        };

        // Only the synthesized fan-out entries carry the rephrase tag; the
        // freeform providers log under their plain name.
        let provider_label = if session.provider.is_freeform() {
            session.provider.display_name().to_string()
        } else {
            format!("{} (Rephrase)", session.provider.display_name())
        };
        self.record(HistoryEntry::now(
            provider_label,
            &source_text,
            &retained_translation,
            &rephrased,
            session.direction(),
        ));

        let outcome = TranslationOutcome::Success {
            translated: retained_translation,
            rephrased: Some(rephrased),
        };
        self.finish(outcome, &source_text, ActionKind::RephraseAgain)
    }

    /// One dual-instruction LLM round trip, split into its two sections.
    async fn llm_translate_rephrase(
        &self,
        session: &SessionContext,
        text: &str,
    ) -> Result<(String, String), EngineError> {
        let source_name = language_code(session.provider, &session.source_language);
        let target_name = language_code(session.provider, &session.target_language);
        let prompt = dual_prompt(text, &source_name, &target_name, session.style);

        let raw = self.api.complete(&prompt, session.provider).await?;
        let sections = parse_dual_sections(
            &raw,
            &translation_label(&target_name),
            &rephrase_label(&source_name),
        );
        if !sections.has_translation() {
            debug!("Response did not carry the expected translation label");
        }
        Ok((sections.translated, sections.rephrased))
    }

    /// Append to history, downgrading persistence failures to a warning
    /// so the user still sees the result.
    fn record(&self, entry: HistoryEntry) {
        if let Err(e) = self.history.append(entry) {
            warn!("Failed to record history entry: {}", e);
        }
    }

    /// Deliver the outcome to the sink and hand it back to the caller.
    fn finish(
        &self,
        outcome: TranslationOutcome,
        original_input: &str,
        action: ActionKind,
    ) -> TranslationOutcome {
        self.sink.on_action_complete(&outcome, original_input, action);
        outcome
    }
}

/// A result counts as real content when it is non-empty and not one of
/// the bracketed placeholders.
fn has_real_content(translated: &str) -> bool {
    !translated.is_empty() && !translated.starts_with('[')
}

/// Dual-instruction prompt: translate forward, then rephrase the
/// original, responding in the labeled two-section format.
fn dual_prompt(text: &str, source_name: &str, target_name: &str, style: RephraseStyle) -> String {
    format!(
        "\nGiven the following text in {source}:\n\n\"{text}\"\n\n\
         1. Translate it into {target}.\n\
         2. Rephrase the ORIGINAL {source} text {style}.\n\n\
         Respond ONLY in this format:\n\
         {target} Translation: ...\n\
         {source} Rephrased: ...\n",
        source = source_name,
        target = target_name,
        text = text,
        style = style.instruction(),
    )
}

/// Numbered-list rephrase prompt for the freeform providers.
fn rephrase_again_prompt(text: &str, source_name: &str, style: RephraseStyle) -> String {
    format!(
        "Rephrase the following text in {} {} in 5 different ways. \
         Provide the results in a numbered list (1. ..., 2. ..., etc.) \
         without extra comments:\n\n{}",
        source_name,
        style.instruction(),
        text
    )
}

/// Plain back-translation prompt for the freeform providers.
fn back_translate_prompt(text: &str, source_name: &str) -> String {
    format!("Translate the following text into {}:\n\n{}", source_name, text)
}

/// Clean an LLM back translation: drop quote characters, then strip the
/// translation label if the model echoed it despite the plain prompt.
fn strip_back_translation(raw: &str, source_language: &str) -> String {
    let cleaned = raw.trim().replace('"', "");
    let label = translation_label(source_language);
    match strip_prefix_ignore_case(&cleaned, &label) {
        Some(rest) => rest.trim().to_string(),
        None => cleaned,
    }
}

/// Strip `prefix` from the front of `text`, comparing characters
/// case-insensitively. Byte offsets are never taken from a lowercased
/// copy, so characters whose lowercase form changes length stay safe.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = text;
    for expected in prefix.chars() {
        let mut chars = rest.chars();
        let found = chars.next()?;
        if !found.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        rest = chars.as_str();
    }
    Some(rest)
}
