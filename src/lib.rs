/*!
 * # YATR - Yet Another Translator & Rephraser
 *
 * A Rust library for translating and rephrasing text using AI providers.
 *
 * ## Features
 *
 * - Translation between supported languages using:
 *   - DeepL API (bilingual translation)
 *   - OpenAI API
 *   - DeepSeek API
 * - Rephrasing of source text:
 *   - LLM providers answer a dual-instruction prompt
 *   - DeepL rephrasing is synthesized by back translation and a
 *     concurrent multi-language fan-out
 * - Reverse translation of already-translated text
 * - Persistent translation history with merge and backup support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `languages`: Supported language tables and code mapping
 * - `providers`: Client implementations for the provider APIs:
 *   - `providers::deepl`: DeepL API client
 *   - `providers::openai`: OpenAI API client
 *   - `providers::deepseek`: DeepSeek API client
 *   - `providers::mock`: Scriptable in-memory provider for tests
 * - `gateway`: Uniform call surface over the provider clients
 * - `parser`: Dual-section LLM response parsing
 * - `rephrase`: Rephrase synthesis for the no-rephrase provider:
 *   - `rephrase::two_hop`: Translate-then-back-translate technique
 *   - `rephrase::fanout`: Concurrent multi-language round trips
 * - `orchestrator`: Action routing, session state and completion sink
 * - `history`: Persistent history log
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod gateway;
pub mod history;
pub mod languages;
pub mod orchestrator;
pub mod parser;
pub mod providers;
pub mod rephrase;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{EngineError, ErrorKind, GatewayError};
pub use gateway::ProviderGateway;
pub use history::{HistoryEntry, HistoryStore};
pub use orchestrator::{
    ActionKind, CompletionSink, Orchestrator, RephraseStyle, SessionContext, TranslationOutcome,
};
pub use providers::{ProviderKind, TranslateApi};
