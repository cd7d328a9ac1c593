use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::warn;
use tokio::time::timeout;

use crate::errors::GatewayError;
use crate::languages::{deepl_source_code, deepl_target_code};
use crate::providers::{ProviderKind, TranslateApi};

/// Intermediate languages used to produce paraphrase variation.
pub const INTERMEDIATE_CODES: [&str; 5] = ["TR", "FR", "RU", "IT", "ES"];

/// How many candidates the formatted list shows.
const DISPLAY_LIMIT: usize = 5;

/// Per-worker time bound before a worker is abandoned.
pub const DEFAULT_WORKER_TIMEOUT: Duration = Duration::from_secs(60);

/// Placeholder outcome when no worker produced a usable candidate.
pub const NO_ALTERNATIVES: &str =
    "[No valid rephrased alternatives found using multi-language translation.]";

/// Collected candidates from one fan-out run.
#[derive(Debug, Clone, PartialEq)]
pub struct FanoutResult {
    /// Error-free, non-empty round trips in worker completion order.
    /// Duplicates across workers are preserved.
    pub candidates: Vec<String>,
}

impl FanoutResult {
    /// Format the candidates as a numbered list.
    ///
    /// Only the first five are listed; if more exist an overflow note with
    /// the true count is appended. Zero candidates format as the
    /// `NO_ALTERNATIVES` placeholder, which is still a valid outcome.
    pub fn format(&self) -> String {
        if self.candidates.is_empty() {
            return NO_ALTERNATIVES.to_string();
        }

        let mut formatted = self
            .candidates
            .iter()
            .take(DISPLAY_LIMIT)
            .enumerate()
            .map(|(i, phrase)| format!("{}. {}", i + 1, phrase))
            .collect::<Vec<_>>()
            .join("\n");

        if self.candidates.len() > DISPLAY_LIMIT {
            formatted.push_str(&format!("\n... ({} results found)", self.candidates.len()));
        }

        formatted
    }
}

/// One worker's double hop through a single intermediate language.
///
/// The two hops are strictly sequential; an empty result at either hop is
/// an error for this worker only.
async fn double_translate(
    api: Arc<dyn TranslateApi>,
    text: String,
    intermediate_code: &'static str,
    source_code: String,
    target_code: String,
) -> Result<String, GatewayError> {
    let intermediate = api
        .translate(&text, Some(&source_code), intermediate_code, ProviderKind::DeepL)
        .await?;
    if intermediate.trim().is_empty() {
        return Err(GatewayError::MalformedResponse(format!(
            "intermediate ({}) translation empty",
            intermediate_code
        )));
    }

    let round_tripped = api
        .translate(&intermediate, Some(intermediate_code), &target_code, ProviderKind::DeepL)
        .await?;
    if round_tripped.trim().is_empty() {
        return Err(GatewayError::MalformedResponse(format!(
            "final translation via {} empty",
            intermediate_code
        )));
    }

    Ok(round_tripped.trim().to_string())
}

/// Produce paraphrase candidates by fanning out over intermediate languages.
///
/// One task per intermediate language runs a double hop
/// (`source -> intermediate -> source`) concurrently with the others.
/// Each task reports through its own join handle; the join waits at most
/// `worker_timeout` per worker, and a worker that exceeds the bound is
/// abandoned (its late result is never collected; the task is not
/// forcibly terminated). Worker failures and timeouts only shrink the
/// candidate set, they never fail the fan-out itself.
pub async fn fanout_rephrase(
    api: Arc<dyn TranslateApi>,
    text: &str,
    source_language: &str,
    worker_timeout: Duration,
) -> FanoutResult {
    let source_code = deepl_source_code(source_language);
    let target_code = deepl_target_code(source_language);

    let handles: Vec<_> = INTERMEDIATE_CODES
        .iter()
        .map(|&code| {
            let api = Arc::clone(&api);
            let text = text.to_string();
            let source_code = source_code.clone();
            let target_code = target_code.clone();
            let handle = tokio::spawn(async move {
                double_translate(api, text, code, source_code, target_code).await
            });
            (code, handle)
        })
        .collect();

    let joins = join_all(
        handles
            .into_iter()
            .map(|(code, handle)| async move { (code, timeout(worker_timeout, handle).await) }),
    )
    .await;

    let mut candidates = Vec::new();
    for (code, join_result) in joins {
        match join_result {
            Ok(Ok(Ok(candidate))) => candidates.push(candidate),
            Ok(Ok(Err(e))) => warn!("Fan-out worker via {} failed: {}", code, e),
            Ok(Err(e)) => warn!("Fan-out worker via {} panicked: {}", code, e),
            Err(_) => warn!("Fan-out worker via {} timed out, abandoning it", code),
        }
    }

    FanoutResult { candidates }
}
