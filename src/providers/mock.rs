/*!
 * Mock provider implementation for testing.
 *
 * `MockTranslator` implements `TranslateApi` with scripted behavior so the
 * rephrasers and the orchestrator can be exercised without any network:
 * - per-target-code rules for `translate` (reply, empty, fail, delay)
 * - a single scripted reply or failure for `complete`
 * - full call recording for asserting codes, ordering, and call counts
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::GatewayError;
use crate::providers::{ProviderKind, TranslateApi};

/// Scripted behavior for one translate target.
#[derive(Debug, Clone)]
pub enum MockRule {
    /// Reply with the given text
    Reply(String),
    /// Echo the input prefixed with the target code
    Echo,
    /// Reply with an empty string
    Empty,
    /// Fail with a network-class error carrying the given message
    Fail(String),
    /// Sleep for the given delay, then reply with the given text
    Delay(u64, String),
}

/// One recorded `translate` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Input text
    pub text: String,
    /// Source code passed to the call, if any
    pub source_code: Option<String>,
    /// Target code passed to the call
    pub target_code: String,
    /// Provider the call was issued for
    pub provider: ProviderKind,
}

/// Scripted `TranslateApi` double for tests.
#[derive(Debug, Default)]
pub struct MockTranslator {
    /// Per-target-code translate rules
    rules: Mutex<HashMap<String, MockRule>>,
    /// Scripted reply for `complete`; `Err` message fails the call
    complete_reply: Mutex<Option<Result<String, String>>>,
    /// All translate invocations, in order
    calls: Mutex<Vec<RecordedCall>>,
    /// Number of translate invocations
    translate_count: AtomicUsize,
    /// Number of complete invocations
    complete_count: AtomicUsize,
}

impl MockTranslator {
    /// Create a mock that echoes every translate call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the behavior for one translate target code.
    pub fn on_target(self, target_code: impl Into<String>, rule: MockRule) -> Self {
        self.rules.lock().insert(target_code.into(), rule);
        self
    }

    /// Script the `complete` reply.
    pub fn completing_with(self, reply: impl Into<String>) -> Self {
        *self.complete_reply.lock() = Some(Ok(reply.into()));
        self
    }

    /// Script `complete` to fail.
    pub fn failing_completion(self, message: impl Into<String>) -> Self {
        *self.complete_reply.lock() = Some(Err(message.into()));
        self
    }

    /// All recorded translate calls, in invocation order.
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of translate calls issued so far.
    pub fn translate_calls(&self) -> usize {
        self.translate_count.load(Ordering::SeqCst)
    }

    /// Number of complete calls issued so far.
    pub fn complete_calls(&self) -> usize {
        self.complete_count.load(Ordering::SeqCst)
    }

    /// Total network-surface calls issued so far.
    pub fn total_calls(&self) -> usize {
        self.translate_calls() + self.complete_calls()
    }
}

#[async_trait]
impl TranslateApi for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_code: Option<&str>,
        target_code: &str,
        provider: ProviderKind,
    ) -> Result<String, GatewayError> {
        self.translate_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(RecordedCall {
            text: text.to_string(),
            source_code: source_code.map(str::to_string),
            target_code: target_code.to_string(),
            provider,
        });

        let rule = self
            .rules
            .lock()
            .get(target_code)
            .cloned()
            .unwrap_or(MockRule::Echo);

        match rule {
            MockRule::Reply(reply) => Ok(reply),
            MockRule::Echo => Ok(format!("[{}] {}", target_code, text)),
            MockRule::Empty => Ok(String::new()),
            MockRule::Fail(message) => Err(GatewayError::NetworkFailure(message)),
            MockRule::Delay(delay_ms, reply) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(reply)
            }
        }
    }

    async fn complete(&self, _prompt: &str, _provider: ProviderKind) -> Result<String, GatewayError> {
        self.complete_count.fetch_add(1, Ordering::SeqCst);
        match self.complete_reply.lock().clone() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(GatewayError::QuotaOrProviderRejected(message)),
            None => Ok(String::new()),
        }
    }
}
