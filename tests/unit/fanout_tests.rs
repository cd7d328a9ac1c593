/*!
 * Tests for the concurrent multi-language rephrase fan-out
 */

use std::sync::Arc;
use std::time::Duration;

use yatr::providers::mock::{MockRule, MockTranslator};
use yatr::rephrase::{
    DEFAULT_WORKER_TIMEOUT, FanoutResult, INTERMEDIATE_CODES, NO_ALTERNATIVES, fanout_rephrase,
};

#[tokio::test]
async fn test_fanout_withAllWorkersSucceeding_shouldCollectFiveCandidates() {
    // Default echo rules make each intermediate round trip distinct
    let mock = Arc::new(MockTranslator::new());

    let result = fanout_rephrase(
        mock.clone(),
        "Good morning",
        "English",
        DEFAULT_WORKER_TIMEOUT,
    )
    .await;

    assert_eq!(result.candidates.len(), 5);
    // Two hops per intermediate language
    assert_eq!(mock.translate_calls(), 10);
}

#[tokio::test]
async fn test_fanout_shouldRoundTripThroughEachIntermediateLanguage() {
    let mock = Arc::new(MockTranslator::new());

    let _ = fanout_rephrase(
        mock.clone(),
        "Good morning",
        "English",
        DEFAULT_WORKER_TIMEOUT,
    )
    .await;

    let calls = mock.recorded_calls();
    for code in INTERMEDIATE_CODES {
        // Forward hop into the intermediate language, from the collapsed source code
        assert!(
            calls
                .iter()
                .any(|c| c.target_code == code && c.source_code.as_deref() == Some("EN")),
            "missing forward hop via {}",
            code
        );
        // Back hop out of the intermediate language into the variant target code
        assert!(
            calls
                .iter()
                .any(|c| c.source_code.as_deref() == Some(code) && c.target_code == "EN-GB"),
            "missing back hop via {}",
            code
        );
    }
}

#[tokio::test]
async fn test_fanout_withIdenticalRoundTrips_shouldPreserveDuplicates() {
    // Two intermediates survive; the shared back hop makes their results identical
    let mock = Arc::new(
        MockTranslator::new()
            .on_target("TR", MockRule::Reply("ara".to_string()))
            .on_target("FR", MockRule::Reply("ara".to_string()))
            .on_target("RU", MockRule::Fail("down".to_string()))
            .on_target("IT", MockRule::Fail("down".to_string()))
            .on_target("ES", MockRule::Fail("down".to_string()))
            .on_target("EN-GB", MockRule::Reply("A fine morning".to_string())),
    );

    let result = fanout_rephrase(
        mock.clone(),
        "Good morning",
        "English",
        DEFAULT_WORKER_TIMEOUT,
    )
    .await;

    assert_eq!(
        result.candidates,
        vec!["A fine morning".to_string(), "A fine morning".to_string()]
    );
}

#[tokio::test]
async fn test_fanout_withTwoDistinctAndOneDuplicate_shouldKeepAllThree() {
    let mock = Arc::new(
        MockTranslator::new()
            .on_target("TR", MockRule::Reply("yol bir".to_string()))
            .on_target("FR", MockRule::Reply("yol bir".to_string()))
            .on_target("RU", MockRule::Reply("yol iki".to_string()))
            .on_target("IT", MockRule::Fail("down".to_string()))
            .on_target("ES", MockRule::Fail("down".to_string())),
    );

    let result = fanout_rephrase(
        mock.clone(),
        "Good morning",
        "English",
        DEFAULT_WORKER_TIMEOUT,
    )
    .await;

    // Back hops echo, so equal intermediates collapse to equal candidates
    assert_eq!(result.candidates.len(), 3);
    assert_eq!(result.candidates[0], result.candidates[1]);
    assert_ne!(result.candidates[1], result.candidates[2]);
}

#[tokio::test]
async fn test_fanout_withFailingWorkers_shouldOnlyShrinkCandidateSet() {
    let mock = Arc::new(
        MockTranslator::new()
            .on_target("RU", MockRule::Fail("down".to_string()))
            .on_target("IT", MockRule::Empty),
    );

    let result = fanout_rephrase(
        mock.clone(),
        "Good morning",
        "English",
        DEFAULT_WORKER_TIMEOUT,
    )
    .await;

    assert_eq!(result.candidates.len(), 3);
}

#[tokio::test]
async fn test_fanout_withAllWorkersFailing_shouldYieldEmptyCandidateSet() {
    let mock = Arc::new(
        MockTranslator::new()
            .on_target("TR", MockRule::Fail("down".to_string()))
            .on_target("FR", MockRule::Fail("down".to_string()))
            .on_target("RU", MockRule::Fail("down".to_string()))
            .on_target("IT", MockRule::Fail("down".to_string()))
            .on_target("ES", MockRule::Fail("down".to_string())),
    );

    let result = fanout_rephrase(
        mock.clone(),
        "Good morning",
        "English",
        DEFAULT_WORKER_TIMEOUT,
    )
    .await;

    assert!(result.candidates.is_empty());
    assert_eq!(result.format(), NO_ALTERNATIVES);
}

#[tokio::test]
async fn test_fanout_withSlowWorker_shouldAbandonItAfterTheTimeBound() {
    let mock = Arc::new(
        MockTranslator::new()
            .on_target("TR", MockRule::Delay(5_000, "too late".to_string())),
    );

    let result = fanout_rephrase(
        mock.clone(),
        "Good morning",
        "English",
        Duration::from_millis(200),
    )
    .await;

    assert_eq!(result.candidates.len(), 4);
    assert!(!result.candidates.iter().any(|c| c.contains("too late")));
}

#[test]
fn test_fanoutFormat_withFewCandidates_shouldNumberThem() {
    let result = FanoutResult {
        candidates: vec!["first".to_string(), "second".to_string()],
    };

    assert_eq!(result.format(), "1. first\n2. second");
}

#[test]
fn test_fanoutFormat_withMoreThanFiveCandidates_shouldAppendOverflowNote() {
    let result = FanoutResult {
        candidates: (1..=7).map(|i| format!("candidate {}", i)).collect(),
    };

    let formatted = result.format();
    assert!(formatted.starts_with("1. candidate 1"));
    assert!(formatted.contains("5. candidate 5"));
    assert!(!formatted.contains("6. candidate 6"));
    assert!(formatted.ends_with("... (7 results found)"));
}
