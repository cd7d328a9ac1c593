/*!
 * Tests for error types and classification
 */

use yatr::errors::{EngineError, ErrorKind, GatewayError};

#[test]
fn test_gatewayError_unconfigured_shouldDisplayProviderName() {
    let error = GatewayError::Unconfigured("DeepL".to_string());
    let display = format!("{}", error);
    assert!(display.contains("DeepL"));
    assert!(display.contains("not configured"));
}

#[test]
fn test_gatewayError_authFailed_shouldMapToAuthFailedKind() {
    let error = GatewayError::AuthFailed("invalid key".to_string());
    assert_eq!(error.kind(), ErrorKind::AuthFailed);
}

#[test]
fn test_gatewayError_timeout_shouldMapToTimeoutKind() {
    let error = GatewayError::Timeout("DeepL API".to_string());
    assert_eq!(error.kind(), ErrorKind::Timeout);
    assert!(format!("{}", error).contains("timeout"));
}

#[test]
fn test_gatewayError_quotaOrProviderRejected_shouldMapToMatchingKind() {
    let error = GatewayError::QuotaOrProviderRejected("quota exceeded".to_string());
    assert_eq!(error.kind(), ErrorKind::QuotaOrProviderRejected);
}

#[test]
fn test_engineError_fromGatewayError_shouldKeepInnerKind() {
    let engine: EngineError = GatewayError::NetworkFailure("unreachable".to_string()).into();
    assert_eq!(engine.kind(), ErrorKind::NetworkFailure);
}

#[test]
fn test_engineError_preconditionUnmet_shouldMapToMatchingKind() {
    let error = EngineError::PreconditionUnmet("no source text".to_string());
    assert_eq!(error.kind(), ErrorKind::PreconditionUnmet);
    assert!(format!("{}", error).contains("no source text"));
}

#[test]
fn test_engineError_fileCorrupt_shouldMapToMatchingKind() {
    let error = EngineError::FileCorrupt("bad root element".to_string());
    assert_eq!(error.kind(), ErrorKind::FileCorrupt);
}

#[test]
fn test_engineError_fromIoError_shouldMapToUnknownKind() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let engine: EngineError = io_error.into();
    assert_eq!(engine.kind(), ErrorKind::Unknown);
}

#[test]
fn test_errorKind_display_shouldUseSnakeCaseNames() {
    assert_eq!(format!("{}", ErrorKind::AuthFailed), "auth_failed");
    assert_eq!(format!("{}", ErrorKind::NetworkFailure), "network_failure");
    assert_eq!(format!("{}", ErrorKind::PreconditionUnmet), "precondition_unmet");
}
