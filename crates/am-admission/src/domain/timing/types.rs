//! Verification request types.

use crate::domain::errors::VerificationError;

/// Outcome a test harness expects from a request.
///
/// Carried alongside the request so timing studies can bucket samples. The
/// verifier never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedOutcome {
    /// Signature should verify
    Valid,
    /// Signature should fail
    Invalid,
}

/// One signature check, consumed once.
///
/// Fields hold raw wire bytes so that malformed input can be represented and
/// rejected as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Encoded Ed25519 public key (32 bytes when well-formed)
    pub public_key: Vec<u8>,
    /// Signed message
    pub message: Vec<u8>,
    /// Encoded Ed25519 signature (64 bytes when well-formed)
    pub signature: Vec<u8>,
    /// Test-only annotation
    pub expected: Option<ExpectedOutcome>,
}

impl VerificationRequest {
    /// Build a request from raw parts.
    pub fn new(
        public_key: impl Into<Vec<u8>>,
        message: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            message: message.into(),
            signature: signature.into(),
            expected: None,
        }
    }

    /// Annotate with the outcome a test expects.
    pub fn with_expected(mut self, expected: ExpectedOutcome) -> Self {
        self.expected = Some(expected);
        self
    }
}

/// Per-item batch result: `Ok(valid)` or a malformed-input error.
pub type VerificationResult = Result<bool, VerificationError>;
