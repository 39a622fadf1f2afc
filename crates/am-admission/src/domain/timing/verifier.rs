//! Jittered Ed25519 verification.

use std::sync::Arc;
use std::time::Duration;

use shared_crypto::{Ed25519PublicKey, Ed25519Signature};
use tracing::debug;

use super::config::JitterWindow;
use super::types::{VerificationRequest, VerificationResult};
use crate::domain::errors::VerificationError;
use crate::metrics;
use crate::ports::outbound::RandomSource;

/// Signature verifier with outcome-independent response time.
///
/// Holds no locks; the jitter suspends only the calling thread or task.
pub struct TimingSafeVerifier {
    window: JitterWindow,
    random: Arc<dyn RandomSource>,
}

impl TimingSafeVerifier {
    /// Create a verifier drawing jitter from `random`.
    pub fn new(window: JitterWindow, random: Arc<dyn RandomSource>) -> Self {
        Self { window, random }
    }

    /// Configured jitter bounds.
    pub fn window(&self) -> JitterWindow {
        self.window
    }

    /// Verify raw key and signature bytes, blocking the thread for the jitter.
    ///
    /// Returns `Ok(false)` for a well-formed signature that does not verify.
    pub fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> VerificationResult {
        let (key, sig) = parse(public_key, signature)?;
        Ok(self.verify_parsed(&key, message, &sig))
    }

    /// Verify already decoded values, blocking the thread for the jitter.
    pub fn verify_parsed(
        &self,
        public_key: &Ed25519PublicKey,
        message: &[u8],
        signature: &Ed25519Signature,
    ) -> bool {
        let valid = check(public_key, message, signature);
        std::thread::sleep(self.next_jitter());
        valid
    }

    /// Async variant of [`verify`](Self::verify).
    ///
    /// The jitter is a timer suspension, so no worker thread is held while
    /// waiting.
    pub async fn verify_async(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> VerificationResult {
        let (key, sig) = parse(public_key, signature)?;
        Ok(self.verify_parsed_async(&key, message, &sig).await)
    }

    /// Async variant of [`verify_parsed`](Self::verify_parsed).
    pub async fn verify_parsed_async(
        &self,
        public_key: &Ed25519PublicKey,
        message: &[u8],
        signature: &Ed25519Signature,
    ) -> bool {
        let valid = check(public_key, message, signature);
        tokio::time::sleep(self.next_jitter()).await;
        valid
    }

    /// Verify a single request.
    pub fn verify_request(&self, request: &VerificationRequest) -> VerificationResult {
        self.verify(&request.public_key, &request.message, &request.signature)
    }

    /// Verify many requests in a random order.
    ///
    /// `results[i]` always corresponds to `requests[i]`. Each item receives
    /// its own independent jitter.
    pub fn batch_verify(&self, requests: &[VerificationRequest]) -> Vec<VerificationResult> {
        let mut results: Vec<VerificationResult> = vec![Ok(false); requests.len()];
        for index in self.processing_order(requests.len()) {
            results[index] = self.verify_request(&requests[index]);
        }
        results
    }

    /// Async variant of [`batch_verify`](Self::batch_verify).
    pub async fn batch_verify_async(
        &self,
        requests: &[VerificationRequest],
    ) -> Vec<VerificationResult> {
        let mut results: Vec<VerificationResult> = vec![Ok(false); requests.len()];
        for index in self.processing_order(requests.len()) {
            let request = &requests[index];
            results[index] = self
                .verify_async(&request.public_key, &request.message, &request.signature)
                .await;
        }
        results
    }

    /// Random permutation of `0..len`.
    pub(crate) fn processing_order(&self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        self.random.shuffle_indices(&mut order);
        order
    }

    fn next_jitter(&self) -> Duration {
        let micros = self
            .random
            .random_range(self.window.min_micros, self.window.max_micros);
        Duration::from_micros(micros)
    }
}

impl std::fmt::Debug for TimingSafeVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimingSafeVerifier")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

fn parse(
    public_key: &[u8],
    signature: &[u8],
) -> Result<(Ed25519PublicKey, Ed25519Signature), VerificationError> {
    let key = Ed25519PublicKey::from_slice(public_key).map_err(|e| {
        debug!(error = %e, "rejecting malformed public key");
        metrics::record_signature_verification("malformed");
        VerificationError::MalformedPublicKey(e)
    })?;
    let sig = Ed25519Signature::from_slice(signature).map_err(|e| {
        debug!(error = %e, "rejecting malformed signature");
        metrics::record_signature_verification("malformed");
        VerificationError::MalformedSignature(e)
    })?;
    Ok((key, sig))
}

fn check(public_key: &Ed25519PublicKey, message: &[u8], signature: &Ed25519Signature) -> bool {
    let valid = public_key.verify(message, signature).is_ok();
    metrics::record_signature_verification(if valid { "valid" } else { "invalid" });
    valid
}
