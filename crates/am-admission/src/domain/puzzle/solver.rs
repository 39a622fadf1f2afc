//! Puzzle search and verification.

use std::sync::Arc;
use std::time::Instant;

use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey};
use subtle::ConstantTimeEq;
use tracing::{debug, info};

use super::config::PuzzleConfig;
use super::security::{challenge_message, count_leading_zero_bits, MemoryHardHasher};
use super::types::{CancellationFlag, PuzzleReport, PuzzleSolution};
use crate::domain::errors::PuzzleError;
use crate::domain::timing::TimingSafeVerifier;
use crate::metrics;
use crate::ports::outbound::RandomSource;

/// Generates and verifies admission puzzles.
///
/// Stateless apart from configuration: verification needs only the
/// submitted solution and the claimed public key.
pub struct AdmissionPuzzle {
    config: PuzzleConfig,
    hasher: MemoryHardHasher,
    verifier: Arc<TimingSafeVerifier>,
    random: Arc<dyn RandomSource>,
}

impl AdmissionPuzzle {
    /// Create a puzzle engine.
    ///
    /// # Errors
    ///
    /// `PuzzleError::Hashing` if Argon2 rejects the cost parameters.
    pub fn new(
        config: PuzzleConfig,
        verifier: Arc<TimingSafeVerifier>,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self, PuzzleError> {
        let hasher = MemoryHardHasher::new(&config)?;
        Ok(Self {
            config,
            hasher,
            verifier,
            random,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Search for an unsigned solution. CPU and memory bound: run it off
    /// latency-sensitive paths (see `adapters::background`).
    pub fn generate(
        &self,
        public_key: &Ed25519PublicKey,
        difficulty: u8,
    ) -> Result<PuzzleReport, PuzzleError> {
        self.generate_cancellable(public_key, difficulty, &CancellationFlag::new())
    }

    /// Like [`generate`](Self::generate), aborting once `cancel` is set.
    ///
    /// Cancellation discards the in-flight work; nothing is recorded.
    pub fn generate_cancellable(
        &self,
        public_key: &Ed25519PublicKey,
        difficulty: u8,
        cancel: &CancellationFlag,
    ) -> Result<PuzzleReport, PuzzleError> {
        self.check_difficulty(difficulty)?;

        let started = Instant::now();
        let mut nonce = self.random.random_u64();
        let mut attempts = 0u64;

        loop {
            if cancel.is_cancelled() {
                debug!(difficulty, attempts, "puzzle search cancelled");
                return Err(PuzzleError::Cancelled { attempts });
            }

            let digest = self.hasher.digest(public_key, nonce)?;
            attempts += 1;

            if count_leading_zero_bits(&digest) >= u32::from(difficulty) {
                let elapsed = started.elapsed();
                info!(
                    difficulty,
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "puzzle solved"
                );
                return Ok(PuzzleReport {
                    solution: PuzzleSolution {
                        nonce,
                        difficulty,
                        digest,
                        signature: None,
                    },
                    elapsed,
                    attempts,
                });
            }

            nonce = nonce.wrapping_add(1);
        }
    }

    /// Search for a solution and sign its challenge with `keypair`.
    pub fn generate_signed(
        &self,
        keypair: &Ed25519KeyPair,
        difficulty: u8,
    ) -> Result<PuzzleReport, PuzzleError> {
        self.generate_signed_cancellable(keypair, difficulty, &CancellationFlag::new())
    }

    /// Cancellable variant of [`generate_signed`](Self::generate_signed).
    pub fn generate_signed_cancellable(
        &self,
        keypair: &Ed25519KeyPair,
        difficulty: u8,
        cancel: &CancellationFlag,
    ) -> Result<PuzzleReport, PuzzleError> {
        let public_key = keypair.public_key();
        let mut report = self.generate_cancellable(&public_key, difficulty, cancel)?;
        let solution = &mut report.solution;
        let challenge = challenge_message(
            &public_key,
            solution.difficulty,
            solution.nonce,
            &solution.digest,
        );
        solution.signature = Some(keypair.sign(&challenge));
        Ok(report)
    }

    /// Verify `solution` against the claimed public key.
    ///
    /// One Argon2 evaluation regardless of difficulty. A present signature is
    /// checked first since it is far cheaper than the digest.
    ///
    /// # Errors
    ///
    /// - `MalformedInput`: key bytes do not decode
    /// - `InvalidDifficulty`: claimed difficulty outside configured bounds
    /// - `InvalidSignature`: embedded signature does not verify
    /// - `InsufficientWork`: digest mismatch or too few leading zero bits
    pub fn verify(&self, solution: &PuzzleSolution, public_key: &[u8]) -> Result<(), PuzzleError> {
        let result = self.verify_inner(solution, public_key);
        metrics::record_puzzle_verification(match &result {
            Ok(()) => "valid",
            Err(PuzzleError::MalformedInput(_)) => "malformed",
            Err(PuzzleError::InvalidSignature) => "bad_signature",
            Err(_) => "insufficient",
        });
        result
    }

    /// Verify and additionally require a claimed difficulty of at least
    /// `required`.
    pub fn verify_at_least(
        &self,
        solution: &PuzzleSolution,
        public_key: &[u8],
        required: u8,
    ) -> Result<(), PuzzleError> {
        if solution.difficulty < required {
            metrics::record_puzzle_verification("insufficient");
            return Err(PuzzleError::InsufficientWork {
                required,
                found: u32::from(solution.difficulty),
            });
        }
        self.verify(solution, public_key)
    }

    fn verify_inner(
        &self,
        solution: &PuzzleSolution,
        public_key: &[u8],
    ) -> Result<(), PuzzleError> {
        let key = Ed25519PublicKey::from_slice(public_key).map_err(PuzzleError::MalformedInput)?;
        self.check_difficulty(solution.difficulty)?;

        if let Some(signature) = &solution.signature {
            let challenge =
                challenge_message(&key, solution.difficulty, solution.nonce, &solution.digest);
            if !self.verifier.verify_parsed(&key, &challenge, signature) {
                debug!("puzzle signature rejected");
                return Err(PuzzleError::InvalidSignature);
            }
        }

        let digest = self.hasher.digest(&key, solution.nonce)?;
        let found = count_leading_zero_bits(&digest);
        let matches: bool = digest[..].ct_eq(&solution.digest[..]).into();

        if !matches || found < u32::from(solution.difficulty) {
            debug!(
                difficulty = solution.difficulty,
                found, matches, "puzzle work rejected"
            );
            return Err(PuzzleError::InsufficientWork {
                required: solution.difficulty,
                found,
            });
        }

        Ok(())
    }

    fn check_difficulty(&self, difficulty: u8) -> Result<(), PuzzleError> {
        if self.config.accepts_difficulty(difficulty) {
            Ok(())
        } else {
            Err(PuzzleError::InvalidDifficulty {
                difficulty,
                min: self.config.min_difficulty,
                max: self.config.max_difficulty,
            })
        }
    }
}

impl std::fmt::Debug for AdmissionPuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionPuzzle")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
