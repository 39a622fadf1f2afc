//! Background puzzle generation on tokio's blocking pool.
//!
//! Puzzle search runs for hundreds of milliseconds to seconds, so it never
//! runs on an async worker. [`spawn_generation`] moves it to
//! `spawn_blocking` and hands back a [`PuzzleJob`] the caller can cancel
//! (for example when the peer disconnects mid-handshake).

use std::sync::Arc;

use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::{AdmissionPuzzle, CancellationFlag, PuzzleError, PuzzleReport};

/// Handle to an in-flight puzzle search.
///
/// Dropping the handle cancels the search.
#[derive(Debug)]
pub struct PuzzleJob {
    cancel: CancellationFlag,
    handle: Option<JoinHandle<Result<PuzzleReport, PuzzleError>>>,
}

impl PuzzleJob {
    /// Ask the search to stop at its next iteration.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Flag shared with the worker.
    pub fn cancellation_flag(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// Whether the worker has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the search result.
    ///
    /// # Errors
    ///
    /// `Cancelled` if [`cancel`](Self::cancel) won the race, `WorkerFailed`
    /// if the blocking task panicked.
    pub async fn wait(mut self) -> Result<PuzzleReport, PuzzleError> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| PuzzleError::WorkerFailed("job already awaited".to_string()))?;
        handle
            .await
            .map_err(|e| PuzzleError::WorkerFailed(e.to_string()))?
    }
}

impl Drop for PuzzleJob {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel.cancel();
        }
    }
}

/// Run an unsigned search in the background.
///
/// Must be called from within a tokio runtime.
pub fn spawn_generation(
    puzzle: Arc<AdmissionPuzzle>,
    public_key: Ed25519PublicKey,
    difficulty: u8,
) -> PuzzleJob {
    let cancel = CancellationFlag::new();
    let flag = cancel.clone();
    debug!(difficulty, "spawning puzzle search");

    let handle = tokio::task::spawn_blocking(move || {
        puzzle.generate_cancellable(&public_key, difficulty, &flag)
    });

    PuzzleJob {
        cancel,
        handle: Some(handle),
    }
}

/// Run a signed search in the background.
///
/// Must be called from within a tokio runtime.
pub fn spawn_signed_generation(
    puzzle: Arc<AdmissionPuzzle>,
    keypair: Arc<Ed25519KeyPair>,
    difficulty: u8,
) -> PuzzleJob {
    let cancel = CancellationFlag::new();
    let flag = cancel.clone();
    debug!(difficulty, "spawning signed puzzle search");

    let handle = tokio::task::spawn_blocking(move || {
        puzzle.generate_signed_cancellable(&keypair, difficulty, &flag)
    });

    PuzzleJob {
        cancel,
        handle: Some(handle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ThreadRandomSource;
    use crate::domain::{JitterWindow, PuzzleConfig, TimingSafeVerifier};
    use std::time::Duration;

    fn puzzle() -> Arc<AdmissionPuzzle> {
        let random = Arc::new(ThreadRandomSource::new());
        let verifier = Arc::new(TimingSafeVerifier::new(
            JitterWindow::for_testing(),
            random.clone(),
        ));
        Arc::new(AdmissionPuzzle::new(PuzzleConfig::for_testing(), verifier, random).unwrap())
    }

    #[tokio::test]
    async fn test_background_generation_completes() {
        let puzzle = puzzle();
        let keypair = Arc::new(Ed25519KeyPair::from_seed([1; 32]));

        let job = spawn_signed_generation(Arc::clone(&puzzle), Arc::clone(&keypair), 4);
        let report = job.wait().await.unwrap();

        assert!(puzzle
            .verify(&report.solution, keypair.public_key().as_bytes())
            .is_ok());
    }

    #[tokio::test]
    async fn test_background_generation_cancels() {
        let puzzle = puzzle();
        let key = Ed25519KeyPair::from_seed([2; 32]).public_key();

        let job = spawn_generation(puzzle, key, 24);
        tokio::time::sleep(Duration::from_millis(10)).await;
        job.cancel();

        assert!(matches!(
            job.wait().await,
            Err(PuzzleError::Cancelled { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropping_job_cancels_search() {
        let puzzle = puzzle();
        let key = Ed25519KeyPair::from_seed([3; 32]).public_key();

        let job = spawn_generation(puzzle, key, 24);
        let flag = job.cancellation_flag();
        drop(job);

        assert!(flag.is_cancelled());
    }
}
