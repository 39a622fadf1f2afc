//! # Async Handshake Flows
//!
//! Puzzle search on the blocking pool and jittered verification on the
//! async runtime, as a handshake task would drive them.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use am_admission::test_utils::{keypair, socket_v4};
    use am_admission::{
        spawn_signed_generation, AdmissionRequest, ExpectedOutcome, PuzzleError,
        TimingSafeVerification, VerificationRequest,
    };

    use crate::fixtures::{seeded_identity, test_service, TEST_DIFFICULTY};

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_background_solution_is_admitted() {
        let (service, _) = test_service();
        let keypair = Arc::new(keypair(3));

        let job = spawn_signed_generation(service.puzzle(), Arc::clone(&keypair), TEST_DIFFICULTY);
        let report = job.wait().await.unwrap();

        let request = AdmissionRequest::new(
            keypair.public_key().as_bytes().to_vec(),
            report.solution,
            socket_v4(10, 0, 0, 1, 7000),
        );
        let ticket = service.admit(&request).unwrap();
        assert_eq!(ticket.identity, seeded_identity(3));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_disconnect_cancels_search() {
        let (service, _) = test_service();
        let max = service.config().puzzle.max_difficulty;

        let job = spawn_signed_generation(service.puzzle(), Arc::new(keypair(4)), max);
        tokio::time::sleep(Duration::from_millis(20)).await;
        job.cancel();

        let result = tokio::time::timeout(Duration::from_secs(10), job.wait())
            .await
            .unwrap();
        assert!(matches!(result, Err(PuzzleError::Cancelled { .. })));
        assert_eq!(service.reputation().identity_count(), 0);
    }

    #[tokio::test]
    async fn test_async_batch_through_port() {
        let (service, _) = test_service();
        let verifier: Arc<dyn TimingSafeVerification> = service.verifier();
        let signer = keypair(5);
        let public_key = signer.public_key().as_bytes().to_vec();

        let requests: Vec<_> = (0..8u8)
            .map(|i| {
                let message = vec![i; 16];
                let signature = signer.sign(&message).as_bytes().to_vec();
                if i % 2 == 0 {
                    VerificationRequest::new(public_key.clone(), message, signature)
                        .with_expected(ExpectedOutcome::Valid)
                } else {
                    VerificationRequest::new(public_key.clone(), vec![0xFF; 16], signature)
                        .with_expected(ExpectedOutcome::Invalid)
                }
            })
            .collect();

        let results = verifier.batch_verify_async(&requests).await;

        for (request, result) in requests.iter().zip(results) {
            let expected = request.expected == Some(ExpectedOutcome::Valid);
            assert_eq!(result, Ok(expected));
        }
    }
}
