//! # Sybil Attacks
//!
//! An attacker mints many identities to gain disproportionate influence.
//! Defences exercised: puzzle cost per identity, solution binding to the
//! key, reputation that cannot be reset by re-registering, subnet cap on
//! identities sharing infrastructure.

#[cfg(test)]
mod tests {
    use am_admission::test_utils::{keypair, socket_v4};
    use am_admission::{AdmissionError, ErrorKind, PuzzleError, ReputationTier};
    use shared_crypto::Ed25519KeyPair;

    use crate::fixtures::{request_for, seeded_identity, seeded_request, test_service};

    /// Honest peers spread over 172.16.0.0/24 .. 172.16.(n-1).0/24.
    fn populate_honest(service: &am_admission::AdmissionService, n: u8) {
        for i in 0..n {
            service
                .admit(&seeded_request(service, 100 + i, socket_v4(172, 16, i, 1, 7000)))
                .unwrap();
        }
    }

    #[test]
    fn test_identity_minting_costs_work() {
        let (service, _) = test_service();
        let puzzle = service.puzzle();

        // expected 64 hashes per solution at difficulty 6, one hash to verify
        let total: u64 = (0..10u8)
            .map(|i| {
                let keypair = Ed25519KeyPair::from_seed([i; 32]);
                puzzle.generate(&keypair.public_key(), 6).unwrap().attempts
            })
            .sum();
        assert!(total / 10 >= 8, "average search of {} hashes", total / 10);
    }

    #[test]
    fn test_stolen_solution_is_useless() {
        let (service, _) = test_service();
        let victim = seeded_request(&service, 1, socket_v4(10, 0, 0, 1, 7000));
        let attacker = keypair(66);

        let mut stolen = victim.clone();
        stolen.public_key = attacker.public_key().as_bytes().to_vec();
        stolen.address = socket_v4(10, 9, 0, 1, 7000);

        let err = service.admit(&stolen).unwrap_err();
        assert_eq!(err, AdmissionError::Puzzle(PuzzleError::InvalidSignature));
        assert_eq!(service.reputation().identity_count(), 0);

        // stripping the signature does not help either
        stolen.solution.signature = None;
        assert_eq!(service.admit(&stolen), Err(AdmissionError::UnsignedSolution));
    }

    #[test]
    fn test_reregistration_does_not_whitewash() {
        let (service, _) = test_service();
        let x = seeded_identity(1);
        let request = seeded_request(&service, 1, socket_v4(10, 0, 0, 1, 7000));

        let ticket = service.admit(&request).unwrap();
        service.reputation().decrease(x, 1_000).unwrap();
        service.release(&ticket).unwrap();

        service.admit(&request).unwrap();
        assert_eq!(service.reputation().score(x), Ok(0));
        assert_eq!(service.tier(x), Ok(ReputationTier::Newcomer));
    }

    #[test]
    fn test_identities_from_one_subnet_are_capped() {
        let (service, _) = test_service();
        populate_honest(&service, 20);

        let admitted = (0..50u8)
            .filter(|i| {
                let request = seeded_request(&service, 1 + i, socket_v4(10, 66, 0, 1 + i, 7000));
                service.admit(&request).is_ok()
            })
            .count();

        // k of 20 + k stays within 20% up to k = 5
        assert_eq!(admitted, 5);
        let monitor = service.monitor();
        for stat in am_admission::AdmissionMonitor::subnet_stats(&monitor) {
            assert!(
                stat.share_percent <= 20.0 + 1e-9,
                "{} at {}%",
                stat.subnet,
                stat.share_percent
            );
        }
    }

    #[test]
    fn test_single_identity_connection_flood() {
        let (service, _) = test_service();
        let attacker = keypair(9);

        let outcomes: Vec<_> = (0..20u8)
            .map(|i| service.admit(&request_for(&service, &attacker, socket_v4(10, i, 1, 1, 7000))))
            .collect();

        let admitted = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(admitted, ReputationTier::Newcomer.connection_quota() as usize);
        assert!(outcomes
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.kind() == ErrorKind::QuotaExceeded));
    }
}
