//! # Timing Oracle
//!
//! An observer times signature checks to learn whether a forged signature
//! was close to valid. Each check is padded by a random delay from the
//! jitter window, so valid and invalid checks are indistinguishable in
//! aggregate and never faster than the window floor.

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use am_admission::test_utils::keypair;
    use am_admission::{AdmissionConfig, JitterWindow};

    use crate::fixtures::service_with;

    const SAMPLES: usize = 60;

    fn mean(samples: &[Duration]) -> f64 {
        samples.iter().map(Duration::as_secs_f64).sum::<f64>() / samples.len() as f64
    }

    #[test]
    fn test_outcome_not_visible_in_mean_latency() {
        let config = AdmissionConfig {
            timing: JitterWindow::default(),
            ..AdmissionConfig::for_testing()
        };
        let (service, _) = service_with(config);
        let verifier = service.verifier();
        let floor = Duration::from_micros(verifier.window().min_micros);

        let signer = keypair(1);
        let public_key = signer.public_key();
        let message = b"handshake transcript";
        let signature = signer.sign(message);

        let mut valid = Vec::with_capacity(SAMPLES);
        let mut invalid = Vec::with_capacity(SAMPLES);
        for _ in 0..SAMPLES {
            let started = Instant::now();
            assert!(verifier.verify_parsed(&public_key, message, &signature));
            valid.push(started.elapsed());

            let started = Instant::now();
            assert!(!verifier.verify_parsed(&public_key, b"forged transcript", &signature));
            invalid.push(started.elapsed());
        }

        assert!(valid.iter().chain(&invalid).all(|d| *d >= floor));

        // window width is 400us; sampling error on the means is ~25us
        let gap = (mean(&valid) - mean(&invalid)).abs();
        assert!(gap < 150e-6, "mean latency gap {:.1}us", gap * 1e6);
    }

    #[test]
    fn test_malformed_input_skips_jitter() {
        let config = AdmissionConfig {
            timing: JitterWindow {
                min_micros: 20_000,
                max_micros: 30_000,
            },
            ..AdmissionConfig::for_testing()
        };
        let (service, _) = service_with(config);
        let verifier = service.verifier();

        let started = Instant::now();
        for _ in 0..10 {
            assert!(verifier.verify(&[0u8; 31], b"m", &[0u8; 64]).is_err());
        }
        // ten jittered calls would take at least 200ms
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
