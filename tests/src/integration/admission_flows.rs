//! # Admission Lifecycle Flows
//!
//! Candidate arrives → solves puzzle → admitted → runs tasks → score moves
//! → reconnects under its new tier → disconnects.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use am_admission::test_utils::socket_v4;
    use am_admission::{
        AdmissionConfig, AdmissionMonitor, ConfigError, ErrorKind, ReputationTier, TaskOutcome,
    };

    use crate::fixtures::{seeded_identity, seeded_request, service_with, test_service};

    // =============================================================================
    // FULL LIFECYCLE
    // =============================================================================

    #[test]
    fn test_newcomer_earns_trust_through_tasks() {
        let (service, _) = test_service();
        let x = seeded_identity(1);
        let request = seeded_request(&service, 1, socket_v4(10, 0, 0, 1, 7000));

        let ticket = service.admit(&request).unwrap();
        assert_eq!(ticket.tier, ReputationTier::Newcomer);

        // 15 successes at +10 cross 250
        for _ in 0..15 {
            if service.can_accept_task(x).unwrap() {
                service.accept_task(x).unwrap();
            }
            service.record_task_outcome(x, TaskOutcome::Success).unwrap();
        }
        assert_eq!(service.reputation().score(x), Ok(250));
        assert_eq!(service.tier(x), Ok(ReputationTier::Established));

        service.release(&ticket).unwrap();
        let ticket = service.admit(&request).unwrap();
        assert_eq!(ticket.tier, ReputationTier::Established);
        assert_eq!(service.connection_count(x), 1);
    }

    #[test]
    fn test_demotion_shrinks_connection_allowance() {
        let (service, _) = test_service();
        let x = seeded_identity(1);

        let first = service
            .admit(&seeded_request(&service, 1, socket_v4(10, 0, 0, 1, 7000)))
            .unwrap();
        service.reputation().increase(x, 150).unwrap();

        for i in 1..6 {
            service
                .admit(&seeded_request(&service, 1, socket_v4(10, i, 0, 1, 7000)))
                .unwrap();
        }
        assert_eq!(service.connection_count(x), 6);

        assert_eq!(service.record_task_outcome(x, TaskOutcome::Malicious), Ok(200));
        assert_eq!(service.tier(x), Ok(ReputationTier::Newcomer));

        // existing connections stay, new ones are refused
        let err = service
            .admit(&seeded_request(&service, 1, socket_v4(10, 9, 0, 1, 7000)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QuotaExceeded);
        assert_eq!(service.connection_count(x), 6);

        service.release(&first).unwrap();
        assert_eq!(service.connection_count(x), 5);
    }

    #[test]
    fn test_toml_config_drives_service() {
        let config = AdmissionConfig::from_toml_str(
            r#"
            [timing]
            min_micros = 10
            max_micros = 20

            [puzzle]
            memory_kib = 8
            time_cost = 1
            min_difficulty = 1
            default_difficulty = 2

            [diversity]
            max_subnet_share_percent = 50
            "#,
        )
        .unwrap();
        let (service, _) = service_with(config);

        service
            .admit(&seeded_request(&service, 1, socket_v4(10, 0, 0, 1, 7000)))
            .unwrap();
        service
            .admit(&seeded_request(&service, 2, socket_v4(192, 168, 0, 1, 7000)))
            .unwrap();

        // 2 of 3 exceeds half
        let err = service
            .admit(&seeded_request(&service, 3, socket_v4(10, 0, 0, 3, 7000)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

        service
            .admit(&seeded_request(&service, 4, socket_v4(172, 16, 0, 1, 7000)))
            .unwrap();
        // 2 of 4 is exactly half
        service
            .admit(&seeded_request(&service, 3, socket_v4(10, 0, 0, 3, 7000)))
            .unwrap();
    }

    #[test]
    fn test_toml_floor_above_one_rejected() {
        let result = AdmissionConfig::from_toml_str(
            r#"
            [diversity]
            min_connections_per_subnet = 2
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidSubnetFloor { found: 2, .. })));
    }

    #[test]
    fn test_monitor_as_trait_object() {
        let (service, _) = test_service();
        let monitor: Arc<dyn AdmissionMonitor> = Arc::new(service.monitor());

        for i in 0..4 {
            service
                .admit(&seeded_request(&service, 10 + i, socket_v4(192, 168, i, 1, 7000)))
                .unwrap();
        }

        assert_eq!(monitor.total_connections(), 4);
        assert_eq!(monitor.unique_subnets(), 4);
        assert_eq!(monitor.identity_count(), 4);
        assert_eq!(monitor.tier(seeded_identity(10)), Some(ReputationTier::Newcomer));
        assert!(monitor
            .subnet_stats()
            .iter()
            .all(|stat| stat.connections == 1 && (stat.share_percent - 25.0).abs() < 1e-9));
    }

    #[test]
    fn test_metrics_exposed_through_telemetry() {
        let (service, _) = test_service();
        service
            .admit(&seeded_request(&service, 1, socket_v4(10, 0, 0, 1, 7000)))
            .unwrap();
        let _ = service.admit(&seeded_request(&service, 2, socket_v4(10, 0, 0, 2, 7000)));

        let text = am_telemetry::encode_metrics().unwrap();
        assert!(text.contains("admission_attempts_total"));
        assert!(text.contains("admission_rejections_total"));
        assert!(text.contains("active_connections"));
    }
}
