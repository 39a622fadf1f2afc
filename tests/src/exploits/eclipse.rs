//! # Eclipse Attacks
//!
//! An attacker concentrated in a few address blocks tries to fill the
//! victim's connection table. The subnet cap bounds any one block to its
//! share regardless of address tricks or churn.

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, SocketAddr};

    use am_admission::test_utils::socket_v4;
    use am_admission::{AdmissionService, ErrorKind};
    use rand::Rng;

    use crate::fixtures::{seeded_request, test_service};

    fn populate_honest(service: &AdmissionService, n: u8) {
        for i in 0..n {
            service
                .admit(&seeded_request(service, 100 + i, socket_v4(172, 16, i, 1, 7000)))
                .unwrap();
        }
    }

    fn socket(ip: &str) -> SocketAddr {
        SocketAddr::new(ip.parse::<IpAddr>().unwrap(), 7000)
    }

    #[test]
    fn test_ipv6_rotation_inside_prefix() {
        let (service, _) = test_service();
        populate_honest(&service, 10);

        // distinct /64s, same /48
        let admitted = (0..10u8)
            .filter(|i| {
                let address = socket(&format!("2001:db8:bad:{:x}::1", u16::from(*i) + 1));
                service.admit(&seeded_request(&service, 1 + i, address)).is_ok()
            })
            .count();

        // k of 10 + k within 20% up to k = 2
        assert_eq!(admitted, 2);
    }

    #[test]
    fn test_ipv4_mapped_addresses_share_the_ipv4_subnet() {
        let (service, _) = test_service();
        populate_honest(&service, 10);

        let plain = seeded_request(&service, 1, socket("10.0.0.1"));
        let mapped_a = seeded_request(&service, 2, socket("::ffff:10.0.0.2"));
        let mapped_b = seeded_request(&service, 3, socket("::ffff:10.0.0.3"));

        assert!(service.admit(&plain).is_ok());
        assert!(service.admit(&mapped_a).is_ok());
        let err = service.admit(&mapped_b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(
            service.diversity().subnet_connection_count("10.0.0.200".parse().unwrap()),
            2
        );
    }

    #[test]
    fn test_churn_never_breaches_cap() {
        let (service, _) = test_service();
        populate_honest(&service, 25);
        let mut rng = rand::thread_rng();
        let mut live = Vec::new();

        let requests: Vec<_> = (0..30u8)
            .map(|i| seeded_request(&service, 1 + i, socket_v4(10, 66, 0, 1 + i, 7000)))
            .collect();

        for _ in 0..300 {
            if !live.is_empty() && rng.gen_bool(0.5) {
                let ticket = live.swap_remove(rng.gen_range(0..live.len()));
                service.release(&ticket).unwrap();
            } else {
                let request = &requests[rng.gen_range(0..requests.len())];
                if let Ok(ticket) = service.admit(request) {
                    live.push(ticket);
                }
            }

            let attacker = service
                .diversity()
                .subnet_connection_count("10.66.0.1".parse().unwrap());
            let total = service.diversity().total_connections();
            assert!(attacker * 100 <= total * 20, "{attacker} of {total}");
            assert_eq!(total, 25 + live.len());
        }
    }
}
