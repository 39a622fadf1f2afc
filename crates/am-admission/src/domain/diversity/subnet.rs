//! Subnet grouping.

use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Network neighbourhood of an address.
///
/// IPv4 is grouped by /24, IPv6 by /48. IPv4-mapped IPv6 addresses
/// (`::ffff:a.b.c.d`) count as their IPv4 subnet so a peer cannot dodge the
/// cap by switching notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SubnetKey {
    /// First three octets
    V4([u8; 3]),
    /// First three 16-bit segments
    V6([u16; 3]),
}

impl SubnetKey {
    /// Subnet containing `ip`.
    pub fn from_ip(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Self::from_v4(v4),
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => Self::from_v4(v4),
                None => {
                    let s = v6.segments();
                    Self::V6([s[0], s[1], s[2]])
                }
            },
        }
    }

    fn from_v4(ip: Ipv4Addr) -> Self {
        let o = ip.octets();
        Self::V4([o[0], o[1], o[2]])
    }

    /// Prefix length in bits.
    pub fn prefix_len(&self) -> u8 {
        match self {
            Self::V4(_) => 24,
            Self::V6(_) => 48,
        }
    }
}

impl From<IpAddr> for SubnetKey {
    fn from(ip: IpAddr) -> Self {
        Self::from_ip(ip)
    }
}

impl fmt::Display for SubnetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4([a, b, c]) => write!(f, "{}/24", Ipv4Addr::new(*a, *b, *c, 0)),
            Self::V6([a, b, c]) => {
                write!(f, "{}/48", Ipv6Addr::new(*a, *b, *c, 0, 0, 0, 0, 0))
            }
        }
    }
}
