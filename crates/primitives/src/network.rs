#[cfg(test)]
#[path = "tests/network.rs"]
mod tests;

use core::fmt;
use core::net::Ipv4Addr;

use multiaddr::{Multiaddr, Protocol};
use serde::{Deserialize, Serialize};

use crate::PeerIdentity;

/// Textual marker of the IPv4 loopback interface.
pub const LOOPBACK_MARKER: &str = "127.0.0.1";

/// Transport multi-address of a node as reported by the routing table.
///
/// The value is kept verbatim; [`NetworkAddress::classify`] decides whether
/// it is worth dialing.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkAddress(String);

/// Outcome of the dial filter applied to a candidate address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddressClass {
    /// Public IPv4 address, eligible for a connection attempt.
    Usable,
    Loopback,
    /// Inside the locally reserved `10.0.0.0/8` range.
    PrivateRange,
    /// IPv6, DNS or any other non-IPv4 transport.
    NotIpv4,
    Unparseable,
}

impl AddressClass {
    #[must_use]
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Usable)
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Usable => "usable",
            Self::Loopback => "loopback",
            Self::PrivateRange => "private range",
            Self::NotIpv4 => "not ipv4",
            Self::Unparseable => "unparseable",
        })
    }
}

impl NetworkAddress {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn classify(&self) -> AddressClass {
        if self.0.contains(LOOPBACK_MARKER) {
            return AddressClass::Loopback;
        }

        let address = self.0.trim();

        match address.parse::<Multiaddr>() {
            Ok(multiaddr) => match multiaddr.iter().next() {
                Some(Protocol::Ip4(ip)) => classify_ipv4(ip),
                _ => AddressClass::NotIpv4,
            },
            Err(_) => classify_leading_component(address),
        }
    }

    /// Address handed to `swarm connect`: the transport address followed by
    /// the peer's identity component.
    #[must_use]
    pub fn dial_target(&self, peer: &PeerIdentity) -> String {
        format!("{}/ipfs/{peer}", self.0.trim().trim_end_matches('/'))
    }
}

fn classify_ipv4(ip: Ipv4Addr) -> AddressClass {
    if ip.is_loopback() {
        return AddressClass::Loopback;
    }

    match ip.octets() {
        [10, ..] => AddressClass::PrivateRange,
        _ => AddressClass::Usable,
    }
}

/// Fallback for addresses carrying protocols `multiaddr` does not know: only
/// the leading transport component decides.
fn classify_leading_component(address: &str) -> AddressClass {
    let Some(rest) = address.strip_prefix('/') else {
        return AddressClass::Unparseable;
    };

    let mut segments = rest.split('/');

    match (segments.next(), segments.next()) {
        (Some("ip4"), Some(ip)) => ip
            .parse::<Ipv4Addr>()
            .map_or(AddressClass::Unparseable, classify_ipv4),
        (None | Some("" | "ip4"), _) => AddressClass::Unparseable,
        _ => AddressClass::NotIpv4,
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
