//! Best-effort direct connection to a single peer.

use consortium_node_client::{NodeClient, NodeError};
use consortium_primitives::{NetworkAddress, PeerIdentity};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct ConnectOutcome {
    pub peer: PeerIdentity,
    pub status: ConnectStatus,
}

#[derive(Debug)]
pub enum ConnectStatus {
    Connected {
        address: NetworkAddress,
        /// Candidates that were dialed and failed before `address`.
        failures: Vec<(NetworkAddress, NodeError)>,
    },
    /// No candidate survived filtering or every dial failed.
    Unreachable {
        filtered: usize,
        failures: Vec<(NetworkAddress, NodeError)>,
    },
    /// The routing table could not be queried for the peer.
    LookupFailed(NodeError),
}

impl ConnectOutcome {
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self.status, ConnectStatus::Connected { .. })
    }
}

/// Dials the peer's usable addresses in routing-table order until one
/// connects. Each candidate is tried at most once; a peer that cannot be
/// reached is logged and otherwise ignored.
pub async fn connect_peer<C>(client: &C, peer: &PeerIdentity) -> ConnectOutcome
where
    C: NodeClient + ?Sized,
{
    let candidates = match client.find_peer(peer).await {
        Ok(candidates) => candidates,
        Err(error) => {
            warn!(%peer, %error, "Routing lookup failed, unable to connect to peer");

            return ConnectOutcome {
                peer: peer.clone(),
                status: ConnectStatus::LookupFailed(error),
            };
        }
    };

    let mut filtered = 0_usize;
    let mut failures = Vec::new();

    for address in candidates {
        let class = address.classify();

        if !class.is_usable() {
            debug!(%peer, %address, %class, "Skipping candidate address");
            filtered += 1;
            continue;
        }

        let target = address.dial_target(peer);

        match client.swarm_connect(&target).await {
            Ok(()) => {
                info!(%peer, %address, "Connected to peer");

                return ConnectOutcome {
                    peer: peer.clone(),
                    status: ConnectStatus::Connected { address, failures },
                };
            }
            Err(error) => {
                warn!(%target, %error, "Error connecting to peer address");
                failures.push((address, error));
            }
        }
    }

    warn!(
        %peer,
        filtered,
        attempted = failures.len(),
        "Unable to establish connection to peer"
    );

    ConnectOutcome {
        peer: peer.clone(),
        status: ConnectStatus::Unreachable { filtered, failures },
    }
}
