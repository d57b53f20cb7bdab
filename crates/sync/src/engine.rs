use consortium_node_client::NodeClient;
use consortium_primitives::{ContentAddress, PeerIdentity};
use futures_util::{stream, StreamExt};
use tracing::info;

use crate::aggregator::{aggregate_peer, PeerOutcome};
use crate::config::SyncConfig;
use crate::connector::{connect_peer, ConnectOutcome};
use crate::errors::SyncError;
use crate::reconciler::{reconcile, PinReport};
use crate::set::DesiredObjectSet;

/// One reconciliation run of the local node against a fixed peer list.
///
/// **Stateless**: nothing is carried from one [`ConsortiumSync::run`] to the
/// next; re-running is how transient failures get retried.
#[derive(Debug)]
pub struct ConsortiumSync<C> {
    client: C,
    peers: Vec<PeerIdentity>,
    config: SyncConfig,
}

/// Everything a run did, phase by phase, in configured peer order.
#[derive(Debug)]
pub struct RunReport {
    pub connections: Vec<ConnectOutcome>,
    pub peers: Vec<PeerOutcome>,
    pub pins: PinReport,
}

impl RunReport {
    #[must_use]
    pub fn connected_peers(&self) -> usize {
        self.connections
            .iter()
            .filter(|outcome| outcome.is_connected())
            .count()
    }

    #[must_use]
    pub fn unavailable_peers(&self) -> usize {
        self.peers
            .iter()
            .filter(|outcome| matches!(outcome, PeerOutcome::Unavailable { .. }))
            .count()
    }

    #[must_use]
    pub fn failed_manifests(&self) -> usize {
        self.peers
            .iter()
            .map(|outcome| outcome.failed_manifests().count())
            .sum()
    }

    pub fn failed_pins(&self) -> impl Iterator<Item = &ContentAddress> {
        self.pins.failed_addresses()
    }

    /// Whether every pending address was pinned.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        !self.pins.dry_run && self.pins.pinned.len() == self.pins.plan.to_pin.len()
    }
}

impl<C: NodeClient> ConsortiumSync<C> {
    pub const fn new(client: C, peers: Vec<PeerIdentity>, config: SyncConfig) -> Self {
        Self {
            client,
            peers,
            config,
        }
    }

    pub const fn client(&self) -> &C {
        &self.client
    }

    pub fn peers(&self) -> &[PeerIdentity] {
        &self.peers
    }

    /// Attempts a direct connection to every peer.
    pub async fn connect_peers(&self) -> Vec<ConnectOutcome> {
        info!(count = self.peers.len(), "Connecting to peers");

        stream::iter(&self.peers)
            .map(|peer| connect_peer(&self.client, peer))
            .buffered(self.config.concurrency())
            .collect()
            .await
    }

    /// Builds the desired object set from every peer's manifests.
    pub async fn aggregate(&self) -> (DesiredObjectSet, Vec<PeerOutcome>) {
        let desired = DesiredObjectSet::new();

        let outcomes = stream::iter(&self.peers)
            .map(|peer| aggregate_peer(&self.client, peer, &desired))
            .buffered(self.config.concurrency())
            .collect()
            .await;

        (desired, outcomes)
    }

    pub async fn run(&self) -> Result<RunReport, SyncError> {
        let connections = self.connect_peers().await;

        let (desired, peers) = self.aggregate().await;

        let pins = reconcile(&self.client, &desired.into_set(), &self.config).await?;

        let report = RunReport {
            connections,
            peers,
            pins,
        };

        info!(
            connected = report.connected_peers(),
            unavailable = report.unavailable_peers(),
            malformed = report.failed_manifests(),
            pinned = report.pins.pinned.len(),
            failed = report.pins.failed.len(),
            "Reconciliation finished"
        );

        Ok(report)
    }
}
