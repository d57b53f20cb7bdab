//! Manifest decoding and accumulation into the desired object set.

use consortium_node_client::NodeClient;
use consortium_primitives::{ContentAddress, ManifestEntry, PeerIdentity};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::{MalformedReason, SyncError};
use crate::resolver::resolve_manifests;
use crate::set::DesiredObjectSet;

/// What a single directory entry contributed.
#[derive(Debug)]
pub enum ManifestOutcome {
    Contributed {
        entry: ManifestEntry,
        /// Addresses listed in the manifest.
        count: usize,
        /// Addresses not already contributed by an earlier manifest.
        added: usize,
    },
    /// Not a manifest file; never fetched.
    NotManifest { entry: ManifestEntry },
    Failed { error: SyncError },
}

/// What a single peer contributed.
#[derive(Debug)]
pub enum PeerOutcome {
    Aggregated {
        peer: PeerIdentity,
        manifests: Vec<ManifestOutcome>,
    },
    Unavailable { error: SyncError },
}

impl PeerOutcome {
    /// Manifests of this peer that failed to fetch or decode.
    pub fn failed_manifests(&self) -> impl Iterator<Item = &SyncError> {
        let manifests: &[ManifestOutcome] = match self {
            Self::Aggregated { manifests, .. } => manifests,
            Self::Unavailable { .. } => &[],
        };

        manifests.iter().filter_map(|outcome| match outcome {
            ManifestOutcome::Failed { error } => Some(error),
            ManifestOutcome::Contributed { .. } | ManifestOutcome::NotManifest { .. } => None,
        })
    }
}

/// Decodes a manifest body: a JSON list of content addresses.
pub fn decode_manifest(body: &str) -> Result<Vec<ContentAddress>, MalformedReason> {
    let value: Value = serde_json::from_str(body).map_err(MalformedReason::Decode)?;

    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(MalformedReason::InvalidElement),
        Value::Null => Err(MalformedReason::NotAList("null")),
        Value::Bool(_) => Err(MalformedReason::NotAList("a boolean")),
        Value::Number(_) => Err(MalformedReason::NotAList("a number")),
        Value::String(_) => Err(MalformedReason::NotAList("a string")),
        Value::Object(_) => Err(MalformedReason::NotAList("an object")),
    }
}

/// Fetches one directory entry and folds its addresses into `desired`.
///
/// A bad manifest only loses its own contribution.
pub async fn aggregate_entry<C>(
    client: &C,
    entry: ManifestEntry,
    desired: &DesiredObjectSet,
) -> ManifestOutcome
where
    C: NodeClient + ?Sized,
{
    if !entry.is_manifest() {
        info!(name = %entry.name, address = %entry.address, "Skipping non-manifest file");
        return ManifestOutcome::NotManifest { entry };
    }

    let body = match client.read_content(&entry.address).await {
        Ok(body) => body,
        Err(source) => {
            let error = SyncError::ManifestUnavailable { entry, source };
            warn!(%error, "Skipping manifest");
            return ManifestOutcome::Failed { error };
        }
    };

    let addresses = match decode_manifest(&body) {
        Ok(addresses) => addresses,
        Err(reason) => {
            let error = SyncError::ManifestMalformed { entry, reason };
            warn!(%error, "Skipping manifest");
            return ManifestOutcome::Failed { error };
        }
    };

    let count = addresses.len();
    let added = desired.insert_all(addresses);

    info!(manifest = %entry, count, added, "Aggregated manifest");

    ManifestOutcome::Contributed {
        entry,
        count,
        added,
    }
}

/// Resolves a peer's published directory and aggregates every entry in it.
pub async fn aggregate_peer<C>(
    client: &C,
    peer: &PeerIdentity,
    desired: &DesiredObjectSet,
) -> PeerOutcome
where
    C: NodeClient + ?Sized,
{
    let entries = match resolve_manifests(client, peer).await {
        Ok(entries) => entries,
        Err(error) => {
            warn!(%error, "Skipping peer");
            return PeerOutcome::Unavailable { error };
        }
    };

    let mut manifests = Vec::with_capacity(entries.len());

    for entry in entries {
        manifests.push(aggregate_entry(client, entry, desired).await);
    }

    PeerOutcome::Aggregated {
        peer: peer.clone(),
        manifests,
    }
}
