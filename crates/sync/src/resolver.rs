//! Peer identity to published directory entries.

use consortium_node_client::NodeClient;
use consortium_primitives::{ManifestEntry, PeerIdentity};
use tracing::debug;

use crate::errors::{PeerStage, SyncError};

/// Resolves the peer's naming-system pointer and lists the directory it
/// points at. Any failure makes the whole peer unavailable for this run.
pub async fn resolve_manifests<C>(
    client: &C,
    peer: &PeerIdentity,
) -> Result<Vec<ManifestEntry>, SyncError>
where
    C: NodeClient + ?Sized,
{
    let directory = client
        .resolve_name(peer)
        .await
        .map_err(|source| SyncError::PeerUnreachable {
            peer: peer.clone(),
            stage: PeerStage::NameResolution,
            source,
        })?;

    debug!(%peer, %directory, "Resolved published directory");

    let entries = client
        .list_directory(&directory)
        .await
        .map_err(|source| SyncError::PeerUnreachable {
            peer: peer.clone(),
            stage: PeerStage::DirectoryListing,
            source,
        })?;

    debug!(%peer, count = entries.len(), "Listed published directory");

    Ok(entries)
}
