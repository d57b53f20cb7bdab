use core::fmt;

use consortium_node_client::NodeError;
use consortium_primitives::{ContentAddress, ManifestEntry, PeerIdentity};
use thiserror::Error;

/// Recoverable and fatal failures of a reconciliation run.
///
/// Everything except [`SyncError::PinList`] is contained to a single peer,
/// manifest or address and only surfaces in the run report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    #[error("peer `{peer}` is unavailable, {stage} failed: {source}")]
    PeerUnreachable {
        peer: PeerIdentity,
        stage: PeerStage,
        #[source]
        source: NodeError,
    },

    #[error("manifest `{entry}` is malformed: {reason}")]
    ManifestMalformed {
        entry: ManifestEntry,
        #[source]
        reason: MalformedReason,
    },

    #[error("failed to fetch manifest `{entry}`: {source}")]
    ManifestUnavailable {
        entry: ManifestEntry,
        #[source]
        source: NodeError,
    },

    #[error("failed to pin `{address}`: {source}")]
    PinOperationFailed {
        address: ContentAddress,
        #[source]
        source: NodeError,
    },

    #[error("failed to list pinned objects: {0}")]
    PinList(#[source] NodeError),
}

/// Step of manifest resolution at which a peer dropped out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PeerStage {
    NameResolution,
    DirectoryListing,
}

impl fmt::Display for PeerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::NameResolution => "name resolution",
            Self::DirectoryListing => "directory listing",
        })
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MalformedReason {
    #[error("body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("expected a JSON list, found {0}")]
    NotAList(&'static str),

    #[error("list holds an invalid content address: {0}")]
    InvalidElement(#[source] serde_json::Error),
}
