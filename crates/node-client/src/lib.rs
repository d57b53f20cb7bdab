//! Control interface of the local storage daemon.
//!
//! The engine never talks to the daemon directly: every operation goes
//! through [`NodeClient`], one method per daemon subcommand. [`IpfsCli`]
//! implements it by spawning the daemon's command-line binary once per call;
//! tests substitute their own implementation to script responses and
//! failures.

use async_trait::async_trait;
use consortium_primitives::{ContentAddress, ManifestEntry, NetworkAddress, PeerIdentity};

pub mod cli;
pub mod discovery;
pub mod errors;
pub mod parse;

pub use cli::{IpfsCli, DEFAULT_TIMEOUT};
pub use discovery::{locate_executable, DEFAULT_EXECUTABLE};
pub use errors::NodeError;
pub use parse::ListingLayout;

/// Capability to drive a storage node.
///
/// Each call is independent and independently failable; implementations
/// hold no per-run state.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Known transport addresses of `peer`, in routing-table order.
    async fn find_peer(&self, peer: &PeerIdentity) -> Result<Vec<NetworkAddress>, NodeError>;

    /// Opens a direct connection to a fully qualified dial target.
    async fn swarm_connect(&self, target: &str) -> Result<(), NodeError>;

    /// Resolves the naming-system pointer published by `peer`.
    async fn resolve_name(&self, peer: &PeerIdentity) -> Result<ContentAddress, NodeError>;

    async fn list_directory(
        &self,
        address: &ContentAddress,
    ) -> Result<Vec<ManifestEntry>, NodeError>;

    /// Raw body stored at `address`.
    async fn read_content(&self, address: &ContentAddress) -> Result<String, NodeError>;

    async fn pin_list(&self) -> Result<Vec<ContentAddress>, NodeError>;

    async fn pin_add(&self, address: &ContentAddress) -> Result<(), NodeError>;
}
