//! Reconciliation of the local pin set against the consortium's manifests.
//!
//! A run has three phases, each fanned out over peers or addresses:
//!
//! 1. [`connector`]: best-effort direct connection to every configured peer.
//! 2. [`resolver`] + [`aggregator`]: resolve each peer's published directory,
//!    decode its manifests and accumulate them into a [`DesiredObjectSet`].
//! 3. [`reconciler`]: diff the desired set against the node's pins and pin
//!    the difference.
//!
//! Failures are contained at the smallest unit that can fail (one candidate
//! address, one peer, one manifest, one pin) and reported as data in the
//! [`RunReport`] rather than aborting the run. Only the pin listing, without
//! which no diff can be computed, fails a run.
//!
//! # Example
//!
//! ```rust,ignore
//! use consortium_node_client::IpfsCli;
//! use consortium_sync::{ConsortiumSync, SyncConfig};
//!
//! let sync = ConsortiumSync::new(IpfsCli::new(binary), peers, SyncConfig::default());
//! let report = sync.run().await?;
//! ```

pub mod aggregator;
pub mod config;
pub mod connector;
pub mod engine;
pub mod errors;
pub mod reconciler;
pub mod resolver;
pub mod set;

pub use aggregator::{ManifestOutcome, PeerOutcome};
pub use config::SyncConfig;
pub use connector::{ConnectOutcome, ConnectStatus};
pub use engine::{ConsortiumSync, RunReport};
pub use errors::{MalformedReason, PeerStage, SyncError};
pub use reconciler::{PinPlan, PinReport};
pub use set::DesiredObjectSet;
