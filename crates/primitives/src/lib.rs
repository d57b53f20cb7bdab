//! Shared value types for the consortium pinning engine.
//!
//! Every identifier handled by the engine is an opaque, whitespace-free
//! string produced by the storage node. The newtypes here only guarantee
//! that the value can be passed as a single command-line argument and
//! survive a round-trip through whitespace-tokenized daemon output.

pub mod address;
pub mod manifest;
pub mod network;
pub mod peer;

pub use address::{ContentAddress, InvalidContentAddress};
pub use manifest::{ManifestEntry, MANIFEST_EXTENSION};
pub use network::{AddressClass, NetworkAddress, LOOPBACK_MARKER};
pub use peer::{InvalidPeerIdentity, PeerIdentity};

/// Returns `true` when `value` is usable as a single token of daemon output.
fn is_token(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}
