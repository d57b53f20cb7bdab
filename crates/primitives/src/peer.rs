#[cfg(test)]
#[path = "tests/peer.rs"]
mod tests;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::is_token;

/// Stable identity of a consortium participant's node.
///
/// It doubles as the key of the peer's naming-system pointer.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeerIdentity(String);

impl PeerIdentity {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("invalid peer identity {0:?}: must be a non-empty string without whitespace")]
pub struct InvalidPeerIdentity(String);

impl TryFrom<String> for PeerIdentity {
    type Error = InvalidPeerIdentity;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !is_token(&value) {
            return Err(InvalidPeerIdentity(value));
        }

        Ok(Self(value))
    }
}

impl FromStr for PeerIdentity {
    type Err = InvalidPeerIdentity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.to_owned().try_into()
    }
}

impl From<PeerIdentity> for String {
    fn from(peer: PeerIdentity) -> Self {
        peer.0
    }
}

impl AsRef<str> for PeerIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
