#[cfg(test)]
#[path = "tests/manifest.rs"]
mod tests;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ContentAddress;

/// File extension that marks a directory entry as a manifest.
pub const MANIFEST_EXTENSION: &str = ".json";

/// One entry of a peer's published directory.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub address: ContentAddress,
    pub name: String,
}

impl ManifestEntry {
    #[must_use]
    pub fn new(address: ContentAddress, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn is_manifest(&self) -> bool {
        self.name.ends_with(MANIFEST_EXTENSION)
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.address)
    }
}
