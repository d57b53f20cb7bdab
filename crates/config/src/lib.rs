use core::time::Duration;
use std::fs::{read_to_string, write};
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use consortium_node_client::{ListingLayout, DEFAULT_TIMEOUT};
use consortium_primitives::PeerIdentity;
use consortium_sync::SyncConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct ConfigFile {
    /// Consortium members, in the order they are processed.
    pub peers: Vec<PeerIdentity>,

    #[serde(default)]
    pub node: NodeConfig,

    #[serde(default)]
    pub sync: SyncConfig,
}

/// How the daemon's control interface is driven.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct NodeConfig {
    #[serde(rename = "timeout_ms", with = "serde_duration")]
    pub timeout: Duration,

    pub listing: ListingLayout,
}

impl NodeConfig {
    #[must_use]
    pub const fn new(timeout: Duration, listing: ListingLayout) -> Self {
        Self { timeout, listing }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, ListingLayout::default())
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read configuration from {path:?}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration from {path:?}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration {path:?} contains no `peers` key")]
    MissingPeers { path: Utf8PathBuf },

    #[error("configuration {path:?} sets `node.timeout_ms` to zero")]
    ZeroTimeout { path: Utf8PathBuf },

    #[error("failed to encode configuration for {path:?}: {source}")]
    Encode {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write configuration to {path:?}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

/// On-disk shape; `peers` is optional here so its absence can be reported
/// on its own.
#[derive(Deserialize)]
struct RawConfigFile {
    peers: Option<Vec<PeerIdentity>>,
    #[serde(default)]
    node: NodeConfig,
    #[serde(default)]
    sync: SyncConfig,
}

impl ConfigFile {
    #[must_use]
    pub const fn new(peers: Vec<PeerIdentity>, node: NodeConfig, sync: SyncConfig) -> Self {
        Self { peers, node, sync }
    }

    #[must_use]
    pub fn exists(path: &Utf8Path) -> bool {
        path.is_file()
    }

    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        Self::parse(path, &content)
    }

    /// Parses `content` as if read from `path`.
    pub fn parse(path: &Utf8Path, content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfigFile =
            serde_json::from_str(content).map_err(|source| ConfigError::Parse {
                path: path.to_owned(),
                source,
            })?;

        let peers = raw.peers.ok_or_else(|| ConfigError::MissingPeers {
            path: path.to_owned(),
        })?;

        if raw.node.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                path: path.to_owned(),
            });
        }

        Ok(Self::new(peers, raw.node, raw.sync))
    }

    pub fn save(&self, path: &Utf8Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Encode {
            path: path.to_owned(),
            source,
        })?;

        write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_owned(),
            source,
        })
    }
}

mod serde_duration {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
