use core::time::Duration;
use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use consortium_primitives::{
    ContentAddress, InvalidContentAddress, ManifestEntry, NetworkAddress, PeerIdentity,
};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::errors::NodeError;
use crate::parse::{parse_directory_listing, parse_peer_addresses, parse_pinned, ListingLayout};
use crate::NodeClient;

/// Upper bound on a single daemon call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// [`NodeClient`] backed by the daemon's command-line binary.
///
/// Spawns one subprocess per call; no connection is reused.
#[derive(Clone, Debug)]
pub struct IpfsCli {
    binary: Utf8PathBuf,
    timeout: Duration,
    layout: ListingLayout,
}

impl IpfsCli {
    #[must_use]
    pub fn new(binary: Utf8PathBuf) -> Self {
        Self {
            binary,
            timeout: DEFAULT_TIMEOUT,
            layout: ListingLayout::default(),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_listing_layout(mut self, layout: ListingLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn binary(&self) -> &Utf8Path {
        &self.binary
    }

    /// Runs `binary args..` and returns its stdout, decoded and with trailing
    /// whitespace removed.
    pub async fn run_cmd(&self, args: &[&str]) -> Result<String, NodeError> {
        let mut command_line = self.binary.to_string();
        for arg in args {
            command_line.push(' ');
            command_line.push_str(arg);
        }

        debug!(command = %command_line, "Running daemon command");

        let child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => NodeError::ExecutableNotFound {
                    path: self.binary.clone(),
                },
                _ => NodeError::Spawn {
                    command: command_line.clone(),
                    source,
                },
            })?;

        // Dropping the pending future on timeout drops the child, which kills it.
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| NodeError::Spawn {
                command: command_line.clone(),
                source,
            })?,
            Err(_elapsed) => {
                return Err(NodeError::Timeout {
                    command: command_line,
                    after: self.timeout,
                })
            }
        };

        if !output.status.success() {
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));

            return Err(NodeError::CommandFailed {
                command: command_line,
                status: output.status.code(),
                output: captured.trim().to_owned(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|err| NodeError::InvalidOutput {
            command: command_line,
            reason: err.to_string(),
        })?;

        Ok(stdout.trim_end().to_owned())
    }
}

#[async_trait]
impl NodeClient for IpfsCli {
    async fn find_peer(&self, peer: &PeerIdentity) -> Result<Vec<NetworkAddress>, NodeError> {
        let output = self.run_cmd(&["dht", "findpeer", peer.as_str()]).await?;

        Ok(parse_peer_addresses(&output))
    }

    async fn swarm_connect(&self, target: &str) -> Result<(), NodeError> {
        let _output = self.run_cmd(&["swarm", "connect", target]).await?;

        Ok(())
    }

    async fn resolve_name(&self, peer: &PeerIdentity) -> Result<ContentAddress, NodeError> {
        let output = self.run_cmd(&["name", "resolve", peer.as_str()]).await?;

        output
            .trim()
            .parse()
            .map_err(|err: InvalidContentAddress| NodeError::InvalidOutput {
                command: format!("{} name resolve {peer}", self.binary),
                reason: err.to_string(),
            })
    }

    async fn list_directory(
        &self,
        address: &ContentAddress,
    ) -> Result<Vec<ManifestEntry>, NodeError> {
        let output = self.run_cmd(&["ls", address.as_str()]).await?;

        Ok(parse_directory_listing(&output, self.layout))
    }

    async fn read_content(&self, address: &ContentAddress) -> Result<String, NodeError> {
        self.run_cmd(&["cat", address.as_str()]).await
    }

    async fn pin_list(&self) -> Result<Vec<ContentAddress>, NodeError> {
        let output = self.run_cmd(&["pin", "ls"]).await?;

        Ok(parse_pinned(&output))
    }

    async fn pin_add(&self, address: &ContentAddress) -> Result<(), NodeError> {
        let _output = self.run_cmd(&["pin", "add", address.as_str()]).await?;

        Ok(())
    }
}
