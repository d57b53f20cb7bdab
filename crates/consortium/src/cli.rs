use core::time::Duration;

use camino::Utf8PathBuf;
use clap::{value_parser, Parser};
use const_format::concatcp;
use consortium_config::{ConfigFile, CONFIG_FILE};
use consortium_node_client::{locate_executable, IpfsCli, DEFAULT_EXECUTABLE};
use consortium_sync::{ConsortiumSync, SyncConfig};
use eyre::{Result as EyreResult, WrapErr};
use tracing::{error, info, warn};

use crate::logging::LoggingArgs;

pub const EXAMPLES: &str = r"
  # Pin everything listed by the peers in ./config.json
  $ consortium

  # Use a specific daemon binary and show the plan without pinning
  $ consortium --ipfs-executable /opt/ipfs/bin/ipfs --dry-run

  # Verbose run with a copy of the logs on disk
  $ consortium --level debug --log-file consortium.log
";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(after_help = concatcp!(
    "Environment variables:\n",
    "  CONSORTIUM_CONFIG    Path of the configuration file\n",
    "  CONSORTIUM_IPFS      Path of the ", DEFAULT_EXECUTABLE, " executable\n",
    "  RUST_LOG             Log filter directives\n\n",
    "Examples:",
    EXAMPLES
))]
pub struct RootCommand {
    #[command(flatten)]
    pub logging: LoggingArgs,

    /// Daemon executable, searched for on PATH when omitted
    #[arg(short = 'e', long, value_name = "PATH")]
    #[arg(env = "CONSORTIUM_IPFS", hide_env_values = true)]
    pub ipfs_executable: Option<Utf8PathBuf>,

    /// Configuration file listing the consortium peers
    #[arg(short, long, value_name = "PATH", default_value = CONFIG_FILE)]
    #[arg(env = "CONSORTIUM_CONFIG", hide_env_values = true)]
    pub config: Utf8PathBuf,

    /// Upper bound on a single daemon call, overrides the config file
    #[arg(long, value_name = "MS", value_parser = value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Peers or pins processed at the same time, overrides the config file
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Report what would be pinned without pinning it
    #[arg(long)]
    pub dry_run: bool,
}

impl RootCommand {
    pub async fn run(self) -> EyreResult<()> {
        let binary = locate_executable(self.ipfs_executable.as_deref())
            .inspect_err(|err| {
                error!(%err, "No IPFS executable found. Please specify one with --ipfs-executable");
            })
            .wrap_err("daemon executable unavailable")?;

        info!(executable = %binary, "Using IPFS executable");

        let config_path = self
            .config
            .canonicalize_utf8()
            .unwrap_or_else(|_| self.config.clone());

        info!(config = %config_path, "Using config file");

        let config = ConfigFile::load(&config_path)
            .inspect_err(|err| error!(%err, "Invalid configuration"))
            .wrap_err("configuration invalid")?;

        let timeout = self
            .timeout_ms
            .map_or(config.node.timeout, Duration::from_millis);

        let sync_config = SyncConfig::new(
            self.concurrency.unwrap_or(config.sync.concurrency),
            self.dry_run || config.sync.dry_run,
        );

        let client = IpfsCli::new(binary)
            .with_timeout(timeout)
            .with_listing_layout(config.node.listing);

        let sync = ConsortiumSync::new(client, config.peers, sync_config);

        let report = sync
            .run()
            .await
            .inspect_err(|err| error!(%err, "Reconciliation aborted"))
            .wrap_err("reconciliation failed")?;

        for address in report.failed_pins() {
            warn!(%address, "Object not pinned, it will be retried on the next run");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn test_timeout_override_must_be_positive() {
        let err = RootCommand::try_parse_from(["consortium", "--timeout-ms", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let command = RootCommand::try_parse_from(["consortium", "--timeout-ms", "250"]).unwrap();
        assert_eq!(command.timeout_ms, Some(250));
    }
}
