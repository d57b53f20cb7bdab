//! Converges the node's pin set to the desired object set.

use std::collections::HashSet;

use consortium_node_client::NodeClient;
use consortium_primitives::ContentAddress;
use futures_util::{stream, StreamExt};
use tracing::{info, warn};

use crate::config::SyncConfig;
use crate::errors::SyncError;

/// Split of the desired set against what the node already pins.
///
/// `already_pinned` and `to_pin` are disjoint and together make up the
/// desired set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PinPlan {
    pub desired: usize,
    pub already_pinned: HashSet<ContentAddress>,
    pub to_pin: HashSet<ContentAddress>,
}

impl PinPlan {
    #[must_use]
    pub fn compute(desired: &HashSet<ContentAddress>, pinned: &HashSet<ContentAddress>) -> Self {
        Self {
            desired: desired.len(),
            already_pinned: desired.intersection(pinned).cloned().collect(),
            to_pin: desired.difference(pinned).cloned().collect(),
        }
    }

    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.to_pin.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct PinReport {
    pub plan: PinPlan,
    /// Addresses pinned during this run.
    pub pinned: Vec<ContentAddress>,
    /// One [`SyncError::PinOperationFailed`] per address that could not be pinned.
    pub failed: Vec<SyncError>,
    pub dry_run: bool,
}

impl PinReport {
    pub fn failed_addresses(&self) -> impl Iterator<Item = &ContentAddress> {
        self.failed.iter().filter_map(|error| match error {
            SyncError::PinOperationFailed { address, .. } => Some(address),
            _ => None,
        })
    }
}

/// Queries the current pins, diffs them against `desired` and pins the
/// difference.
///
/// Pin operations are independent: a failing address is recorded and the
/// remaining addresses are still attempted. Failing to list pins fails the
/// whole reconciliation.
pub async fn reconcile<C>(
    client: &C,
    desired: &HashSet<ContentAddress>,
    config: &SyncConfig,
) -> Result<PinReport, SyncError>
where
    C: NodeClient + ?Sized,
{
    let pinned: HashSet<_> = client
        .pin_list()
        .await
        .map_err(SyncError::PinList)?
        .into_iter()
        .collect();

    let plan = PinPlan::compute(desired, &pinned);

    info!(count = plan.desired, "Found objects in peer manifests");
    info!(count = plan.already_pinned.len(), "Peer objects already pinned");
    info!(count = plan.to_pin.len(), "Peer objects pending pin");

    if config.dry_run {
        info!("Dry run, no objects will be pinned");

        return Ok(PinReport {
            plan,
            dry_run: true,
            ..PinReport::default()
        });
    }

    let results: Vec<_> = stream::iter(plan.to_pin.iter().cloned())
        .map(move |address| async move {
            info!(%address, "Pinning");

            match client.pin_add(&address).await {
                Ok(()) => Ok(address),
                Err(source) => Err(SyncError::PinOperationFailed { address, source }),
            }
        })
        .buffer_unordered(config.concurrency())
        .collect()
        .await;

    let mut report = PinReport {
        plan,
        ..PinReport::default()
    };

    for result in results {
        match result {
            Ok(address) => report.pinned.push(address),
            Err(error) => {
                warn!(%error, "Pin operation failed");
                report.failed.push(error);
            }
        }
    }

    Ok(report)
}
