use std::collections::HashSet;

use consortium_primitives::ContentAddress;
use dashmap::DashSet;

/// Union of every content address found in the consortium's manifests.
///
/// Insertion goes through `&self` so concurrent per-peer tasks can share one
/// set. Addresses are never removed within a run.
#[derive(Debug, Default)]
pub struct DesiredObjectSet {
    inner: DashSet<ContentAddress>,
}

impl DesiredObjectSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts every address, returning how many were not yet present.
    pub fn insert_all(&self, addresses: impl IntoIterator<Item = ContentAddress>) -> usize {
        addresses
            .into_iter()
            .map(|address| usize::from(self.inner.insert(address)))
            .sum()
    }

    #[must_use]
    pub fn contains(&self, address: &ContentAddress) -> bool {
        self.inner.contains(address)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Freezes the accumulated addresses once aggregation is over.
    #[must_use]
    pub fn into_set(self) -> HashSet<ContentAddress> {
        self.inner.into_iter().collect()
    }
}

impl FromIterator<ContentAddress> for DesiredObjectSet {
    fn from_iter<T: IntoIterator<Item = ContentAddress>>(iter: T) -> Self {
        let set = Self::new();
        let _inserted = set.insert_all(iter);
        set
    }
}
