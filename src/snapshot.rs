//! A loaded diagnostic snapshot: everything the report views read from.

use crate::collectors::document;
use crate::collectors::inventory::Inventory;
use crate::collectors::parity::ParityConfig;
use crate::error::Result;
use crate::models::cluster::{ClusterDocument, ClusterInfo, ServerEntry};
use crate::models::drive::{DriveRecord, SetKey};
use crate::models::erasure_set::ErasureSetView;
use crate::models::topology::PoolTopology;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Snapshot {
    /// File the snapshot was read from, as given.
    pub source:    PathBuf,
    pub servers:   Vec<ServerEntry>,
    pub info:      ClusterInfo,
    pub inventory: Inventory,
    /// Covers every `(pool, set)` key seen on a drive.
    pub topology:  PoolTopology,
    pub parity:    ParityConfig,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let doc = document::load(path)?;
        Ok(Self::from_document(path, doc))
    }

    pub fn from_document(source: &Path, doc: ClusterDocument) -> Self {
        let ClusterDocument { servers, mut info, .. } = doc;
        let inventory = Inventory::build(&servers);

        let topology = match info.pools.take() {
            Some(mut topo) => {
                let added = topo.merge_missing(inventory.drives());
                if !added.is_empty() {
                    warn!(
                        keys = %fmt_keys(&added),
                        "explicit pool topology is missing erasure sets that have drives; appending them"
                    );
                }
                topo
            }
            None => {
                let topo = PoolTopology::from_drives(inventory.drives());
                debug!(pools = topo.pool_count(), sets = topo.set_count(), "synthesized pool topology from drives");
                topo
            }
        };

        let parity = ParityConfig::resolve(&servers, info.backend.as_ref());

        Self {
            source: source.to_path_buf(),
            servers,
            info,
            inventory,
            topology,
            parity,
        }
    }

    /// All drives of a set.
    pub fn set_view(&self, key: SetKey) -> ErasureSetView<'_> {
        ErasureSetView::new(key, self.inventory.set_drives(key))
    }

    /// Drives of a set that pass `pred`.
    pub fn set_view_where<F>(&self, key: SetKey, pred: F) -> ErasureSetView<'_>
    where
        F: Fn(&DriveRecord) -> bool,
    {
        ErasureSetView::new(key, self.inventory.set_drives_where(key, pred))
    }
}

fn fmt_keys(keys: &[SetKey]) -> String {
    keys.iter()
        .map(|k| format!("{}:{}", k.pool, k.set))
        .collect::<Vec<_>>()
        .join(", ")
}
