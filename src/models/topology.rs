use super::drive::{DriveRecord, SetKey};

/// One pool and its erasure sets, in the order they were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    pub index: u32,
    pub sets:  Vec<u32>,
}

/// Pool → erasure-set layout of the cluster, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolTopology {
    pools: Vec<PoolEntry>,
}

impl PoolTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesize from the distinct `(pool, set)` pairs on `drives`.
    pub fn from_drives<'a>(drives: impl IntoIterator<Item = &'a DriveRecord>) -> Self {
        let mut topo = Self::new();
        for d in drives {
            topo.insert(d.set_key());
        }
        topo
    }

    /// Ensure `pool` exists, possibly with no sets; returns its position.
    pub fn insert_pool(&mut self, pool: u32) -> usize {
        match self.pools.iter().position(|p| p.index == pool) {
            Some(pos) => pos,
            None => {
                self.pools.push(PoolEntry { index: pool, sets: Vec::new() });
                self.pools.len() - 1
            }
        }
    }

    /// Returns `true` if the key was not present before.
    pub fn insert(&mut self, key: SetKey) -> bool {
        let pos = self.insert_pool(key.pool);
        let sets = &mut self.pools[pos].sets;
        if sets.contains(&key.set) {
            return false;
        }
        sets.push(key.set);
        true
    }

    pub fn contains(&self, key: SetKey) -> bool {
        self.pools
            .iter()
            .any(|p| p.index == key.pool && p.sets.contains(&key.set))
    }

    pub fn contains_pool(&self, pool: u32) -> bool {
        self.pools.iter().any(|p| p.index == pool)
    }

    /// Add every drive key the topology is missing; returns the keys added.
    pub fn merge_missing<'a>(&mut self, drives: impl IntoIterator<Item = &'a DriveRecord>) -> Vec<SetKey> {
        let mut added = Vec::new();
        for d in drives {
            let key = d.set_key();
            if self.insert(key) {
                added.push(key);
            }
        }
        added
    }

    pub fn pools(&self) -> &[PoolEntry] {
        &self.pools
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn set_count(&self) -> usize {
        self.pools.iter().map(|p| p.sets.len()).sum()
    }

    /// Every `(pool, set)` key in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = SetKey> + '_ {
        self.pools
            .iter()
            .flat_map(|p| p.sets.iter().map(move |s| SetKey::new(p.index, *s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drive::sample;

    #[test]
    fn test_synthesized_keeps_appearance_order() {
        let drives = vec![sample(1, 3, 0), sample(0, 0, 0), sample(1, 0, 0), sample(1, 3, 1)];
        let topo = PoolTopology::from_drives(&drives);
        assert_eq!(topo.pools(), &[
            PoolEntry { index: 1, sets: vec![3, 0] },
            PoolEntry { index: 0, sets: vec![0] },
        ]);
        assert_eq!(topo.pool_count(), 2);
        assert_eq!(topo.set_count(), 3);
    }

    #[test]
    fn test_every_drive_key_is_covered() {
        let drives = vec![sample(0, 0, 0), sample(2, 5, 0), sample(0, 1, 0)];
        let topo = PoolTopology::from_drives(&drives);
        assert!(drives.iter().all(|d| topo.contains(d.set_key())));
    }

    #[test]
    fn test_merge_missing_appends_unknown_keys() {
        let mut topo = PoolTopology::new();
        topo.insert(SetKey::new(0, 0));
        let drives = vec![sample(0, 0, 0), sample(0, 1, 0), sample(0, 1, 1)];
        let added = topo.merge_missing(&drives);
        assert_eq!(added, vec![SetKey::new(0, 1)]);
        let keys: Vec<SetKey> = topo.keys().collect();
        assert_eq!(keys, vec![SetKey::new(0, 0), SetKey::new(0, 1)]);
    }
}
