use serde_json::Value;
use std::cmp::Ordering;

/// `(pool, erasure set)` coordinates of a drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetKey {
    pub pool: u32,
    pub set:  u32,
}

impl SetKey {
    pub fn new(pool: u32, set: u32) -> Self {
        Self { pool, set }
    }
}

/// One physical disk from the diagnostic snapshot. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveRecord {
    pub server:          String,
    pub path:            String,
    /// `None` when the source omits it; never counted as ok.
    pub state:           Option<String>,
    pub uuid:            Option<String>,
    pub scanning:        bool,
    pub disk_index:      Option<u64>,
    pub total_space:     u64,
    pub used_space:      u64,
    pub available_space: u64,
    pub used_inodes:     u64,
    pub free_inodes:     u64,
    pub local:           bool,
    pub pool_index:      u32,
    pub set_index:       u32,
    pub metrics:         Option<Value>,
}

impl DriveRecord {
    pub fn is_ok(&self) -> bool {
        self.state.as_deref() == Some("ok")
    }

    /// State as displayed; a missing state reads "unknown".
    pub fn state_label(&self) -> &str {
        self.state.as_deref().unwrap_or("unknown")
    }

    pub fn set_key(&self) -> SetKey {
        SetKey::new(self.pool_index, self.set_index)
    }

    pub fn free_space_pct(&self) -> f64 {
        if self.total_space == 0 { return 0.0; }
        self.available_space as f64 / self.total_space as f64 * 100.0
    }

    pub fn used_space_pct(&self) -> f64 {
        if self.total_space == 0 { return 0.0; }
        self.used_space as f64 / self.total_space as f64 * 100.0
    }

    pub fn inode_used_pct(&self) -> f64 {
        let total = self.used_inodes.saturating_add(self.free_inodes);
        if total == 0 { return 0.0; }
        self.used_inodes as f64 / total as f64 * 100.0
    }

    /// Table order: pool, set, disk index; drives without an index go last.
    pub fn table_order(a: &DriveRecord, b: &DriveRecord) -> Ordering {
        a.set_key()
            .cmp(&b.set_key())
            .then_with(|| match (a.disk_index, b.disk_index) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None)    => Ordering::Less,
                (None, Some(_))    => Ordering::Greater,
                (None, None)       => Ordering::Equal,
            })
    }
}

#[cfg(test)]
pub(crate) fn sample(pool: u32, set: u32, disk: u64) -> DriveRecord {
    DriveRecord {
        server:          "node1.example.com:9000".into(),
        path:            format!("/data{}", disk),
        state:           Some("ok".into()),
        uuid:            Some("2f0b3c7e-9a1d-4c6b-8e55-0d3f6a9b1c2d".into()),
        scanning:        false,
        disk_index:      Some(disk),
        total_space:     100,
        used_space:      40,
        available_space: 60,
        used_inodes:     0,
        free_inodes:     0,
        local:           true,
        pool_index:      pool,
        set_index:       set,
        metrics:         None,
    }
}
