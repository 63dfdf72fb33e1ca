//! Usable-capacity estimation under erasure coding.
//!
//! The usable ratio is always derived from a single set's live drive count and
//! then summed upward; pool and cluster figures are never recomputed from
//! their own totals.

use crate::models::drive::DriveRecord;
use std::ops::AddAssign;

/// Fraction of a set's raw space left for data with `parity` parity drives.
///
/// Zero for an empty set and for a set with fewer drives than `parity`.
pub fn usable_ratio(drive_count: usize, parity: u32) -> f64 {
    let parity = parity as usize;
    if drive_count == 0 || drive_count < parity {
        return 0.0;
    }
    (drive_count - parity) as f64 / drive_count as f64
}

/// Raw, used and usable bytes of a set, pool or cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Capacity {
    pub raw:    u64,
    pub used:   u64,
    pub usable: f64,
}

impl Capacity {
    /// Capacity of one erasure set.
    pub fn for_set<'a, I>(drives: I, parity: u32) -> Self
    where
        I: IntoIterator<Item = &'a DriveRecord>,
        I::IntoIter: ExactSizeIterator,
    {
        let drives = drives.into_iter();
        let ratio = usable_ratio(drives.len(), parity);
        let mut cap = Self::default();
        for d in drives {
            cap.raw  = cap.raw.saturating_add(d.total_space);
            cap.used = cap.used.saturating_add(d.used_space);
        }
        cap.usable = cap.raw as f64 * ratio;
        cap
    }

    /// Usable minus used; negative when a degraded set is over-committed.
    pub fn available(&self) -> f64 {
        self.usable - self.used as f64
    }

    pub fn usage_pct(&self) -> f64 {
        if self.usable <= 0.0 { return 0.0; }
        self.used as f64 / self.usable * 100.0
    }
}

impl AddAssign for Capacity {
    fn add_assign(&mut self, rhs: Self) {
        self.raw    = self.raw.saturating_add(rhs.raw);
        self.used   = self.used.saturating_add(rhs.used);
        self.usable += rhs.usable;
    }
}

/// Share of healthy drives, in percent; zero with no drives.
pub fn health_pct(ok: usize, total: usize) -> f64 {
    if total == 0 { return 0.0; }
    ok as f64 / total as f64 * 100.0
}
