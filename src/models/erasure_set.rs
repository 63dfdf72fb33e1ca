use super::drive::{DriveRecord, SetKey};
use crate::util::capacity::Capacity;

/// Drives of one erasure set with derived aggregates. Built on demand.
#[derive(Debug, Clone)]
pub struct ErasureSetView<'a> {
    pub key:    SetKey,
    pub drives: Vec<&'a DriveRecord>,
}

impl<'a> ErasureSetView<'a> {
    pub fn new(key: SetKey, drives: Vec<&'a DriveRecord>) -> Self {
        Self { key, drives }
    }

    pub fn len(&self) -> usize {
        self.drives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drives.is_empty()
    }

    pub fn good(&self) -> usize {
        self.drives.iter().filter(|d| d.is_ok()).count()
    }

    pub fn bad(&self) -> usize {
        self.len() - self.good()
    }

    pub fn scanning(&self) -> usize {
        self.drives.iter().filter(|d| d.scanning).count()
    }

    /// Mean of the per-drive used-space percentages.
    pub fn avg_used_pct(&self) -> f64 {
        self.mean(DriveRecord::used_space_pct)
    }

    /// Mean of the per-drive free-space percentages.
    pub fn avg_free_pct(&self) -> f64 {
        self.mean(DriveRecord::free_space_pct)
    }

    pub fn avg_inode_pct(&self) -> f64 {
        self.mean(DriveRecord::inode_used_pct)
    }

    fn mean(&self, f: fn(&DriveRecord) -> f64) -> f64 {
        if self.drives.is_empty() { return 0.0; }
        self.drives.iter().map(|d| f(d)).sum::<f64>() / self.drives.len() as f64
    }

    pub fn capacity(&self, parity: u32) -> Capacity {
        Capacity::for_set(self.drives.iter().copied(), parity)
    }

    /// Drives in table order.
    pub fn sorted(&self) -> Vec<&'a DriveRecord> {
        let mut drives = self.drives.clone();
        drives.sort_by(|a, b| DriveRecord::table_order(a, b));
        drives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drive::sample;

    #[test]
    fn test_counts() {
        let mut drives = vec![sample(0, 0, 0), sample(0, 0, 1), sample(0, 0, 2)];
        drives[1].state = Some("offline".into());
        drives[2].state = None;
        drives[2].scanning = true;
        let view = ErasureSetView::new(SetKey::new(0, 0), drives.iter().collect());
        assert_eq!(view.good(), 1);
        assert_eq!(view.bad(), 2);
        assert_eq!(view.scanning(), 1);
    }

    #[test]
    fn test_averages_are_drive_weighted() {
        let mut small = sample(0, 0, 0);
        small.total_space = 10;
        small.used_space = 10;
        small.available_space = 0;
        let big = sample(0, 0, 1); // 40% used of 100
        let drives = vec![small, big];
        let view = ErasureSetView::new(SetKey::new(0, 0), drives.iter().collect());
        assert_eq!(view.avg_used_pct(), 70.0);
        assert_eq!(view.avg_free_pct(), 30.0);
    }

    #[test]
    fn test_empty_view() {
        let view = ErasureSetView::new(SetKey::new(0, 0), Vec::new());
        assert_eq!(view.avg_used_pct(), 0.0);
        assert_eq!(view.capacity(2).usable, 0.0);
    }

    #[test]
    fn test_sorted() {
        let drives = vec![sample(0, 0, 3), sample(0, 0, 1), sample(0, 0, 2)];
        let view = ErasureSetView::new(SetKey::new(0, 0), drives.iter().collect());
        let idx: Vec<Option<u64>> = view.sorted().iter().map(|d| d.disk_index).collect();
        assert_eq!(idx, vec![Some(1), Some(2), Some(3)]);
    }
}
