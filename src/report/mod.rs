//! Report views over a loaded [`Snapshot`].
//!
//! Building a report is a pure function of the snapshot and the view options:
//! it yields structured [`Line`]s and never touches the terminal. [`render`]
//! hands those lines to a [`LineSink`].

mod drives;
mod sets;
mod summary;

use crate::config::{Config, ThresholdConfig};
use crate::error::{ReportError, Result};
use crate::models::drive::DriveRecord;
use crate::output::{Line, LineSink};
use crate::snapshot::Snapshot;

/// Which report to build and how to decorate it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub summary:       bool,
    pub scanning:      bool,
    pub failed:        bool,
    /// Free-space threshold in percent; summary mode only.
    pub low_space:     Option<f64>,
    /// Minimum bad drives per set; summary + failed only.
    pub min_bad_disks: Option<usize>,
    pub trim_domain:   String,
    pub uuid_width:    usize,
    pub thresholds:    ThresholdConfig,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ViewOptions {
    /// Display settings from `config`, no filters.
    pub fn from_config(config: &Config) -> Self {
        Self {
            summary:       false,
            scanning:      false,
            failed:        false,
            low_space:     None,
            min_bad_disks: None,
            trim_domain:   config.display.trim_domain.clone(),
            uuid_width:    config.display.uuid_width,
            thresholds:    config.thresholds.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.low_space.is_some() && !self.summary {
            return Err(ReportError::usage("--low-space option requires --summary mode"));
        }
        if self.min_bad_disks.is_some() && !(self.summary && self.failed) {
            return Err(ReportError::usage("--min-bad-disks option requires --summary --failed mode"));
        }
        Ok(())
    }

    /// Whether a drive survives the scanning / failed filters.
    pub fn shows(&self, d: &DriveRecord) -> bool {
        (!self.scanning || d.scanning) && (!self.failed || !d.is_ok())
    }

    fn filtered(&self) -> bool {
        self.scanning || self.failed
    }

    fn mode(&self) -> Mode {
        if self.failed && !self.summary {
            Mode::FailedTable
        } else if let (true, Some(threshold)) = (self.summary, self.low_space) {
            Mode::LowSpace(threshold)
        } else {
            Mode::PoolsAndSets
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    /// Every failed drive of the cluster in one table.
    FailedTable,
    /// Summary lines of sets short on free space, most utilized first.
    LowSpace(f64),
    /// Servers, then each pool with its sets as tables or summary lines.
    PoolsAndSets,
}

/// Build the full report.
pub fn build(snapshot: &Snapshot, opts: &ViewOptions) -> Result<Vec<Line>> {
    opts.validate()?;

    let mut out = Vec::new();
    summary::ec_header(&mut out, snapshot);
    summary::cluster_summary(&mut out, snapshot, opts);
    summary::pool_summary(&mut out, snapshot, opts);

    match opts.mode() {
        Mode::FailedTable         => sets::failed_table(&mut out, snapshot, opts),
        Mode::LowSpace(threshold) => sets::low_space(&mut out, snapshot, opts, threshold),
        Mode::PoolsAndSets        => sets::pools_and_sets(&mut out, snapshot, opts),
    }
    Ok(out)
}

/// Build the report and write it to `sink`.
pub fn render(snapshot: &Snapshot, opts: &ViewOptions, sink: &mut dyn LineSink) -> Result<()> {
    for line in build(snapshot, opts)? {
        sink.emit(line)?;
    }
    sink.finish()?;
    Ok(())
}

fn rule(ch: char, width: usize) -> Line {
    Line::plain(ch.to_string().repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::document::parse_str;
    use crate::output::MemorySink;
    use serde_json::json;
    use std::path::Path;

    pub(super) fn snapshot(v: serde_json::Value) -> Snapshot {
        let path = Path::new("cluster.json");
        Snapshot::from_document(path, parse_str(&v.to_string(), path).unwrap())
    }

    pub(super) fn text(lines: &[Line]) -> String {
        lines.iter().map(|l| l.text() + "\n").collect()
    }

    #[test]
    fn test_low_space_requires_summary() {
        let opts = ViewOptions { low_space: Some(10.0), ..Default::default() };
        assert!(matches!(opts.validate(), Err(ReportError::Usage(_))));
        let opts = ViewOptions { low_space: Some(10.0), summary: true, ..Default::default() };
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_min_bad_disks_requires_summary_and_failed() {
        let opts = ViewOptions { min_bad_disks: Some(1), summary: true, ..Default::default() };
        assert!(opts.validate().is_err());
        let opts = ViewOptions { min_bad_disks: Some(1), summary: true, failed: true, ..Default::default() };
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_mode_precedence() {
        let failed = ViewOptions { failed: true, low_space: None, ..Default::default() };
        assert_eq!(failed.mode(), Mode::FailedTable);
        let low = ViewOptions { summary: true, failed: true, low_space: Some(5.0), ..Default::default() };
        assert_eq!(low.mode(), Mode::LowSpace(5.0));
        assert_eq!(ViewOptions::default().mode(), Mode::PoolsAndSets);
    }

    #[test]
    fn test_render_emits_built_lines() {
        let snap = snapshot(json!({ "info": { "servers": [{ "endpoint": "n1:9000", "drives": [
            { "state": "ok", "totalspace": 100, "usedspace": 10, "availspace": 90 }
        ]}]}}));
        let opts = ViewOptions::default();
        let mut sink = MemorySink::new();
        render(&snap, &opts, &mut sink).unwrap();
        assert_eq!(sink.lines, build(&snap, &opts).unwrap());
    }

    #[test]
    fn test_invalid_options_emit_nothing() {
        let snap = snapshot(json!({ "info": { "servers": [] } }));
        let opts = ViewOptions { low_space: Some(1.0), ..Default::default() };
        let mut sink = MemorySink::new();
        assert!(render(&snap, &opts, &mut sink).is_err());
        assert!(sink.lines.is_empty());
    }
}
