use super::drives::drive_table;
use super::summary::servers_table;
use super::{rule, ViewOptions};
use crate::models::drive::{DriveRecord, SetKey};
use crate::models::erasure_set::ErasureSetView;
use crate::output::{Line, Span, Tone};
use crate::severity::classify;
use crate::snapshot::Snapshot;
use crate::util::human::fmt_pct;

const NO_SCANNING: &str = "No scanning disks found in the provided data.";
const NO_FAILED: &str = "No failed/faulty disks found in the provided data.";

fn title(out: &mut Vec<Line>, text: String) {
    out.push(Line::styled(text, Tone::Bold));
    out.push(rule('=', 80));
}

fn notice(out: &mut Vec<Line>, text: impl Into<String>) {
    out.push(Line::styled(text, Tone::Warn));
}

fn count_span(n: usize, tone: Tone) -> Span {
    if n > 0 { Span::styled(n.to_string(), tone) } else { Span::plain("0") }
}

/// `Good disks: .., Bad disks: .., Scanning: .., Avg Space Used: .., ...`
fn set_stats(view: &ErasureSetView<'_>, opts: &ViewOptions) -> Vec<Span> {
    let th = &opts.thresholds;
    let (used, free, inodes) = (view.avg_used_pct(), view.avg_free_pct(), view.avg_inode_pct());
    vec![
        Span::plain("Good disks: "),
        count_span(view.good(), Tone::Ok),
        Span::plain(", Bad disks: "),
        count_span(view.bad(), Tone::Critical),
        Span::plain(", Scanning: "),
        count_span(view.scanning(), Tone::Warn),
        Span::plain(", Avg Space Used: "),
        Span::styled(fmt_pct(used), classify(used, th.usage()).tone()),
        Span::plain(", Avg Free Space: "),
        Span::styled(fmt_pct(free), classify(free, th.free()).tone()),
        Span::plain(", Avg Inodes Used: "),
        Span::styled(fmt_pct(inodes), classify(inodes, th.inodes()).tone()),
    ]
}

// ── Failed drives ───────────────────────────────────────────────────────

pub(super) fn failed_table(out: &mut Vec<Line>, snap: &Snapshot, opts: &ViewOptions) {
    let mut failed: Vec<&DriveRecord> = snap.inventory.drives().iter().filter(|d| opts.shows(d)).collect();
    if failed.is_empty() {
        notice(out, NO_FAILED);
        return;
    }
    failed.sort_by(|a, b| DriveRecord::table_order(a, b));

    title(out, format!("MinIO Failed/Faulty Disks from: {}", snap.source.display()));
    out.extend(drive_table(&failed, opts, 2));
}

// ── Low free space ──────────────────────────────────────────────────────

pub(super) fn low_space(out: &mut Vec<Line>, snap: &Snapshot, opts: &ViewOptions, threshold: f64) {
    let mut sets: Vec<ErasureSetView<'_>> = snap
        .topology
        .keys()
        .map(|key| snap.set_view_where(key, |d| opts.shows(d)))
        .filter(|v| !v.is_empty() && v.avg_free_pct() < threshold)
        .collect();

    if sets.is_empty() {
        notice(out, format!("No erasure sets found with average free space less than {:.1}%.", threshold));
        return;
    }
    sets.sort_by(|a, b| b.avg_used_pct().total_cmp(&a.avg_used_pct()));

    title(out, format!("Erasure Sets with Average Free Space < {:.1}% (sorted by utilization)", threshold));
    for view in &sets {
        let mut line = Line::plain(format!("  Pool {}, Erasure Set {}: ", view.key.pool, view.key.set));
        line.spans.extend(set_stats(view, opts));
        out.push(line);
    }
}

// ── Pools and erasure sets ──────────────────────────────────────────────

/// Sets of one pool that the current view displays.
fn visible_sets<'a>(snap: &'a Snapshot, opts: &ViewOptions, pool: u32, sets: &[u32]) -> Vec<ErasureSetView<'a>> {
    sets.iter()
        .map(|&set| snap.set_view_where(SetKey::new(pool, set), |d| opts.shows(d)))
        .filter(|v| !opts.filtered() || !v.is_empty())
        .filter(|v| match opts.min_bad_disks {
            Some(min) => v.bad() >= min,
            None      => true,
        })
        .collect()
}

pub(super) fn pools_and_sets(out: &mut Vec<Line>, snap: &Snapshot, opts: &ViewOptions) {
    let heading = if opts.scanning {
        "MinIO Scanning Disks from"
    } else if opts.failed {
        "MinIO Failed/Faulty Disks from"
    } else {
        "MinIO Pool Information from"
    };
    title(out, format!("{}: {}", heading, snap.source.display()));

    let pools: Vec<(u32, Vec<ErasureSetView<'_>>)> = snap
        .topology
        .pools()
        .iter()
        .map(|p| (p.index, visible_sets(snap, opts, p.index, &p.sets)))
        .filter(|(_, sets)| !opts.filtered() || !sets.is_empty())
        .collect();

    if opts.filtered() && pools.is_empty() {
        notice(out, if opts.scanning { NO_SCANNING } else { NO_FAILED });
        return;
    }

    servers_table(out, snap, opts);

    for (pool, sets) in pools {
        out.push(Line::styled(format!("Pool {}:", pool), Tone::Accent));
        for view in &sets {
            if opts.summary {
                let mut line = Line::plain(format!("  Erasure Set {}: ", view.key.set));
                line.spans.extend(set_stats(view, opts));
                out.push(line);
            } else {
                out.push(Line::from_spans(vec![
                    Span::plain("  "),
                    Span::styled(format!("Erasure Set {}:", view.key.set), Tone::Accent),
                ]));
                out.extend(drive_table(&view.sorted(), opts, 4));
                out.push(Line::blank());
            }
        }
        if opts.summary {
            out.push(Line::blank());
        }
    }
}
