use super::{rule, ViewOptions};
use crate::collectors::u32_opt;
use crate::models::cluster::ServerEntry;
use crate::models::drive::SetKey;
use crate::output::table::{Cell, Table};
use crate::output::{Line, Span, Tone};
use crate::severity::classify;
use crate::snapshot::Snapshot;
use crate::util::capacity::{health_pct, Capacity};
use crate::util::endpoint::display_host;
use crate::util::human::{fmt_count, fmt_iec, fmt_pct, fmt_tb, fmt_uptime, natural_cmp};
use std::collections::BTreeSet;

pub(super) fn ec_header(out: &mut Vec<Line>, snap: &Snapshot) {
    out.push(Line::styled(
        format!("Detected Erasure Coding Configuration: EC:{}", snap.parity.disks),
        Tone::Bold,
    ));
    out.push(Line::blank());
}

fn kv(label: &str, value: impl Into<String>, tone: Tone) -> Line {
    Line::from_spans(vec![Span::plain(format!("{}: ", label)), Span::styled(value, tone)])
}

/// `"<tb> TB (<pct>%)"` with the percentage colored.
fn tb_with_pct(bytes: f64, pct: f64, tone: Tone) -> Vec<Span> {
    vec![
        Span::plain(format!("{} (", fmt_tb(bytes))),
        Span::styled(fmt_pct(pct), tone),
        Span::plain(")"),
    ]
}

// ── Cluster ─────────────────────────────────────────────────────────────

pub(super) fn cluster_summary(out: &mut Vec<Line>, snap: &Snapshot, opts: &ViewOptions) {
    let t = snap.inventory.tallies();
    let th = &opts.thresholds;

    out.push(Line::styled("MinIO Cluster Summary", Tone::Bold));
    out.push(rule('=', 50));
    match &snap.info.deployment_id {
        Some(id) => out.push(Line::plain(format!("Deployment ID: {}", id))),
        None     => out.push(Line::plain("Deployment ID: Not available")),
    }
    if let Some(b) = &snap.info.backend {
        let opt = |v: Option<u32>| v.map_or_else(|| "N/A".to_string(), |n| n.to_string());
        out.push(Line::plain(format!(
            "Backend: totalSets={:?}, standardSCParity={}, rrSCParity={}, drivesPerSet={:?}",
            b.total_sets, opt(b.standard_sc_parity), opt(b.rr_sc_parity), b.drives_per_set,
        )));
    }
    out.push(Line::blank());

    out.push(Line::plain(format!("Total Disks: {}", t.total_disks)));
    out.push(kv("Scanning Disks", t.scanning_disks.to_string(), Tone::Warn));
    out.push(kv("Healthy Disks", t.ok_disks.to_string(), Tone::Ok));
    out.push(kv("Problem Disks", t.bad_disks.to_string(), Tone::Critical));
    if t.total_disks > 0 {
        let health = t.health_pct();
        out.push(kv("Health", fmt_pct(health), classify(health, th.health()).tone()));
    }

    if t.total_space > 0 {
        let mut cap = Capacity { raw: t.total_space, used: t.used_space, usable: 0.0 };
        for key in snap.topology.keys() {
            cap.usable += snap.set_view(key).capacity(snap.parity.disks).usable;
        }
        let usage = cap.usage_pct();
        out.push(Line::plain(format!("Raw Capacity: {}", fmt_tb(cap.raw as f64))));
        out.push(Line::plain(format!("Usable Capacity: {}", fmt_tb(cap.usable))));
        let mut used = Line::plain("Used Space: ");
        used.spans.extend(tb_with_pct(cap.used as f64, usage, classify(usage, th.usage()).tone()));
        out.push(used);
        out.push(Line::plain(format!("Available Space: {}", fmt_tb(cap.available()))));
    }

    out.push(Line::plain(format!("Pools: {}", snap.topology.pool_count())));
    out.push(Line::plain(format!("Servers: {}", snap.servers.len())));
    out.push(Line::plain(format!("Erasure Sets: {}", snap.topology.set_count())));
    if let Some(s) = &snap.info.scanner {
        out.push(Line::plain(format!(
            "Scanner Status: buckets={}, objects={}, versions={}, deletemarkers={}, usage={}",
            fmt_count(s.buckets), fmt_count(s.objects), fmt_count(s.versions),
            fmt_count(s.delete_markers), fmt_iec(s.usage_bytes),
        )));
    }
    out.push(rule('=', 50));
}

// ── Pools ───────────────────────────────────────────────────────────────

pub(super) fn pool_summary(out: &mut Vec<Line>, snap: &Snapshot, opts: &ViewOptions) {
    let th = &opts.thresholds;
    let parity = snap.parity.disks;

    out.push(Line::styled("Pool Summary", Tone::Bold));
    out.push(rule('-', 50));

    for pool in snap.topology.pools() {
        let (mut total, mut ok, mut scanning) = (0usize, 0usize, 0usize);
        let mut cap = Capacity::default();
        for &set in &pool.sets {
            let view = snap.set_view(SetKey::new(pool.index, set));
            total += view.len();
            ok += view.good();
            scanning += view.scanning();
            cap += view.capacity(parity);
        }
        let bad = total - ok;
        let health = health_pct(ok, total);
        let usage = cap.usage_pct();

        out.push(Line::plain(format!("Pool {}:", pool.index)));
        out.push(Line::plain(format!("  Erasure Sets: {}", pool.sets.len())));
        out.push(Line::from_spans(vec![
            Span::plain(format!("  Disks: {} total (", total)),
            Span::styled(format!("{} ok", ok), Tone::Ok),
            Span::plain(", "),
            Span::styled(format!("{} bad", bad), Tone::Critical),
            Span::plain(", "),
            Span::styled(format!("{} scanning", scanning), Tone::Warn),
            Span::plain(")"),
        ]));
        out.push(kv("  Health", fmt_pct(health), classify(health, th.health()).tone()));
        out.push(Line::plain(format!("  Raw Capacity: {}", fmt_tb(cap.raw as f64))));
        out.push(Line::plain(format!("  Usable Capacity: {}", fmt_tb(cap.usable))));
        let mut used = Line::plain("  Usage: ");
        used.spans.extend(tb_with_pct(cap.used as f64, usage, classify(usage, th.usage()).tone()));
        out.push(used);
        out.push(Line::plain(format!("  Available: {}", fmt_tb(cap.available()))));
        out.push(Line::blank());
    }

    out.push(rule('=', 50));
    out.push(Line::blank());
}

// ── Servers ─────────────────────────────────────────────────────────────

struct ServerRow<'a> {
    name:   String,
    server: &'a ServerEntry,
    pools:  BTreeSet<u32>,
}

/// One row per display name; duplicate names merge their pool lists.
fn server_rows<'a>(snap: &'a Snapshot, trim_domain: &str) -> Vec<ServerRow<'a>> {
    let mut rows: Vec<ServerRow<'a>> = Vec::new();
    for server in &snap.servers {
        let name = display_host(&server.endpoint, trim_domain);
        let pools: BTreeSet<u32> = server
            .drives
            .iter()
            .map(|d| u32_opt(&d["pool_index"]).unwrap_or(0))
            .filter(|p| snap.topology.contains_pool(*p))
            .collect();
        match rows.iter_mut().find(|r| r.name == name) {
            Some(row) => row.pools.extend(pools),
            None      => rows.push(ServerRow { name, server, pools }),
        }
    }
    rows.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    rows
}

pub(super) fn servers_table(out: &mut Vec<Line>, snap: &Snapshot, opts: &ViewOptions) {
    let rows = server_rows(snap, &opts.trim_domain);
    if rows.is_empty() { return; }

    let mut table = Table::new([
        "Pool", "Server", "State", "Edition", "Version", "Commit ID", "Memory", "ILM Status", "Uptime",
    ]);
    for row in rows {
        let s = row.server;
        let pools = if row.pools.is_empty() {
            "N/A".to_string()
        } else {
            row.pools.iter().map(u32::to_string).collect::<Vec<_>>().join(",")
        };
        let state_tone = if s.is_offline() { Tone::Critical } else { Tone::Ok };
        let uptime = if s.is_offline() { "N/A".to_string() } else { fmt_uptime(s.uptime_secs.unwrap_or(0)) };
        table.push_row(vec![
            Cell::plain(pools),
            Cell::plain(row.name),
            Cell::styled(s.state.as_deref().unwrap_or("unknown"), state_tone),
            Cell::plain(s.edition.clone().unwrap_or_default()),
            Cell::plain(s.version.clone().unwrap_or_default()),
            Cell::plain(s.commit_id.clone().unwrap_or_default()),
            Cell::plain(fmt_iec(s.mem_alloc.unwrap_or(0))),
            Cell::plain(s.ilm_expiry.to_string()),
            Cell::plain(uptime),
        ]);
    }

    out.push(Line::styled("Servers", Tone::Bold));
    out.extend(table.into_lines());
    out.push(Line::blank());
}
