use super::ViewOptions;
use crate::collectors::u64_opt;
use crate::models::drive::DriveRecord;
use crate::output::table::{Cell, Table};
use crate::output::{Line, Span, Tone};
use crate::severity::{classify, Thresholds};
use crate::util::endpoint::display_host;
use crate::util::human::{fmt_count, fmt_gb, fmt_pct, yes_no};
use serde_json::Value;

const HEADERS: [&str; 14] = [
    "Pool", "Erasure Set", "Disk Index", "Server", "Disk Path", "State", "Scanning", "UUID",
    "Total Space", "Space Used", "Free Space", "Inodes Used", "Local", "Metrics",
];

/// Drive table, rows in the order given.
pub(super) fn drive_table(drives: &[&DriveRecord], opts: &ViewOptions, indent: usize) -> Vec<Line> {
    let mut table = Table::new(HEADERS).indent(indent);
    for d in drives {
        table.push_row(drive_row(d, opts));
    }
    table.into_lines()
}

fn drive_row(d: &DriveRecord, opts: &ViewOptions) -> Vec<Cell> {
    let th = &opts.thresholds;
    let (total, used, free) = if d.total_space > 0 {
        (
            Cell::plain(fmt_gb(d.total_space)),
            amount_with_pct(fmt_gb(d.used_space), d.used_space_pct(), th.usage()),
            amount_with_pct(fmt_gb(d.available_space), d.free_space_pct(), th.free()),
        )
    } else {
        (Cell::plain("N/A"), Cell::plain("N/A"), Cell::plain("N/A"))
    };

    let inodes = if d.used_inodes > 0 {
        amount_with_pct(fmt_count(d.used_inodes), d.inode_used_pct(), th.inodes())
    } else {
        Cell::plain("N/A")
    };

    vec![
        Cell::styled(d.pool_index.to_string(), Tone::Accent),
        Cell::styled(d.set_index.to_string(), Tone::Accent),
        Cell::plain(d.disk_index.map_or_else(|| "N/A".to_string(), |i| i.to_string())),
        Cell::plain(display_host(&d.server, &opts.trim_domain)),
        Cell::plain(d.path.clone()),
        Cell::styled(d.state_label(), if d.is_ok() { Tone::Ok } else { Tone::Critical }),
        Cell::styled(yes_no(d.scanning), if d.scanning { Tone::Warn } else { Tone::Ok }),
        Cell::plain(short_uuid(d.uuid.as_deref(), opts.uuid_width)),
        total,
        used,
        free,
        inodes,
        Cell::styled(yes_no(d.local), if d.local { Tone::Ok } else { Tone::Warn }),
        Cell::plain(d.metrics.as_ref().map(fmt_metrics).unwrap_or_default()),
    ]
}

/// `"<amount> (<pct>%)"` with the percentage classified.
fn amount_with_pct(amount: String, pct: f64, thresholds: Thresholds) -> Cell {
    Cell::from_spans(vec![
        Span::plain(format!("{} (", amount)),
        Span::styled(fmt_pct(pct), classify(pct, thresholds).tone()),
        Span::plain(")"),
    ])
}

fn short_uuid(uuid: Option<&str>, width: usize) -> String {
    match uuid {
        None => "N/A".to_string(),
        Some(u) if u.chars().count() > width => {
            let head: String = u.chars().take(width).collect();
            format!("{}...", head)
        }
        Some(u) => u.to_string(),
    }
}

/// Compact drive metrics: `[tokens=3, write=120, tout=2]`. Zero counters are
/// left out, and `err` is shown only when it differs from `tout`.
pub(super) fn fmt_metrics(metrics: &Value) -> String {
    let Some(map) = metrics.as_object() else {
        return metrics.to_string();
    };
    let get = |key: &str| map.get(key).and_then(u64_opt).unwrap_or(0);

    let timeouts = get("totalErrorsTimeout");
    let availability = get("totalErrorsAvailability");
    let mut fields = vec![
        ("tokens",  get("totalTokens")),
        ("write",   get("totalWrites")),
        ("del",     get("totalDeletes")),
        ("waiting", get("totalWaiting")),
        ("tout",    timeouts),
    ];
    if availability != timeouts {
        fields.push(("err", availability));
    }

    let parts: Vec<String> = fields
        .into_iter()
        .filter(|(_, v)| *v != 0)
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    if parts.is_empty() { String::new() } else { format!("[{}]", parts.join(", ")) }
}
