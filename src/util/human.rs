use chrono::TimeDelta;
use std::cmp::Ordering;

const GIB: f64 = 1_073_741_824.0;
const TIB: f64 = 1_099_511_627_776.0;

/// Terabytes (1024⁴) with one decimal: "12.5 TB"
pub fn fmt_tb(bytes: f64) -> String {
    format!("{:.1} TB", bytes / TIB)
}

/// Gigabytes (1024³) with one decimal, unspaced: "931.5GB"
pub fn fmt_gb(bytes: u64) -> String {
    format!("{:.1}GB", bytes as f64 / GIB)
}

/// Percentage with one decimal: "84.5%"
pub fn fmt_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Thousands-separated integer: "1,234,567"
pub fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// IEC bytes: "512 B", "1.5 KiB", "24 GiB"
pub fn fmt_iec(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
    if bytes < 10 {
        return format!("{} B", bytes);
    }
    let mut exp = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && exp < UNITS.len() - 1 {
        scaled /= 1024.0;
        exp += 1;
    }
    let rounded = (scaled * 10.0 + 0.5).floor() / 10.0;
    if rounded < 10.0 { format!("{:.1} {}", rounded, UNITS[exp]) }
    else              { format!("{:.0} {}", rounded, UNITS[exp]) }
}

/// Uptime in the longest form that fits: "3 days 2 hours 0 minutes 5 seconds"
pub fn fmt_uptime(secs: u64) -> String {
    let secs = i64::try_from(secs).unwrap_or(i64::MAX);
    let d = TimeDelta::try_seconds(secs).unwrap_or(TimeDelta::MAX);
    let (days, hours, mins, s) = (
        d.num_days(),
        d.num_hours() % 24,
        d.num_minutes() % 60,
        d.num_seconds() % 60,
    );
    if d.num_minutes() == 0    { format!("{} seconds", s) }
    else if d.num_hours() == 0 { format!("{} minutes {} seconds", mins, s) }
    else if days == 0          { format!("{} hours {} minutes {} seconds", hours, mins, s) }
    else { format!("{} days {} hours {} minutes {} seconds", days, hours, mins, s) }
}

/// "Yes" / "No"
pub fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}

/// Natural ordering: digit runs compare numerically, letters case-insensitively.
/// `rack2` sorts before `rack10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let si = i;
            while i < a.len() && a[i].is_ascii_digit() { i += 1; }
            let sj = j;
            while j < b.len() && b[j].is_ascii_digit() { j += 1; }
            let ord = cmp_digit_runs(&a[si..i], &b[sj..j]);
            if ord != Ordering::Equal { return ord; }
            continue;
        }
        let (x, y) = (a[i].to_ascii_lowercase(), b[j].to_ascii_lowercase());
        if x != y { return x.cmp(&y); }
        i += 1;
        j += 1;
    }
    (a.len() - i).cmp(&(b.len() - j)).then_with(|| a.len().cmp(&b.len()))
}

/// Compare two runs of ASCII digits by numeric value, without overflow.
fn cmp_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let trim = |s: &[char]| -> usize { s.iter().take_while(|c| **c == '0').count() };
    let (a, b) = (&a[trim(a)..], &b[trim(b)..]);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
