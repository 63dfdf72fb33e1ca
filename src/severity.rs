use crate::output::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub fn tone(&self) -> Tone {
        match self {
            Severity::Ok       => Tone::Ok,
            Severity::Warning  => Tone::Warn,
            Severity::Critical => Tone::Critical,
        }
    }
}

/// How a metric maps onto a severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Thresholds {
    /// Higher is worse: `>= crit` is critical, `>= warn` a warning.
    Ceiling { warn: f64, crit: f64 },
    /// Lower is worse: `<= crit` is critical, `<= warn` a warning.
    Floor { warn: f64, crit: f64 },
    /// Must reach `ok` to be healthy; below `warn` is critical.
    Target { ok: f64, warn: f64 },
}

pub fn classify(value: f64, thresholds: Thresholds) -> Severity {
    match thresholds {
        Thresholds::Ceiling { warn, crit } => {
            if value >= crit { Severity::Critical }
            else if value >= warn { Severity::Warning }
            else { Severity::Ok }
        }
        Thresholds::Floor { warn, crit } => {
            if value <= crit { Severity::Critical }
            else if value <= warn { Severity::Warning }
            else { Severity::Ok }
        }
        Thresholds::Target { ok, warn } => {
            if value >= ok { Severity::Ok }
            else if value >= warn { Severity::Warning }
            else { Severity::Critical }
        }
    }
}
