//! Readers that turn the raw diagnostic JSON into model types.
//!
//! Field access follows one rule: a missing or mistyped value falls back to
//! its default and never fails the run.

pub mod document;
pub mod inventory;
pub mod parity;

use serde_json::Value;

/// Non-empty trimmed string.
pub(crate) fn str_opt(v: &Value) -> Option<String> {
    v.as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Non-empty string exactly as written; state values are compared verbatim.
pub(crate) fn state_opt(v: &Value) -> Option<String> {
    v.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Non-negative integer; whole-valued floats are accepted.
pub(crate) fn u64_opt(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| {
        v.as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

pub(crate) fn u32_opt(v: &Value) -> Option<u32> {
    u64_opt(v).and_then(|n| u32::try_from(n).ok())
}
