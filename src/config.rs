use crate::output::ColorChoice;
use crate::severity::Thresholds;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// auto, always or never
    pub color:       ColorChoice,
    /// Domain suffix stripped from server names; empty keeps the first label only.
    pub trim_domain: String,
    /// UUID characters shown before the ellipsis.
    pub uuid_width:  usize,
}

/// Color cut-offs, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub usage_warn_pct:  f64,
    pub usage_crit_pct:  f64,
    pub inode_warn_pct:  f64,
    pub inode_crit_pct:  f64,
    /// Free space at or below this is a warning.
    pub free_warn_pct:   f64,
    pub free_crit_pct:   f64,
    /// Disk health at or above this is fine.
    pub health_ok_pct:   f64,
    pub health_warn_pct: f64,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color:       ColorChoice::Auto,
            trim_domain: String::new(),
            uuid_width:  16,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            usage_warn_pct:  80.0,
            usage_crit_pct:  95.0,
            inode_warn_pct:  80.0,
            inode_crit_pct:  95.0,
            free_warn_pct:   20.0,
            free_crit_pct:   5.0,
            health_ok_pct:   90.0,
            health_warn_pct: 75.0,
        }
    }
}

impl ThresholdConfig {
    pub fn usage(&self) -> Thresholds {
        Thresholds::Ceiling { warn: self.usage_warn_pct, crit: self.usage_crit_pct }
    }

    pub fn inodes(&self) -> Thresholds {
        Thresholds::Ceiling { warn: self.inode_warn_pct, crit: self.inode_crit_pct }
    }

    pub fn free(&self) -> Thresholds {
        Thresholds::Floor { warn: self.free_warn_pct, crit: self.free_crit_pct }
    }

    pub fn health(&self) -> Thresholds {
        Thresholds::Target { ok: self.health_ok_pct, warn: self.health_warn_pct }
    }
}

// ── Load ──────────────────────────────────────────────────────────────

impl Config {
    /// Read the user config; a missing or broken file yields defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory on this platform; using defaults");
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match try_load(path) {
            Ok(Some(c)) => c,
            Ok(None)    => Config::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mdb").join("mdb.toml"))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn try_load(path: &Path) -> Result<Option<Config>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let cfg: Config = toml::from_str(&text)?;
    debug!(path = %path.display(), "loaded config");
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(cfg, Config::default());
        assert!(!dir.path().join("absent.toml").exists());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[display]\ncolor = \"never\"\n\n[thresholds]\nusage_warn_pct = 70.0").unwrap();
        let cfg = Config::load_from(f.path());
        assert_eq!(cfg.display.color, ColorChoice::Never);
        assert_eq!(cfg.display.uuid_width, 16);
        assert_eq!(cfg.thresholds.usage_warn_pct, 70.0);
        assert_eq!(cfg.thresholds.usage_crit_pct, 95.0);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "this is = = not toml").unwrap();
        assert_eq!(Config::load_from(f.path()), Config::default());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("uuid_width = 16"));
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, Config::default());
    }

    #[test]
    fn test_threshold_shapes() {
        let t = ThresholdConfig::default();
        assert_eq!(t.free(), Thresholds::Floor { warn: 20.0, crit: 5.0 });
        assert_eq!(t.health(), Thresholds::Target { ok: 90.0, warn: 75.0 });
    }
}
