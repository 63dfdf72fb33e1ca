use crate::config::Config;
use crate::output::ColorChoice;
use crate::report::ViewOptions;
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mdb",
    about = "Pool, erasure-set and drive report for a MinIO diagnostic snapshot",
    version,
    after_help = "\
Examples:
  mdb prod.json --summary
  mdb prod.json --scanning
  mdb prod.json --summary --low-space=10
  mdb prod.json --failed
  mdb prod.json --summary --failed --min-bad-disks=2

--low-space requires --summary; --min-bad-disks requires --summary --failed."
)]
pub struct Cli {
    /// Diagnostic JSON (single document or newline-delimited)
    pub file: Option<PathBuf>,

    /// One summary line per erasure set instead of drive tables
    #[arg(long)]
    pub summary: bool,

    /// Show only scanning (healing) drives
    #[arg(long)]
    pub scanning: bool,

    /// Show only drives whose state is not "ok"
    #[arg(long)]
    pub failed: bool,

    /// List erasure sets whose average free space is below PCT percent (requires --summary)
    #[arg(long, value_name = "PCT", value_parser = parse_percentage)]
    pub low_space: Option<f64>,

    /// Keep erasure sets with at least N bad drives (requires --summary --failed)
    #[arg(long, value_name = "N")]
    pub min_bad_disks: Option<usize>,

    /// Domain suffix to strip from server names (e.g. ".example.com")
    #[arg(long, value_name = "SUFFIX")]
    pub trim_domain: Option<String>,

    /// Page the report in a scrollable full-screen view
    #[arg(long)]
    pub pager: bool,

    /// When to color output
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Print config file path and current values, then exit
    #[arg(long)]
    pub print_config: bool,

    /// Print a shell completion script, then exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// View options from flags, with `config` supplying anything not given.
    pub fn view_options(&self, config: &Config) -> ViewOptions {
        let mut opts = ViewOptions::from_config(config);
        opts.summary = self.summary;
        opts.scanning = self.scanning;
        opts.failed = self.failed;
        opts.low_space = self.low_space;
        opts.min_bad_disks = self.min_bad_disks;
        if let Some(suffix) = &self.trim_domain {
            opts.trim_domain = suffix.clone();
        }
        opts
    }

    pub fn color(&self, config: &Config) -> ColorChoice {
        self.color.unwrap_or(config.display.color)
    }
}

fn parse_percentage(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !v.is_finite() || !(0.0..=100.0).contains(&v) {
        return Err(format!("{} is not a percentage between 0 and 100", s));
    }
    Ok(v)
}
