use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use mdb::cli::Cli;
use mdb::config::Config;
use mdb::error::ReportError;
use mdb::output::{stdout_sink, Paging};
use mdb::report;
use mdb::snapshot::Snapshot;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    };

    if cli.print_config {
        return run_print_config();
    }
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "mdb", &mut io::stdout());
        return Ok(());
    }
    run_report(&cli)
}

fn run_report(cli: &Cli) -> Result<()> {
    let Some(file) = &cli.file else {
        return Err(ReportError::usage("JSON file is required (see --help)").into());
    };
    let config = Config::load();
    let opts = cli.view_options(&config);
    opts.validate()?;

    let snapshot = Snapshot::load(file)?;
    let paging = if cli.pager { Paging::Pager } else { Paging::Stream };
    let mut sink = stdout_sink(paging, cli.color(&config));
    report::render(&snapshot, &opts, sink.as_mut())?;
    Ok(())
}

fn run_print_config() -> Result<()> {
    let cfg = Config::load();
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    print!("{}", cfg.to_toml()?);
    Ok(())
}
