//! `mdb`: health and capacity reports for MinIO cluster diagnostic snapshots.
//!
//! The pipeline is [`snapshot::Snapshot::load`] (schema normalizer, drive
//! inventory, topology, parity) followed by [`report::build`], which turns the
//! snapshot into styled lines for an [`output::LineSink`].

pub mod cli;
pub mod collectors;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod report;
pub mod severity;
pub mod snapshot;
pub mod ui;
pub mod util;
