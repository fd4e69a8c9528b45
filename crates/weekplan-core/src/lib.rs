pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod datetime;
pub mod render;
pub mod stats;
pub mod store;
pub mod task;
pub mod view;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::info;

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::Cli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;
    info!(verbose = cli.verbose, quiet = cli.quiet, "starting weekplan CLI");

    let data_dir = config::resolve_data_dir(cli.data.as_deref())
        .context("failed to resolve data directory")?;

    let mut store = store::TaskStore::open(&data_dir)
        .with_context(|| format!("failed to open task store at {}", data_dir.display()))?;

    let mut view = view::ViewState::new();
    let mut renderer = render::Renderer::new();

    let command = cli.command.unwrap_or(cli::Command::List {
        day: None,
        filter: view::Filter::All,
        week: false,
    });

    commands::dispatch(&mut store, &mut view, &mut renderer, command)?;

    info!("done");
    Ok(())
}
