mod cli;
mod display;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use citeseek_core::{load_catalog, Catalog, CatalogCell, StatuteLibrary};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load(dir: &Path, cli: &Cli) -> Result<Catalog> {
    load_catalog(dir, cli.search_config())
        .with_context(|| format!("failed to load dataset from {}", dir.display()))
}

fn run_search(catalog: &Catalog, query: &str, json: bool) -> Result<()> {
    let outcome = catalog.search(query);
    let mut out = io::stdout().lock();
    if json {
        display::write_outcome_json(&mut out, &outcome)?;
    } else {
        display::write_outcome(&mut out, &outcome)?;
    }
    Ok(())
}

fn run_details(catalog: &Catalog, dir: &Path, id: u32) -> Result<()> {
    let Some(record) = catalog.get(id) else {
        bail!("no offense with id {id}");
    };
    let statutes = StatuteLibrary::load(dir)
        .with_context(|| format!("failed to load statutes from {}", dir.display()))?;
    debug!(id, sections = statutes.len(), "statutes loaded");
    display::write_details(&mut io::stdout().lock(), record, &statutes)?;
    Ok(())
}

fn run_stats(catalog: &Catalog, dir: &Path) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "citeseek {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "dataset: {}", dir.display())?;
    writeln!(out, "{}", catalog.stats())?;
    Ok(())
}

fn run_repl(catalog: Catalog, dir: &Path) -> Result<()> {
    let cell = CatalogCell::new(catalog);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    eprint!("> ");
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        match line.trim() {
            ":q" | ":quit" => break,
            ":reload" => match cell.reload(dir) {
                Ok(stats) => writeln!(out, "reloaded: {stats}")?,
                Err(err) => writeln!(out, "reload failed: {err}")?,
            },
            query => {
                let snapshot = cell.snapshot();
                display::write_outcome(&mut out, &snapshot.search(query))?;
            }
        }
        out.flush()?;
        eprint!("> ");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter());

    let dir = cli.data.clone();
    let catalog = load(&dir, &cli)?;

    match cli.command {
        Commands::Search { ref query, json } => run_search(&catalog, query, json),
        Commands::Details { id } => run_details(&catalog, &dir, id),
        Commands::Stats => run_stats(&catalog, &dir),
        Commands::Repl => run_repl(catalog, &dir),
    }
}
