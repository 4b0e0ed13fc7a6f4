mod cli;
mod output;
mod session;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use faq_engine::{
    save_catalog_jsonl, Catalog, EngineConfig, FaqEngine, QueryState, RecordingNotifier, Session,
    VoteLedger,
};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::output::{print_categories, print_hits, print_vote, Format};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn load_engine(cli: &Cli) -> Result<FaqEngine> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => EngineConfig::load_or_default().context("load default config")?,
    };
    if let Some(threshold) = cli.threshold {
        config = config.with_threshold(threshold)?;
    }

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_jsonl(path)
            .with_context(|| format!("load catalog {}", path.display()))?,
        None => Catalog::builtin().context("load built-in catalog")?,
    };

    Ok(FaqEngine::new(catalog, config))
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = Format::parse(&cli.output)?;
    let engine = Arc::new(load_engine(&cli)?);
    let mut out = io::stdout().lock();

    match &cli.command {
        Commands::List => {
            let session = Session::new(engine.clone());
            let results = session.query();
            print_hits(&mut out, format, None, &results.hits)?;
        }
        Commands::Categories => print_categories(&mut out, format, &engine.categories())?,
        Commands::Featured { limit } => {
            let limit = limit.unwrap_or(engine.config().featured_limit);
            let hits = engine.featured_with_limit(limit, &VoteLedger::new());
            print_hits(&mut out, format, None, &hits)?;
        }
        command @ Commands::Search { .. } => {
            let state = QueryState::from_filters(command.search_filters())?;
            let mut session = Session::new(engine.clone());
            session.set_state(state);
            let results = session.query();
            print_hits(&mut out, format, Some(session.state()), &results.hits)?;
        }
        Commands::Vote {
            id,
            helpful,
            times,
            ..
        } => {
            let mut session = Session::with_notifier(engine.clone(), RecordingNotifier::new());
            let mut tally = session.tally(id);
            for _ in 0..*times {
                tally = session.vote(id, *helpful);
            }
            let ack = session.notifier().last().unwrap_or_default();
            print_vote(&mut out, format, id, ack, tally)?;
        }
        Commands::Session => {
            let stdin = io::stdin().lock();
            session::run_session(engine.clone(), format, stdin, &mut out)?;
        }
        Commands::Export { output_file } => {
            save_catalog_jsonl(output_file, engine.catalog().records())
                .with_context(|| format!("write {}", output_file.display()))?;
            writeln!(
                out,
                "exported_records={} output={}",
                engine.catalog().len(),
                output_file.display()
            )?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
