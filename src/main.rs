mod card;
mod config;
mod controller;
mod deck;
mod error;
mod moves;
mod rules;
mod state;
mod ui;


use clap::Parser;
use config::Config;
use rand::{rngs::StdRng, SeedableRng};
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::TerminalUi;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // The board owns stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if config.no_color {
        colored::control::set_override(false);
    }

    let seed = config.seed();
    info!(seed, "dealing a new game");
    let mut state = controller::init(&mut StdRng::seed_from_u64(seed));

    let stdin = io::stdin();
    let mut ui = TerminalUi::new(stdin.lock(), io::stdout(), config.ascii);
    if config.no_clear {
        ui = ui.without_clear_screen();
    }
    controller::play(&mut ui, &mut state)?;
    Ok(())
}
