use std::rc::Rc;

use anyhow::Context;
use canopy::{Board, Engine, Outbox, TurnState};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    initialize_logging();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    canopy::run(RandomBot { rng, outbox: None })
}

/// Plays a uniformly random legal action each turn.
struct RandomBot {
    rng: StdRng,
    outbox: Option<Outbox>,
}

impl Engine for RandomBot {
    fn configure(&mut self, board: Rc<Board>, outbox: Outbox) -> anyhow::Result<()> {
        debug!(cells = board.num_cells(), "configured");
        self.outbox = Some(outbox);
        Ok(())
    }

    fn submit_turn(&mut self, turn: TurnState) -> anyhow::Result<()> {
        let outbox = self.outbox.as_ref().context("engine not configured")?;
        match turn.legal_actions.choose(&mut self.rng) {
            Some(action) => {
                debug!(day = turn.day, action = %action, "chose");
                outbox.command(action.clone());
            }
            // The referee always offers at least WAIT; an empty list means
            // there is nothing to answer, so stay silent.
            None => outbox.diagnostic(format!("day {}: no legal actions", turn.day)),
        }
        Ok(())
    }
}

fn initialize_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    // Stdout carries the command stream, so logging goes to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .event_format(format),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
