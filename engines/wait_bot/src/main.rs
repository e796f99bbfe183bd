use std::rc::Rc;

use anyhow::Context;
use canopy::{Board, Engine, Outbox, TurnState};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    initialize_logging();

    canopy::run(WaitBot { outbox: None })
}

/// The simplest possible strategy engine: it waits out every turn.
struct WaitBot {
    outbox: Option<Outbox>,
}

impl Engine for WaitBot {
    fn configure(&mut self, board: Rc<Board>, outbox: Outbox) -> anyhow::Result<()> {
        debug!(cells = board.num_cells(), "configured");
        self.outbox = Some(outbox);
        Ok(())
    }

    fn submit_turn(&mut self, turn: TurnState) -> anyhow::Result<()> {
        debug!(day = turn.day, "waiting");
        let outbox = self.outbox.as_ref().context("engine not configured")?;
        outbox.command("WAIT");
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
