use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    read_board, read_turn, AdapterError, Bridge, Engine, LineReader, Outbox, Priority, Sink,
    StreamSink, TaskQueue,
};

/// The game lasts at most this many turns, one per day.
pub const MAX_TURNS: usize = 24;

/// Lifecycle of one adapter run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The startup block has not been handed to the engine yet.
    AwaitingConfigure,
    /// Turns are being read and submitted.
    Running,
    /// Day-line end of stream, or all turns played.
    Terminated,
}

struct LoopState<R> {
    reader: LineReader<R>,
    bridge: Bridge,
    queue: TaskQueue,
    completed_turns: usize,
    phase: Phase,
}

/// Drives the full adapter lifecycle over the given input, engine, and sink:
/// board load, one-time configure, then the cooperative turn loop.
pub fn run_adapter<R, E, S>(input: R, engine: E, sink: S) -> Result<(), AdapterError>
where
    R: BufRead + 'static,
    E: Engine + 'static,
    S: Sink + 'static,
{
    let queue = TaskQueue::new();
    let sink: Rc<RefCell<dyn Sink>> = Rc::new(RefCell::new(sink));
    let outbox = Outbox::new(queue.clone(), sink);

    let mut state = LoopState {
        reader: LineReader::new(input),
        bridge: Bridge::new(Box::new(engine), outbox),
        queue: queue.clone(),
        completed_turns: 0,
        phase: Phase::AwaitingConfigure,
    };

    let board = Rc::new(read_board(&mut state.reader)?);
    debug!(cells = board.num_cells(), "board loaded, configuring engine");
    state.bridge.configure(board)?;
    state.phase = Phase::Running;

    let state = Rc::new(RefCell::new(state));
    schedule_turn(&state);
    queue.run()?;

    let state = state.borrow();
    debug_assert_eq!(state.phase, Phase::Terminated);
    debug!(turns = state.completed_turns, "adapter run complete");
    Ok(())
}

/// Enqueues the next turn on the idle lane. Keeping the requeue in the
/// lowest lane is the ordering barrier: every callback emission for the
/// current turn drains before this task's blocking read runs.
fn schedule_turn<R: BufRead + 'static>(state: &Rc<RefCell<LoopState<R>>>) {
    let queue = state.borrow().queue.clone();
    let state = Rc::clone(state);
    queue.push(Priority::Idle, move || turn_task(&state));
}

fn turn_task<R: BufRead + 'static>(state: &Rc<RefCell<LoopState<R>>>) -> Result<(), AdapterError> {
    let mut s = state.borrow_mut();

    let turn = match read_turn(&mut s.reader)? {
        Some(turn) => turn,
        None => {
            // End of stream on the day line: the game is over.
            trace!(turns = s.completed_turns, "input ended");
            s.phase = Phase::Terminated;
            return Ok(());
        }
    };

    trace!(
        day = turn.day,
        trees = turn.trees.len(),
        actions = turn.legal_actions.len(),
        "turn read"
    );
    s.bridge.submit_turn(turn)?;
    s.completed_turns += 1;

    if s.completed_turns < MAX_TURNS {
        drop(s);
        schedule_turn(state);
    } else {
        s.phase = Phase::Terminated;
    }
    Ok(())
}

/// Runs the adapter over locked stdin/stdout, with diagnostics on stderr.
///
/// This is the entry point for engine binaries. A `main` returning this
/// result exits 0 on normal or early (day-line end of stream) completion
/// and non-zero on any protocol, engine, or write failure.
pub fn run<E: Engine + 'static>(engine: E) -> anyhow::Result<()> {
    let stdin = io::stdin().lock();
    let sink = StreamSink::new(io::stdout().lock(), io::stderr());
    run_adapter(stdin, engine, sink)?;
    Ok(())
}
