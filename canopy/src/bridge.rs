use std::cell::RefCell;
use std::rc::Rc;

use crate::{AdapterError, Board, Priority, Sink, TaskQueue, TurnState};

/// The strategy engine, an opaque message-passing collaborator.
///
/// Two operations flow in (`configure`, `submit_turn`); commands and
/// diagnostics flow back out through the [`Outbox`] handed over at
/// configuration time. The engine may emit during `submit_turn` or keep its
/// outbox clone and emit from later queued work; either way every emission
/// is written out before the adapter reads the next turn.
///
/// The expected (but unenforced) contract is exactly one command per
/// submitted turn. An engine that emits nothing for a turn is a silent
/// no-op; the loop simply advances.
pub trait Engine {
    /// Called exactly once, before the first turn.
    fn configure(&mut self, board: Rc<Board>, outbox: Outbox) -> anyhow::Result<()>;

    /// Called once per turn with the freshly parsed state.
    fn submit_turn(&mut self, turn: TurnState) -> anyhow::Result<()>;
}

/// The engine's outbound subscriptions: commands to the primary stream,
/// diagnostics to the secondary one.
///
/// Cheaply cloneable. Each emission becomes a callback-priority task, which
/// the queue drains before servicing the turn loop's next read.
#[derive(Clone)]
pub struct Outbox {
    queue: TaskQueue,
    sink: Rc<RefCell<dyn Sink>>,
}

impl Outbox {
    pub fn new(queue: TaskQueue, sink: Rc<RefCell<dyn Sink>>) -> Self {
        Self { queue, sink }
    }

    /// Emits one command line.
    pub fn command(&self, line: impl Into<String>) {
        let line = line.into();
        let sink = Rc::clone(&self.sink);
        self.queue.push(Priority::Callback, move || {
            sink.borrow_mut().command(&line).map_err(AdapterError::Io)
        });
    }

    /// Emits one diagnostic line.
    pub fn diagnostic(&self, line: impl Into<String>) {
        let line = line.into();
        let sink = Rc::clone(&self.sink);
        self.queue.push(Priority::Callback, move || {
            sink.borrow_mut().diagnostic(&line).map_err(AdapterError::Io)
        });
    }
}

/// Owns the engine and relays the two inbound protocol operations to it,
/// wrapping engine failures into the adapter's taxonomy.
pub struct Bridge {
    engine: Box<dyn Engine>,
    outbox: Outbox,
}

impl Bridge {
    pub fn new(engine: Box<dyn Engine>, outbox: Outbox) -> Self {
        Self { engine, outbox }
    }

    /// Hands the immutable board and the subscription handle to the engine.
    /// Fires once, with no response expected.
    pub fn configure(&mut self, board: Rc<Board>) -> Result<(), AdapterError> {
        self.engine
            .configure(board, self.outbox.clone())
            .map_err(AdapterError::Engine)
    }

    /// Submits one turn. The engine responds on its own schedule through
    /// the outbox.
    pub fn submit_turn(&mut self, turn: TurnState) -> Result<(), AdapterError> {
        self.engine.submit_turn(turn).map_err(AdapterError::Engine)
    }
}
