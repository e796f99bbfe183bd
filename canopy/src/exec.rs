use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::AdapterError;

/// A unit of work on the cooperative queue. Runs to completion once popped;
/// a failure stops the queue.
type Task = Box<dyn FnOnce() -> Result<(), AdapterError>>;

/// Scheduling lanes, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    /// Work delivered by engine subscriptions: command and diagnostic
    /// writes.
    Callback,
    /// The turn loop's own continuation. Serviced only once the callback
    /// lane is empty, which is what keeps a later turn's input read from
    /// overtaking the current turn's output write.
    Idle,
}

/// Single-threaded cooperative task queue with two priority lanes.
///
/// Cloning yields another handle to the same queue, so a running task can
/// enqueue follow-up work. There is no preemption and no cancellation.
#[derive(Clone)]
pub struct TaskQueue {
    lanes: Rc<RefCell<Lanes>>,
}

#[derive(Default)]
struct Lanes {
    callback: VecDeque<Task>,
    idle: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            lanes: Rc::new(RefCell::new(Lanes::default())),
        }
    }

    pub fn push<F>(&self, priority: Priority, task: F)
    where
        F: FnOnce() -> Result<(), AdapterError> + 'static,
    {
        let mut lanes = self.lanes.borrow_mut();
        let lane = match priority {
            Priority::Callback => &mut lanes.callback,
            Priority::Idle => &mut lanes.idle,
        };
        lane.push_back(Box::new(task));
    }

    /// Runs tasks until both lanes are empty or a task fails.
    ///
    /// The queue borrow is released before each task runs, so tasks are free
    /// to push more work through their own handles.
    pub fn run(&self) -> Result<(), AdapterError> {
        while let Some(task) = self.pop() {
            task()?;
        }
        Ok(())
    }

    fn pop(&self) -> Option<Task> {
        let mut lanes = self.lanes.borrow_mut();
        if let Some(task) = lanes.callback.pop_front() {
            return Some(task);
        }
        lanes.idle.pop_front()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
