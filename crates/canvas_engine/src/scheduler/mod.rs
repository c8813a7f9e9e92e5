//! Deferred task scheduler
//!
//! Runs one-shot callbacks once the backend clock reaches their trigger time.
//! The queue is drained by the canvas loop once per frame, before the frame
//! callback.
//!
//! # Usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use canvas_engine::scheduler::TaskScheduler;
//!
//! let now = Rc::new(Cell::new(0.0));
//! let clock = Rc::clone(&now);
//! let scheduler = TaskScheduler::new(move || clock.get());
//!
//! let fired = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&fired);
//! scheduler.invoke_later(move || flag.set(true), 1.5);
//!
//! assert_eq!(scheduler.drain_due(), 0);
//! now.set(2.0);
//! assert_eq!(scheduler.drain_due(), 1);
//! assert!(fired.get());
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;

/// Callback queued for later execution
pub struct ScheduledTask {
    callback: Box<dyn FnOnce()>,
    trigger_time: f64,
    seq: u64,
}

impl ScheduledTask {
    /// Absolute backend time at or after which the task may run
    pub fn trigger_time(&self) -> f64 {
        self.trigger_time
    }

    fn run(self) {
        (self.callback)();
    }
}

impl PartialEq for ScheduledTask {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTask {
    // Reversed so the max-heap yields the earliest trigger first; ties keep
    // insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .trigger_time
            .total_cmp(&self.trigger_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("trigger_time", &self.trigger_time)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct TaskQueue {
    tasks: BinaryHeap<ScheduledTask>,
    next_seq: u64,
}

// Due tasks queued during a drain, returned to the heap when the drain ends
// (or unwinds).
struct Parked<'a> {
    queue: &'a RefCell<TaskQueue>,
    tasks: Vec<ScheduledTask>,
}

impl Drop for Parked<'_> {
    fn drop(&mut self) {
        if let Ok(mut queue) = self.queue.try_borrow_mut() {
            queue.tasks.extend(self.tasks.drain(..));
        }
    }
}

/// Time-ordered queue of deferred callbacks
///
/// Cloning yields another handle to the same queue, which is how callbacks
/// schedule follow-up work. Not `Send`: tasks run on the loop thread.
#[derive(Clone)]
pub struct TaskScheduler {
    queue: Rc<RefCell<TaskQueue>>,
    clock: Rc<dyn Fn() -> f64>,
}

impl TaskScheduler {
    /// Create a scheduler reading time from `clock`
    pub fn new(clock: impl Fn() -> f64 + 'static) -> Self {
        Self {
            queue: Rc::new(RefCell::new(TaskQueue::default())),
            clock: Rc::new(clock),
        }
    }

    /// Current time of the scheduler clock
    pub fn now(&self) -> f64 {
        (self.clock)()
    }

    /// Queue `f` to run once `delay_seconds` have passed
    ///
    /// A zero, negative or NaN delay makes the task due at the next drain.
    pub fn invoke_later(&self, f: impl FnOnce() + 'static, delay_seconds: f64) {
        if delay_seconds.is_nan() {
            log::warn!("NaN task delay, scheduling for the next drain");
        }
        let trigger_time = self.now() + delay_seconds.max(0.0);
        let mut queue = self.queue.borrow_mut();
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.tasks.push(ScheduledTask {
            callback: Box::new(f),
            trigger_time,
            seq,
        });
        log::debug!("Scheduled task {seq} at t={trigger_time:.3}");
    }

    /// Run every task that is due, earliest first
    ///
    /// Time is sampled once. Tasks queued by a callback during the drain wait
    /// for the next one. Each task is removed before its callback runs, so a
    /// panicking task is never retried. Returns the number of tasks executed.
    pub fn drain_due(&self) -> usize {
        let now = self.now();
        let boundary = self.queue.borrow().next_seq;
        let mut parked = Parked {
            queue: &self.queue,
            tasks: Vec::new(),
        };
        let mut executed = 0;

        loop {
            let task = {
                let mut queue = self.queue.borrow_mut();
                let mut next = None;
                while queue.tasks.peek().is_some_and(|task| task.trigger_time <= now) {
                    let Some(task) = queue.tasks.pop() else { break };
                    if task.seq < boundary {
                        next = Some(task);
                        break;
                    }
                    parked.tasks.push(task);
                }
                next
            };
            let Some(task) = task else { break };
            task.run();
            executed += 1;
        }

        executed
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Check if no task is pending
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().tasks.is_empty()
    }

    /// Trigger time of the earliest pending task
    pub fn next_trigger_time(&self) -> Option<f64> {
        self.queue.borrow().tasks.peek().map(ScheduledTask::trigger_time)
    }

    /// Drop every pending task without running it
    pub fn clear(&self) {
        self.queue.borrow_mut().tasks.clear();
    }
}

impl fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("pending", &self.len())
            .field("next_trigger_time", &self.next_trigger_time())
            .finish_non_exhaustive()
    }
}
