//! Deferred tasks on a virtual clock.
//!
//! The controller never sleeps. It registers `ScheduledTask`s with a due
//! time and the host advances the clock; due tasks are popped in
//! `(due_ms, id)` order so tasks that fall due together fire in the order
//! they were scheduled.
//!
//! ```
//! use memory_match::schedule::{Scheduler, TaskKind};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(1000, TaskKind::Tick);
//! let evaluate = scheduler.schedule(600, TaskKind::Evaluate);
//!
//! assert_eq!(scheduler.pop_due(700).map(|t| t.id), Some(evaluate));
//! assert!(scheduler.pop_due(700).is_none());
//! scheduler.cancel_all();
//! assert!(scheduler.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardPos;

/// Unique identifier for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// What a task does when it fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// One elapsed-time period. Reschedules itself while the round runs.
    Tick,
    /// Resolve the two revealed cards.
    Evaluate,
    /// Flip a mismatched pair face down.
    Conceal(SmallVec<[CardPos; 2]>),
    /// Take down the win celebration.
    EndCelebration,
}

/// A task and when it is due.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub due_ms: u64,
    pub kind: TaskKind,
}

/// Pending tasks, owned by one round controller.
///
/// Holds at most a handful of tasks at once, so a flat `Vec` with a linear
/// scan is enough.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_id: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task due at `due_ms`.
    pub fn schedule(&mut self, due_ms: u64, kind: TaskKind) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask { id, due_ms, kind });
        id
    }

    /// Drop one task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Earliest due time, if anything is pending.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.due_ms).min()
    }

    /// Remove and return the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledTask> {
        let (index, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))?;
        Some(self.tasks.swap_remove(index))
    }

    /// Pending tasks in no particular order.
    #[must_use]
    pub fn pending(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Check if a task of this kind is pending.
    #[must_use]
    pub fn has_pending(&self, kind: &TaskKind) -> bool {
        self.tasks.iter().any(|t| &t.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_order_by_due_then_id() {
        let mut scheduler = Scheduler::new();
        let tick = scheduler.schedule(1000, TaskKind::Tick);
        let evaluate = scheduler.schedule(600, TaskKind::Evaluate);
        let end = scheduler.schedule(1000, TaskKind::EndCelebration);

        assert_eq!(scheduler.next_due(), Some(600));
        assert_eq!(scheduler.pop_due(2000).map(|t| t.id), Some(evaluate));
        assert_eq!(scheduler.pop_due(2000).map(|t| t.id), Some(tick));
        assert_eq!(scheduler.pop_due(2000).map(|t| t.id), Some(end));
        assert!(scheduler.pop_due(2000).is_none());
    }

    #[test]
    fn test_not_due_yet() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(600, TaskKind::Evaluate);

        assert!(scheduler.pop_due(599).is_none());
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.pop_due(600).is_some());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let tick = scheduler.schedule(1000, TaskKind::Tick);
        scheduler.schedule(600, TaskKind::Evaluate);

        assert!(scheduler.cancel(tick));
        assert!(!scheduler.cancel(tick));
        assert!(!scheduler.has_pending(&TaskKind::Tick));
        assert!(scheduler.has_pending(&TaskKind::Evaluate));

        assert_eq!(scheduler.cancel_all(), 1);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_due(), None);
    }

    #[test]
    fn test_ids_keep_increasing_after_cancel() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(10, TaskKind::Tick);
        scheduler.cancel_all();
        let second = scheduler.schedule(10, TaskKind::Tick);

        assert!(second > first);
        assert_eq!(format!("{}", second), "Task(1)");
    }
}
