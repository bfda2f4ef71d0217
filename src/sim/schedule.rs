//! Cooperative task scheduler on a virtual millisecond clock
//!
//! Tasks never run on their own: the host advances the clock and the engine
//! pops due tasks in time order. Tasks due at the same instant fire in
//! [`TaskKind`] declaration order.

use serde::{Deserialize, Serialize};

/// Scheduled work. Declaration order is the tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Level timer, once per second
    Countdown,
    /// One-shot delay between solving a level and leaving the game screen
    CompletionGrace,
    StealthTick,
    EnemyMove,
    GlitchRamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Task {
    kind: TaskKind,
    due_ms: u64,
    /// `None` for one-shot tasks
    period_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `kind` every `period_ms`, first firing one period from now.
    /// Replaces any existing task of the same kind.
    pub fn every(&mut self, kind: TaskKind, period_ms: u64) {
        self.cancel(kind);
        self.tasks.push(Task {
            kind,
            due_ms: self.now_ms + period_ms.max(1),
            period_ms: Some(period_ms.max(1)),
        });
    }

    /// Run `kind` once after `delay_ms`
    pub fn once(&mut self, kind: TaskKind, delay_ms: u64) {
        self.cancel(kind);
        self.tasks.push(Task {
            kind,
            due_ms: self.now_ms + delay_ms,
            period_ms: None,
        });
    }

    pub fn cancel(&mut self, kind: TaskKind) {
        self.tasks.retain(|t| t.kind != kind);
    }

    /// Drop every periodic task, keeping one-shots
    pub fn cancel_periodic(&mut self) {
        self.tasks.retain(|t| t.period_ms.is_none());
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn is_scheduled(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its due time. Periodic tasks are re-armed for their next period.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TaskKind> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.kind))
            .map(|(i, _)| i)?;

        let task = self.tasks[index];
        self.now_ms = self.now_ms.max(task.due_ms);
        match task.period_ms {
            Some(period) => self.tasks[index].due_ms += period,
            None => {
                self.tasks.swap_remove(index);
            }
        }
        Some(task.kind)
    }

    /// Move the clock forward to `until_ms` once no more tasks are due
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, until: u64) -> Vec<(u64, TaskKind)> {
        let mut fired = Vec::new();
        while let Some(kind) = s.pop_due(until) {
            fired.push((s.now_ms(), kind));
        }
        s.settle(until);
        fired
    }

    #[test]
    fn test_periodic_fires_in_time_order() {
        let mut s = Scheduler::new();
        s.every(TaskKind::Countdown, 1000);
        s.every(TaskKind::StealthTick, 400);
        let fired = drain(&mut s, 1200);
        assert_eq!(
            fired,
            [
                (400, TaskKind::StealthTick),
                (800, TaskKind::StealthTick),
                (1000, TaskKind::Countdown),
                (1200, TaskKind::StealthTick),
            ]
        );
        assert_eq!(s.now_ms(), 1200);
    }

    #[test]
    fn test_ties_follow_priority() {
        let mut s = Scheduler::new();
        s.every(TaskKind::GlitchRamp, 1000);
        s.every(TaskKind::EnemyMove, 1000);
        s.once(TaskKind::CompletionGrace, 1000);
        s.every(TaskKind::Countdown, 1000);
        let kinds: Vec<TaskKind> = drain(&mut s, 1000).into_iter().map(|(_, k)| k).collect();
        assert_eq!(
            kinds,
            [
                TaskKind::Countdown,
                TaskKind::CompletionGrace,
                TaskKind::EnemyMove,
                TaskKind::GlitchRamp,
            ]
        );
        assert!(!s.is_scheduled(TaskKind::CompletionGrace));
    }

    #[test]
    fn test_cancel_periodic_keeps_one_shot() {
        let mut s = Scheduler::new();
        s.every(TaskKind::Countdown, 1000);
        s.once(TaskKind::CompletionGrace, 2000);
        s.cancel_periodic();
        assert!(s.is_scheduled(TaskKind::CompletionGrace));
        assert!(!s.is_scheduled(TaskKind::Countdown));
        assert_eq!(drain(&mut s, 5000), [(2000, TaskKind::CompletionGrace)]);
        assert!(s.is_idle());
    }

    #[test]
    fn test_partial_advances_accumulate() {
        let mut s = Scheduler::new();
        s.every(TaskKind::Countdown, 1000);
        assert!(drain(&mut s, 600).is_empty());
        assert_eq!(drain(&mut s, 1100), [(1000, TaskKind::Countdown)]);
    }
}
