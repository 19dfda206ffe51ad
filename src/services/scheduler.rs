//! Single-shot deferred events checked against the loop clock.

use std::time::Duration;

use uuid::Uuid;

/// Identifier handed back when scheduling, used to cancel.
pub type TaskId = Uuid;

/// Event due at a point on the game clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask<E> {
    /// Handle accepted by [`Scheduler::cancel`].
    pub id: TaskId,
    /// Game-clock time at which the event fires.
    pub due: Duration,
    /// Payload handed back by [`Scheduler::take_due`].
    pub event: E,
}

/// Pending single-shot tasks. A task is removed the moment it is taken, so it
/// can never fire twice.
#[derive(Debug)]
pub struct Scheduler<E> {
    tasks: Vec<ScheduledTask<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<E> Scheduler<E> {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, event: E) -> TaskId {
        let id = Uuid::new_v4();
        self.tasks.push(ScheduledTask {
            id,
            due: now + delay,
            event,
        });
        id
    }

    /// Cancel a pending task. Returns `false` when it already fired or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<ScheduledTask<E>> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.due <= now);
        self.tasks = pending;
        due.sort_by_key(|task| task.due);
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn tasks_fire_once_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(0), ms(100), "pour");
        assert!(scheduler.take_due(ms(99)).is_empty());

        let fired = scheduler.take_due(ms(100));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].event, "pour");
        assert_eq!(fired[0].due, ms(100));
        assert!(scheduler.take_due(ms(500)).is_empty());
    }

    #[test]
    fn due_tasks_come_back_in_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(0), ms(300), 2);
        scheduler.schedule(ms(0), ms(100), 1);
        scheduler.schedule(ms(0), ms(900), 3);

        let fired: Vec<_> = scheduler
            .take_due(ms(500))
            .into_iter()
            .map(|task| task.event)
            .collect();
        assert_eq!(fired, [1, 2]);
        assert_eq!(scheduler.tasks.len(), 1);
        assert_eq!(scheduler.tasks[0].due, ms(900));
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(ms(0), ms(10), ());
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.take_due(ms(100)).is_empty());
    }
}
