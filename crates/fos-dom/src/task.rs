//! Task Queue
//!
//! Cooperative, single-threaded task queue shared by everything in a
//! document. Tasks are plain data; the host decides how to run them.

use std::collections::VecDeque;

/// Task sources a task can be queued on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskSource {
    DomManipulation,
    Networking,
}

/// Task identifier, unique per queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

/// Task in the queue
#[derive(Debug, Clone)]
pub struct Task<T> {
    pub id: TaskId,
    pub source: TaskSource,
    pub payload: T,
}

/// FIFO task queue
///
/// Every queued task is handed out exactly once by [`TaskQueue::next_task`].
#[derive(Debug)]
pub struct TaskQueue<T> {
    tasks: VecDeque<Task<T>>,
    next_id: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            tasks: VecDeque::new(),
            next_id: 0,
        }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task on `source`
    pub fn queue_task(&mut self, source: TaskSource, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push_back(Task { id, source, payload });
        id
    }

    /// Take the oldest task
    pub fn next_task(&mut self) -> Option<Task<T>> {
        self.tasks.pop_front()
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of queued tasks on `source`
    pub fn pending_on(&self, source: TaskSource) -> usize {
        self.tasks.iter().filter(|t| t.source == source).count()
    }

    /// Iterate over queued tasks, oldest first, without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &Task<T>> {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order_across_sources() {
        let mut queue = TaskQueue::new();
        queue.queue_task(TaskSource::DomManipulation, "first");
        queue.queue_task(TaskSource::Networking, "second");

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pending_on(TaskSource::Networking), 1);

        let first = queue.next_task().unwrap();
        assert_eq!(first.payload, "first");
        assert_eq!(first.source, TaskSource::DomManipulation);
        assert_eq!(queue.next_task().unwrap().payload, "second");
        assert!(queue.next_task().is_none());
    }

    #[test]
    fn test_iter_leaves_queue_intact() {
        let mut queue = TaskQueue::new();
        queue.queue_task(TaskSource::Networking, 'a');
        queue.queue_task(TaskSource::DomManipulation, 'b');

        let payloads: Vec<_> = queue.iter().map(|t| t.payload).collect();
        assert_eq!(payloads, ['a', 'b']);
        assert_eq!(queue.iter().next().unwrap().source, TaskSource::Networking);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut queue = TaskQueue::new();
        let a = queue.queue_task(TaskSource::DomManipulation, ());
        let b = queue.queue_task(TaskSource::DomManipulation, ());
        assert_ne!(a, b);
    }

    #[test]
    fn test_task_runs_once() {
        let mut queue = TaskQueue::new();
        queue.queue_task(TaskSource::Networking, 7);

        assert!(queue.next_task().is_some());
        assert!(queue.is_empty());
        assert!(queue.next_task().is_none());
    }
}
