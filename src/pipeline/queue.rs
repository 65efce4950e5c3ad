use std::sync::Mutex;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::error::Error;

/// Bounded multi-producer/multi-consumer work queue with close-and-drain
/// shutdown.
///
/// `push` blocks while the queue is full, giving upstream backpressure.
/// `pop` blocks until a message arrives and keeps returning queued messages
/// after `terminate`; it reports `None` only once the queue is both
/// terminated and drained.
pub struct WorkQueue<T> {
    tx: Mutex<Option<Sender<T>>>,
    rx: Receiver<T>,
}

impl<T> WorkQueue<T> {
    /// Create a queue holding at most `capacity` messages.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self {
            tx: Mutex::new(Some(tx)),
            rx,
        }
    }

    /// Enqueue a message, blocking while the queue is full.
    pub fn push(&self, item: T) -> Result<(), Error> {
        // The sender is cloned out so the lock is not held while blocked on
        // a full queue; terminate() must stay callable concurrently.
        let tx = match self.tx.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        match tx {
            Some(tx) => tx.send(item).map_err(|_| Error::QueueTerminated),
            None => Err(Error::QueueTerminated),
        }
    }

    /// Dequeue the next message, blocking until one arrives. Returns `None`
    /// once the queue has been terminated and fully drained.
    pub fn pop(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Close the queue. Idempotent; messages already queued remain poppable.
    pub fn terminate(&self) {
        let mut guard = match self.tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.take();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_within_one_producer() {
        let queue = WorkQueue::with_capacity(8);
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.push(3).unwrap();
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
    }

    #[test]
    fn test_terminate_drains_before_exhaustion() {
        let queue = WorkQueue::with_capacity(8);
        queue.push("a").unwrap();
        queue.push("b").unwrap();
        queue.terminate();
        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), Some("b"));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_push_after_terminate_errors() {
        let queue = WorkQueue::with_capacity(8);
        queue.terminate();
        assert!(matches!(queue.push(1), Err(Error::QueueTerminated)));
    }

    #[test]
    fn test_terminate_is_idempotent() {
        let queue: WorkQueue<u8> = WorkQueue::with_capacity(1);
        queue.terminate();
        queue.terminate();
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_full_queue_blocks_until_popped() {
        let queue = Arc::new(WorkQueue::with_capacity(1));
        queue.push(0).unwrap();

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.push(1))
        };

        // The producer is blocked on the full queue until we make room.
        thread::sleep(Duration::from_millis(50));
        assert!(!producer.is_finished());

        assert_eq!(queue.pop(), Some(0));
        producer.join().unwrap().unwrap();
        assert_eq!(queue.pop(), Some(1));
    }

    #[test]
    fn test_pop_blocks_until_push() {
        let queue = Arc::new(WorkQueue::with_capacity(1));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        };
        thread::sleep(Duration::from_millis(50));
        queue.push(42).unwrap();
        assert_eq!(consumer.join().unwrap(), Some(42));
    }
}
