/*! Bounded blocking FIFO queue.

Used to feed the alignment workers while applying back-pressure on the reader:
[BoundedQueue::push] blocks while the queue is full, [BoundedQueue::pop] blocks while it is empty.

The queue is a [VecDeque] behind a single [Mutex], with one [Condvar] per waiting side.
!*/
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

use crate::error::Error;

#[derive(Debug)]
pub struct BoundedQueue<T> {
    capacity: usize,
    buffer: Mutex<VecDeque<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items.
    pub fn new(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::Config(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        })
    }

    // the buffer stays consistent even if a holder panicked
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Push an item, blocking while the queue is full.
    pub fn push(&self, item: T) {
        let mut buffer = self.lock();
        while buffer.len() >= self.capacity {
            buffer = self
                .not_full
                .wait(buffer)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        buffer.push_back(item);
        drop(buffer);
        self.not_empty.notify_one();
    }

    /// Pop the oldest item, blocking while the queue is empty.
    pub fn pop(&self) -> T {
        let mut buffer = self.lock();
        let item = loop {
            match buffer.pop_front() {
                Some(item) => break item,
                None => {
                    buffer = self
                        .not_empty
                        .wait(buffer)
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                }
            }
        };
        drop(buffer);
        self.not_full.notify_one();
        item
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::BoundedQueue;

    #[test]
    fn zero_capacity() {
        assert!(BoundedQueue::<usize>::new(0).is_err());
    }

    #[test]
    fn fifo() {
        let q = BoundedQueue::new(10).unwrap();
        for i in 0..10 {
            q.push(i);
        }
        assert_eq!(q.len(), 10);
        let popped: Vec<usize> = (0..10).map(|_| q.pop()).collect();
        assert_eq!(popped, (0..10).collect::<Vec<_>>());
        assert!(q.is_empty());
    }

    #[test]
    fn push_blocks_when_full() {
        let capacity = 3;
        let q = Arc::new(BoundedQueue::new(capacity).unwrap());
        let pushed = Arc::new(AtomicUsize::new(0));

        let producer = {
            let q = q.clone();
            let pushed = pushed.clone();
            thread::spawn(move || {
                for i in 0..=capacity {
                    q.push(i);
                    pushed.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        // wait for the producer to fill the queue
        while pushed.load(Ordering::SeqCst) < capacity {
            thread::sleep(Duration::from_millis(5));
        }
        thread::sleep(Duration::from_millis(100));
        assert_eq!(pushed.load(Ordering::SeqCst), capacity);
        assert_eq!(q.len(), capacity);

        // a single pop frees room for the last item
        assert_eq!(q.pop(), 0);
        producer.join().unwrap();
        assert_eq!(pushed.load(Ordering::SeqCst), capacity + 1);

        let rest: Vec<usize> = (0..capacity).map(|_| q.pop()).collect();
        assert_eq!(rest, vec![1, 2, 3]);
    }

    #[test]
    fn pop_blocks_when_empty() {
        let q = Arc::new(BoundedQueue::new(1).unwrap());
        let consumer = {
            let q = q.clone();
            thread::spawn(move || q.pop())
        };
        thread::sleep(Duration::from_millis(50));
        assert!(!consumer.is_finished());
        q.push(42usize);
        assert_eq!(consumer.join().unwrap(), 42);
    }

    #[test]
    fn many_producers_many_consumers() {
        let q = Arc::new(BoundedQueue::new(4).unwrap());
        let total = Arc::new(AtomicUsize::new(0));

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let q = q.clone();
                let total = total.clone();
                thread::spawn(move || loop {
                    let item: usize = q.pop();
                    if item == 0 {
                        break;
                    }
                    total.fetch_add(item, Ordering::SeqCst);
                })
            })
            .collect();

        let producers: Vec<_> = (0..3)
            .map(|_| {
                let q = q.clone();
                thread::spawn(move || {
                    for i in 1..=100 {
                        q.push(i);
                    }
                })
            })
            .collect();

        for p in producers {
            p.join().unwrap();
        }
        for _ in 0..4 {
            q.push(0);
        }
        for c in consumers {
            c.join().unwrap();
        }

        assert_eq!(total.load(Ordering::SeqCst), 3 * 5050);
        assert!(q.is_empty());
    }
}
