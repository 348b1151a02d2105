use crossbeam_epoch::{self as epoch, Atomic, Owned, Shared};
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Node<T> {
    value: MaybeUninit<T>,
    next: Atomic<Node<T>>,
}

/// A concurrent and lock-free first-in-first-out queue using the Michael-Scott algorithm.
///
/// The queue keeps a sentinel node in front of the first value: `head` always points at the
/// sentinel, and a pop moves the head forward, turning the dequeued node into the new sentinel.
/// A push links the new node after `tail` and then swings `tail` forward; any thread that
/// observes a lagging tail helps it forward before making progress, so no thread can block the
/// others. Detached sentinels are reclaimed through epoch-based garbage collection.
///
/// # Examples
///
/// ```
/// use classic_collections::sync::Queue;
///
/// let q = Queue::new();
///
/// q.push(0);
/// q.push(1);
/// assert_eq!(q.len(), 2);
///
/// assert_eq!(q.try_pop(), Some(0));
/// assert_eq!(q.try_pop(), Some(1));
/// assert_eq!(q.try_pop(), None);
/// ```
pub struct Queue<T> {
    head: Atomic<Node<T>>,
    tail: Atomic<Node<T>>,
    len: AtomicUsize,
}

impl<T> Queue<T> {
    /// Constructs a new, empty `Queue<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::sync::Queue;
    ///
    /// let q: Queue<u32> = Queue::new();
    /// ```
    pub fn new() -> Self {
        let queue = Queue {
            head: Atomic::null(),
            tail: Atomic::null(),
            len: AtomicUsize::new(0),
        };
        let sentinel = Owned::new(Node {
            value: MaybeUninit::uninit(),
            next: Atomic::null(),
        });
        unsafe {
            let guard = epoch::unprotected();
            let sentinel = sentinel.into_shared(guard);
            queue.head.store(sentinel, Ordering::Relaxed);
            queue.tail.store(sentinel, Ordering::Relaxed);
        }
        queue
    }

    /// Pushes a value onto the back of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::sync::Queue;
    ///
    /// let q = Queue::new();
    /// q.push(0);
    /// ```
    pub fn push(&self, value: T) {
        let guard = &epoch::pin();
        let new_node = Owned::new(Node {
            value: MaybeUninit::new(value),
            next: Atomic::null(),
        })
        .into_shared(guard);

        loop {
            let tail_shared = self.tail.load(Ordering::Acquire, guard);
            let tail = unsafe { tail_shared.deref() };
            let next = tail.next.load(Ordering::Acquire, guard);

            if !next.is_null() {
                // The tail pointer lags behind the last node; help it forward.
                let _ = self.tail.compare_exchange(
                    tail_shared,
                    next,
                    Ordering::Release,
                    Ordering::Relaxed,
                    guard,
                );
                continue;
            }

            if tail
                .next
                .compare_exchange(
                    Shared::null(),
                    new_node,
                    Ordering::Release,
                    Ordering::Relaxed,
                    guard,
                )
                .is_ok()
            {
                let _ = self.tail.compare_exchange(
                    tail_shared,
                    new_node,
                    Ordering::Release,
                    Ordering::Relaxed,
                    guard,
                );
                self.len.fetch_add(1, Ordering::Release);
                return;
            }
        }
    }

    /// Attempts to pop the value at the front of the queue. Returns `None` if the queue was
    /// observed empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::sync::Queue;
    ///
    /// let q = Queue::new();
    ///
    /// q.push(0);
    ///
    /// assert_eq!(q.try_pop(), Some(0));
    /// assert_eq!(q.try_pop(), None);
    /// ```
    pub fn try_pop(&self) -> Option<T> {
        let guard = &epoch::pin();
        loop {
            let head_shared = self.head.load(Ordering::Acquire, guard);
            let head = unsafe { head_shared.deref() };
            let next_shared = head.next.load(Ordering::Acquire, guard);

            match unsafe { next_shared.as_ref() } {
                None => return None,
                Some(next) => {
                    let tail_shared = self.tail.load(Ordering::Relaxed, guard);
                    if tail_shared == head_shared {
                        // The sentinel is about to be detached while the tail still points at
                        // it; help the tail forward first.
                        let _ = self.tail.compare_exchange(
                            tail_shared,
                            next_shared,
                            Ordering::Release,
                            Ordering::Relaxed,
                            guard,
                        );
                    }
                    if self
                        .head
                        .compare_exchange(
                            head_shared,
                            next_shared,
                            Ordering::Release,
                            Ordering::Relaxed,
                            guard,
                        )
                        .is_ok()
                    {
                        self.len.fetch_sub(1, Ordering::Release);
                        unsafe {
                            // The dequeued node becomes the new sentinel; its value slot is
                            // moved out exactly once, by the thread that won the exchange.
                            guard.defer_destroy(head_shared);
                            return Some(next.value.as_ptr().read());
                        }
                    }
                },
            }
        }
    }

    /// Returns the approximate number of values in the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::sync::Queue;
    ///
    /// let q = Queue::new();
    /// assert_eq!(q.len(), 0);
    ///
    /// q.push(0);
    /// assert_eq!(q.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// Returns `true` if the approximate number of values in the queue is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::sync::Queue;
    ///
    /// let q = Queue::new();
    /// assert!(q.is_empty());
    ///
    /// q.push(0);
    /// assert!(!q.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        unsafe {
            let guard = epoch::unprotected();
            let mut curr = self.head.load(Ordering::Relaxed, guard);
            // The first node is the sentinel and holds no value.
            let mut is_sentinel = true;
            while !curr.is_null() {
                let next = curr.deref().next.load(Ordering::Relaxed, guard);
                let mut node = curr.into_owned();
                if !is_sentinel {
                    ptr::drop_in_place(node.value.as_mut_ptr());
                }
                is_sentinel = false;
                drop(node);
                curr = next;
            }
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl<T: Send> Send for Queue<T> {}
unsafe impl<T: Send> Sync for Queue<T> {}

#[cfg(test)]
mod tests {
    use super::Queue;

    #[test]
    fn test_len_empty() {
        let queue: Queue<u32> = Queue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_pop_order() {
        let queue = Queue::new();
        queue.push(0);
        queue.push(1);
        queue.push(2);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_pop(), Some(0));
        assert_eq!(queue.try_pop(), Some(1));
        assert_eq!(queue.try_pop(), Some(2));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_interleaved() {
        let queue = Queue::new();
        queue.push(0);
        assert_eq!(queue.try_pop(), Some(0));
        queue.push(1);
        queue.push(2);
        assert_eq!(queue.try_pop(), Some(1));
        queue.push(3);
        assert_eq!(queue.try_pop(), Some(2));
        assert_eq!(queue.try_pop(), Some(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drop_with_contents() {
        let queue = Queue::new();
        queue.push(String::from("a"));
        queue.push(String::from("b"));
        drop(queue);
    }
}
