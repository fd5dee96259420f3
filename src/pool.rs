//! Reusable byte buffers for events and marshaling scratch space.
//!
//! A released buffer is kept only while its capacity stays within
//! [`MAX_RETAINED_CAPACITY`], so a single oversized record cannot inflate
//! the steady-state memory of the pool.

use std::sync::{Mutex, PoisonError};

/// Buffers whose capacity exceeds this ceiling are dropped on release.
pub const MAX_RETAINED_CAPACITY: usize = 1 << 16;

/// Pool of record buffers used by [`Event`](crate::Event).
pub(crate) static EVENT_POOL: BufferPool = BufferPool::new(500, 256);

/// Pool of scratch buffers used for marshaling and message formatting.
pub(crate) static SCRATCH_POOL: BufferPool = BufferPool::new(64, 64);

/// A concurrency-safe stack of reusable `Vec<u8>` buffers.
///
/// [`acquire`](Self::acquire) always hands out an empty buffer; its capacity
/// is whatever the previous owner grew it to.
#[derive(Debug)]
pub struct BufferPool {
    buffers: Mutex<Vec<Vec<u8>>>,
    initial_capacity: usize,
    max_buffers: usize,
}

impl BufferPool {
    /// Creates an empty pool.
    ///
    /// * `initial_capacity` - capacity of freshly allocated buffers
    /// * `max_buffers` - number of idle buffers kept at most
    pub const fn new(initial_capacity: usize, max_buffers: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::new()),
            initial_capacity,
            max_buffers,
        }
    }

    /// Takes a zero-length buffer from the pool, allocating one if the pool is empty.
    pub fn acquire(&self) -> Vec<u8> {
        let reused = self
            .buffers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        match reused {
            Some(mut buf) => {
                buf.clear();
                buf
            }
            None => Vec::with_capacity(self.initial_capacity),
        }
    }

    /// Returns a buffer to the pool.
    ///
    /// The buffer is dropped instead when its capacity exceeds
    /// [`MAX_RETAINED_CAPACITY`] or the pool is already full.
    pub fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buf.clear();
        let mut buffers = self.buffers.lock().unwrap_or_else(PoisonError::into_inner);
        if buffers.len() < self.max_buffers {
            buffers.push(buf);
        }
    }

    /// Number of idle buffers currently held.
    pub fn idle(&self) -> usize {
        self.buffers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_returns_empty_buffer_with_prior_capacity() {
        let pool = BufferPool::new(16, 4);
        let mut buf = pool.acquire();
        buf.extend_from_slice(&[b'x'; 1000]);
        let cap = buf.capacity();
        pool.release(buf);

        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn test_fresh_buffer_uses_initial_capacity() {
        let pool = BufferPool::new(500, 4);
        assert!(pool.acquire().capacity() >= 500);
    }

    #[test]
    fn test_oversized_buffer_is_dropped() {
        let pool = BufferPool::new(16, 4);
        pool.release(Vec::with_capacity(MAX_RETAINED_CAPACITY + 1));
        assert_eq!(pool.idle(), 0);

        let buf = pool.acquire();
        assert!(buf.capacity() <= MAX_RETAINED_CAPACITY);
    }

    #[test]
    fn test_buffer_at_ceiling_is_kept() {
        let pool = BufferPool::new(16, 4);
        let buf = Vec::with_capacity(MAX_RETAINED_CAPACITY);
        let cap = buf.capacity();
        pool.release(buf);
        assert_eq!(pool.idle(), usize::from(cap <= MAX_RETAINED_CAPACITY));
    }

    #[test]
    fn test_pool_never_exceeds_max_buffers() {
        let pool = BufferPool::new(16, 2);
        for _ in 0..5 {
            pool.release(Vec::with_capacity(8));
        }
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool = std::sync::Arc::new(BufferPool::new(32, 8));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pool = std::sync::Arc::clone(&pool);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let mut buf = pool.acquire();
                        assert!(buf.is_empty());
                        buf.push(i);
                        pool.release(buf);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(pool.idle() <= 8);
    }
}
