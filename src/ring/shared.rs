use super::{RingBuffer, RingError};
use crate::view::{RawView, Sample, Snapshot};
use parking_lot::{RwLock, RwLockReadGuard};
use std::ops::Deref;
use std::sync::Arc;

/// Cloneable handle for one writer and any number of readers across threads.
///
/// `put` takes the write lock; a [`RingReadGuard`] holds the read lock, so the
/// storage and cursors it exposes cannot tear while it is alive.
#[derive(Debug, Clone)]
pub struct SharedRingBuffer {
    inner: Arc<RwLock<RingBuffer>>,
}

pub struct RingReadGuard<'a> {
    guard: RwLockReadGuard<'a, RingBuffer>,
}

impl SharedRingBuffer {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        Ok(Self::from(RingBuffer::new(capacity)?))
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn put(&self, data: &[u8]) {
        self.inner.write().put(data);
    }

    pub fn put_samples<T: Sample>(&self, samples: &[T]) {
        self.inner.write().put_samples(samples);
    }

    /// Blocks writers until the guard is dropped.
    pub fn read(&self) -> RingReadGuard<'_> {
        RingReadGuard {
            guard: self.inner.read(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.read().view().to_snapshot()
    }
}

impl From<RingBuffer> for SharedRingBuffer {
    fn from(ring: RingBuffer) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ring)),
        }
    }
}

impl RingReadGuard<'_> {
    #[inline]
    pub fn view(&self) -> RawView<'_> {
        self.guard.view()
    }
}

impl Deref for RingReadGuard<'_> {
    type Target = RingBuffer;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}
