use crate::ring::RingBuffer;
use crate::view::{Sample, sample_bytes};

/// Where a write of `n` bytes lands: the bytes that survive it and the offset
/// the first of them goes to. Anything beyond the last `capacity` bytes would
/// be overwritten within the same call, so it is skipped.
#[inline(always)]
pub(crate) fn surviving(data: &[u8], head: usize, capacity: usize) -> (&[u8], usize) {
    let n = data.len();
    if n < capacity {
        (data, head)
    } else {
        let skipped = n - capacity;
        (&data[skipped..], (head + skipped % capacity) % capacity)
    }
}

/// Cursor state after writing `n` bytes.
#[inline(always)]
pub(crate) fn advance(head: usize, used: usize, n: usize, capacity: usize) -> (usize, usize) {
    (
        (head + n % capacity) % capacity,
        used.saturating_add(n).min(capacity),
    )
}

impl RingBuffer {
    /// Appends `data`, wrapping past the end of storage and overwriting the
    /// oldest bytes once full. At most two copies, no allocation.
    #[inline]
    pub fn put(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        let capacity = self.capacity();
        let (src, start) = surviving(data, self.head, capacity);
        let contiguous = capacity - start;

        if src.len() <= contiguous {
            self.buf[start..start + src.len()].copy_from_slice(src);
        } else {
            let (tail, wrapped) = src.split_at(contiguous);
            self.buf[start..].copy_from_slice(tail);
            self.buf[..wrapped.len()].copy_from_slice(wrapped);
            tracing::trace!(
                tail = tail.len(),
                wrapped = wrapped.len(),
                "put wrapped"
            );
        }

        (self.head, self.used) = advance(self.head, self.used, data.len(), capacity);
    }

    #[inline]
    pub fn put_samples<T: Sample>(&mut self, samples: &[T]) {
        self.put(sample_bytes(samples));
    }
}
