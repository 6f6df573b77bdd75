use super::RingError;
use crate::view::RawView;

/// Fixed-capacity byte ring that overwrites its oldest bytes once full.
///
/// Storage is allocated zeroed at construction and never resized. `head` is
/// the offset of the next write, `used` counts valid bytes and saturates at
/// `capacity`.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    pub(super) buf: Box<[u8]>,
    pub(super) head: usize,
    pub(super) used: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity {
                capacity,
                reason: "must be positive",
            });
        }

        tracing::debug!(capacity, "allocating ring buffer");

        Ok(Self {
            buf: vec![0; capacity].into_boxed_slice(),
            head: 0,
            used: 0,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline(always)]
    pub fn head(&self) -> usize {
        self.head
    }

    #[inline(always)]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.used == self.capacity()
    }

    /// Physical storage, all `capacity` bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn view(&self) -> RawView<'_> {
        RawView::new(&self.buf, self.head, self.used)
    }
}

impl AsRef<[u8]> for RingBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
