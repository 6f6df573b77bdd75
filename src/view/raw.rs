use super::sample::{Sample, decode_into};
use super::Snapshot;
use crate::ring::RingError;

/// Borrowed, read-through view of a ring's storage and cursors.
///
/// `storage` is in physical order. The logical content, oldest to newest, is
/// the `used` bytes ending just before `head`, wrapping through offset 0.
#[derive(Debug, Clone, Copy)]
pub struct RawView<'a> {
    storage: &'a [u8],
    head: usize,
    used: usize,
}

impl<'a> RawView<'a> {
    pub(crate) fn new(storage: &'a [u8], head: usize, used: usize) -> Self {
        debug_assert!(head < storage.len());
        debug_assert!(used <= storage.len());
        Self {
            storage,
            head,
            used,
        }
    }

    #[inline]
    pub fn storage(&self) -> &'a [u8] {
        self.storage
    }

    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Offset of the oldest valid byte.
    #[inline]
    pub fn start(&self) -> usize {
        logical_start(self.head, self.used, self.capacity())
    }

    /// The logical content as two slices; concatenated they run oldest to newest.
    pub fn segments(&self) -> (&'a [u8], &'a [u8]) {
        logical_segments(self.storage, self.head, self.used)
    }

    pub fn iter_logical(&self) -> impl Iterator<Item = u8> + 'a {
        let (older, newer) = self.segments();
        older.iter().chain(newer).copied()
    }

    pub fn to_logical_vec(&self) -> Vec<u8> {
        let (older, newer) = self.segments();
        let mut out = Vec::with_capacity(self.used);
        out.extend_from_slice(older);
        out.extend_from_slice(newer);
        out
    }

    pub fn samples<T: Sample>(&self) -> Result<Vec<T>, RingError> {
        let mut out = Vec::new();
        decode_into(&mut out, self.segments())?;
        Ok(out)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::new(self.storage.to_vec(), self.head, self.used)
    }
}

#[inline]
pub(crate) fn logical_start(head: usize, used: usize, capacity: usize) -> usize {
    (head + capacity - used) % capacity
}

pub(crate) fn logical_segments(storage: &[u8], head: usize, used: usize) -> (&[u8], &[u8]) {
    if used == 0 {
        return (&[], &[]);
    }
    let start = logical_start(head, used, storage.len());
    if start < head {
        (&storage[start..head], &[])
    } else {
        (&storage[start..], &storage[..head])
    }
}
