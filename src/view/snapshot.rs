use super::raw::{logical_segments, logical_start};
use super::sample::{Sample, decode_into};
use crate::ring::RingError;

/// Owned copy of storage, `head` and `used` taken together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    storage: Vec<u8>,
    head: usize,
    used: usize,
}

impl Snapshot {
    pub(crate) fn new(storage: Vec<u8>, head: usize, used: usize) -> Self {
        Self {
            storage,
            head,
            used,
        }
    }

    #[inline]
    pub fn storage(&self) -> &[u8] {
        &self.storage
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

    #[inline]
    pub fn start(&self) -> usize {
        logical_start(self.head, self.used, self.capacity())
    }

    pub fn segments(&self) -> (&[u8], &[u8]) {
        logical_segments(&self.storage, self.head, self.used)
    }

    pub fn to_logical_vec(&self) -> Vec<u8> {
        let (older, newer) = self.segments();
        [older, newer].concat()
    }

    pub fn samples<T: Sample>(&self) -> Result<Vec<T>, RingError> {
        let mut out = Vec::new();
        decode_into(&mut out, self.segments())?;
        Ok(out)
    }
}
