use super::RingError;
use super::write::{advance, surviving};
use crate::view::raw::logical_start;
use crate::view::{RawView, Sample, sample_bytes};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::ptr;

/// Ring whose storage is mapped twice, back to back, in virtual memory.
///
/// Byte `i` and byte `i + capacity` are the same physical byte, so any
/// `capacity`-long window starting inside the first half is contiguous. Writes
/// are a single copy and [`logical`](Self::logical) never needs stitching.
pub struct MirroredRingBuffer {
    _fd: OwnedFd,
    base: *mut u8,
    capacity: usize,
    head: usize,
    used: usize,
}

// The mapping is owned exclusively; mutation goes through `&mut self`.
unsafe impl Send for MirroredRingBuffer {}
unsafe impl Sync for MirroredRingBuffer {}

pub fn page_size() -> Result<usize, RingError> {
    let page = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if page <= 0 {
        return Err(RingError::mapping("sysconf"));
    }
    Ok(page as usize)
}

impl MirroredRingBuffer {
    /// `capacity` must be a positive multiple of [`page_size`].
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity {
                capacity,
                reason: "must be positive",
            });
        }

        let page = page_size()?;
        if capacity % page != 0 {
            return Err(RingError::InvalidCapacity {
                capacity,
                reason: "must be a multiple of the page size",
            });
        }

        let raw_fd = unsafe { libc::memfd_create(c"ringnes".as_ptr(), libc::MFD_CLOEXEC) };
        if raw_fd == -1 {
            return Err(RingError::mapping("memfd_create"));
        }
        let fd = unsafe { OwnedFd::from_raw_fd(raw_fd) };

        if unsafe { libc::ftruncate(fd.as_raw_fd(), capacity as libc::off_t) } != 0 {
            return Err(RingError::mapping("ftruncate"));
        }

        let base = unsafe { map_twice(fd.as_raw_fd(), capacity)? };

        tracing::debug!(capacity, page, "mapped mirrored ring buffer");

        Ok(Self {
            _fd: fd,
            base,
            capacity,
            head: 0,
            used: 0,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
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
        self.used == self.capacity
    }

    #[inline]
    pub fn put(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        let (src, start) = surviving(data, self.head, self.capacity);
        // SAFETY: start < capacity and src.len() <= capacity, so the copy stays
        // inside the 2 * capacity mapping.
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.base.add(start), src.len());
        }

        (self.head, self.used) = advance(self.head, self.used, data.len(), self.capacity);
    }

    #[inline]
    pub fn put_samples<T: Sample>(&mut self, samples: &[T]) {
        self.put(sample_bytes(samples));
    }

    /// Physical storage, the first half of the mapping.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.base, self.capacity) }
    }

    /// `capacity` bytes starting at `head`. Oldest to newest once the ring is
    /// full; before that the valid bytes are the trailing `used` of the window's
    /// second half.
    #[inline]
    pub fn contiguous(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.base.add(self.head), self.capacity) }
    }

    /// The `used` valid bytes, oldest to newest.
    #[inline]
    pub fn logical(&self) -> &[u8] {
        let start = logical_start(self.head, self.used, self.capacity);
        unsafe { std::slice::from_raw_parts(self.base.add(start), self.used) }
    }

    #[inline]
    pub fn view(&self) -> RawView<'_> {
        RawView::new(self.as_bytes(), self.head, self.used)
    }
}

impl std::fmt::Debug for MirroredRingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirroredRingBuffer")
            .field("capacity", &self.capacity)
            .field("head", &self.head)
            .field("used", &self.used)
            .finish_non_exhaustive()
    }
}

impl Drop for MirroredRingBuffer {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.base as *mut libc::c_void, 2 * self.capacity);
        }
    }
}

/// Reserves `2 * capacity` of address space and maps `fd` into both halves.
///
/// # Safety
/// `fd` must refer to a file at least `capacity` bytes long.
unsafe fn map_twice(fd: libc::c_int, capacity: usize) -> Result<*mut u8, RingError> {
    let reserved = unsafe {
        libc::mmap(
            ptr::null_mut(),
            2 * capacity,
            libc::PROT_NONE,
            libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
            -1,
            0,
        )
    };
    if reserved == libc::MAP_FAILED {
        return Err(RingError::mapping("mmap reserve"));
    }

    let base = reserved as *mut u8;
    for half in 0..2 {
        let addr = unsafe { base.add(half * capacity) } as *mut libc::c_void;
        let mapped = unsafe {
            libc::mmap(
                addr,
                capacity,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED | libc::MAP_FIXED,
                fd,
                0,
            )
        };
        if mapped == libc::MAP_FAILED {
            let err = RingError::mapping("mmap mirror");
            unsafe {
                libc::munmap(reserved, 2 * capacity);
            }
            return Err(err);
        }
    }

    Ok(base)
}
