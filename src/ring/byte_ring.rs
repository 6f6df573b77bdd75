use crate::view::{RawView, Sample, sample_bytes};

/// Common surface of the ring implementations.
pub trait ByteRing: Send {
    fn put(&mut self, data: &[u8]);

    fn view(&self) -> RawView<'_>;

    fn put_samples<T: Sample>(&mut self, samples: &[T])
    where
        Self: Sized,
    {
        self.put(sample_bytes(samples));
    }

    fn capacity(&self) -> usize {
        self.view().capacity()
    }

    fn head(&self) -> usize {
        self.view().head()
    }

    fn used(&self) -> usize {
        self.view().used()
    }
}

impl ByteRing for super::RingBuffer {
    #[inline]
    fn put(&mut self, data: &[u8]) {
        super::RingBuffer::put(self, data);
    }

    #[inline]
    fn view(&self) -> RawView<'_> {
        super::RingBuffer::view(self)
    }
}

#[cfg(target_os = "linux")]
impl ByteRing for super::MirroredRingBuffer {
    #[inline]
    fn put(&mut self, data: &[u8]) {
        super::MirroredRingBuffer::put(self, data);
    }

    #[inline]
    fn view(&self) -> RawView<'_> {
        super::MirroredRingBuffer::view(self)
    }
}
