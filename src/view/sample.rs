use crate::ring::RingError;
use std::mem;

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width numeric element stored in a ring as its native-endian bytes.
///
/// Sealed: every implementor is a primitive without padding, so its byte image
/// can be borrowed in place.
pub trait Sample: sealed::Sealed + Copy + 'static {
    const WIDTH: usize = mem::size_of::<Self>();

    fn read_ne(chunk: &[u8]) -> Self;
}

macro_rules! impl_sample {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Sample for $t {
                #[inline]
                fn read_ne(chunk: &[u8]) -> Self {
                    let mut raw = [0u8; mem::size_of::<$t>()];
                    raw.copy_from_slice(chunk);
                    <$t>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_sample!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

#[inline]
pub fn sample_bytes<T: Sample>(samples: &[T]) -> &[u8] {
    // SAFETY: `Sample` is only implemented for padding-free primitives, any
    // initialized value of which is a valid run of bytes.
    unsafe { std::slice::from_raw_parts(samples.as_ptr() as *const u8, mem::size_of_val(samples)) }
}

pub(crate) fn decode_into<T: Sample>(
    out: &mut Vec<T>,
    segments: (&[u8], &[u8]),
) -> Result<(), RingError> {
    let (older, newer) = segments;
    let len = older.len() + newer.len();
    if len % T::WIDTH != 0 {
        return Err(RingError::InvalidInput {
            len,
            width: T::WIDTH,
        });
    }

    out.reserve(len / T::WIDTH);

    // A sample may straddle the seam between the two segments.
    let split = older.len() - older.len() % T::WIDTH;
    out.extend(older[..split].chunks_exact(T::WIDTH).map(T::read_ne));

    let carry = older.len() - split;
    let mut rest = newer;
    if carry > 0 {
        let mut seam = [0u8; 8];
        seam[..carry].copy_from_slice(&older[split..]);
        seam[carry..T::WIDTH].copy_from_slice(&newer[..T::WIDTH - carry]);
        out.push(T::read_ne(&seam[..T::WIDTH]));
        rest = &newer[T::WIDTH - carry..];
    }
    out.extend(rest.chunks_exact(T::WIDTH).map(T::read_ne));

    Ok(())
}
