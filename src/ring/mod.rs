pub mod buffer;
pub mod byte_ring;
#[cfg(target_os = "linux")]
pub mod mirror;
pub mod ring_error;
pub mod shared;
pub mod write;

pub use buffer::RingBuffer;
pub use byte_ring::ByteRing;
#[cfg(target_os = "linux")]
pub use mirror::{MirroredRingBuffer, page_size};
pub use ring_error::*;
pub use shared::{RingReadGuard, SharedRingBuffer};
