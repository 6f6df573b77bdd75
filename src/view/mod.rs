pub mod raw;
pub mod sample;
pub mod snapshot;

pub use raw::RawView;
pub use sample::{Sample, sample_bytes};
pub use snapshot::Snapshot;
