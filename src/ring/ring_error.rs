use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RingError {
    #[error("Invalid capacity {capacity}: {reason}")]
    InvalidCapacity {
        capacity: usize,
        reason: &'static str,
    },
    #[error("Invalid input: {len} bytes is not a whole number of {width}-byte samples")]
    InvalidInput { len: usize, width: usize },
    #[error("Mapping failed during {op}: {source}")]
    Mapping {
        op: &'static str,
        #[source]
        source: io::Error,
    },
}

impl RingError {
    pub(crate) fn mapping(op: &'static str) -> Self {
        Self::Mapping {
            op,
            source: io::Error::last_os_error(),
        }
    }
}
