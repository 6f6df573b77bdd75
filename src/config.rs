use clap::Args;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CAPACITY: usize = 4096 * 1024;
pub const DEFAULT_CHUNK_SAMPLES: usize = 1022;

const SAMPLE_WIDTH: usize = size_of::<i32>();

/// Ring and chunk sizing shared by both binaries.
#[derive(Debug, Clone, Args)]
pub struct RingConfig {
    /// Ring capacity in bytes, a multiple of 4
    #[arg(long, env = "RINGNES_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// i32 samples written per put
    #[arg(long, env = "RINGNES_CHUNK_SAMPLES", default_value_t = DEFAULT_CHUNK_SAMPLES)]
    pub chunk_samples: usize,
}

/// Settings for the `ringnes` ingest loop.
#[derive(Debug, Clone, Args)]
pub struct IngestConfig {
    #[command(flatten)]
    pub ring: RingConfig,

    /// Number of puts; runs until Ctrl+C when omitted
    #[arg(long, env = "RINGNES_ITERATIONS")]
    pub iterations: Option<u64>,

    /// Pause between puts in milliseconds
    #[arg(long, env = "RINGNES_INTERVAL_MS", default_value_t = 0)]
    pub interval_ms: u64,

    /// Back the ring with a double-mapped region (Linux)
    #[arg(long, env = "RINGNES_MIRRORED")]
    pub mirrored: bool,

    /// Log a status line every N puts
    #[arg(long, env = "RINGNES_STATUS_EVERY", default_value_t = 5)]
    pub status_every: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("capacity must be positive")]
    ZeroCapacity,
    #[error("capacity {0} is not a whole number of i32 samples")]
    UnalignedCapacity(usize),
    #[error("chunk_samples must be positive")]
    ZeroChunk,
    #[error("chunk_samples {0} exceeds i32::MAX")]
    ChunkTooLarge(usize),
    #[error("status_every must be positive")]
    ZeroStatusInterval,
    #[error("mirrored rings are only available on Linux")]
    MirrorUnsupported,
}

impl RingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.capacity % SAMPLE_WIDTH != 0 {
            return Err(ConfigError::UnalignedCapacity(self.capacity));
        }
        if self.chunk_samples == 0 {
            return Err(ConfigError::ZeroChunk);
        }
        if i32::try_from(self.chunk_samples).is_err() {
            return Err(ConfigError::ChunkTooLarge(self.chunk_samples));
        }
        Ok(())
    }

    /// The ramp `0..chunk_samples` written on every put.
    pub fn chunk(&self) -> Result<Vec<i32>, ConfigError> {
        let end = i32::try_from(self.chunk_samples)
            .map_err(|_| ConfigError::ChunkTooLarge(self.chunk_samples))?;
        Ok((0..end).collect())
    }

    /// Counts adjacent samples that do not continue the chunk ramp. Zero for
    /// any logical content produced by whole-chunk puts into an aligned ring.
    pub fn ramp_breaks(&self, samples: &[i32]) -> usize {
        let period = self.chunk_samples.max(1) as i64;
        samples
            .windows(2)
            .filter(|pair| (pair[0] as i64 + 1) % period != pair[1] as i64)
            .count()
    }
}

impl IngestConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ring.validate()?;
        if self.status_every == 0 {
            return Err(ConfigError::ZeroStatusInterval);
        }
        if self.mirrored && !cfg!(target_os = "linux") {
            return Err(ConfigError::MirrorUnsupported);
        }
        Ok(())
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
