use clap::Parser;
use ringnes::config::IngestConfig;
use ringnes::ring::{ByteRing, RingBuffer};
use ringnes::view::sample_bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

/// Feed a fixed i32 ramp into a ring buffer and report its state.
#[derive(Debug, Parser)]
#[command(name = "ringnes", version)]
struct Cli {
    #[command(flatten)]
    ingest: IngestConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse().ingest) {
        tracing::error!(error = %e, "ringnes failed");
        std::process::exit(1);
    }
}

fn open_ring(config: &IngestConfig) -> Result<Box<dyn ByteRing>, Box<dyn std::error::Error>> {
    #[cfg(target_os = "linux")]
    if config.mirrored {
        return Ok(Box::new(ringnes::ring::MirroredRingBuffer::new(
            config.ring.capacity,
        )?));
    }
    Ok(Box::new(RingBuffer::new(config.ring.capacity)?))
}

fn run(config: IngestConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    let mut ring = open_ring(&config)?;
    let chunk = config.ring.chunk()?;
    let bytes = sample_bytes(&chunk);

    tracing::info!(
        capacity = ring.capacity(),
        chunk_bytes = bytes.len(),
        mirrored = config.mirrored,
        "ingest started"
    );

    let mut puts = 0u64;
    while running.load(Ordering::SeqCst) && config.iterations.is_none_or(|n| puts < n) {
        ring.put(bytes);
        puts += 1;

        if puts % config.status_every == 0 {
            tracing::info!(puts, head = ring.head(), used = ring.used(), "status");
        }

        if !config.interval().is_zero() {
            std::thread::sleep(config.interval());
        }
    }

    let view = ring.view();
    let samples: Vec<i32> = view.samples()?;

    tracing::info!(
        puts,
        head = view.head(),
        used = view.used(),
        samples = samples.len(),
        first = ?samples.first(),
        last = ?samples.last(),
        "ingest finished"
    );

    Ok(())
}
