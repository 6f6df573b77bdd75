use clap::Parser;
use ringnes::config::RingConfig;
use ringnes::ring::SharedRingBuffer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// One writer thread hammering a shared ring while a reader checks it.
#[derive(Debug, Parser)]
#[command(name = "stress")]
struct Cli {
    #[command(flatten)]
    ring: RingConfig,

    /// Run time in seconds
    #[arg(long, env = "RINGNES_STRESS_SECONDS", default_value_t = 5)]
    seconds: u64,
}

struct ReadStats {
    reads: u64,
    breaks: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!(error = %e, "stress run failed");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    cli.ring.validate()?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    let ring = SharedRingBuffer::new(cli.ring.capacity)
        .map_err(|e| format!("Failed to create shared ring buffer: {}", e))?;
    let chunk = cli.ring.chunk()?;
    let run_for = Duration::from_secs(cli.seconds);

    tracing::info!(capacity = ring.capacity(), seconds = cli.seconds, "stress run started");

    let (written, stats) = std::thread::scope(|scope| -> Result<_, Box<dyn std::error::Error>> {
        let samples = &chunk;
        let writer_ring = ring.clone();
        let writer_running = running.clone();
        let writer = scope.spawn(move || {
            let mut count = 0u64;
            while writer_running.load(Ordering::Relaxed) {
                writer_ring.put_samples(samples);
                count += 1;
            }
            count
        });

        let config = &cli.ring;
        let reader_ring = ring.clone();
        let reader_running = running.clone();
        let reader = scope.spawn(move || -> Result<ReadStats, ringnes::ring::RingError> {
            let mut stats = ReadStats { reads: 0, breaks: 0 };
            while reader_running.load(Ordering::Relaxed) {
                let guard = reader_ring.read();
                let logical: Vec<i32> = guard.view().samples()?;
                drop(guard);

                stats.breaks += config.ramp_breaks(&logical) as u64;
                stats.reads += 1;
            }
            Ok(stats)
        });

        let started = Instant::now();
        while running.load(Ordering::SeqCst) && started.elapsed() < run_for {
            std::thread::sleep(Duration::from_millis(50));
        }
        running.store(false, Ordering::SeqCst);

        let written = writer.join().map_err(|_| "writer thread panicked")?;
        let stats = reader.join().map_err(|_| "reader thread panicked")??;
        Ok((written, stats))
    })?;

    let bytes = written as f64 * (chunk.len() * size_of::<i32>()) as f64;
    let last = ring.snapshot();

    println!("\nResults:");
    println!("  Puts: {}", written);
    println!("  Reads: {} ({} ramp breaks)", stats.reads, stats.breaks);
    println!(
        "  Throughput: {:.2} MB/sec",
        bytes / run_for.as_secs_f64().max(f64::EPSILON) / 1024.0 / 1024.0
    );
    println!("  Final head={} used={}", last.head(), last.used());

    if stats.breaks > 0 {
        return Err(format!("{} ramp breaks observed", stats.breaks).into());
    }

    Ok(())
}
