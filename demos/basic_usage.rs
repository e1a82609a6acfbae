//! Basic engine usage
//!
//! Demonstrates the default stdout consumer, the call-site macros and a
//! runtime verbosity change.
//!
//! Run with: cargo run --example basic_usage

use flog::prelude::*;
use flog::{log_error, log_info, log_warning};

fn main() -> Result<()> {
    println!("=== flog - Basic Usage Example ===\n");

    // Default configuration, one stdout consumer.
    let engine = Engine::new();
    engine.report_filenames(true);

    println!("1. Logging every kind:");
    log_info!(engine, "app", "Application started");
    log_warning!(engine, "app", "Config file missing, using defaults");
    log_error!(engine, "app", "Failed to open {}", "/var/lib/app/state");
    engine.flush();

    println!("\n2. Verbosity set to Warning - info is dropped:");
    engine.set_verbosity(Kind::Warning);
    log_info!(engine, "app", "Info message (hidden)");
    log_warning!(engine, "app", "Warning message (visible)");
    engine.flush();

    println!("\n3. Stopping and restarting the drain thread:");
    engine.kill_thread();
    println!("   state after kill: {:?}", engine.state());
    log_error!(engine, "app", "Delivered by a fresh drain thread");
    engine.flush();
    println!("   state after submit: {:?}", engine.state());

    let metrics = engine.metrics();
    println!(
        "\nsubmitted={} dispatched={} filtered={}",
        metrics.submitted(),
        metrics.dispatched(),
        metrics.filtered()
    );
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
