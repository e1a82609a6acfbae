//! File and JSON consumers
//!
//! Run with: cargo run --example file_logging

use flog::prelude::*;
use flog::{log_error, log_info};
use std::fs;

fn main() -> Result<()> {
    println!("=== flog - File Logging Example ===\n");

    let dir = std::env::temp_dir();
    let text_path = dir.join("flog_demo.log");
    let json_path = dir.join("flog_demo.jsonl");

    let engine = Engine::builder()
        .without_default_consumer()
        .consumer(FileConsumer::new(&text_path, false)?)
        .consumer(JsonConsumer::open(&json_path)?)
        .report_filenames(true)
        .build()?;

    for i in 0..5 {
        log_info!(engine, "worker", "Processed batch {}", i);
    }
    log_error!(engine, "worker", "Batch {} failed checksum", 5);
    engine.flush();

    println!("{}:", text_path.display());
    print!("{}", fs::read_to_string(&text_path)?);
    println!("\n{}:", json_path.display());
    print!("{}", fs::read_to_string(&json_path)?);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
