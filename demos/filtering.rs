//! Runtime filtering
//!
//! Run with: cargo run --example filtering

use flog::prelude::*;

fn main() -> Result<()> {
    println!("=== flog - Filtering Example ===\n");

    let engine = Engine::new();

    println!("1. Category filter 'net.*':");
    engine.set_category_filter("net.*")?;
    engine.info("network", "Connected to 10.0.0.1 (visible)");
    engine.info("ui", "Button clicked (hidden)");
    engine.flush();

    println!("\n2. Message filter '^disk' added:");
    engine.set_error_string_filter("^disk")?;
    engine.error("network", "disk quota exceeded on share (visible)");
    engine.error("network", "timeout (hidden)");
    engine.flush();

    println!("\n3. Invalid patterns are rejected where they are set:");
    match engine.set_filename_filter("[unclosed") {
        Ok(()) => println!("   unexpectedly accepted"),
        Err(e) => println!("   {}", e),
    }

    println!("\n4. Reset restores defaults:");
    engine.reset();
    engine.info("ui", "Button clicked (visible again)");
    engine.flush();

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
