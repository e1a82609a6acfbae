//! Stress tests for the drain thread lifecycle
//!
//! These tests verify:
//! - Lossless, duplicate-free delivery from many producer threads
//! - Per-producer ordering end to end
//! - Flush as a barrier under concurrent load
//! - Kill/restart cycles and kill racing a pending flush
//! - Reconfiguration while producers are running

use flog::consumers::ChannelConsumer;
use flog::core::{Context, Engine, Entry, Kind};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const PRODUCERS: usize = 8;
const PER_PRODUCER: usize = 2_000;

fn channel_engine() -> (Arc<Engine>, crossbeam_channel::Receiver<Entry>) {
    let (consumer, receiver) = ChannelConsumer::unbounded();
    let engine = Engine::builder()
        .without_default_consumer()
        .consumer(consumer)
        .build()
        .expect("valid engine");
    (Arc::new(engine), receiver)
}

fn parse(entry: &Entry) -> (usize, usize) {
    let producer = entry.context.category[1..].parse().expect("producer id");
    let seq = entry.message.parse().expect("sequence number");
    (producer, seq)
}

/// Every entry submitted before a flush is delivered exactly once, in
/// per-producer order.
#[test]
fn test_concurrent_producers_lossless_and_ordered() {
    let (engine, receiver) = channel_engine();
    let barrier = Arc::new(Barrier::new(PRODUCERS));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_PRODUCER {
                    engine.submit(i.to_string(), Context::new(format!("p{}", p)), Kind::Info);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("producer panicked");
    }
    engine.flush();

    let entries: Vec<Entry> = receiver.try_iter().collect();
    assert_eq!(entries.len(), PRODUCERS * PER_PRODUCER);

    let unique: HashSet<(usize, usize)> = entries.iter().map(parse).collect();
    assert_eq!(unique.len(), PRODUCERS * PER_PRODUCER, "duplicates delivered");

    let mut next = vec![0usize; PRODUCERS];
    for entry in &entries {
        let (producer, seq) = parse(entry);
        assert_eq!(seq, next[producer], "producer {} out of order", producer);
        next[producer] += 1;
    }
}

/// Each producer flushes after its own submissions and must find all of
/// them delivered, while other producers keep submitting.
#[test]
fn test_flush_barrier_under_load() {
    let (consumer, receiver) = ChannelConsumer::unbounded();
    let seen = Arc::new(parking_lot::Mutex::new(Vec::<Entry>::new()));
    let engine = Arc::new(
        Engine::builder()
            .without_default_consumer()
            .consumer(consumer)
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|p| {
            let engine = Arc::clone(&engine);
            let receiver = receiver.clone();
            let seen = Arc::clone(&seen);
            thread::spawn(move || {
                for round in 0..20 {
                    for i in 0..50 {
                        engine.submit(
                            format!("{}", round * 50 + i),
                            Context::new(format!("p{}", p)),
                            Kind::Info,
                        );
                    }
                    engine.flush();

                    let mut seen = seen.lock();
                    seen.extend(receiver.try_iter());
                    let mine = seen
                        .iter()
                        .filter(|e| e.context.category == format!("p{}", p))
                        .count();
                    assert_eq!(mine, (round + 1) * 50);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("producer panicked");
    }
}

#[test]
fn test_repeated_kill_and_restart() {
    let (engine, receiver) = channel_engine();

    for cycle in 0..50 {
        for i in 0..10 {
            engine.submit(format!("{}-{}", cycle, i), Context::new("cycle"), Kind::Warning);
        }
        if cycle % 2 == 0 {
            engine.kill_thread();
        } else {
            engine.flush();
        }
    }
    engine.flush();

    assert_eq!(receiver.try_iter().count(), 500);
    assert_eq!(engine.metrics().submitted(), 500);
}

/// Killing the drain thread from another thread must release pending
/// flushes and never deadlock.
#[test]
fn test_kill_while_flush_pending() {
    let (engine, receiver) = channel_engine();
    let stop = Arc::new(AtomicBool::new(false));
    let flushes = Arc::new(AtomicUsize::new(0));

    let flushers: Vec<_> = (0..3)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let stop = Arc::clone(&stop);
            let flushes = Arc::clone(&flushes);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    engine.submit("tick", Context::new("flush"), Kind::Info);
                    engine.flush();
                    flushes.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    let killer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for _ in 0..100 {
                engine.kill_thread();
                thread::yield_now();
            }
        })
    };

    killer.join().expect("killer panicked");
    stop.store(true, Ordering::Relaxed);
    for flusher in flushers {
        flusher.join().expect("flusher panicked");
    }

    // Whatever raced a shutdown is picked up by this flush.
    engine.flush();
    let delivered = receiver.try_iter().count() as u64;
    assert_eq!(delivered, engine.metrics().submitted());
    assert!(flushes.load(Ordering::Relaxed) > 0);
}

#[test]
fn test_reconfiguration_while_submitting() {
    let (engine, receiver) = channel_engine();
    let stop = Arc::new(AtomicBool::new(false));

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..1_000 {
                    let kind = Kind::ALL[i % 3];
                    engine.submit(i.to_string(), Context::new(format!("p{}", p)), kind);
                }
            })
        })
        .collect();

    let configurator = {
        let engine = Arc::clone(&engine);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut toggle = false;
            while !stop.load(Ordering::Relaxed) {
                engine.set_verbosity(if toggle { Kind::Warning } else { Kind::Info });
                engine.report_filenames(toggle);
                engine
                    .set_category_filter(if toggle { "^p[0-3]$" } else { "^p" })
                    .expect("valid pattern");
                toggle = !toggle;
                thread::yield_now();
            }
        })
    };

    for producer in producers {
        producer.join().expect("producer panicked");
    }
    stop.store(true, Ordering::Relaxed);
    configurator.join().expect("configurator panicked");
    engine.flush();

    let metrics = engine.metrics();
    let delivered = receiver.try_iter().count() as u64;
    assert_eq!(metrics.submitted(), 4_000);
    assert_eq!(delivered, metrics.dispatched());
    assert_eq!(metrics.dispatched() + metrics.filtered(), 4_000);
}
