//! Basic pool usage: fixed RX buffers, a growing TX pool, and stats.
//!
//! Run with:
//!     cargo run --example basic

use fixpool::{Pool, PoolConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fixed pool of MTU-sized receive buffers.
    let rx = Pool::new(PoolConfig::new(1500, 4)?.with_erase_on_return(true))?;

    let mut in_flight = Vec::new();
    for seq in 0..6u8 {
        match rx.get() {
            Some(mut frame) => {
                frame[0] = seq;
                in_flight.push(frame);
            }
            None => println!("rx: pool exhausted at packet {}, dropping", seq),
        }
    }

    for frame in in_flight.drain(..) {
        println!("rx: processed packet {}", frame[0]);
        rx.put(frame);
    }

    // Growing pool for transmit buffers, capped at 64 objects.
    let tx = Pool::new(
        PoolConfig::new(512, 2)?
            .with_grow_factor(4)
            .with_max_count(Some(64)),
    )?;

    let held: Vec<_> = (0..10).filter_map(|_| tx.checkout()).collect();
    println!(
        "tx: {} buffers out, pool now manages {} ({} bytes)",
        held.len(),
        tx.total(),
        tx.stats().total_bytes()
    );
    drop(held);

    let stats = tx.stats();
    println!(
        "tx: available={} grows={} hit_rate={:.2}",
        stats.available,
        stats.grows,
        stats.hit_rate()
    );

    let stats = rx.stats();
    println!(
        "rx: available={} hits={} misses={}",
        stats.available, stats.hits, stats.misses
    );

    Ok(())
}
