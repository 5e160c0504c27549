// Integration tests for the Pool acquire/release API
// Tests cover: construction, exhaustion, growth, erase-on-return, concurrency

use std::collections::HashSet;
use std::sync::Barrier;
use std::time::Duration;

use fixpool::{Object, Pool, PoolConfig, PoolError};
use proptest::prelude::*;

fn fixed(size: usize, count: usize) -> Pool {
    Pool::new(PoolConfig::new(size, count).unwrap()).unwrap()
}

fn growing(size: usize, count: usize, factor: i32) -> Pool {
    Pool::new(PoolConfig::new(size, count).unwrap().with_grow_factor(factor)).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_allocates_initial_objects() {
    for (size, count) in [(1, 1), (8, 3), (1500, 64), (64 * 1024, 2)] {
        let pool = fixed(size, count);
        assert_eq!(pool.available(), count);
        assert_eq!(pool.total(), count);

        let objects: Vec<Object> = (0..count).map(|_| pool.get().unwrap()).collect();
        assert!(objects.iter().all(|o| o.len() == size));
        assert!(
            objects.iter().all(|o| o.iter().all(|&b| b == 0)),
            "fresh objects must be zeroed"
        );
    }
}

#[test]
fn test_new_rejects_zero_size_and_count() {
    let zero_size = Pool::new(PoolConfig::default().with_object_size(0));
    assert!(matches!(
        zero_size,
        Err(PoolError::InvalidConfiguration { .. })
    ));

    let zero_count = Pool::new(PoolConfig::default().with_initial_count(0));
    assert!(matches!(
        zero_count,
        Err(PoolError::InvalidConfiguration { .. })
    ));
}

// ============================================================================
// Fixed-size scenario
// ============================================================================

#[test]
fn test_fixed_pool_scenario() {
    let pool = fixed(16, 2);

    let mut obj1 = pool.get().expect("first object");
    let mut obj2 = pool.get().expect("second object");
    assert_eq!(obj1.len(), 16);
    assert_eq!(obj2.len(), 16);

    obj1[..8].copy_from_slice(b"object-1");
    obj2[..8].copy_from_slice(b"object-2");

    assert!(
        pool.get().is_none(),
        "a fixed pool must not issue more objects than its capacity"
    );

    assert_eq!(&obj1[..8], b"object-1");
    assert_eq!(&obj2[..8], b"object-2");

    pool.put(obj1);
    assert_eq!(&obj2[..8], b"object-2");
    pool.put(obj2);

    // Without erase-on-return the old values survive the round trip.
    let again1 = pool.get().unwrap();
    let again2 = pool.get().unwrap();
    let mut seen = vec![again1[..8].to_vec(), again2[..8].to_vec()];
    seen.sort_unstable();
    assert_eq!(seen, vec![b"object-1".to_vec(), b"object-2".to_vec()]);
}

#[test]
fn test_exhaustion_is_not_sticky() {
    let pool = fixed(8, 1);
    let obj = pool.get().unwrap();
    assert!(pool.get().is_none());
    assert!(pool.get().is_none());

    pool.put(obj);
    assert!(pool.get().is_some());
}

// ============================================================================
// Growth
// ============================================================================

#[test]
fn test_growth_scenario() {
    let pool = growing(8, 1, 3);

    let obj1 = pool.get().expect("first object");
    assert_eq!(obj1.len(), 8);

    let obj2 = pool.get().expect("second get grows the pool");
    assert_eq!(obj2.len(), 8);

    pool.put(obj1);
    pool.put(obj2);

    assert_eq!(pool.available(), 3);
    assert_eq!(pool.total(), 3);
}

#[test]
fn test_growth_reaches_initial_times_factor() {
    for (count, factor) in [(1, 2), (4, 3), (10, 5)] {
        let pool = growing(32, count, factor);
        let held: Vec<_> = (0..=count).map(|_| pool.get().unwrap()).collect();
        assert_eq!(held.len(), count + 1);
        assert_eq!(pool.total(), count * factor as usize);
        assert_eq!(pool.outstanding(), count + 1);
    }
}

#[test]
fn test_growth_does_not_stall_after_first_expansion() {
    let pool = growing(8, 1, 2);
    let mut held = Vec::new();
    for _ in 0..100 {
        held.push(pool.get().expect("growing pool never runs dry"));
    }
    // 1 -> 2 -> 4 -> ... -> 128
    assert_eq!(pool.total(), 128);
    assert_eq!(pool.stats().grows, 7);
}

#[test]
fn test_growth_preserves_outstanding_objects() {
    let pool = growing(4, 2, 2);
    let mut a = pool.get().unwrap();
    let mut b = pool.get().unwrap();
    a.copy_from_slice(b"aaaa");
    b.copy_from_slice(b"bbbb");

    let _c = pool.get().unwrap();
    assert_eq!(&a[..], b"aaaa");
    assert_eq!(&b[..], b"bbbb");

    pool.put(a);
    pool.put(b);
    assert_eq!(pool.total(), 4);
    assert_eq!(pool.available(), 3);
}

// ============================================================================
// Erase on return
// ============================================================================

#[test]
fn test_erase_on_return_zeroes_reused_storage() {
    let config = PoolConfig::new(64, 1).unwrap().with_erase_on_return(true);
    let pool = Pool::new(config).unwrap();

    let mut obj = pool.get().unwrap();
    let addr = obj.as_ptr();
    obj.fill(0xEE);
    pool.put(obj);

    let obj = pool.get().unwrap();
    assert_eq!(obj.as_ptr(), addr, "single-object pool reuses its storage");
    assert!(obj.iter().all(|&b| b == 0));
}

#[test]
fn test_erase_on_return_through_guard() {
    let config = PoolConfig::new(16, 1).unwrap().with_erase_on_return(true);
    let pool = Pool::new(config).unwrap();

    {
        let mut guard = pool.checkout().unwrap();
        guard.fill(1);
    }
    assert!(pool.get().unwrap().iter().all(|&b| b == 0));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_get_never_double_issues() {
    const N: usize = 64;

    for _ in 0..20 {
        let pool = fixed(8, N);
        let barrier = Barrier::new(N);

        let addrs: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..N)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        pool.get().expect("capacity matches thread count")
                    })
                })
                .collect();
            let objects: Vec<Object> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            objects.iter().map(|o| o.as_ptr() as usize).collect()
        });

        let unique: HashSet<_> = addrs.iter().collect();
        assert_eq!(unique.len(), N);
        assert!(pool.get().is_none());
    }
}

#[test]
fn test_concurrent_get_put_preserves_count() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 2_000;

    let pool = fixed(32, THREADS / 2);

    std::thread::scope(|s| {
        for t in 0..THREADS {
            let pool = &pool;
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    if let Some(mut obj) = pool.get() {
                        obj.fill(t as u8);
                        assert!(obj.iter().all(|&b| b == t as u8), "object aliased");
                        pool.put(obj);
                    }
                }
            });
        }
    });

    assert_eq!(pool.total(), THREADS / 2);
    assert_eq!(pool.available(), THREADS / 2);
}

#[test]
fn test_concurrent_growth_is_serialized() {
    const THREADS: usize = 16;

    let pool = growing(8, 1, 2);
    let barrier = Barrier::new(THREADS);

    let held: Vec<Object> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    (0..4).filter_map(|_| pool.get()).collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(held.len(), THREADS * 4);
    let unique: HashSet<_> = held.iter().map(|o| o.as_ptr() as usize).collect();
    assert_eq!(unique.len(), held.len());

    // Totals only ever take values on the 1 * 2^k ladder.
    let total = pool.total();
    assert!(total.is_power_of_two());
    assert_eq!(pool.outstanding(), held.len());

    for obj in held {
        pool.put(obj);
    }
    assert_eq!(pool.available(), total);
}

#[test]
fn test_put_runs_alongside_growth() {
    const THREADS: usize = 16;
    const OPS: usize = 200;

    for _ in 0..20 {
        let config = PoolConfig::new(8, 1)
            .unwrap()
            .with_grow_factor(2)
            .with_max_count(Some(4096));
        let pool = Pool::new(config).unwrap();
        let barrier = Barrier::new(THREADS);

        let held: Vec<Object> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let pool = &pool;
                    let barrier = &barrier;
                    s.spawn(move || {
                        let mut kept = Vec::new();
                        let mut in_hand: Vec<Object> = Vec::new();
                        barrier.wait();

                        for op in 0..OPS {
                            if let Some(mut obj) = pool.get() {
                                obj.fill(t as u8);
                                if op % 7 == 0 {
                                    // Stays out across later growths.
                                    kept.push(obj);
                                } else {
                                    in_hand.push(obj);
                                }
                            }
                            if op % 3 == 2 {
                                for obj in in_hand.drain(..) {
                                    assert!(obj.iter().all(|&b| b == t as u8), "object aliased");
                                    pool.put(obj);
                                }
                            }
                        }

                        kept.extend(in_hand);
                        kept
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let unique: HashSet<_> = held.iter().map(|o| o.as_ptr() as usize).collect();
        assert_eq!(unique.len(), held.len(), "object issued twice");

        let total = pool.total();
        assert_eq!(pool.available() + held.len(), total);

        for obj in held {
            pool.put(obj);
        }
        assert_eq!(pool.available(), total);

        let stats = pool.stats();
        assert_eq!(stats.foreign, 0);
        assert_eq!(stats.overflow, 0);
        assert!(stats.grows > 0);
    }
}

#[test]
fn test_blocking_get_hands_over_between_threads() {
    let pool = fixed(8, 1);
    let first = pool.get().unwrap();

    std::thread::scope(|s| {
        let waiter = s.spawn(|| {
            let obj = pool.get_timeout(Duration::from_secs(10)).expect("woken by put");
            pool.put(obj);
        });
        std::thread::sleep(Duration::from_millis(10));
        pool.put(first);
        waiter.join().unwrap();
    });

    assert_eq!(pool.available(), 1);
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Get,
    Put(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Get), any::<usize>().prop_map(Op::Put)]
}

proptest! {
    #[test]
    fn prop_accounting_holds(
        count in 1usize..8,
        factor in -1i32..4,
        ops in prop::collection::vec(op(), 0..200),
    ) {
        let pool = growing(4, count, factor);
        let mut held: Vec<Object> = Vec::new();
        let mut last_total = pool.total();

        for op in ops {
            match op {
                Op::Get => {
                    if let Some(obj) = pool.get() {
                        prop_assert_eq!(obj.len(), 4);
                        held.push(obj);
                    } else {
                        prop_assert!(factor <= 1);
                    }
                }
                Op::Put(i) if !held.is_empty() => {
                    let obj = held.swap_remove(i % held.len());
                    pool.put(obj);
                }
                Op::Put(_) => {}
            }

            let total = pool.total();
            prop_assert!(total >= last_total, "pool never shrinks");
            prop_assert_eq!(pool.available() + held.len(), total);
            last_total = total;
        }
    }
}
