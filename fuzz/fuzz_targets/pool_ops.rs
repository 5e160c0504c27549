#![no_main]

use fixpool::{Object, Pool, PoolConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&header, ops)) = data.split_first() else {
        return;
    };

    // Header byte picks the configuration.
    let size = 1 + (header & 0x0f) as usize;
    let count = 1 + ((header >> 4) & 0x03) as usize;
    let factor = ((header >> 6) & 0x01) as i32 * 2;
    let erase = header & 0x80 != 0;

    let config = PoolConfig::new(size, count)
        .unwrap()
        .with_grow_factor(factor)
        .with_erase_on_return(erase)
        .with_max_count(Some(1024));
    let pool = Pool::new(config).unwrap();

    let mut held: Vec<Object> = Vec::new();
    for &op in ops {
        match op % 3 {
            0 => {
                if let Some(mut obj) = pool.get() {
                    assert_eq!(obj.len(), size);
                    if erase {
                        assert!(obj.iter().all(|&b| b == 0));
                    }
                    obj.fill(op | 1);
                    held.push(obj);
                } else {
                    assert!(factor == 0 || pool.total() == 1024);
                }
            }
            1 if !held.is_empty() => {
                let obj = held.swap_remove(op as usize % held.len());
                pool.put(obj);
            }
            _ => {
                if let Some(guard) = pool.checkout() {
                    assert_eq!(guard.len(), size);
                }
            }
        }

        assert_eq!(pool.available() + held.len(), pool.total());
        assert!(pool.total() <= 1024);
    }

    for obj in held {
        pool.put(obj);
    }
    assert_eq!(pool.available(), pool.total());
    assert_eq!(pool.stats().foreign, 0);
});
