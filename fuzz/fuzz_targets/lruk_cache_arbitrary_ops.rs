#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::error::CacheError;
use lrukit::policy::lru_k::{LrukCore, Tier};

// Fuzz arbitrary get/set sequences on LrukCore
//
// First two bytes pick capacity and K; each following pair is (op, key).
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 16) + 1;
    let k = usize::from(data[1] % 4) + 1;
    let mut core = LrukCore::new(capacity, k);

    for pair in data[2..].chunks_exact(2) {
        let key = i64::from(pair[1] % 32);
        let clock = core.clock();
        let was_hot = core.tier(key) == Some(Tier::Hot);

        if pair[0] % 2 == 0 {
            match core.get(key) {
                Ok(_) => assert_eq!(core.clock(), clock + 1),
                Err(CacheError::KeyNotFound(missing)) => {
                    assert_eq!(missing, key);
                    assert_eq!(core.clock(), clock);
                }
                Err(other) => panic!("get failed: {other}"),
            }
        } else {
            let value = i64::from(pair[0]);
            assert_eq!(core.set(key, value), Ok(key));
            assert_eq!(core.peek(key), Some(value));
            assert_eq!(core.clock(), clock + 1);
        }

        if was_hot && core.contains(key) {
            assert_eq!(core.tier(key), Some(Tier::Hot));
        }
        assert!(core.len() <= capacity);
        if let Err(err) = core.check_invariants() {
            panic!("{err}");
        }
    }
});
