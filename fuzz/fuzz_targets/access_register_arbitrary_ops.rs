#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::AccessRegister;

// Fuzz AccessRegister against a Vec holding the last `capacity` timestamps.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 8);
    let mut register = AccessRegister::new(capacity);
    let mut window: Vec<u64> = Vec::new();

    for &byte in rest {
        register.record(u64::from(byte));
        if capacity > 0 {
            window.push(u64::from(byte));
            if window.len() > capacity {
                window.remove(0);
            }
        }

        assert_eq!(register.len(), window.len());
        assert_eq!(register.oldest(), window.first().copied());
        assert_eq!(register.most_recent(), window.last().copied());
        assert!(register.iter().eq(window.iter().copied()));
        assert!(register.iter().rev().eq(window.iter().rev().copied()));
    }
});
