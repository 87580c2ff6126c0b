//! Replays a fixed get/set script against a capacity-3, K=2 store.
//!
//! Run with: cargo run --bin lruk_demo --features demo
//! Set `RUST_LOG=lrukit=debug` to see promotions and evictions, or
//! `RUST_LOG=lrukit=trace` for every recorded access.

use std::process::ExitCode;

use lrukit::builder::LrukBuilder;
use lrukit::error::CacheError;
use lrukit::policy::lru_k::LrukCache;
use tracing_subscriber::EnvFilter;

const CAPACITY: usize = 3;
const K: usize = 2;

#[derive(Debug, Clone, Copy)]
enum Step {
    Get(i64),
    Set(i64, i64),
}

const SCRIPT: &[Step] = &[
    Step::Set(1, 10),
    Step::Set(2, 20),
    Step::Set(3, 30),
    Step::Get(1),
    Step::Get(2),
    Step::Set(2, 200),
    Step::Get(3),
    Step::Set(3, 300),
    Step::Get(2),
    Step::Get(3),
    Step::Get(1),
    Step::Set(4, 40),
    Step::Get(4),
];

fn run(cache: &LrukCache, step: Step) -> Result<i64, CacheError> {
    match step {
        Step::Get(key) => cache.get(key),
        Step::Set(key, value) => cache.set(key, value),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lrukit=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cache = match LrukBuilder::new(CAPACITY).k(K).try_build() {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("err: {err}");
            return ExitCode::FAILURE;
        },
    };

    for &step in SCRIPT {
        match run(&cache, step) {
            Ok(result) => println!("{step:?} -> result: {result}"),
            Err(err) => {
                println!("{step:?} -> err: {err}");
                return ExitCode::FAILURE;
            },
        }
    }

    let resident: Vec<i64> = (1..=4).filter(|&key| cache.contains(key)).collect();
    println!("resident keys: {resident:?}, clock: {}", cache.clock());
    ExitCode::SUCCESS
}
