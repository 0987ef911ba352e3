// benches/interception_bench.rs
//! Load path overhead: pass-through, cache hit, and handler miss

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use require_thunk::{ModuleRegistry, ThunkProvider};
use serde_json::{json, Value};

fn provider() -> ThunkProvider<Value> {
    let registry = ModuleRegistry::new();
    for id in ["net", "http", "https", "fs", "crypto"] {
        registry.register(id, json!({"name": id, "exports": [1, 2, 3]}));
    }
    ThunkProvider::new(registry)
}

fn bench_passthrough(c: &mut Criterion) {
    let provider = provider();
    provider
        .enable("http", |_: &str, v: Value| Ok(v))
        .expect("enable");

    c.bench_function("load_passthrough", |b| {
        b.iter(|| provider.load(black_box("net")).expect("load"))
    });
}

fn bench_cache_hit(c: &mut Criterion) {
    let provider = provider();
    provider
        .enable("*", |_: &str, _: Value| Ok(json!({"stub": true})))
        .expect("enable");
    provider.load("net").expect("warm");

    c.bench_function("load_cache_hit", |b| {
        b.iter(|| provider.load(black_box("net")).expect("load"))
    });
}

fn bench_cache_miss(c: &mut Criterion) {
    let provider = provider();
    provider
        .enable("*", |_: &str, _: Value| Ok(json!({"stub": true})))
        .expect("enable");

    c.bench_function("load_cache_miss", |b| {
        b.iter(|| {
            provider.clear_cache_for("net");
            provider.load(black_box("net")).expect("load")
        })
    });
}

criterion_group!(benches, bench_passthrough, bench_cache_hit, bench_cache_miss);
criterion_main!(benches);
