//! Criterion benchmarks for request resolution and shock runs.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pricer_pricing::{
    Expiry, MarketContext, MarketSnapshotProvider, MockSnapshotProvider, PricingRequest,
    PricingSession, StrikeSpec,
};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn bench_price(c: &mut Criterion) {
    let provider = MockSnapshotProvider::new().with_as_of(date(6, 3));
    let snapshot = provider.snapshot(&"EURUSD".parse().unwrap()).unwrap();
    let atmf = PricingRequest::new("EURUSD".parse().unwrap(), Expiry::Days(91));
    let delta = atmf.with_strike(StrikeSpec::parse("25DP").unwrap());

    c.bench_function("context_build", |b| {
        b.iter(|| MarketContext::new(black_box(snapshot.clone())).unwrap());
    });

    let ctx = MarketContext::new(snapshot).unwrap();
    c.bench_function("price_atmf", |b| {
        b.iter(|| ctx.price(black_box(&atmf)).unwrap());
    });
    c.bench_function("price_25d", |b| {
        b.iter(|| ctx.price(black_box(&delta)).unwrap());
    });
}

fn bench_shock(c: &mut Criterion) {
    let session = PricingSession::new(MockSnapshotProvider::new().with_as_of(date(6, 3)));
    let request = PricingRequest::new("EURUSD".parse().unwrap(), Expiry::Days(182));

    c.bench_function("session_shock", |b| {
        b.iter(|| {
            session
                .shock(black_box(&request), date(3, 1), date(3, 15))
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_price, bench_shock);
criterion_main!(benches);
