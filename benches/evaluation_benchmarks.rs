//! Performance benchmarks for the Rate Card Engine.
//!
//! This benchmark suite tracks:
//! - Rate card evaluation for a typical five-charge card
//! - Tier resolution over a large table under both match policies
//! - Hybrid allocation across several compartments
//! - A full `/simulate` request through the router
//! - A batch of 100 simulations
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use rate_card_engine::api::{AppState, create_router};
use rate_card_engine::calculation::{allocate_hybrid, evaluate_rate_card, resolve_break};
use rate_card_engine::config::ConfigLoader;
use rate_card_engine::models::{
    ChargeDefinition, ChargeRule, ChargeType, Compartment, MatchPolicy, ModifierType, RateBreak, RateBreaks,
    Scenario, ThermalModifier, WeightSource,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    AppState::new(config)
}

/// Creates a tier table of `count` contiguous ten-unit bands.
fn create_tiers(count: i64) -> Vec<RateBreak> {
    (0..count)
        .map(|i| {
            let min = Decimal::from(i * 10);
            let max = if i + 1 == count {
                None
            } else {
                Some(Decimal::from(i * 10 + 9))
            };
            RateBreak::new(min, max, Decimal::from(100 - i % 50))
        })
        .collect()
}

/// Creates a typical rate card: base, tiered freight, linehaul, fuel and a hybrid fee.
fn create_charges() -> Vec<ChargeDefinition> {
    let tiers = RateBreaks::new(create_tiers(8)).expect("tiers are non-empty");
    vec![
        ChargeDefinition::new(ChargeType::Base, Decimal::from(250), 0, ChargeRule::Flat { breaks: None })
            .with_apply_before_pct(true),
        ChargeDefinition::new(
            ChargeType::Freight,
            Decimal::from(45),
            1,
            ChargeRule::PerWeight {
                weight_source: WeightSource::Actual,
                breaks: tiers,
            },
        )
        .with_apply_before_pct(true),
        ChargeDefinition::new(
            ChargeType::Distance,
            Decimal::new(185, 2),
            2,
            ChargeRule::PerDistance { breaks: None },
        )
        .with_apply_before_pct(true),
        ChargeDefinition::new(ChargeType::Fuel, Decimal::new(125, 1), 3, ChargeRule::Percentage { breaks: None }),
        ChargeDefinition::new(ChargeType::Hybrid, Decimal::from(80), 4, ChargeRule::Flat { breaks: None }),
    ]
}

fn simulate_body(rate_card_id: &str, weight: u32) -> String {
    serde_json::json!({
        "rate_card_id": rate_card_id,
        "scenario": { "weight": weight.to_string(), "distance": "880" }
    })
    .to_string()
}

/// Benchmark: Evaluate a five-charge rate card.
fn bench_evaluate_rate_card(c: &mut Criterion) {
    let charges = create_charges();
    let scenario = Scenario::new(Decimal::from(42), Decimal::from(880));

    c.bench_function("evaluate_rate_card", |b| {
        b.iter(|| black_box(evaluate_rate_card(black_box(&charges), black_box(&scenario))))
    });
}

/// Benchmark: Resolve a tier from tables of increasing size.
fn bench_resolve_break(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_break");

    for size in [4i64, 32, 256] {
        let tiers = create_tiers(size);
        let lookup = Decimal::from(size * 5 + 3);

        group.bench_with_input(BenchmarkId::new("range", size), &tiers, |b, tiers| {
            b.iter(|| black_box(resolve_break(tiers, black_box(lookup), MatchPolicy::Range)))
        });
        group.bench_with_input(BenchmarkId::new("closest_lower", size), &tiers, |b, tiers| {
            b.iter(|| black_box(resolve_break(tiers, black_box(lookup), MatchPolicy::ClosestLower)))
        });
    }

    group.finish();
}

/// Benchmark: Allocate a subtotal across four compartments.
fn bench_hybrid_allocation(c: &mut Criterion) {
    let compartments = vec![
        Compartment::new("frozen", Decimal::from(6)),
        Compartment::new("chilled", Decimal::from(10)),
        Compartment::new("ambient", Decimal::from(4)),
        Compartment::new("pharma", Decimal::from(2)),
    ];
    let modifiers = vec![
        ThermalModifier::new("frozen", ModifierType::Multiplier, Decimal::new(12, 1)),
        ThermalModifier::new("chilled", ModifierType::FixedAdd, Decimal::from(35)),
        ThermalModifier::new("pharma", ModifierType::Multiplier, Decimal::new(135, 2)),
    ];
    let subtotal = Decimal::new(2_750_125, 3);

    c.bench_function("hybrid_allocation", |b| {
        b.iter(|| black_box(allocate_hybrid(black_box(subtotal), &compartments, &modifiers, 1)))
    });
}

/// Benchmark: A single `/simulate` request through the router.
fn bench_simulate_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = simulate_body("syd_mel_coldline_2025", 12);

    c.bench_function("simulate_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/simulate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Batch of 100 simulations across both configured cards.
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let requests: Vec<String> = (0..100)
        .map(|i| {
            let card = if i % 2 == 0 {
                "syd_mel_coldline_2025"
            } else {
                "bne_syd_polar_2025"
            };
            simulate_body(card, 5 + i % 30)
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/simulate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate_rate_card,
    bench_resolve_break,
    bench_hybrid_allocation,
    bench_simulate_request,
    bench_batch_100,
);
criterion_main!(benches);
