//! Cross-gamma calculator benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use risk_analytics::cross_gamma::CrossGammaCalculator;
use risk_analytics::sensitivity::{
    CurrencyParameterSensitivities, CurrencyParameterSensitivity,
};
use risk_core::market_data::curves::{CurveName, NodalCurve};
use risk_core::market_data::RatesProvider;
use risk_core::types::{Currency, Date};

fn curve(name: &str, nodes: usize) -> NodalCurve<f64> {
    let labels = (0..nodes).map(|i| format!("{}Y", i + 1)).collect();
    let tenors = (0..nodes).map(|i| (i + 1) as f64).collect();
    let values = (0..nodes).map(|i| 0.01 + 0.001 * i as f64).collect();
    NodalCurve::new(CurveName::new(name), labels, tenors, values).unwrap()
}

fn provider(nodes: usize) -> RatesProvider<f64> {
    RatesProvider::new(Date::from_ymd(2014, 10, 16).unwrap())
        .with_discount_curve(Currency::USD, curve("USD Discount", nodes))
        .with_discount_curve(Currency::EUR, curve("EUR Discount", nodes))
}

// A cheap synthetic gradient: each node's sensitivity is quadratic in
// its own value and coupled to its neighbour.
fn sensitivities(p: &RatesProvider<f64>) -> CurrencyParameterSensitivities {
    let mut result = CurrencyParameterSensitivities::empty();
    for (currency, curve) in p.discount_curves() {
        let x = curve.values();
        let gradient: Vec<f64> = (0..x.len())
            .map(|i| {
                let neighbour = if i + 1 < x.len() { x[i + 1] } else { 0.0 };
                x[i] * x[i] + 0.5 * x[i] * neighbour
            })
            .collect();
        let entry = CurrencyParameterSensitivity::new(
            curve.name().clone(),
            curve.labels().to_vec(),
            *currency,
            gradient,
        )
        .unwrap();
        result = result
            .combined_with(CurrencyParameterSensitivities::of(entry))
            .unwrap();
    }
    result
}

fn bench_intra_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_gamma_intra_curve");
    for nodes in [5, 10, 20] {
        let p = provider(nodes);
        group.bench_function(format!("{}_nodes", nodes), |b| {
            b.iter(|| {
                let calculator = CrossGammaCalculator::default();
                black_box(
                    calculator
                        .calculate_cross_gamma_intra_curve(black_box(&p), sensitivities)
                        .unwrap(),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_intra_curve);
criterion_main!(benches);
