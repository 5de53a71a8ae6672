//! CDS Pricing Demo
//!
//! Books one single-name CDS trade, assembles scenario market data for
//! valuation date 2014-10-16, computes PV, parallel and bucketed IR01
//! and CS01 through the calculation engine, prints CSV and text reports
//! and finishes with an intra-curve cross-gamma of the trade's PV.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use risk_analytics::cross_gamma::CrossGammaCalculator;
use risk_analytics::sensitivity::{
    CurrencyParameterSensitivities, CurrencyParameterSensitivity,
};
use risk_core::market_data::curves::{CreditCurve, CurveName, NodalCurve};
use risk_core::market_data::RatesProvider;
use risk_core::types::{Currency, CurrencyAmount, Date};
use risk_engine::credit::measures::{present_value, PresentValuePricer, ONE_BASIS_POINT};
use risk_engine::credit::{
    Cds, CdsFunction, CdsTrade, FeeLeg, ReferenceInformation, Seniority, SingleNameReference,
    TradeId,
};
use risk_engine::function::CalculationFunction;
use risk_engine::market_data::{
    build_scenario_market_data, MapMarketDataSource, MarketDataFeed, MarketDataKey,
    MarketDataValue, ScenarioValue,
};
use risk_engine::measures::Measure;
use risk_engine::runner::run_measures;

mod report;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("cds_report=info".parse()?))
        .init();

    let valuation_date = Date::from_ymd(2014, 10, 16)?;
    tracing::info!("CDS pricing demo, valuation date {}", valuation_date);

    let reference = SingleNameReference::new("ACME Corp", Seniority::Senior, Currency::USD);
    let trade = sample_trade(&reference)?;
    let feed = MarketDataFeed::no_feed();
    let source = sample_source(&feed, &reference)?;

    // Declare requirements, assemble market data, surface any gaps
    let function = CdsFunction::new(PresentValuePricer);
    let requirements = function.requirements(&trade)?;
    let build =
        build_scenario_market_data(&requirements, &feed, &source, valuation_date, 1)?;
    for (id, failure) in build.single_value_failures() {
        tracing::warn!(%id, %failure, "market data gap");
    }
    let market = build.into_market_data();

    // Compute the five measures
    let measures = Measure::all();
    let reports = run_measures(&[trade], &measures, &market);
    for report in &reports {
        for (measure, outcome) in report.measures() {
            match outcome {
                Ok(results) => {
                    if let Some(value) = results.get(0) {
                        tracing::info!("{} is {}", measure, value);
                    }
                }
                Err(cause) => tracing::warn!("{} failed: {}", measure, cause),
            }
        }
    }

    println!("=== CSV Report ===");
    report::write_csv(&reports, std::io::stdout())?;
    println!("=== Text Report ===");
    print!("{}", report::render_text(&reports));

    // Intra-curve cross-gamma of the trade's PV on the USD discount curve
    let provider = sample_provider(valuation_date, &reference)?;
    let credit_curve = sample_credit_curve(&reference)?;
    let expanded = sample_trade(&reference)?.product().expand(valuation_date)?;

    let sensitivities_fn = move |p: &RatesProvider<f64>| -> CurrencyParameterSensitivities {
        pv_bucketed_sensitivities(p, &expanded, &credit_curve)
    };
    let gammas = CrossGammaCalculator::default()
        .calculate_cross_gamma_intra_curve(&provider, sensitivities_fn)?;
    for entry in gammas.iter() {
        tracing::info!(
            "cross-gamma {} [{}]: diagonal {:?}",
            entry.curve_name(),
            entry.currency(),
            entry.diagonal()
        );
    }

    Ok(())
}

fn sample_trade(reference: &SingleNameReference) -> Result<CdsTrade> {
    Ok(CdsTrade::new(
        TradeId::new("T-001"),
        Cds::new(
            FeeLeg::new(
                CurrencyAmount::new(10_000_000.0, Currency::USD),
                CurrencyAmount::new(50_000.0, Currency::USD),
            ),
            0.01,
            Date::from_ymd(2019, 12, 20)?,
            0.4,
            ReferenceInformation::SingleName(reference.clone()),
        )?,
    ))
}

fn sample_yield_curve() -> Result<NodalCurve<f64>> {
    Ok(NodalCurve::new(
        CurveName::new("USD Discount"),
        vec![
            "6M".into(),
            "1Y".into(),
            "2Y".into(),
            "5Y".into(),
            "10Y".into(),
        ],
        vec![0.5, 1.0, 2.0, 5.0, 10.0],
        vec![0.004, 0.006, 0.010, 0.016, 0.022],
    )?)
}

fn sample_credit_curve(reference: &SingleNameReference) -> Result<CreditCurve<f64>> {
    Ok(CreditCurve::new(
        CurveName::new(reference.credit_curve_id().as_str()),
        vec!["1Y".into(), "3Y".into(), "5Y".into(), "7Y".into()],
        vec![1.0, 3.0, 5.0, 7.0],
        vec![0.008, 0.011, 0.014, 0.016],
    )?)
}

fn sample_source(
    feed: &MarketDataFeed,
    reference: &SingleNameReference,
) -> Result<MapMarketDataSource> {
    Ok(MapMarketDataSource::new()
        .with_value(
            MarketDataKey::yield_curve(Currency::USD).to_market_data_id(feed.clone()),
            ScenarioValue::single(MarketDataValue::yield_curve(sample_yield_curve()?)),
        )
        .with_value(
            MarketDataKey::single_name_credit_curve(reference.clone())
                .to_market_data_id(feed.clone()),
            ScenarioValue::single(MarketDataValue::credit_curve(sample_credit_curve(
                reference,
            )?)),
        ))
}

fn sample_provider(
    valuation_date: Date,
    reference: &SingleNameReference,
) -> Result<RatesProvider<f64>> {
    Ok(RatesProvider::new(valuation_date)
        .with_discount_curve(Currency::USD, sample_yield_curve()?)
        .with_credit_curve(reference.credit_curve_id(), sample_credit_curve(reference)?))
}

// Bucketed PV sensitivity of the expanded trade to each discount curve's
// nodes, by one-basis-point bump and revalue.
fn pv_bucketed_sensitivities(
    provider: &RatesProvider<f64>,
    expanded: &risk_engine::credit::ExpandedCds,
    credit_curve: &CreditCurve<f64>,
) -> CurrencyParameterSensitivities {
    let mut result = CurrencyParameterSensitivities::empty();
    for (currency, curve) in provider.discount_curves() {
        let curve = curve.as_ref();
        let Ok(base) = present_value(expanded, curve, credit_curve) else {
            continue;
        };
        let mut gradient = Vec::with_capacity(curve.node_count());
        for node in 0..curve.node_count() {
            let mut bumped_values = curve.values().to_vec();
            bumped_values[node] += ONE_BASIS_POINT;
            let sensitivity = match curve.with_values(&bumped_values) {
                Ok(bumped) => present_value(expanded, &bumped, credit_curve)
                    .map(|pv| pv - base)
                    .unwrap_or(0.0),
                Err(_) => 0.0,
            };
            gradient.push(sensitivity);
        }
        // Keys are distinct per currency, so the combine cannot collide
        if let Ok(entry) = CurrencyParameterSensitivity::new(
            curve.name().clone(),
            curve.labels().to_vec(),
            *currency,
            gradient,
        ) {
            if let Ok(combined) =
                result.clone().combined_with(CurrencyParameterSensitivities::of(entry))
            {
                result = combined;
            }
        }
    }
    result
}
