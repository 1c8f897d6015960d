//! Multi-pair analysis with inter-request pacing.
//!
//! Pairs are fetched one after another. A failed pair is recorded and the batch
//! moves on; nothing short-circuits and an in-flight batch cannot be cancelled.

use std::time::Duration;

use crate::{
    error::FxError,
    pairs::CurrencyPair,
    quotes::handler::QuoteSource,
    ta::{indicators::analyze_series, types::IndicatorSnapshot},
};

/// Wait inserted between consecutive provider calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    None,
    Fixed(Duration),
}

impl Pacing {
    pub fn from_duration(delay: Duration) -> Self {
        if delay.is_zero() {
            Pacing::None
        } else {
            Pacing::Fixed(delay)
        }
    }

    pub async fn wait(&self) {
        if let Pacing::Fixed(delay) = self {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[derive(Debug)]
pub struct PairFailure {
    pub pair: CurrencyPair,
    pub error: FxError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub snapshots: Vec<IndicatorSnapshot>,
    pub failures: Vec<PairFailure>,
}

/// Fetches and analyses a single pair.
pub async fn analyze_pair<S>(source: &S, pair: &CurrencyPair) -> Result<IndicatorSnapshot, FxError>
where
    S: QuoteSource + ?Sized,
{
    let series = source.fetch_daily(pair).await?;
    analyze_series(&series)
}

pub async fn analyze_batch<S>(source: &S, pairs: &[CurrencyPair], pacing: Pacing) -> BatchReport
where
    S: QuoteSource + ?Sized,
{
    let mut report = BatchReport::default();

    for (i, pair) in pairs.iter().enumerate() {
        if i > 0 {
            pacing.wait().await;
        }

        match analyze_pair(source, pair).await {
            Ok(snapshot) => report.snapshots.push(snapshot),
            Err(error) => {
                log::warn!("Analysis failed for {}: {}", pair, error);
                report.failures.push(PairFailure {
                    pair: pair.clone(),
                    error,
                });
            }
        }
    }

    log::info!(
        "Batch finished: {} ok, {} failed",
        report.snapshots.len(),
        report.failures.len()
    );

    report
}
