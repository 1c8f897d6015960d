use super::types::*;
use crate::error::{FxError, FxResult};

pub const SMA_SHORT: usize = 50;
pub const SMA_LONG: usize = 200;
pub const RSI_PERIOD: usize = 14;
pub const MOMENTUM_LOOKBACK: usize = 5;

/// Closes needed for two consecutive complete rows (cross detection looks one bar back).
pub const MIN_BARS: usize = SMA_LONG + 1;

/// Substituted for an average loss of exactly zero.
const LOSS_FLOOR: f64 = 1e-9;

/// Simple moving average aligned with `prices`; `None` until `period` prices exist.
pub fn calculate_sma(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut sma_values = vec![None; prices.len()];
    if period == 0 {
        return sma_values;
    }

    for i in (period - 1)..prices.len() {
        let sum: f64 = prices[(i + 1 - period)..=i].iter().sum();
        sma_values[i] = Some(sum / period as f64);
    }

    sma_values
}

/// RSI aligned with `prices`, using exponential smoothing with alpha = 1/period.
///
/// Each average is normalised by the accumulated weight, so the first values are
/// not dragged toward zero by an empty history. The first value appears once
/// `period` price changes have been observed.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut rsi_values = vec![None; prices.len()];
    if period == 0 || prices.len() <= period {
        return rsi_values;
    }

    let decay = 1.0 - 1.0 / period as f64;
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    let mut weight = 0.0;

    for i in 1..prices.len() {
        let change = prices[i] - prices[i - 1];
        let (gain, loss) = if change > 0.0 { (change, 0.0) } else { (0.0, -change) };

        gain_sum = gain + decay * gain_sum;
        loss_sum = loss + decay * loss_sum;
        weight = 1.0 + decay * weight;

        if i >= period {
            rsi_values[i] = Some(rsi_from_averages(gain_sum / weight, loss_sum / weight));
        }
    }

    rsi_values
}

/// Converts smoothed gain/loss into an RSI in [0, 100].
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let avg_loss = if avg_loss == 0.0 { LOSS_FLOOR } else { avg_loss };
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Percent change of each close against the close `lookback` bars earlier.
pub fn calculate_momentum(prices: &[f64], lookback: usize) -> Vec<Option<f64>> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let earlier = *prices.get(i.checked_sub(lookback)?)?;
            if lookback == 0 || earlier == 0.0 {
                return None;
            }
            Some((price / earlier - 1.0) * 100.0)
        })
        .collect()
}

pub fn indicator_table(closes: &[f64]) -> Vec<IndicatorRow> {
    let sma50 = calculate_sma(closes, SMA_SHORT);
    let sma200 = calculate_sma(closes, SMA_LONG);
    let rsi14 = calculate_rsi(closes, RSI_PERIOD);
    let momentum5 = calculate_momentum(closes, MOMENTUM_LOOKBACK);

    (0..closes.len())
        .map(|i| IndicatorRow {
            sma50: sma50[i],
            sma200: sma200[i],
            rsi14: rsi14[i],
            momentum5: momentum5[i],
        })
        .collect()
}

/// Golden/death cross between two consecutive complete rows.
pub fn detect_crosses(prev: &CompleteRow, latest: &CompleteRow) -> Vec<CrossSignal> {
    let mut signals = Vec::new();

    if prev.sma50 <= prev.sma200 && latest.sma50 > latest.sma200 {
        signals.push(CrossSignal::GoldenCross);
    } else if prev.sma50 >= prev.sma200 && latest.sma50 < latest.sma200 {
        signals.push(CrossSignal::DeathCross);
    }

    signals
}

/// Snapshot of the most recent bar where every indicator is defined.
pub fn analyze_series(series: &PriceSeries) -> FxResult<IndicatorSnapshot> {
    let closes = series.closes();
    let complete: Vec<CompleteRow> = indicator_table(&closes)
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.complete(i))
        .collect();

    let (prev, latest) = match complete.as_slice() {
        [.., prev, latest] => (*prev, *latest),
        _ => {
            return Err(FxError::InsufficientData {
                needed: MIN_BARS,
                available: series.len(),
            });
        }
    };

    let bar = &series.bars()[latest.index];

    Ok(IndicatorSnapshot {
        pair: series.pair().clone(),
        price: bar.close,
        rsi14: latest.rsi14,
        rsi_state: RsiState::from_rsi(latest.rsi14),
        sma50: latest.sma50,
        sma200: latest.sma200,
        momentum5: latest.momentum5,
        tilt: Tilt::from_averages(latest.sma50, latest.sma200),
        signals: detect_crosses(&prev, &latest),
        as_of: bar.date,
    })
}
