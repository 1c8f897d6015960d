use chrono::NaiveDate;

use crate::pairs::CurrencyPair;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Daily bars for one pair, ascending by date with no duplicate dates.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pair: CurrencyPair,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Sorts the bars by date and collapses duplicate dates, keeping the bar seen last.
    pub fn new(pair: CurrencyPair, mut bars: Vec<PriceBar>) -> Self {
        bars.reverse();
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self { pair, bars }
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Indicator values for one bar. A field is `None` until its window has filled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorRow {
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub rsi14: Option<f64>,
    pub momentum5: Option<f64>,
}

/// A row where every indicator is defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteRow {
    pub index: usize,
    pub sma50: f64,
    pub sma200: f64,
    pub rsi14: f64,
    pub momentum5: f64,
}

impl IndicatorRow {
    pub fn complete(&self, index: usize) -> Option<CompleteRow> {
        Some(CompleteRow {
            index,
            sma50: self.sma50?,
            sma200: self.sma200?,
            rsi14: self.rsi14?,
            momentum5: self.momentum5?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiState {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiState {
    pub fn from_rsi(rsi: f64) -> Self {
        if rsi >= 70.0 {
            RsiState::Overbought
        } else if rsi <= 30.0 {
            RsiState::Oversold
        } else {
            RsiState::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tilt {
    Bullish,
    Bearish,
    Sideways,
}

impl Tilt {
    pub fn from_averages(sma50: f64, sma200: f64) -> Self {
        if sma50 > sma200 {
            Tilt::Bullish
        } else if sma50 < sma200 {
            Tilt::Bearish
        } else {
            Tilt::Sideways
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossSignal {
    GoldenCross,
    DeathCross,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub pair: CurrencyPair,
    pub price: f64,
    pub rsi14: f64,
    pub rsi_state: RsiState,
    pub sma50: f64,
    pub sma200: f64,
    /// Percent change against the close five bars earlier.
    pub momentum5: f64,
    pub tilt: Tilt,
    pub signals: Vec<CrossSignal>,
    pub as_of: NaiveDate,
}

impl std::fmt::Display for RsiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsiState::Overbought => write!(f, "Overbought"),
            RsiState::Oversold => write!(f, "Oversold"),
            RsiState::Neutral => write!(f, "Neutral"),
        }
    }
}

impl std::fmt::Display for Tilt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tilt::Bullish => write!(f, "⬆️ Bullish tilt"),
            Tilt::Bearish => write!(f, "⬇️ Bearish tilt"),
            Tilt::Sideways => write!(f, "➡️ Sideways"),
        }
    }
}

impl std::fmt::Display for CrossSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrossSignal::GoldenCross => write!(f, "Golden cross (bullish)"),
            CrossSignal::DeathCross => write!(f, "Death cross (bearish)"),
        }
    }
}
