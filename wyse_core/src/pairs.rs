use std::fmt;

use crate::error::{FxError, FxResult};

pub const TREND_USAGE: &str = "Usage: /trend EUR USD  or  /trend EURUSD";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.to_uppercase(),
            quote: quote.to_uppercase(),
        }
    }

    /// Parses the arguments of `/trend`: either a single six letter code
    /// (`EURUSD`) or two codes (`EUR USD`). Extra tokens are ignored.
    pub fn from_args(args: &str) -> FxResult<Self> {
        let tokens: Vec<&str> = args.split_whitespace().collect();

        let pair = match tokens.as_slice() {
            [code] if code.len() == 6 && code.is_ascii() => Self::new(&code[..3], &code[3..]),
            [base, quote, ..] => Self::new(base, quote),
            _ => return Err(FxError::InvalidArgument(TREND_USAGE.to_string())),
        };

        if !is_currency_code(&pair.base) || !is_currency_code(&pair.quote) {
            return Err(FxError::InvalidArgument(TREND_USAGE.to_string()));
        }

        Ok(pair)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

const MAJORS: [(&str, &str); 7] = [
    ("EUR", "USD"),
    ("GBP", "USD"),
    ("USD", "JPY"),
    ("USD", "CHF"),
    ("AUD", "USD"),
    ("USD", "CAD"),
    ("NZD", "USD"),
];

/// Majors analysed by `/trends`, in display order.
pub fn major_pairs() -> Vec<CurrencyPair> {
    MAJORS.iter().map(|(b, q)| CurrencyPair::new(b, q)).collect()
}

/// Majors included in the scheduled digest.
pub fn digest_pairs() -> Vec<CurrencyPair> {
    major_pairs().into_iter().take(4).collect()
}
