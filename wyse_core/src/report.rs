//! Telegram-HTML rendering of snapshots, headlines and batch failures.

use teloxide::utils::html::escape;

use crate::{
    batch::PairFailure,
    news::dto::NewsHeadline,
    ta::types::{CrossSignal, IndicatorSnapshot},
};

pub const HOUSE_RULES: &str = "📌 <b>WyseForex House Rules</b>\n\
1️⃣ Be respectful.\n\
2️⃣ No spam/scams.\n\
3️⃣ Stay on topic (Forex-related).\n\
4️⃣ Help each other grow.\n\
5️⃣ DYOR. No financial advice.";

pub const START_TEXT: &str = "Hey! I’m your WyseForex bot 🤖\n\
• /rules – house rules\n\
• /forexnews – latest headlines\n\
• /trends – snapshot of majors\n\
• /trend EUR USD – analyze any pair\n\
• /schedule_digest HH:MM – daily news+trends (your chat)\n\
• /cancel_digest – stop the daily digest";

const MAX_FAILURES_SHOWN: usize = 5;

pub fn format_signals(signals: &[CrossSignal]) -> String {
    if signals.is_empty() {
        return "—".to_string();
    }
    signals
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_snapshot(s: &IndicatorSnapshot) -> String {
    format!(
        "<b>{}</b> @ <code>{:?}</code> (as of {})\n\
        • {} | RSI14 <code>{:.1}</code> ({})\n\
        • 5d momentum: {:+.2}%\n\
        • SMA50 <code>{:.5}</code> • SMA200 <code>{:.5}</code>\n\
        • Signals: {}\n",
        s.pair,
        s.price,
        s.as_of.format("%Y-%m-%d"),
        s.tilt,
        s.rsi14,
        s.rsi_state,
        s.momentum5,
        s.sma50,
        s.sma200,
        format_signals(&s.signals),
    )
}

pub fn format_trend_summary(snapshots: &[IndicatorSnapshot]) -> String {
    let mut lines = vec![
        "📈 <b>Forex Trend Analysis</b>".to_string(),
        "<i>Source: Alpha Vantage (daily closes)</i>".to_string(),
        String::new(),
    ];
    lines.extend(snapshots.iter().map(format_snapshot));
    lines.join("\n")
}

pub fn format_headlines(title: &str, headlines: &[NewsHeadline]) -> String {
    let items = headlines
        .iter()
        .map(|h| format!("• {}", escape(&h.title)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("📰 <b>{}</b>\n\n{}", title, items)
}

/// Trailing summary of failed pairs, `None` when every pair succeeded.
pub fn format_failures(failures: &[PairFailure]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }
    let lines = failures
        .iter()
        .take(MAX_FAILURES_SHOWN)
        .map(|f| format!("{}: {}", f.pair, escape(&f.error.to_string())))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("Some pairs failed:\n{}", lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::FxError,
        pairs::CurrencyPair,
        ta::types::{RsiState, Tilt},
    };
    use chrono::NaiveDate;

    fn snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            pair: CurrencyPair::new("EUR", "USD"),
            price: 1.0843,
            rsi14: 55.27,
            rsi_state: RsiState::Neutral,
            sma50: 1.081234567,
            sma200: 1.0712,
            momentum5: 0.254,
            tilt: Tilt::Bullish,
            signals: vec![],
            as_of: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[test]
    fn test_trend_summary_layout() {
        let text = format_trend_summary(&[snapshot()]);
        let expected = "📈 <b>Forex Trend Analysis</b>\n\
            <i>Source: Alpha Vantage (daily closes)</i>\n\
            \n\
            <b>EUR/USD</b> @ <code>1.0843</code> (as of 2024-05-01)\n\
            • ⬆️ Bullish tilt | RSI14 <code>55.3</code> (Neutral)\n\
            • 5d momentum: +0.25%\n\
            • SMA50 <code>1.08123</code> • SMA200 <code>1.07120</code>\n\
            • Signals: —\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_whole_number_price_keeps_decimal_point() {
        let mut s = snapshot();
        s.pair = CurrencyPair::new("USD", "JPY");
        s.price = 155.0;
        let text = format_trend_summary(&[s]);
        assert!(text.contains("<b>USD/JPY</b> @ <code>155.0</code>"), "{}", text);

        let mut s = snapshot();
        s.price = 1.1000;
        assert!(format_trend_summary(&[s]).contains("@ <code>1.1</code>"));
    }

    #[test]
    fn test_negative_momentum_and_signals() {
        let mut s = snapshot();
        s.momentum5 = -1.5;
        s.signals = vec![CrossSignal::DeathCross];
        let text = format_trend_summary(&[s]);
        assert!(text.contains("• 5d momentum: -1.50%"));
        assert!(text.contains("• Signals: Death cross (bearish)"));
    }

    #[test]
    fn test_summary_is_deterministic() {
        let items = [snapshot(), snapshot()];
        assert_eq!(format_trend_summary(&items), format_trend_summary(&items));
    }

    #[test]
    fn test_signals_joined() {
        let joined = format_signals(&[CrossSignal::GoldenCross, CrossSignal::DeathCross]);
        assert_eq!(joined, "Golden cross (bullish); Death cross (bearish)");
    }

    #[test]
    fn test_headlines_escaped() {
        let text = format_headlines(
            "Latest Forex Headlines:",
            &[NewsHeadline {
                title: "USD <up> & away".to_string(),
            }],
        );
        assert_eq!(
            text,
            "📰 <b>Latest Forex Headlines:</b>\n\n• USD &lt;up&gt; &amp; away"
        );
    }

    #[test]
    fn test_failures_capped_at_five() {
        let failures: Vec<PairFailure> = (0..7)
            .map(|_| PairFailure {
                pair: CurrencyPair::new("GBP", "USD"),
                error: FxError::NoData,
            })
            .collect();
        let text = format_failures(&failures).unwrap();
        assert!(text.starts_with("Some pairs failed:\n"));
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("GBP/USD: no data returned"));
        assert!(format_failures(&[]).is_none());
    }
}
