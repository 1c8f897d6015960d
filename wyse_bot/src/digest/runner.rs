use anyhow::Result;
use teloxide::{
    prelude::*,
    types::{ChatId, ParseMode},
};
use wyse_core::{
    batch::{BatchReport, analyze_batch},
    news::dto::NewsHeadline,
    pairs::digest_pairs,
    report::{format_failures, format_headlines, format_trend_summary},
};

use crate::dependencies::MarketServices;

const DIGEST_HEADLINES: usize = 5;

pub fn headlines_message(headlines: &[NewsHeadline]) -> String {
    if headlines.is_empty() {
        "📰 <b>Daily Forex Headlines:</b>\n\nNo headlines.".to_string()
    } else {
        format_headlines("Daily Forex Headlines:", headlines)
    }
}

/// Trend summary (or a placeholder) followed by the failure summary, if any.
pub fn trend_messages(report: &BatchReport) -> Vec<String> {
    let mut messages = vec![if report.snapshots.is_empty() {
        "No trend data.".to_string()
    } else {
        format_trend_summary(&report.snapshots)
    }];
    messages.extend(format_failures(&report.failures));
    messages
}

const DIGEST_FAILED: &str = "⚠️ Daily digest failed.";

async fn send_html(bot: &Bot, chat_id: ChatId, text: String) -> Result<()> {
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

async fn deliver_digest(bot: &Bot, market: &MarketServices, chat_id: ChatId) -> Result<()> {
    let headlines = market.news.latest_headlines(DIGEST_HEADLINES).await?;
    send_html(bot, chat_id, headlines_message(&headlines)).await?;

    let report = analyze_batch(market.quotes.as_ref(), &digest_pairs(), market.pacing).await;
    for message in trend_messages(&report) {
        send_html(bot, chat_id, message).await?;
    }
    Ok(())
}

/// Sends the daily digest to `chat_id`. Every failure is handled here: the
/// routine stops at the first one and tells the chat the digest failed.
pub async fn run_digest(bot: &Bot, market: &MarketServices, chat_id: ChatId) {
    if let Err(e) = deliver_digest(bot, market, chat_id).await {
        log::error!("Daily digest failed for chat {}: {}", chat_id.0, e);
        if let Err(e) = bot.send_message(chat_id, DIGEST_FAILED).await {
            log::error!("Failed to report digest failure to chat {}: {}", chat_id.0, e);
        }
    }
}
