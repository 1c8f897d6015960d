use anyhow::Result;
use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    utils::command::BotCommands,
};
use wyse_core::{
    batch::{analyze_batch, analyze_pair},
    helpers::bot_commands::Command,
    pairs::{CurrencyPair, major_pairs},
    report::{HOUSE_RULES, START_TEXT, format_failures, format_headlines, format_trend_summary},
};

use crate::{
    bot::helpers::{error_reply, reply_for_text},
    dependencies::BotDependencies,
    digest::dto::{ScheduleOutcome, job_name},
};

const NEWS_HEADLINES: usize = 6;

pub async fn handle_start(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, START_TEXT).await?;
    Ok(())
}

pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

pub async fn handle_rules(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HOUSE_RULES)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub async fn handle_forex_news(bot: Bot, msg: Message, bot_deps: BotDependencies) -> Result<()> {
    match bot_deps.market.news.latest_headlines(NEWS_HEADLINES).await {
        Ok(headlines) if headlines.is_empty() => {
            bot.send_message(msg.chat.id, "⚠️ No forex news now or NEWSAPI_KEY missing.")
                .await?;
        }
        Ok(headlines) => {
            bot.send_message(
                msg.chat.id,
                format_headlines("Latest Forex Headlines:", &headlines),
            )
            .parse_mode(ParseMode::Html)
            .await?;
        }
        Err(e) => {
            log::error!("News fetch failed for chat {}: {}", msg.chat.id.0, e);
            bot.send_message(msg.chat.id, error_reply(&e)).await?;
        }
    }
    Ok(())
}

pub async fn handle_trends(bot: Bot, msg: Message, bot_deps: BotDependencies) -> Result<()> {
    let pairs = major_pairs();
    bot.send_message(
        msg.chat.id,
        format!("⏳ Analyzing {} major pairs, this takes a minute…", pairs.len()),
    )
    .await?;

    let market = &bot_deps.market;
    let report = analyze_batch(market.quotes.as_ref(), &pairs, market.pacing).await;

    if !report.snapshots.is_empty() {
        bot.send_message(msg.chat.id, format_trend_summary(&report.snapshots))
            .parse_mode(ParseMode::Html)
            .await?;
    }
    if let Some(failures) = format_failures(&report.failures) {
        bot.send_message(msg.chat.id, failures)
            .parse_mode(ParseMode::Html)
            .await?;
    }
    Ok(())
}

pub async fn handle_trend(
    bot: Bot,
    msg: Message,
    args: &str,
    bot_deps: BotDependencies,
) -> Result<()> {
    let pair = match CurrencyPair::from_args(args) {
        Ok(pair) => pair,
        Err(e) => {
            bot.send_message(msg.chat.id, error_reply(&e)).await?;
            return Ok(());
        }
    };

    match analyze_pair(bot_deps.market.quotes.as_ref(), &pair).await {
        Ok(snapshot) => {
            bot.send_message(msg.chat.id, format_trend_summary(&[snapshot]))
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Err(e) => {
            log::warn!("Trend analysis failed for {}: {}", pair, e);
            bot.send_message(msg.chat.id, error_reply(&e)).await?;
        }
    }
    Ok(())
}

pub async fn handle_schedule_digest(
    bot: Bot,
    msg: Message,
    args: &str,
    bot_deps: BotDependencies,
) -> Result<()> {
    let tz = bot_deps.config.tz;
    let reply = match bot_deps.digests.schedule_for_chat(msg.chat.id, args, tz).await {
        Ok(ScheduleOutcome::Invalid(e)) => error_reply(&e),
        Ok(ScheduleOutcome::Scheduled { time, replaced }) => {
            let mut reply = format!(
                "✅ Daily digest set for {} ({}).",
                time, bot_deps.config.tz_name
            );
            if let Some(old) = replaced.filter(|old| *old != time) {
                reply.push_str(&format!(" Replaces the {} digest.", old));
            }
            reply
        }
        Err(e) => {
            log::error!("Failed to schedule digest for chat {}: {}", msg.chat.id.0, e);
            "⚠️ Couldn’t schedule the digest. Your previous digest, if any, is unchanged.".to_string()
        }
    };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

pub async fn handle_cancel_digest(bot: Bot, msg: Message, bot_deps: BotDependencies) -> Result<()> {
    let reply = match bot_deps.digests.cancel(&job_name(msg.chat.id)).await {
        Ok(true) => "🛑 Daily digest canceled.",
        Ok(false) => "No digest job set.",
        Err(e) => {
            log::error!("Failed to cancel digest for chat {}: {}", msg.chat.id.0, e);
            "⚠️ Couldn’t cancel the digest. Try again later."
        }
    };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

pub async fn handle_text(bot: Bot, msg: Message) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    bot.send_message(msg.chat.id, reply_for_text(text)).await?;
    Ok(())
}
