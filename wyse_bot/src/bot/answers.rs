use anyhow::Result;
use teloxide::{Bot, types::Message};
use wyse_core::helpers::bot_commands::Command;

use super::handler::{
    handle_cancel_digest, handle_forex_news, handle_help, handle_rules, handle_schedule_digest,
    handle_start, handle_trend, handle_trends,
};
use crate::dependencies::BotDependencies;

pub async fn answers(
    bot: Bot,
    msg: Message,
    cmd: Command,
    bot_deps: BotDependencies,
) -> Result<()> {
    log::debug!("Command {:?} in chat {}", cmd, msg.chat.id.0);

    match cmd {
        Command::Start => handle_start(bot, msg).await?,
        Command::Help => handle_help(bot, msg).await?,
        Command::Rules => handle_rules(bot, msg).await?,
        Command::ForexNews => handle_forex_news(bot, msg, bot_deps).await?,
        Command::Trends => handle_trends(bot, msg, bot_deps).await?,
        Command::Trend(args) => handle_trend(bot, msg, &args, bot_deps).await?,
        Command::ScheduleDigest(args) => handle_schedule_digest(bot, msg, &args, bot_deps).await?,
        Command::CancelDigest => handle_cancel_digest(bot, msg, bot_deps).await?,
    };
    Ok(())
}
