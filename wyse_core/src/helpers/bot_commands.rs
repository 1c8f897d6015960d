use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "snake_case",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Introduce the bot.")]
    Start,
    #[command(description = "Display this text.")]
    Help,
    #[command(description = "Show the house rules.")]
    Rules,
    #[command(description = "Latest forex headlines.", rename = "forexnews")]
    ForexNews,
    #[command(description = "Trend snapshot of the major pairs.")]
    Trends,
    #[command(description = "Analyze one pair, e.g. /trend EUR USD or /trend EURUSD.")]
    Trend(String),
    #[command(description = "Daily news + trends digest for this chat, e.g. /schedule_digest 08:30.")]
    ScheduleDigest(String),
    #[command(description = "Stop the daily digest for this chat.")]
    CancelDigest,
}
