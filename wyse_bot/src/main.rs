mod bot;
mod dependencies;
mod digest;
mod welcome;

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tokio_cron_scheduler::JobScheduler;
use wyse_core::config::Config;

use crate::{
    bot::handler_tree::handler_tree,
    dependencies::{BotDependencies, MarketServices},
    digest::scheduler::{CronBackend, DigestScheduler},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    log::info!("Starting wyse_bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if config.alphavantage_api_key.is_none() {
        log::warn!("ALPHAVANTAGE_API_KEY not set; trend commands will fail");
    }
    if config.newsapi_key.is_none() {
        log::warn!("NEWSAPI_KEY not set; news will be empty");
    }

    let bot = Bot::new(config.bot_token.clone());
    let market = MarketServices::from_config(&config)?;

    let scheduler = JobScheduler::new().await?;
    scheduler.start().await?;
    log::info!("Job scheduler started successfully");

    let digests = DigestScheduler::new(CronBackend::new(scheduler, bot.clone(), market.clone()));

    let bot_deps = BotDependencies {
        config: Arc::new(config),
        market,
        digests: digests.clone(),
    };

    Dispatcher::builder(bot, handler_tree())
        .dependencies(dptree::deps![bot_deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher stopped; dropping scheduled digests");
    digests.shutdown().await?;

    Ok(())
}
