use std::sync::Arc;

use wyse_core::{
    batch::Pacing,
    config::Config,
    error::FxResult,
    news::handler::NewsClient,
    quotes::handler::{QuoteClient, QuoteSource},
};

use crate::digest::scheduler::{CronBackend, DigestScheduler};

/// Market data collaborators shared by command handlers and digest triggers.
#[derive(Clone)]
pub struct MarketServices {
    pub quotes: Arc<dyn QuoteSource>,
    pub news: NewsClient,
    pub pacing: Pacing,
}

impl MarketServices {
    pub fn from_config(config: &Config) -> FxResult<Self> {
        Ok(Self {
            quotes: Arc::new(QuoteClient::from_config(config)?),
            news: NewsClient::from_config(config)?,
            pacing: Pacing::from_duration(config.quote_pacing),
        })
    }
}

#[derive(Clone)]
pub struct BotDependencies {
    pub config: Arc<Config>,
    pub market: MarketServices,
    pub digests: DigestScheduler<CronBackend>,
}
