//! Runtime settings read from the process environment.

use std::{env, time::Duration};

use chrono_tz::Tz;

use crate::error::{FxError, FxResult};

pub const DEFAULT_TZ_NAME: &str = "Africa/Lagos";
pub const DEFAULT_PACING_SECS: u64 = 12;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ALPHAVANTAGE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_NEWSAPI_URL: &str = "https://newsapi.org";

#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub alphavantage_api_key: Option<String>,
    pub newsapi_key: Option<String>,
    pub tz_name: String,
    pub tz: Tz,
    pub quote_pacing: Duration,
    pub request_timeout: Duration,
    pub alphavantage_url: String,
    pub newsapi_url: String,
}

impl Config {
    pub fn from_env() -> FxResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> FxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get("TELEGRAM_BOT_TOKEN").ok_or(FxError::ConfigMissing("TELEGRAM_BOT_TOKEN"))?;

        let tz_name = get("TZ_NAME").unwrap_or_else(|| DEFAULT_TZ_NAME.to_string());
        let tz = tz_name.parse::<Tz>().map_err(|e| FxError::ConfigInvalid {
            key: "TZ_NAME",
            reason: e.to_string(),
        })?;

        let secs = |key: &'static str, default: u64| match get(key) {
            Some(raw) => raw.parse::<u64>().map_err(|e| FxError::ConfigInvalid {
                key,
                reason: e.to_string(),
            }),
            None => Ok(default),
        };

        let pacing_secs = secs("QUOTE_PACING_SECS", DEFAULT_PACING_SECS)?;
        let timeout_secs = match secs("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)? {
            0 => {
                return Err(FxError::ConfigInvalid {
                    key: "REQUEST_TIMEOUT_SECS",
                    reason: "must be at least 1".to_string(),
                });
            }
            n => n,
        };

        Ok(Self {
            bot_token,
            alphavantage_api_key: get("ALPHAVANTAGE_API_KEY"),
            newsapi_key: get("NEWSAPI_KEY"),
            tz_name,
            tz,
            quote_pacing: Duration::from_secs(pacing_secs),
            request_timeout: Duration::from_secs(timeout_secs),
            alphavantage_url: get("ALPHAVANTAGE_URL")
                .unwrap_or_else(|| DEFAULT_ALPHAVANTAGE_URL.to_string()),
            newsapi_url: get("NEWSAPI_URL").unwrap_or_else(|| DEFAULT_NEWSAPI_URL.to_string()),
        })
    }
}
