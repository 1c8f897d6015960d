use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("missing required setting {0}")]
    ConfigMissing(&'static str),

    #[error("invalid setting {key}: {reason}")]
    ConfigInvalid { key: &'static str, reason: String },

    #[error("provider rate limit: {0}")]
    ProviderRateLimited(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("no data returned")]
    NoData,

    #[error("not enough history: need {needed} bars, got {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type FxResult<T> = Result<T, FxError>;
