use wyse_core::error::FxError;

/// The single place where a failure becomes chat text.
pub fn error_reply(err: &FxError) -> String {
    match err {
        FxError::InvalidArgument(usage) => usage.clone(),
        FxError::ProviderRateLimited(_) => {
            "⚠️ The quote provider is rate limiting us. Try again in a minute.".to_string()
        }
        FxError::Provider(message) => format!("⚠️ Error: {}", message),
        FxError::NoData => "⚠️ Error: no data returned for that pair.".to_string(),
        FxError::InsufficientData { needed, available } => format!(
            "⚠️ Error: not enough price history (need {} daily closes, got {}).",
            needed, available
        ),
        FxError::Http(_) => "⚠️ Couldn’t reach the data provider. Try again later.".to_string(),
        FxError::ConfigMissing(_) | FxError::ConfigInvalid { .. } => {
            "⚠️ The bot is not configured for this.".to_string()
        }
    }
}

pub fn reply_for_text(text: &str) -> &'static str {
    let text = text.to_lowercase();
    if text.contains("hello") {
        "👋 Hello! Welcome to WyseForex!"
    } else if text.contains("help") {
        "Try /forexnews, /trends, or /trend EUR USD"
    } else {
        "I’m here to help! /forexnews • /trends • /trend EUR USD"
    }
}
