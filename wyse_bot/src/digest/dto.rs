use chrono_tz::Tz;
use teloxide::types::ChatId;
use wyse_core::{error::FxError, helpers::schedule::DigestTime};

/// Registry key for a chat's digest. One job per chat.
pub fn job_name(chat_id: ChatId) -> String {
    format!("digest_{}", chat_id.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct DigestJob {
    pub name: String,
    pub chat_id: ChatId,
    pub time: DigestTime,
    pub tz: Tz,
}

impl DigestJob {
    pub fn new(chat_id: ChatId, time: DigestTime, tz: Tz) -> Self {
        Self {
            name: job_name(chat_id),
            chat_id,
            time,
            tz,
        }
    }
}

/// Result of a `/schedule_digest` request.
#[derive(Debug)]
pub enum ScheduleOutcome {
    /// The argument was rejected; the chat's existing job, if any, is untouched.
    Invalid(FxError),
    Scheduled {
        time: DigestTime,
        replaced: Option<DigestTime>,
    },
}
