use std::fmt;

use crate::error::{FxError, FxResult};

pub const SCHEDULE_USAGE: &str = "Usage: /schedule_digest HH:MM (24h, your local time)";
pub const SCHEDULE_INVALID: &str = "Invalid time. Example: /schedule_digest 08:30";

/// Time of day a digest fires, in the bot's configured timezone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigestTime {
    pub hour: u8,
    pub minute: u8,
}

impl DigestTime {
    pub fn new(hour: u8, minute: u8) -> FxResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(FxError::InvalidArgument(SCHEDULE_INVALID.to_string()));
        }
        Ok(Self { hour, minute })
    }

    /// Parses the arguments of `/schedule_digest`: a single `HH:MM` token.
    pub fn from_args(args: &str) -> FxResult<Self> {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        let token = match tokens.as_slice() {
            [token] if token.contains(':') => *token,
            _ => return Err(FxError::InvalidArgument(SCHEDULE_USAGE.to_string())),
        };

        let invalid = || FxError::InvalidArgument(SCHEDULE_INVALID.to_string());
        let (hh, mm) = token.split_once(':').ok_or_else(invalid)?;
        let hour = hh.parse::<u8>().map_err(|_| invalid())?;
        let minute = mm.parse::<u8>().map_err(|_| invalid())?;

        Self::new(hour, minute)
    }

    /// Six-field cron expression (seconds first) firing daily at this time.
    pub fn cron_expression(&self) -> String {
        format!("0 {} {} * * *", self.minute, self.hour)
    }
}

impl fmt::Display for DigestTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: FxError) -> String {
        match err {
            FxError::InvalidArgument(m) => m,
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_valid_times() {
        assert_eq!(DigestTime::from_args("08:30").unwrap(), DigestTime { hour: 8, minute: 30 });
        assert_eq!(DigestTime::from_args(" 0:00 ").unwrap(), DigestTime { hour: 0, minute: 0 });
        assert_eq!(DigestTime::from_args("23:59").unwrap().to_string(), "23:59");
        assert_eq!(DigestTime::from_args("7:5").unwrap().to_string(), "07:05");
    }

    #[test]
    fn test_out_of_range_rejected() {
        for args in ["25:61", "24:00", "12:60"] {
            assert_eq!(message(DigestTime::from_args(args).unwrap_err()), SCHEDULE_INVALID);
        }
    }

    #[test]
    fn test_malformed_rejected() {
        for args in ["ab:cd", "8:", ":30", "-1:30", "08:30:00"] {
            assert_eq!(message(DigestTime::from_args(args).unwrap_err()), SCHEDULE_INVALID);
        }
    }

    #[test]
    fn test_usage_when_shape_wrong() {
        for args in ["", "0830", "08:30 09:00"] {
            assert_eq!(message(DigestTime::from_args(args).unwrap_err()), SCHEDULE_USAGE);
        }
    }

    #[test]
    fn test_cron_expression() {
        let time = DigestTime::new(9, 5).unwrap();
        assert_eq!(time.cron_expression(), "0 5 9 * * *");
    }
}
