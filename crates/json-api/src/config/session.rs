//! Session Config

use clap::Args;
use jiff::SignedDuration;

/// Shopper session settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Hours a session stays valid after login
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = 336)]
    pub session_ttl_hours: u32,
}

impl SessionConfig {
    /// Session lifetime as a duration.
    #[must_use]
    pub fn ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.session_ttl_hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttl_is_two_weeks() {
        let config = SessionConfig {
            session_ttl_hours: 336,
        };

        assert_eq!(config.ttl(), SignedDuration::from_hours(24 * 14));
    }
}
