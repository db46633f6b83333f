//! Per-IP rate limiting configuration.
//!
//! Three token buckets are configured, each keyed by client IP
//! (`X-Forwarded-For`, `X-Real-IP`, `Forwarded`, then the peer address):
//!
//! - **general**: every `/api` route (default: burst 100, one token every 9s,
//!   roughly 100 requests per 15 minutes)
//! - **feedback**: `POST /api/feedback` (default: burst 5, one token every
//!   720s, i.e. 5 submissions per hour)
//! - **auth**: `POST /api/auth/login` (default: burst 5, one token every 10s)
//!
//! # Environment Variables
//!
//! - `RATE_LIMIT_ENABLED` (default: true)
//! - `RATE_LIMIT_GENERAL_REPLENISH_SECS` / `RATE_LIMIT_GENERAL_BURST`
//! - `RATE_LIMIT_FEEDBACK_REPLENISH_SECS` / `RATE_LIMIT_FEEDBACK_BURST`
//! - `RATE_LIMIT_AUTH_REPLENISH_SECS` / `RATE_LIMIT_AUTH_BURST`
//!
//! # Example
//!
//! ```ignore
//! let config = RateLimitConfig::from_env();
//! if let Some(governor) = config.feedback_governor_config() {
//!     router = router.layer(GovernorLayer::new(Arc::new(governor)));
//! }
//! ```

use governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

use crate::{env_flag, env_or};

pub type IpGovernorConfig = GovernorConfig<SmartIpKeyExtractor, NoOpMiddleware>;

/// One token bucket: a token is added every `replenish_secs`, at most
/// `burst` tokens accumulate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bucket {
    pub replenish_secs: u64,
    pub burst: u32,
}

impl Bucket {
    fn from_env(prefix: &str, default: Bucket) -> Self {
        Self {
            replenish_secs: env_or(
                &format!("RATE_LIMIT_{prefix}_REPLENISH_SECS"),
                default.replenish_secs,
            ),
            burst: env_or(&format!("RATE_LIMIT_{prefix}_BURST"), default.burst),
        }
    }

    /// `None` when the bucket values are zero.
    fn governor_config(self) -> Option<IpGovernorConfig> {
        GovernorConfigBuilder::default()
            .per_second(self.replenish_secs)
            .burst_size(self.burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub general: Bucket,
    pub feedback: Bucket,
    pub auth: Bucket,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general: Bucket {
                replenish_secs: 9,
                burst: 100,
            },
            feedback: Bucket {
                replenish_secs: 720,
                burst: 5,
            },
            auth: Bucket {
                replenish_secs: 10,
                burst: 5,
            },
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_flag("RATE_LIMIT_ENABLED", defaults.enabled),
            general: Bucket::from_env("GENERAL", defaults.general),
            feedback: Bucket::from_env("FEEDBACK", defaults.feedback),
            auth: Bucket::from_env("AUTH", defaults.auth),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// `None` when rate limiting is disabled.
    #[must_use]
    pub fn general_governor_config(&self) -> Option<IpGovernorConfig> {
        self.enabled.then(|| self.general.governor_config()).flatten()
    }

    #[must_use]
    pub fn feedback_governor_config(&self) -> Option<IpGovernorConfig> {
        self.enabled.then(|| self.feedback.governor_config()).flatten()
    }

    #[must_use]
    pub fn auth_governor_config(&self) -> Option<IpGovernorConfig> {
        self.enabled.then(|| self.auth.governor_config()).flatten()
    }
}
