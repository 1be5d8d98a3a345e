//! Process-wide settings read once at startup.

use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use when_engine::ReferenceContext;

use crate::error::ConfigError;
use crate::form::{EventForm, EventFormDefaults};

pub const TIMEZONE_VAR: &str = "JOEBOT_TIMEZONE";
pub const FORM_TIMEOUT_VAR: &str = "JOEBOT_FORM_TIMEOUT_SECS";

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;
pub const DEFAULT_FORM_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotConfig {
    /// Zone every date phrase is read in and every date is displayed in.
    pub timezone: Tz,
    /// How long an open event form waits for its submission.
    pub form_timeout: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            form_timeout: DEFAULT_FORM_TIMEOUT,
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Read configuration through `get` instead of the process environment,
    /// so tests never touch global state. Unset or blank values take defaults.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = get(TIMEZONE_VAR).filter(|v| !v.trim().is_empty()) {
            config.timezone = when_engine::parse_timezone(&raw)
                .map_err(|_| ConfigError::InvalidTimezone(raw.clone()))?;
        }

        if let Some(raw) = get(FORM_TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.form_timeout = Duration::from_secs(secs);
        }

        tracing::debug!(
            timezone = %config.timezone,
            form_timeout_secs = config.form_timeout.as_secs(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// The reference frame for one user-facing operation. Capture it once and
    /// pass the same value to prefill and to validation.
    pub fn context(&self, now: DateTime<Utc>) -> ReferenceContext {
        ReferenceContext::new(now, self.timezone)
    }

    /// Open an event form that waits `form_timeout` for its submission.
    pub fn event_form(&self, interaction_id: &str, defaults: EventFormDefaults) -> EventForm {
        EventForm::new(interaction_id, defaults, self.form_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults_when_unset() {
        let cfg = BotConfig::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg, BotConfig::default());
        assert_eq!(cfg.timezone, chrono_tz::America::Los_Angeles);
        assert_eq!(cfg.form_timeout, Duration::from_secs(600));
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            TIMEZONE_VAR => Some("Europe/Berlin".into()),
            FORM_TIMEOUT_VAR => Some("90".into()),
            _ => None,
        };
        let cfg = BotConfig::from_env_with(get).expect("cfg");
        assert_eq!(cfg.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(cfg.form_timeout, Duration::from_secs(90));
    }

    #[test]
    fn from_env_blank_values_take_defaults() {
        let cfg = BotConfig::from_env_with(|_| Some("  ".into())).expect("cfg");
        assert_eq!(cfg, BotConfig::default());
    }

    #[test]
    fn from_env_rejects_unknown_zone() {
        let get = |k: &str| (k == TIMEZONE_VAR).then(|| "Mars/Olympus".to_string());
        assert_eq!(
            BotConfig::from_env_with(get),
            Err(ConfigError::InvalidTimezone("Mars/Olympus".into()))
        );
    }

    #[test]
    fn from_env_rejects_bad_timeout() {
        for raw in ["0", "-5", "ten"] {
            let get = |k: &str| (k == FORM_TIMEOUT_VAR).then(|| raw.to_string());
            assert_eq!(
                BotConfig::from_env_with(get),
                Err(ConfigError::InvalidTimeout(raw.into()))
            );
        }
    }

    #[test]
    fn context_uses_configured_zone() {
        let cfg = BotConfig {
            timezone: chrono_tz::Asia::Tokyo,
            ..Default::default()
        };
        let now = Utc::now();
        let ctx = cfg.context(now);
        assert_eq!(ctx.timezone(), chrono_tz::Asia::Tokyo);
        assert_eq!(ctx.now(), now);
    }

    #[test]
    fn event_form_waits_configured_timeout() {
        let cfg = BotConfig {
            form_timeout: Duration::from_secs(90),
            ..Default::default()
        };
        let form = cfg.event_form("7", EventFormDefaults::default());
        assert_eq!(form.custom_id, "modal:7");
        assert_eq!(form.timeout(), Duration::from_secs(90));
        assert!(!form.accepts("modal:7", Duration::from_secs(120)));
    }
}
