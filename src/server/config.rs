use std::{net::SocketAddr, str::FromStr};

use chrono::Duration;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::reminder::{DispatchSettings, DueWindow},
};

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_SUBJECT_PREFIX: &str = "Fleet Reminder";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;
const DEFAULT_WINDOW_PAST_DAYS: i64 = 5;
const DEFAULT_WINDOW_FUTURE_DAYS: i64 = 2;
const DEFAULT_MAX_DELIVERY_ATTEMPTS: i32 = 3;
/// Upper bound for either side of the due window, in days.
const MAX_WINDOW_DAYS: i64 = 36_500;

pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,

    pub mail_api_url: String,
    pub mail_api_key: Option<String>,
    pub mail_from: String,
    pub mail_subject_prefix: String,

    pub reminder_poll_interval: std::time::Duration,
    pub reminder_window: DueWindow,
    pub reminder_max_attempts: i32,
    pub reminder_dispatch_on_startup: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from any variable source.
    ///
    /// # Returns
    /// - `Ok(Config)` - All variables present and in range
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset
    /// - `Err(ConfigError::InvalidEnvVar)` - A value does not parse or is out of range
    fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let poll_secs: u64 = parse_or(
            &lookup,
            "REMINDER_POLL_INTERVAL_SECS",
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        if poll_secs == 0 {
            return Err(invalid("REMINDER_POLL_INTERVAL_SECS", poll_secs));
        }

        let max_attempts: i32 = parse_or(
            &lookup,
            "REMINDER_MAX_DELIVERY_ATTEMPTS",
            DEFAULT_MAX_DELIVERY_ATTEMPTS,
        )?;
        if max_attempts < 1 {
            return Err(invalid("REMINDER_MAX_DELIVERY_ATTEMPTS", max_attempts));
        }

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(DEFAULT_BIND_ADDR))?,
            mail_api_url: required(&lookup, "MAIL_API_URL")?,
            mail_api_key: lookup("MAIL_API_KEY").filter(|key| !key.trim().is_empty()),
            mail_from: required(&lookup, "MAIL_FROM")?,
            mail_subject_prefix: lookup("MAIL_SUBJECT_PREFIX")
                .unwrap_or_else(|| DEFAULT_SUBJECT_PREFIX.to_string()),
            reminder_poll_interval: std::time::Duration::from_secs(poll_secs),
            reminder_window: DueWindow {
                past: window_days(
                    &lookup,
                    "REMINDER_WINDOW_PAST_DAYS",
                    DEFAULT_WINDOW_PAST_DAYS,
                )?,
                future: window_days(
                    &lookup,
                    "REMINDER_WINDOW_FUTURE_DAYS",
                    DEFAULT_WINDOW_FUTURE_DAYS,
                )?,
            },
            reminder_max_attempts: max_attempts,
            reminder_dispatch_on_startup: parse_or(&lookup, "REMINDER_DISPATCH_ON_STARTUP", true)?,
        })
    }

    /// Settings consumed by the reminder dispatcher.
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            window: self.reminder_window,
            max_attempts: self.reminder_max_attempts,
            subject_prefix: self.mail_subject_prefix.clone(),
        }
    }
}

fn required<L>(lookup: &L, name: &str) -> Result<String, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Parses an optional variable, falling back to `default` when unset.
fn parse_or<L, T>(lookup: &L, name: &str, default: T) -> Result<T, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

/// One side of the due window: a whole number of days in `0..=MAX_WINDOW_DAYS`.
fn window_days<L>(lookup: &L, name: &str, default: i64) -> Result<Duration, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    let days: i64 = parse_or(lookup, name, default)?;

    if !(0..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(invalid(name, days));
    }

    Duration::try_days(days).ok_or_else(|| invalid(name, days))
}

fn invalid(name: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
    }
}
