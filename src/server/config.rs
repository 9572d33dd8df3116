//! Environment-based application configuration.

use chrono::Duration;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_SMTP_FROM: &str = "noreply@townhall.local";
const DEFAULT_COMMENT_MAX_DEPTH: u32 = 3;
const DEFAULT_EMAIL_CODE_TTL_SECONDS: i64 = 300;
const DEFAULT_EMAIL_CODE_MAX_ATTEMPTS: i32 = 5;

/// A named URL probed by the uptime monitor.
#[derive(Clone, Debug, PartialEq)]
pub struct UptimeTarget {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_addr: SocketAddr,
    pub log_json: bool,

    pub discord_webhook_url: Option<String>,

    /// `None` puts the email sender in no-op mode.
    pub smtp: Option<SmtpConfig>,
    pub smtp_from: String,
    pub alert_email_recipients: Vec<String>,

    pub uptime_targets: Vec<UptimeTarget>,

    pub comment_max_depth: u32,
    pub email_code_ttl: Duration,
    pub email_code_max_attempts: i32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let smtp = match optional("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: parsed_or("SMTP_PORT", DEFAULT_SMTP_PORT)?,
                username: optional("SMTP_USERNAME"),
                password: optional("SMTP_PASSWORD"),
            }),
            None => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            app_url: required("APP_URL")?,
            bind_addr: parsed_or("BIND_ADDR", parse_default_addr()?)?,
            log_json: optional("LOG_FORMAT")
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            discord_webhook_url: optional("DISCORD_WEBHOOK_URL"),
            smtp,
            smtp_from: optional("SMTP_FROM").unwrap_or_else(|| DEFAULT_SMTP_FROM.to_string()),
            alert_email_recipients: optional("ALERT_EMAIL_RECIPIENTS")
                .map(|value| split_list(&value))
                .unwrap_or_default(),
            uptime_targets: match optional("UPTIME_TARGETS") {
                Some(value) => parse_uptime_targets(&value)?,
                None => Vec::new(),
            },
            comment_max_depth: parsed_or("COMMENT_MAX_DEPTH", DEFAULT_COMMENT_MAX_DEPTH)?,
            email_code_ttl: code_ttl(parsed_or(
                "EMAIL_CODE_TTL_SECONDS",
                DEFAULT_EMAIL_CODE_TTL_SECONDS,
            )?)?,
            email_code_max_attempts: parsed_or(
                "EMAIL_CODE_MAX_ATTEMPTS",
                DEFAULT_EMAIL_CODE_MAX_ATTEMPTS,
            )?,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads a variable, treating empty values as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parsed_or<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

/// Verification code lifetime; must be positive and fit a `chrono::Duration`.
fn code_ttl(seconds: i64) -> Result<Duration, ConfigError> {
    Duration::try_seconds(seconds)
        .filter(|ttl| *ttl > Duration::zero())
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: "EMAIL_CODE_TTL_SECONDS".to_string(),
            value: seconds.to_string(),
        })
}

fn parse_default_addr() -> Result<SocketAddr, ConfigError> {
    DEFAULT_BIND_ADDR
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: "BIND_ADDR".to_string(),
            value: DEFAULT_BIND_ADDR.to_string(),
        })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `name=url` pairs separated by commas.
pub fn parse_uptime_targets(value: &str) -> Result<Vec<UptimeTarget>, ConfigError> {
    split_list(value)
        .into_iter()
        .map(|entry| {
            let invalid = || ConfigError::InvalidEnvVar {
                name: "UPTIME_TARGETS".to_string(),
                value: entry.clone(),
            };

            let (name, url) = entry.split_once('=').ok_or_else(invalid)?;
            let (name, url) = (name.trim(), url.trim());
            if name.is_empty() || url::Url::parse(url).is_err() {
                return Err(invalid());
            }

            Ok(UptimeTarget {
                name: name.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}
