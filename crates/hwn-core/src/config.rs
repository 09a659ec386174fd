use std::{env, fmt, fs, path::Path, time::Duration};

use crate::{domain::Recipient, errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed configuration for the notifier.
#[derive(Clone)]
pub struct Config {
    // Credentials
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: Recipient,

    // Review API
    pub endpoint: String,
    pub request_timeout: Duration,

    // Loop
    pub retry_period: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("retry_period", &self.retry_period)
            .finish()
    }
}

impl Config {
    /// Load from the process environment. Call [`load_dotenv`] first to pick
    /// up a `.env` file.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. All three credentials are checked
    /// before anything else is read.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        tracing::debug!("checking credentials");

        let practicum_token = required(&lookup, "PRACTICUM_TOKEN")?;
        let telegram_token = required(&lookup, "TELEGRAM_TOKEN")?;
        let raw_chat_id = required(&lookup, "TELEGRAM_CHAT_ID")?;
        let telegram_chat_id = Recipient::parse(&raw_chat_id).ok_or_else(|| {
            Error::Config(format!(
                "TELEGRAM_CHAT_ID must be a numeric chat id or @channelusername, got {raw_chat_id:?}"
            ))
        })?;

        tracing::debug!("all credentials are present");

        let endpoint = lookup("PRACTICUM_ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let retry_period = parse_secs(lookup("RETRY_PERIOD_SECS")).unwrap_or(DEFAULT_RETRY_PERIOD);
        let request_timeout =
            parse_secs(lookup("REQUEST_TIMEOUT_SECS")).unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            request_timeout,
            retry_period,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match lookup(key).and_then(non_empty) {
        Some(v) => Ok(v),
        None => {
            tracing::error!("required environment variable {key} is missing");
            Err(Error::Config(format!("{key} environment variable is required")))
        }
    }
}

fn parse_secs(v: Option<String>) -> Option<Duration> {
    v.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

/// Export `.env` from the working directory into the process environment.
/// Existing variables win.
pub fn load_dotenv() {
    load_dotenv_if_present(Path::new(".env"));
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim().trim_start_matches("export ").trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
