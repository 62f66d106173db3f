use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MESSAGE_DISMISS_SECS: i64 = 4;
/// Upper bound for the flash message lifetime (one day).
pub const MAX_MESSAGE_DISMISS_SECS: i64 = 86_400;
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Ho_Chi_Minh;

/// Page sizes offered by the rows-per-page selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub page_size: usize,
    pub message_dismiss_secs: i64,
    pub time_zone: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            message_dismiss_secs: DEFAULT_MESSAGE_DISMISS_SECS,
            time_zone: DEFAULT_TIME_ZONE,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("DASHBOARD_API_BASE_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let page_size = env::var("DASHBOARD_PAGE_SIZE")
            .ok()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let message_dismiss_secs = env::var("DASHBOARD_MESSAGE_DISMISS_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|secs| (0..=MAX_MESSAGE_DISMISS_SECS).contains(secs))
            .unwrap_or(DEFAULT_MESSAGE_DISMISS_SECS);

        let time_zone = match env::var("DASHBOARD_TIMEZONE") {
            Ok(name) => parse_time_zone(&name)?,
            Err(_) => DEFAULT_TIME_ZONE,
        };

        Ok(Config {
            api_base_url,
            page_size,
            message_dismiss_secs,
            time_zone,
        })
    }

    /// Out-of-range values fall back to the default lifetime.
    pub fn message_dismiss_after(&self) -> chrono::Duration {
        let secs = if (0..=MAX_MESSAGE_DISMISS_SECS).contains(&self.message_dismiss_secs) {
            self.message_dismiss_secs
        } else {
            DEFAULT_MESSAGE_DISMISS_SECS
        };
        chrono::Duration::seconds(secs)
    }
}

fn parse_time_zone(name: &str) -> anyhow::Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| anyhow!("Invalid DASHBOARD_TIMEZONE value: {}", name))
}
