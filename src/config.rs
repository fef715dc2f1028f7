use anyhow::{bail, Context, Result};
use reqwest::Url;

const DEFAULT_CHANNEL_ID: &str = "1333486629406376091";
const DEFAULT_HISTORY_LIMIT: u8 = 50;
// Discord refuses larger pages
const MAX_HISTORY_LIMIT: u8 = 100;

pub struct Config {
    pub webhook_url: Url,
    pub log_webhook: Option<String>,
    pub pingcord: Option<PingcordSource>,
}

/// Where to look for Pingcord announcements. Only present when a bot token is set.
#[derive(Debug)]
pub struct PingcordSource {
    pub bot_token: String,
    pub channel_id: String,
    pub history_limit: u8,
}

pub fn get_config() -> Result<Config> {
    config_from(|key| std::env::var(key).ok())
}

fn config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    // Blank lines in cron or .env files leave variables set but empty
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let webhook_url = var("DISCORD_WEBHOOK_URL").context("DISCORD_WEBHOOK_URL is not set")?;
    let log_webhook = var("LIVE_CHECK_LOG_WEBHOOK");

    let pingcord = match var("DISCORD_BOT_TOKEN") {
        Some(bot_token) => Some(PingcordSource {
            bot_token,
            channel_id: var("PINGCORD_CHANNEL_ID").unwrap_or_else(|| DEFAULT_CHANNEL_ID.to_string()),
            history_limit: parse_history_limit(var("PINGCORD_HISTORY_LIMIT"))?,
        }),
        None => None,
    };

    Ok(Config {
        webhook_url: Url::parse(&webhook_url).context("DISCORD_WEBHOOK_URL is not a valid URL")?,
        log_webhook,
        pingcord,
    })
}

fn parse_history_limit(value: Option<String>) -> Result<u8> {
    let Some(value) = value else {
        return Ok(DEFAULT_HISTORY_LIMIT);
    };

    let limit = value
        .trim()
        .parse::<u8>()
        .with_context(|| format!("PINGCORD_HISTORY_LIMIT is not a number: {}", value))?;

    if limit == 0 || limit > MAX_HISTORY_LIMIT {
        bail!("PINGCORD_HISTORY_LIMIT must be between 1 and {}", MAX_HISTORY_LIMIT);
    }

    Ok(limit)
}
