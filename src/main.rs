use crate::config::{Config, PingcordSource};
use crate::log::Logger;
use crate::pingcord::{LiveClassifier, LiveStatus};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

mod config;
mod discord;
mod log;
mod pingcord;
mod report;

fn main() -> Result<()> {
    log::init_tracing();

    let config = config::get_config().context("Unable to load config")?;
    let log = log::get_logger(&config);

    let panic_log = log::get_logger(&config);
    std::panic::set_hook(Box::new(move |info| panic_log.panic(info)));

    log.start();

    let status = run(&config, discord::DISCORD_API_URL, Utc::now(), log.as_ref())?;

    log.info(&format!("Report sent: {}", status));

    Ok(())
}

/// Works out the live status, then posts the report for it to the configured webhook.
fn run(config: &Config, api_base: &str, now: DateTime<Utc>, log: &dyn Logger) -> Result<LiveStatus> {
    let status = match &config.pingcord {
        Some(source) => detect_live_status(source, api_base, now, log)?,
        None => {
            log.info("No bot token configured, sending the default report");
            LiveStatus::Undetected
        }
    };

    if let LiveStatus::NotFoundInHistory { scanned } = status {
        log.warning(&format!(
            "No live announcement in the last {} messages, Pingcord's wording may have changed",
            scanned
        ));
    }

    let report = report::build_report(&status, now);

    if let Err(e) = discord::execute_webhook(config.webhook_url.as_str(), &report) {
        log.error(&format!("Unable to send report: {:?}", e));
        return Err(e);
    }

    Ok(status)
}

fn detect_live_status(
    source: &PingcordSource,
    api_base: &str,
    now: DateTime<Utc>,
    log: &dyn Logger,
) -> Result<LiveStatus> {
    let classifier = LiveClassifier::new()?;

    let messages = discord::get_recent_messages(
        api_base,
        &source.bot_token,
        &source.channel_id,
        source.history_limit,
    );

    let messages = match messages {
        Ok(messages) => messages,
        Err(e) => {
            log.error(&format!(
                "Unable to read channel `{}`: {:?}",
                source.channel_id, e
            ));
            return Err(e);
        }
    };

    log.info(&format!(
        "Scanned {} messages in channel `{}`",
        messages.len(),
        source.channel_id
    ));

    Ok(classifier.status(&messages, now))
}
