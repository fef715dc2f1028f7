use crate::config::Config;
use crate::discord;
use std::panic::PanicHookInfo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub trait Logger: Send + Sync {
    fn start(&self) {
        self.info("Starting live check");
    }

    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);

    fn panic(&self, info: &PanicHookInfo) {
        self.error(&format!("Panicked: {}", info));
    }
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pingcord_live_check=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

pub fn get_logger(config: &Config) -> Box<dyn Logger> {
    match &config.log_webhook {
        Some(webhook) => Box::new(DiscordLogger {
            webhook: webhook.clone(),
        }),
        None => Box::new(ConsoleLogger),
    }
}

pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Logs to the console and mirrors every line to a Discord channel.
pub struct DiscordLogger {
    webhook: String,
}

impl DiscordLogger {
    fn forward(&self, prefix: &str, message: &str) {
        let result = discord::send_message(&self.webhook, &format!("{} {}", prefix, message));

        if let Err(e) = result {
            tracing::warn!("Unable to send log line to Discord: {:?}", e);
        }
    }
}

impl Logger for DiscordLogger {
    fn info(&self, message: &str) {
        ConsoleLogger.info(message);
        self.forward("ℹ️", message);
    }

    fn warning(&self, message: &str) {
        ConsoleLogger.warning(message);
        self.forward("⚠️", message);
    }

    fn error(&self, message: &str) {
        ConsoleLogger.error(message);
        self.forward("🚨", message);
    }
}
