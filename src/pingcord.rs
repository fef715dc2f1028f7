use crate::discord::Message;
use crate::report;
use anyhow::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fmt::Formatter;

const LIVE_PATTERN: &str = r"(?i)is now live on youtube|youtube live|正在直播";
const VIDEO_PATTERN: &str = r"(?i)published a video|發布了影片|剛剛發佈了影片";

#[derive(Debug, Clone, PartialEq)]
pub enum LiveStatus {
    /// No channel history was consulted.
    Undetected,
    NotFoundInHistory { scanned: usize },
    LiveToday,
    DaysSinceLive(i64),
}

impl std::fmt::Display for LiveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LiveStatus::Undetected => write!(f, "no live announcement detected"),
            LiveStatus::NotFoundInHistory { scanned } => {
                write!(f, "no live announcement in the last {} messages", scanned)
            }
            LiveStatus::LiveToday => write!(f, "live today"),
            LiveStatus::DaysSinceLive(days) => write!(f, "{} days since last live", days),
        }
    }
}

pub struct LiveClassifier {
    live: Regex,
    video: Regex,
}

impl LiveClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            live: Regex::new(LIVE_PATTERN)?,
            video: Regex::new(VIDEO_PATTERN)?,
        })
    }

    /// Pingcord posts both uploads and livestreams to the same channel, so a message
    /// only counts if it looks like a livestream and not like an upload.
    pub fn is_live(&self, message: &Message) -> bool {
        let text = searchable_text(message);

        self.live.is_match(&text) && !self.video.is_match(&text)
    }

    /// `messages` must be ordered newest first, as Discord returns them.
    pub fn status(&self, messages: &[Message], now: DateTime<Utc>) -> LiveStatus {
        let Some(last_live) = messages.iter().find(|m| self.is_live(m)) else {
            return LiveStatus::NotFoundInHistory {
                scanned: messages.len(),
            };
        };

        match report::days_since(last_live.timestamp, now) {
            days if days <= 0 => LiveStatus::LiveToday,
            days => LiveStatus::DaysSinceLive(days),
        }
    }
}

fn searchable_text(message: &Message) -> String {
    let embeds = message
        .embeds
        .iter()
        .map(|embed| {
            [
                embed.title.as_deref(),
                embed.description.as_deref(),
                embed.footer.as_ref().map(|f| f.text.as_str()),
                embed.author.as_ref().map(|a| a.name.as_str()),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" ");

    // Fields of an embed run together, so a keyword may span title and description
    format!("{}\n{}", message.content.as_deref().unwrap_or_default(), embeds)
}
