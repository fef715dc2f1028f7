use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DISCORD_API_URL: &str = "https://discord.com/api/v10";

const USERNAME: &str = "live-check";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
}

/// A message as returned by the channel history endpoint. Only the fields needed to
/// recognise Pingcord announcements are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    pub timestamp: DateTime<Utc>,
}

pub fn send_message(webhook_url: &str, message: &str) -> Result<()> {
    execute_webhook(
        webhook_url,
        &WebhookMessage {
            username: Some(USERNAME.to_string()),
            content: message.to_string(),
            embeds: vec![],
            allowed_mentions: Some(json!({ "parse": ["users"] })),
        },
    )
}

pub fn execute_webhook(webhook_url: &str, body: &WebhookMessage) -> Result<()> {
    let client = reqwest::blocking::Client::new();

    client
        .post(webhook_url)
        .json(body)
        .send()?
        .error_for_status()?;

    Ok(())
}

/// Fetches the latest `limit` messages of a channel, newest first.
pub fn get_recent_messages(
    api_base: &str,
    bot_token: &str,
    channel_id: &str,
    limit: u8,
) -> Result<Vec<Message>> {
    let client = reqwest::blocking::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    let response = client
        .get(format!("{}/channels/{}/messages", api_base, channel_id))
        .query(&[("limit", limit)])
        .header(AUTHORIZATION, format!("Bot {}", bot_token))
        .send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        bail!("Discord API failed {}: {}", status, body);
    }

    Ok(response.json::<Vec<Message>>()?)
}
