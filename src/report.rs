use crate::discord::{Embed, EmbedFooter, WebhookMessage};
use crate::pingcord::LiveStatus;
use chrono::{DateTime, Utc};
use chrono_tz::Asia::Taipei;

const REPORT_CONTENT: &str = "📺 今日直播紀錄檢查";

const RED: u32 = 0xff5555;
const GREEN: u32 = 0x55ff55;
const ORANGE: u32 = 0xffaa00;

pub fn footer_timestamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&Taipei)
        .format("Asia/Taipei %Y-%m-%d %H:%M")
        .to_string()
}

/// Whole calendar days in Taipei between the two instants. Negative if `last_live` is
/// on a later Taipei date than `now`.
pub fn days_since(last_live: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let from = last_live.with_timezone(&Taipei).date_naive();
    let to = now.with_timezone(&Taipei).date_naive();

    to.signed_duration_since(from).num_days()
}

pub fn build_report(status: &LiveStatus, now: DateTime<Utc>) -> WebhookMessage {
    let (title, description, color) = match status {
        LiveStatus::Undetected => (
            "尚未偵測到新的直播通知".to_string(),
            "今天 Pingcord 尚未推送 YouTube Live embed。".to_string(),
            RED,
        ),
        LiveStatus::NotFoundInHistory { scanned } => (
            "找不到直播通知".to_string(),
            format!(
                "最近 {} 則訊息裡找不到「直播通知」，可能要把抓取範圍加大，或 Pingcord 的直播字樣不一樣。",
                scanned
            ),
            RED,
        ),
        LiveStatus::LiveToday => (
            "今天有開台".to_string(),
            "Pingcord 今天有推送直播通知。".to_string(),
            GREEN,
        ),
        LiveStatus::DaysSinceLive(days) => (
            format!("已經第 {} 天沒開台", days),
            format!("小毛已經第 **{}** 天沒開台。", days),
            ORANGE,
        ),
    };

    WebhookMessage {
        username: None,
        content: REPORT_CONTENT.to_string(),
        embeds: vec![Embed {
            title: Some(title),
            description: Some(description),
            color: Some(color),
            footer: Some(EmbedFooter {
                text: footer_timestamp(now),
            }),
            author: None,
        }],
        allowed_mentions: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_undetected_report_payload() {
        let report = build_report(&LiveStatus::Undetected, utc("2024-03-01T12:34:56Z"));

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "content": "📺 今日直播紀錄檢查",
                "embeds": [{
                    "title": "尚未偵測到新的直播通知",
                    "description": "今天 Pingcord 尚未推送 YouTube Live embed。",
                    "color": 16733525,
                    "footer": { "text": "Asia/Taipei 2024-03-01 20:34" }
                }]
            })
        );
    }

    #[test]
    fn test_footer_uses_taipei_offset() {
        assert_eq!(
            footer_timestamp(utc("2024-03-01T00:00:00Z")),
            "Asia/Taipei 2024-03-01 08:00"
        );
        // Past 16:00 UTC the Taipei date has already rolled over
        assert_eq!(
            footer_timestamp(utc("2024-12-31T17:05:00Z")),
            "Asia/Taipei 2025-01-01 01:05"
        );
    }

    #[test]
    fn test_days_since_counts_taipei_dates() {
        // 23:30 and 00:30 Taipei, one hour apart but on different days
        assert_eq!(
            days_since(utc("2024-03-01T15:30:00Z"), utc("2024-03-01T16:30:00Z")),
            1
        );
        // Same Taipei day, nearly 24 hours apart
        assert_eq!(
            days_since(utc("2024-03-01T16:05:00Z"), utc("2024-03-02T15:55:00Z")),
            0
        );
        assert_eq!(
            days_since(utc("2024-02-27T04:00:00Z"), utc("2024-03-01T04:00:00Z")),
            3
        );
    }

    #[test]
    fn test_days_since_live_report() {
        let report = build_report(&LiveStatus::DaysSinceLive(4), utc("2024-03-01T12:00:00Z"));
        let embed = &report.embeds[0];

        assert_eq!(report.content, REPORT_CONTENT);
        assert_eq!(embed.title.as_deref(), Some("已經第 4 天沒開台"));
        assert_eq!(embed.description.as_deref(), Some("小毛已經第 **4** 天沒開台。"));
        assert_eq!(embed.color, Some(ORANGE));
    }

    #[test]
    fn test_not_found_report_mentions_scan_size() {
        let report = build_report(
            &LiveStatus::NotFoundInHistory { scanned: 50 },
            utc("2024-03-01T12:00:00Z"),
        );

        assert_eq!(report.embeds.len(), 1);
        assert!(report.embeds[0]
            .description
            .as_deref()
            .unwrap()
            .contains("最近 50 則訊息"));
    }
}
