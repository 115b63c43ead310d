use super::{AdapterError, Platform, PlatformAdapter, PlatformConfig};
use serde_json::json;
use url::Url;

const WEBHOOK_HOST: &str = "hooks.slack.com";
const WEBHOOK_PATH: &str = "/services/";

// Fixed bot identity for every Slack delivery
const BOT_USERNAME: &str = "Pingbell";
const BOT_ICON_EMOJI: &str = ":bell:";

pub struct SlackAdapter;

impl PlatformAdapter for SlackAdapter {
    fn platform(&self) -> Platform {
        Platform::Slack
    }

    fn format_message(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<serde_json::Value, AdapterError> {
        match config {
            PlatformConfig::Slack => Ok(json!({
                "text": content,
                "username": BOT_USERNAME,
                "icon_emoji": BOT_ICON_EMOJI,
            })),
            _ => Err(AdapterError::ConfigMismatch {
                expected: Platform::Slack,
            }),
        }
    }

    fn validate_url(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => {
                parsed.host_str() == Some(WEBHOOK_HOST) && parsed.path().contains(WEBHOOK_PATH)
            }
            Err(_) => false,
        }
    }

    fn default_config(&self) -> PlatformConfig {
        PlatformConfig::Slack
    }

    fn message_preview(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<String, AdapterError> {
        match config {
            PlatformConfig::Slack => Ok(content.to_string()),
            _ => Err(AdapterError::ConfigMismatch {
                expected: Platform::Slack,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> SlackAdapter {
        SlackAdapter
    }

    #[test]
    fn it_formats_with_a_fixed_bot_identity() {
        let payload = adapter()
            .format_message("Standup", &PlatformConfig::Slack)
            .unwrap();

        assert_eq!(payload["text"], "Standup");
        assert_eq!(payload["username"], BOT_USERNAME);
        assert_eq!(payload["icon_emoji"], BOT_ICON_EMOJI);
    }

    #[test]
    fn it_validates_webhook_urls() {
        assert!(adapter().validate_url("https://hooks.slack.com/services/T000/B000/XXXX"));
        assert!(!adapter().validate_url("https://hooks.slack.com/other/T000"));
        assert!(!adapter().validate_url("https://slack.com/services/T000/B000/XXXX"));
    }
}
