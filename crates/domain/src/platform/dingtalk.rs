use super::wechat_work::MENTION_ALL_MARKER;
use super::{AdapterError, DingtalkMsgType, Platform, PlatformAdapter, PlatformConfig};
use serde_json::json;
use url::Url;

const WEBHOOK_HOST: &str = "oapi.dingtalk.com";
const WEBHOOK_PATH: &str = "/robot/send";

pub struct DingtalkAdapter;

impl DingtalkAdapter {
    fn markdown_title(title: &Option<String>, content: &str) -> String {
        match title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => content.lines().next().unwrap_or(content).to_string(),
        }
    }
}

impl PlatformAdapter for DingtalkAdapter {
    fn platform(&self) -> Platform {
        Platform::Dingtalk
    }

    fn format_message(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<serde_json::Value, AdapterError> {
        let (msg_type, at_all, title) = match config {
            PlatformConfig::Dingtalk {
                msg_type,
                at_all,
                title,
            } => (*msg_type, *at_all, title),
            _ => {
                return Err(AdapterError::ConfigMismatch {
                    expected: Platform::Dingtalk,
                })
            }
        };

        let payload = match msg_type {
            DingtalkMsgType::Text => json!({
                "msgtype": "text",
                "text": {
                    "content": content,
                },
                "at": {
                    "isAtAll": at_all,
                }
            }),
            DingtalkMsgType::Markdown => json!({
                "msgtype": "markdown",
                "markdown": {
                    "title": Self::markdown_title(title, content),
                    "text": content,
                },
                "at": {
                    "isAtAll": at_all,
                }
            }),
        };
        Ok(payload)
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
        PlatformConfig::Dingtalk {
            msg_type: DingtalkMsgType::Text,
            at_all: true,
            title: None,
        }
    }

    /// DingTalk mentions everyone through the `at.isAtAll` flag rather than
    /// a content marker; the preview surfaces that decision as a prefix so
    /// the UI shows exactly whether the group will be pinged.
    fn message_preview(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<String, AdapterError> {
        match config {
            PlatformConfig::Dingtalk { at_all, .. } => {
                if *at_all {
                    Ok(format!("{}\n{}", MENTION_ALL_MARKER, content))
                } else {
                    Ok(content.to_string())
                }
            }
            _ => Err(AdapterError::ConfigMismatch {
                expected: Platform::Dingtalk,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> DingtalkAdapter {
        DingtalkAdapter
    }

    #[test]
    fn it_sets_at_all_on_text_messages() {
        let payload = adapter()
            .format_message("Standup", &adapter().default_config())
            .unwrap();

        assert_eq!(payload["msgtype"], "text");
        assert_eq!(payload["text"]["content"], "Standup");
        assert_eq!(payload["at"]["isAtAll"], true);
    }

    #[test]
    fn it_formats_markdown_with_a_title() {
        let config = PlatformConfig::Dingtalk {
            msg_type: DingtalkMsgType::Markdown,
            at_all: false,
            title: Some("Daily".into()),
        };
        let payload = adapter().format_message("# Standup\ndetails", &config).unwrap();

        assert_eq!(payload["msgtype"], "markdown");
        assert_eq!(payload["markdown"]["title"], "Daily");
        assert_eq!(payload["markdown"]["text"], "# Standup\ndetails");
        assert_eq!(payload["at"]["isAtAll"], false);
    }

    #[test]
    fn it_falls_back_to_the_first_content_line_as_title() {
        let config = PlatformConfig::Dingtalk {
            msg_type: DingtalkMsgType::Markdown,
            at_all: true,
            title: None,
        };
        let payload = adapter().format_message("Standup\ndetails", &config).unwrap();

        assert_eq!(payload["markdown"]["title"], "Standup");
    }

    #[test]
    fn preview_mirrors_the_at_all_decision() {
        let preview = adapter()
            .message_preview("Standup", &adapter().default_config())
            .unwrap();
        assert!(preview.starts_with(MENTION_ALL_MARKER));

        let quiet = PlatformConfig::Dingtalk {
            msg_type: DingtalkMsgType::Text,
            at_all: false,
            title: None,
        };
        assert_eq!(adapter().message_preview("Standup", &quiet).unwrap(), "Standup");
    }

    #[test]
    fn it_validates_webhook_urls() {
        assert!(adapter().validate_url("https://oapi.dingtalk.com/robot/send?access_token=x"));
        assert!(!adapter().validate_url("https://hooks.slack.com/services/T/B/X"));
        assert!(!adapter().validate_url("https://oapi.dingtalk.com/gettoken"));
    }
}
