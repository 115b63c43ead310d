use super::{AdapterError, FeishuMsgType, Platform, PlatformAdapter, PlatformConfig};
use serde_json::json;
use url::Url;

const WEBHOOK_HOST: &str = "open.feishu.cn";
const WEBHOOK_PATH: &str = "/open-apis/bot/v2/hook";

pub struct FeishuAdapter;

impl PlatformAdapter for FeishuAdapter {
    fn platform(&self) -> Platform {
        Platform::Feishu
    }

    fn format_message(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<serde_json::Value, AdapterError> {
        let msg_type = match config {
            PlatformConfig::Feishu { msg_type } => *msg_type,
            _ => {
                return Err(AdapterError::ConfigMismatch {
                    expected: Platform::Feishu,
                })
            }
        };

        let payload = match msg_type {
            FeishuMsgType::Text => json!({
                "msg_type": "text",
                "content": {
                    "text": content,
                }
            }),
            FeishuMsgType::Post => {
                let title = content.lines().next().unwrap_or(content);
                json!({
                    "msg_type": "post",
                    "content": {
                        "post": {
                            "zh_cn": {
                                "title": title,
                                "content": [[{
                                    "tag": "text",
                                    "text": content,
                                }]]
                            }
                        }
                    }
                })
            }
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
        PlatformConfig::Feishu {
            msg_type: FeishuMsgType::Text,
        }
    }

    // Feishu has no mention-all concept, so the preview is the content as-is
    fn message_preview(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<String, AdapterError> {
        match config {
            PlatformConfig::Feishu { .. } => Ok(content.to_string()),
            _ => Err(AdapterError::ConfigMismatch {
                expected: Platform::Feishu,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> FeishuAdapter {
        FeishuAdapter
    }

    #[test]
    fn it_formats_text_messages() {
        let payload = adapter()
            .format_message("Standup", &adapter().default_config())
            .unwrap();

        assert_eq!(payload["msg_type"], "text");
        assert_eq!(payload["content"]["text"], "Standup");
    }

    #[test]
    fn it_formats_rich_text_posts() {
        let config = PlatformConfig::Feishu {
            msg_type: FeishuMsgType::Post,
        };
        let payload = adapter().format_message("Standup\ndetails", &config).unwrap();

        assert_eq!(payload["msg_type"], "post");
        assert_eq!(payload["content"]["post"]["zh_cn"]["title"], "Standup");
        assert_eq!(
            payload["content"]["post"]["zh_cn"]["content"][0][0]["text"],
            "Standup\ndetails"
        );
    }

    #[test]
    fn it_validates_webhook_urls() {
        assert!(adapter()
            .validate_url("https://open.feishu.cn/open-apis/bot/v2/hook/abc-def"));
        assert!(!adapter().validate_url("https://open.feishu.cn/open-apis/other"));
        assert!(!adapter().validate_url("https://example.com/open-apis/bot/v2/hook/x"));
    }
}
