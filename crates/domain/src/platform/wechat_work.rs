use super::{AdapterError, Platform, PlatformAdapter, PlatformConfig, WechatWorkMsgType};
use serde_json::json;
use url::Url;

/// Marker WeChat Work uses to mention every member of a group chat
pub const MENTION_ALL_MARKER: &str = "@all";

const WEBHOOK_HOST: &str = "qyapi.weixin.qq.com";
const WEBHOOK_PATH: &str = "/cgi-bin/webhook/send";

pub struct WechatWorkAdapter;

impl WechatWorkAdapter {
    fn render_content(content: &str, mention_all: bool) -> String {
        if mention_all {
            format!("{}\n{}", MENTION_ALL_MARKER, content)
        } else {
            content.to_string()
        }
    }
}

impl PlatformAdapter for WechatWorkAdapter {
    fn platform(&self) -> Platform {
        Platform::WechatWork
    }

    fn format_message(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<serde_json::Value, AdapterError> {
        let (msg_type, mention_all) = match config {
            PlatformConfig::WechatWork {
                msg_type,
                mention_all,
            } => (*msg_type, *mention_all),
            _ => {
                return Err(AdapterError::ConfigMismatch {
                    expected: Platform::WechatWork,
                })
            }
        };

        let content = Self::render_content(content, mention_all);
        let payload = match msg_type {
            WechatWorkMsgType::Text => {
                let mentioned_list: Vec<&str> = if mention_all {
                    vec![MENTION_ALL_MARKER]
                } else {
                    Vec::new()
                };
                json!({
                    "msgtype": "text",
                    "text": {
                        "content": content,
                        "mentioned_list": mentioned_list,
                    }
                })
            }
            // The markdown variant has no mentioned_list, so the mention
            // marker only survives inside the content itself
            WechatWorkMsgType::Markdown => json!({
                "msgtype": "markdown",
                "markdown": {
                    "content": content,
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
        PlatformConfig::WechatWork {
            msg_type: WechatWorkMsgType::Text,
            mention_all: true,
        }
    }

    fn message_preview(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<String, AdapterError> {
        match config {
            PlatformConfig::WechatWork { mention_all, .. } => {
                Ok(Self::render_content(content, *mention_all))
            }
            _ => Err(AdapterError::ConfigMismatch {
                expected: Platform::WechatWork,
            }),
        }
    }
}
