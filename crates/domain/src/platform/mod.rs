mod custom;
mod dingtalk;
mod feishu;
mod registry;
mod slack;
mod wechat_work;

pub use custom::CONTENT_TOKEN;
pub use registry::PlatformRegistry;
pub use wechat_work::MENTION_ALL_MARKER;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of chat platforms reminders can be delivered to.
/// Extending it is a versioned change, not a runtime plugin concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    WechatWork,
    Dingtalk,
    Feishu,
    Slack,
    Custom,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WechatWork => "wechat_work",
            Self::Dingtalk => "dingtalk",
            Self::Feishu => "feishu",
            Self::Slack => "slack",
            Self::Custom => "custom",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Platform: {0} is not supported")]
pub struct UnsupportedPlatformError(pub String);

impl FromStr for Platform {
    type Err = UnsupportedPlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wechat_work" => Ok(Self::WechatWork),
            "dingtalk" => Ok(Self::Dingtalk),
            "feishu" => Ok(Self::Feishu),
            "slack" => Ok(Self::Slack),
            "custom" => Ok(Self::Custom),
            _ => Err(UnsupportedPlatformError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WechatWorkMsgType {
    Text,
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DingtalkMsgType {
    Text,
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeishuMsgType {
    Text,
    Post,
}

fn default_true() -> bool {
    true
}

fn wechat_work_text() -> WechatWorkMsgType {
    WechatWorkMsgType::Text
}

fn dingtalk_text() -> DingtalkMsgType {
    DingtalkMsgType::Text
}

fn feishu_text() -> FeishuMsgType {
    FeishuMsgType::Text
}

/// Per-platform formatting options, aligned with the reminder's `platform`
/// field. Switching platform re-seeds this from the adapter's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum PlatformConfig {
    #[serde(rename_all = "camelCase")]
    WechatWork {
        #[serde(default = "wechat_work_text")]
        msg_type: WechatWorkMsgType,
        #[serde(default = "default_true")]
        mention_all: bool,
    },
    #[serde(rename_all = "camelCase")]
    Dingtalk {
        #[serde(default = "dingtalk_text")]
        msg_type: DingtalkMsgType,
        #[serde(default = "default_true")]
        at_all: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Feishu {
        #[serde(default = "feishu_text")]
        msg_type: FeishuMsgType,
    },
    Slack,
    #[serde(rename_all = "camelCase")]
    Custom {
        body_template: String,
        #[serde(default, skip_serializing_if = "HashMap::is_empty")]
        headers: HashMap<String, String>,
    },
}

impl PlatformConfig {
    pub fn platform(&self) -> Platform {
        match self {
            Self::WechatWork { .. } => Platform::WechatWork,
            Self::Dingtalk { .. } => Platform::Dingtalk,
            Self::Feishu { .. } => Platform::Feishu,
            Self::Slack => Platform::Slack,
            Self::Custom { .. } => Platform::Custom,
        }
    }

    /// Extra request headers for delivery. Only the custom platform carries
    /// user-defined headers.
    pub fn extra_headers(&self) -> HashMap<String, String> {
        match self {
            Self::Custom { headers, .. } => headers.clone(),
            _ => HashMap::new(),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum AdapterError {
    #[error("Config does not match platform: {expected}")]
    ConfigMismatch { expected: Platform },
    #[error("Invalid message template: {0}")]
    InvalidTemplate(String),
}

/// Platform-specific strategy for formatting and validating outbound
/// webhook messages. Pure: no adapter performs network I/O.
pub trait PlatformAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    /// Renders the platform-native JSON payload for `content`. Calling this
    /// twice with identical input yields identical output.
    fn format_message(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<serde_json::Value, AdapterError>;

    /// Whether `url` carries this platform's well-known webhook signature
    fn validate_url(&self, url: &str) -> bool;

    /// Seeds `platform_config` when a reminder is created or its platform
    /// is switched
    fn default_config(&self) -> PlatformConfig;

    /// Human-readable rendering of what will be delivered, mirroring
    /// `format_message`'s mention/prefix decisions exactly
    fn message_preview(&self, content: &str, config: &PlatformConfig)
        -> Result<String, AdapterError>;
}
