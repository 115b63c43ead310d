use super::custom::CustomAdapter;
use super::dingtalk::DingtalkAdapter;
use super::feishu::FeishuAdapter;
use super::slack::SlackAdapter;
use super::wechat_work::WechatWorkAdapter;
use super::{Platform, PlatformAdapter};

/// Fixed lookup table over the closed set of platform adapters, built once
/// at startup. Iteration order is the stable listing order for UIs.
pub struct PlatformRegistry {
    adapters: Vec<Box<dyn PlatformAdapter>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self {
            adapters: vec![
                Box::new(WechatWorkAdapter),
                Box::new(DingtalkAdapter),
                Box::new(FeishuAdapter),
                Box::new(SlackAdapter),
                Box::new(CustomAdapter),
            ],
        }
    }

    pub fn get(&self, platform: Platform) -> &dyn PlatformAdapter {
        self.adapters
            .iter()
            .find(|adapter| adapter.platform() == platform)
            .map(|adapter| adapter.as_ref())
            // The table covers every `Platform` variant by construction
            .expect("adapter registered for every platform")
    }

    pub fn supported_platforms(&self) -> Vec<Platform> {
        self.adapters.iter().map(|adapter| adapter.platform()).collect()
    }

    /// Matches `url` against every non-custom adapter's webhook signature.
    /// `None` means the caller must require an explicit platform choice;
    /// `custom` is never guessed.
    pub fn detect_from_url(&self, url: &str) -> Option<Platform> {
        self.adapters
            .iter()
            .filter(|adapter| adapter.platform() != Platform::Custom)
            .find(|adapter| adapter.validate_url(url))
            .map(|adapter| adapter.platform())
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
