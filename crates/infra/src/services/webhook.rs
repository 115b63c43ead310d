use pingbell_domain::{PlatformAdapter, PlatformConfig};
use std::collections::HashMap;
use std::time::Duration;

pub const USER_AGENT: &str = concat!("pingbell/", env!("CARGO_PKG_VERSION"));

const TEST_MESSAGE: &str = "Connection test from Pingbell. Your webhook is wired up correctly.";

/// Outcome of one webhook POST. Deliveries never raise: a timeout, a
/// connection error and a non-2xx response all fold into a failed report
/// so one bad endpoint cannot take down a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReport {
    pub success: bool,
    pub http_status: Option<u16>,
    pub error_message: Option<String>,
}

impl DeliveryReport {
    pub fn delivered(http_status: u16) -> Self {
        Self {
            success: true,
            http_status: Some(http_status),
            error_message: None,
        }
    }

    pub fn failed(http_status: Option<u16>, error_message: String) -> Self {
        Self {
            success: false,
            http_status,
            error_message: Some(error_message),
        }
    }
}

#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    /// POSTs `payload` as JSON to `url` with `Content-Type: application/json`
    /// plus any extra headers
    async fn deliver(
        &self,
        url: &str,
        extra_headers: &HashMap<String, String>,
        payload: &serde_json::Value,
    ) -> DeliveryReport;
}

pub struct WebhookNotifier {
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Webhook http client to build");
        Self { client }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn deliver(
        &self,
        url: &str,
        extra_headers: &HashMap<String, String>,
        payload: &serde_json::Value,
    ) -> DeliveryReport {
        let mut request = self.client.post(url).json(payload);
        for (name, value) in extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    DeliveryReport::delivered(status.as_u16())
                } else {
                    DeliveryReport::failed(
                        Some(status.as_u16()),
                        format!("Webhook responded with status {}", status),
                    )
                }
            }
            Err(e) => DeliveryReport::failed(
                e.status().map(|status| status.as_u16()),
                format!("Webhook request failed: {}", e),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub message: String,
    pub http_status: Option<u16>,
}

/// Sends one canned test message through the adapter to verify a webhook
/// before the reminder is saved. Always returns a result, never an error.
pub async fn test_connection(
    notifier: &dyn INotifier,
    adapter: &dyn PlatformAdapter,
    url: &str,
    config: &PlatformConfig,
) -> ConnectionTestResult {
    if !adapter.validate_url(url) {
        return ConnectionTestResult {
            success: false,
            message: format!(
                "The URL does not match the {} webhook format",
                adapter.platform()
            ),
            http_status: None,
        };
    }

    let payload = match adapter.format_message(TEST_MESSAGE, config) {
        Ok(payload) => payload,
        Err(e) => {
            return ConnectionTestResult {
                success: false,
                message: format!("Could not format the test message: {}", e),
                http_status: None,
            }
        }
    };

    let report = notifier
        .deliver(url, &config.extra_headers(), &payload)
        .await;
    if report.success {
        ConnectionTestResult {
            success: true,
            message: "Test message delivered".to_string(),
            http_status: report.http_status,
        }
    } else {
        ConnectionTestResult {
            success: false,
            message: report
                .error_message
                .unwrap_or_else(|| "Delivery failed".to_string()),
            http_status: report.http_status,
        }
    }
}
