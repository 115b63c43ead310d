use chrono::{DateTime, FixedOffset, TimeZone};
use pingbell_infra::{DeliveryReport, INotifier, ISys, PingbellContext};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Frozen clock so schedule matching in tests is deterministic
pub struct StaticTimeSys(pub DateTime<FixedOffset>);

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    fn get_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

// Monday 2021-02-22 09:00:00 UTC
pub fn monday_at_nine() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2021, 2, 22, 9, 0, 0)
        .unwrap()
}

#[derive(Debug, Clone)]
pub struct RecordedDelivery {
    pub url: String,
    pub headers: HashMap<String, String>,
    pub payload: serde_json::Value,
}

/// Scripted stand-in for the webhook delivery client. Responses are keyed
/// by URL; unknown URLs get the default report.
pub struct StubNotifier {
    default_report: DeliveryReport,
    scripted: Mutex<HashMap<String, DeliveryReport>>,
    pub deliveries: Mutex<Vec<RecordedDelivery>>,
}

impl StubNotifier {
    pub fn ok() -> Self {
        Self {
            default_report: DeliveryReport::delivered(200),
            scripted: Mutex::new(HashMap::new()),
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(self, url: &str, report: DeliveryReport) -> Self {
        self.scripted.lock().unwrap().insert(url.to_string(), report);
        self
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl INotifier for StubNotifier {
    async fn deliver(
        &self,
        url: &str,
        extra_headers: &HashMap<String, String>,
        payload: &serde_json::Value,
    ) -> DeliveryReport {
        self.deliveries.lock().unwrap().push(RecordedDelivery {
            url: url.to_string(),
            headers: extra_headers.clone(),
            payload: payload.clone(),
        });
        self.scripted
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| self.default_report.clone())
    }
}

/// In-memory context with a frozen clock and a scripted notifier
pub fn setup_test_context(
    now: DateTime<FixedOffset>,
    notifier: Arc<StubNotifier>,
) -> PingbellContext {
    let mut ctx = pingbell_infra::setup_context();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx.notifier = notifier;
    ctx
}
