mod webhook;

pub use webhook::{
    test_connection, ConnectionTestResult, DeliveryReport, INotifier, WebhookNotifier, USER_AGENT,
};
