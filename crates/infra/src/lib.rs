mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{DeleteResult, IExecutionLogRepo, IReminderRepo, ReminderSubscription, Repos};
pub use services::*;
pub use system::ISys;
use system::RealSys;

use pingbell_domain::PlatformRegistry;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct PingbellContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
    pub platforms: Arc<PlatformRegistry>,
}

/// Will setup the infrastructure context given the environment.
///
/// The store gateway is the in-memory document collection set; a persistent
/// document store plugs in by implementing the same repo traits.
pub fn setup_context() -> PingbellContext {
    let config = Config::new();
    let notifier = WebhookNotifier::new(Duration::from_secs(config.webhook_timeout_secs));
    PingbellContext {
        repos: Repos::create_inmemory(),
        sys: Arc::new(RealSys {}),
        notifier: Arc::new(notifier),
        platforms: Arc::new(PlatformRegistry::new()),
        config,
    }
}
