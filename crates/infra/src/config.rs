use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Upper bound in seconds for a single webhook delivery request.
    /// A request that exceeds it is treated as a failed delivery; it must
    /// never stall the rest of the tick.
    pub webhook_timeout_secs: u64,
    /// Maximum number of execution history entries returned per query
    pub execution_history_limit: usize,
}

fn env_number<T: std::str::FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, raw, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            port: env_number("PORT", 5000),
            webhook_timeout_secs: env_number("WEBHOOK_TIMEOUT_SECS", 10),
            execution_history_limit: env_number("EXECUTION_HISTORY_LIMIT", 50),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
