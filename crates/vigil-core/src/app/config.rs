//! Monitor configuration.
//!
//! Small value object: the pending-job deadline, and the queue-name template
//! with its `{env}` placeholder. Read from the environment at startup or
//! constructed directly in tests.

use crate::domain::{DEFAULT_TIMEOUT_HOURS, TimeoutPolicy};

const DEFAULT_QUEUE_TEMPLATE: &str = "check-verdicts-{env}";
const DEFAULT_ENVIRONMENT: &str = "dev";

/// Configuration surface of the monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Hours a pending job may age before it is forced to TIMEOUT.
    pub timeout_hours: i64,

    /// Queue-name template; `{env}` is replaced with `environment`.
    pub queue_name_template: String,

    /// Deployment environment name ("dev", "staging", "prod", ...).
    pub environment: String,
}

impl MonitorConfig {
    /// Read configuration from `VIGIL_TIMEOUT_HOURS`, `VIGIL_QUEUE_TEMPLATE`
    /// and `VIGIL_ENV`, falling back to defaults for anything unset or
    /// unparsable.
    pub fn from_env() -> Self {
        let timeout_hours = match std::env::var("VIGIL_TIMEOUT_HOURS") {
            Ok(raw) => match raw.parse::<i64>() {
                Ok(hours) if hours > 0 => hours,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_TIMEOUT_HOURS,
                        "VIGIL_TIMEOUT_HOURS is not a positive integer, using default"
                    );
                    DEFAULT_TIMEOUT_HOURS
                }
            },
            Err(_) => DEFAULT_TIMEOUT_HOURS,
        };

        Self {
            timeout_hours,
            queue_name_template: std::env::var("VIGIL_QUEUE_TEMPLATE")
                .unwrap_or_else(|_| DEFAULT_QUEUE_TEMPLATE.to_string()),
            environment: std::env::var("VIGIL_ENV")
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
        }
    }

    /// Render the queue name for this environment.
    pub fn queue_name(&self) -> String {
        self.queue_name_template.replace("{env}", &self.environment)
    }

    pub fn timeout_policy(&self) -> TimeoutPolicy {
        TimeoutPolicy::from_hours(self.timeout_hours)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            timeout_hours: DEFAULT_TIMEOUT_HOURS,
            queue_name_template: DEFAULT_QUEUE_TEMPLATE.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}
