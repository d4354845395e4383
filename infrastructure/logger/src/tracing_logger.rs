use business::domain::logger::Logger;
use business::domain::notifier::Notifier;
use tracing::{debug, error, info, warn};

/// Forwards business log lines to `tracing` under the storefront target.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "Storefront -- ", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "Storefront -- ", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "Storefront -- ", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "Storefront -- ", "{}", message);
    }
}

/// Headless notifier: user-facing messages end up in the log.
impl Notifier for TracingLogger {
    fn success(&self, message: &str) {
        info!(target: "Storefront -- ", notice = "success", "{}", message);
    }
    fn error(&self, message: &str) {
        warn!(target: "Storefront -- ", notice = "error", "{}", message);
    }
}
