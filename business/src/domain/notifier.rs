/// Transient user-facing messages (toasts in a browser, stderr lines in a terminal).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}
