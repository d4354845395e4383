use business::domain::notifier::Notifier;

/// Prints transient messages to stderr so stdout stays parseable.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        eprintln!("ok: {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}
