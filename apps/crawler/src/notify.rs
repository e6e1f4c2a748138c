/// Outbound status messages. The production deployment points this at a chat
/// webhook; the shipped implementation writes to the log stream.
pub trait Notifier {
	fn notify(&self, message: &str);
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
	fn notify(&self, message: &str) {
		tracing::info!(target: "scheduled_jobs", "{message}");
	}
}
