use crate::timer::Interval;
use futures_channel::oneshot;

/// A running, timer-driven style animation.
///
/// Animations start as soon as they are created and don't need to be awaited to make progress.
/// Dropping one stops it where it is.
#[derive(Debug)]
pub struct Animation {
	interval: Interval,
	finished: Option<oneshot::Receiver<()>>,
}

impl Animation {
	pub(crate) fn new(interval: Interval, finished: oneshot::Receiver<()>) -> Self {
		Self {
			interval,
			finished: Some(finished),
		}
	}

	/// Resolves once the animation has reached its end state.
	///
	/// Its timer is cleared by then.
	pub async fn wait(&mut self) {
		if let Some(finished) = self.finished.take() {
			finished.await.ok();
		}
	}

	#[must_use]
	pub fn is_running(&self) -> bool {
		self.interval.is_running()
	}
}
