use std::sync::Arc;

use tokio::sync::{broadcast, oneshot};

struct RawContext {
	// Dropped together with the last clone of the context, which is what
	// `Handler::cancel` waits for.
	_alive: oneshot::Sender<()>,
	cancel: broadcast::Receiver<()>,
}

/// The owning side of a [`Context`].
pub struct Handler {
	alive: oneshot::Receiver<()>,
	cancel_sender: broadcast::Sender<()>,
}

impl Handler {
	/// Cancels the context and waits for every clone of it to be dropped.
	pub async fn cancel(self) {
		drop(self.cancel_sender);

		let _ = self.alive.await;
	}
}

#[derive(Clone)]
pub struct Context(Arc<RawContext>);

impl Context {
	#[must_use]
	pub fn new() -> (Self, Handler) {
		let (alive, alive_recv) = oneshot::channel();
		let (cancel_sender, cancel) = broadcast::channel(1);

		(
			Self(Arc::new(RawContext { _alive: alive, cancel })),
			Handler {
				alive: alive_recv,
				cancel_sender,
			},
		)
	}

	/// Resolves once the handler cancels.
	pub async fn done(&self) {
		let _ = self.0.cancel.resubscribe().recv().await;
	}
}
