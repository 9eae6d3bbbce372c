//! Cloneable producer port for one live slot.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use slotcast_core::{Destination, SlotCommand, SlotError, SlotId};

use crate::actor::SlotMsg;

/// Transform capability converting one producer value into an artifact.
///
/// Supplied at slot creation and invoked at the submission boundary, before
/// anything is enqueued; a failure surfaces as [`SlotError::Render`] and
/// leaves slot history untouched.
pub type RenderFn<V, A> = Arc<dyn Fn(V) -> Result<A, String> + Send + Sync>;

/// Externally held reference to one slot actor.
///
/// Clones address the same actor and any holder may submit commands; there
/// is no owning producer. Producers needing a strict cross-holder ordering
/// must coordinate externally (for example by awaiting one submission
/// before issuing the next from another task); the actor only guarantees
/// mutual exclusion of application and per-sender order.
pub struct SlotHandle<V, A> {
	id: SlotId,
	tx: mpsc::Sender<SlotMsg<A>>,
	render_fn: RenderFn<V, A>,
	show_placeholder_when_empty: bool,
}

impl<V, A> Clone for SlotHandle<V, A> {
	fn clone(&self) -> Self {
		Self {
			id: self.id.clone(),
			tx: self.tx.clone(),
			render_fn: Arc::clone(&self.render_fn),
			show_placeholder_when_empty: self.show_placeholder_when_empty,
		}
	}
}

impl<V, A> SlotHandle<V, A>
where
	A: Send + 'static,
{
	pub(crate) fn new(id: SlotId, tx: mpsc::Sender<SlotMsg<A>>, render_fn: RenderFn<V, A>, show_placeholder_when_empty: bool) -> Self {
		Self {
			id,
			tx,
			render_fn,
			show_placeholder_when_empty,
		}
	}

	/// Slot identity.
	pub fn id(&self) -> &SlotId {
		&self.id
	}

	/// Viewer hint: draw a placeholder while the history is empty.
	pub fn show_placeholder_when_empty(&self) -> bool {
		self.show_placeholder_when_empty
	}

	/// Replaces the slot contents with the rendered value.
	///
	/// Returns once the command has been applied and distributed: a
	/// subsequent [`Self::history`] call from any holder observes it.
	pub async fn render(&self, value: V, destination: Destination) -> Result<(), SlotError> {
		let artifact = (self.render_fn)(value).map_err(SlotError::Render)?;
		self.submit_persisting(SlotCommand::Replace(artifact, destination)).await
	}

	/// Appends the rendered value to the slot contents.
	///
	/// Same completion contract as [`Self::render`].
	pub async fn append(&self, value: V, destination: Destination) -> Result<(), SlotError> {
		let artifact = (self.render_fn)(value).map_err(SlotError::Render)?;
		self.submit_persisting(SlotCommand::Append(artifact, destination)).await
	}

	/// Resets the slot contents without waiting for application.
	///
	/// The clear is serialized into the same total order as every other
	/// command for this slot, but the caller gets no completion signal.
	pub fn clear(&self, destination: Destination) -> Result<(), SlotError> {
		let msg = SlotMsg::Apply {
			cmd: SlotCommand::Clear(destination),
			done: None,
		};
		match self.tx.try_send(msg) {
			Ok(()) => Ok(()),
			Err(mpsc::error::TrySendError::Full(_)) => {
				tracing::warn!(slot = self.id.as_str(), "slot command queue full, clear dropped");
				Err(SlotError::QueueFull)
			}
			Err(mpsc::error::TrySendError::Closed(_)) => Err(SlotError::Closed),
		}
	}

	/// Chronological snapshot of the persisted history, oldest first.
	///
	/// Serialized through the same queue as commands, so it never observes
	/// a partially applied command.
	pub async fn history(&self) -> Result<Vec<A>, SlotError> {
		let (reply, rx) = oneshot::channel();
		self.tx.send(SlotMsg::History { reply }).await.map_err(|_| SlotError::Closed)?;
		rx.await.map_err(|_| SlotError::Closed)
	}

	async fn submit_persisting(&self, cmd: SlotCommand<A>) -> Result<(), SlotError> {
		let (done, ack) = oneshot::channel();
		let msg = SlotMsg::Apply { cmd, done: Some(done) };
		self.tx.send(msg).await.map_err(|_| SlotError::Closed)?;
		// A caller that gives up here cannot retract the command: once
		// enqueued it is applied in arrival order regardless.
		ack.await.map_err(|_| SlotError::Closed)
	}
}
