//! Update sink interface and the in-process broadcast implementation.

use async_trait::async_trait;
use tokio::sync::broadcast;

use slotcast_core::{ObserverId, SlotId, UpdateKind};

/// Delivery target for the three distribution modes.
///
/// Delivery is best-effort: a sink must localize per-observer failures (a
/// viewer disconnecting mid-broadcast, a lagging consumer) and never fail
/// the command that produced the update. History has already logically
/// committed by the time a sink is invoked for a persisting update.
#[async_trait]
pub trait UpdateSink<A>: Send + Sync {
	/// Delivers to every current observer of `slot`. Invocations of this
	/// operation are paired 1:1 with a slot history mutation.
	async fn persist_and_broadcast(&self, slot: &SlotId, artifacts: &[A], kind: UpdateKind);

	/// Delivers to every current observer of `slot` with no persistence
	/// side effect anywhere.
	async fn broadcast_only(&self, slot: &SlotId, artifacts: &[A], kind: UpdateKind);

	/// Delivers to `observer` only, with no persistence side effect.
	async fn unicast(&self, slot: &SlotId, observer: &ObserverId, artifacts: &[A], kind: UpdateKind);
}

/// One delivered update as seen by an in-process observer.
#[derive(Debug, Clone)]
pub struct SlotUpdate<A> {
	/// Originating slot.
	pub slot: SlotId,
	/// How the observer should apply `artifacts`.
	pub kind: UpdateKind,
	/// Delivered artifacts, chronological for replays, single for live updates.
	pub artifacts: Vec<A>,
	/// Unicast target; `None` for broadcast deliveries.
	pub target: Option<ObserverId>,
}

impl<A> SlotUpdate<A> {
	/// Returns `true` when `observer` should apply this update.
	pub fn is_for(&self, observer: &ObserverId) -> bool {
		self.target.as_ref().is_none_or(|target| target == observer)
	}
}

/// In-process fan-out over a tokio broadcast channel.
///
/// Send errors are ignored: a slot may be mutated before any observer
/// attaches, and a receiver that lagged past its buffer is that observer's
/// delivery problem, not the producer's. Unicast updates are delivered on
/// the same channel carrying a `target`; observers filter with
/// [`SlotUpdate::is_for`].
pub struct BroadcastSink<A> {
	updates: broadcast::Sender<SlotUpdate<A>>,
}

impl<A> Clone for BroadcastSink<A> {
	fn clone(&self) -> Self {
		Self {
			updates: self.updates.clone(),
		}
	}
}

impl<A> BroadcastSink<A>
where
	A: Clone + Send + 'static,
{
	/// Creates a sink with the given per-observer buffer capacity.
	pub fn new(buffer: usize) -> Self {
		let (updates, _) = broadcast::channel(buffer.max(1));
		Self { updates }
	}

	/// Subscribes one observer to all subsequent deliveries.
	///
	/// A late attacher converges by first fetching the slot history and
	/// applying it as a single `Replace`, then consuming this stream.
	pub fn subscribe(&self) -> broadcast::Receiver<SlotUpdate<A>> {
		self.updates.subscribe()
	}

	/// Number of currently attached observers.
	pub fn observer_count(&self) -> usize {
		self.updates.receiver_count()
	}

	fn deliver(&self, update: SlotUpdate<A>) {
		let _ = self.updates.send(update);
	}
}

impl<A> Default for BroadcastSink<A>
where
	A: Clone + Send + 'static,
{
	fn default() -> Self {
		Self::new(128)
	}
}

#[async_trait]
impl<A> UpdateSink<A> for BroadcastSink<A>
where
	A: Clone + Send + Sync + 'static,
{
	async fn persist_and_broadcast(&self, slot: &SlotId, artifacts: &[A], kind: UpdateKind) {
		tracing::trace!(slot = slot.as_str(), kind = kind.as_str(), artifacts = artifacts.len(), "slot.sink.persist_broadcast");
		self.deliver(SlotUpdate {
			slot: slot.clone(),
			kind,
			artifacts: artifacts.to_vec(),
			target: None,
		});
	}

	async fn broadcast_only(&self, slot: &SlotId, artifacts: &[A], kind: UpdateKind) {
		tracing::trace!(slot = slot.as_str(), kind = kind.as_str(), artifacts = artifacts.len(), "slot.sink.broadcast");
		self.deliver(SlotUpdate {
			slot: slot.clone(),
			kind,
			artifacts: artifacts.to_vec(),
			target: None,
		});
	}

	async fn unicast(&self, slot: &SlotId, observer: &ObserverId, artifacts: &[A], kind: UpdateKind) {
		tracing::trace!(slot = slot.as_str(), observer = observer.as_str(), kind = kind.as_str(), "slot.sink.unicast");
		self.deliver(SlotUpdate {
			slot: slot.clone(),
			kind,
			artifacts: artifacts.to_vec(),
			target: Some(observer.clone()),
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn broadcast_reaches_all_subscribers() {
		let sink: BroadcastSink<&str> = BroadcastSink::new(8);
		let mut first = sink.subscribe();
		let mut second = sink.subscribe();
		let slot = SlotId::mint();

		sink.broadcast_only(&slot, &["a"], UpdateKind::Replace).await;

		for rx in [&mut first, &mut second] {
			let update = rx.recv().await.unwrap();
			assert_eq!(update.slot, slot);
			assert_eq!(update.artifacts, vec!["a"]);
			assert!(update.target.is_none());
		}
	}

	#[tokio::test]
	async fn unicast_carries_target() {
		let sink: BroadcastSink<&str> = BroadcastSink::new(8);
		let mut rx = sink.subscribe();
		let slot = SlotId::mint();
		let target = ObserverId::new("viewer-1").unwrap();
		let other = ObserverId::new("viewer-2").unwrap();

		sink.unicast(&slot, &target, &["a"], UpdateKind::Replace).await;

		let update = rx.recv().await.unwrap();
		assert!(update.is_for(&target));
		assert!(!update.is_for(&other));
	}

	#[tokio::test]
	async fn delivery_without_observers_is_not_an_error() {
		let sink: BroadcastSink<&str> = BroadcastSink::new(8);
		let slot = SlotId::mint();
		sink.persist_and_broadcast(&slot, &["a"], UpdateKind::Replace).await;
		assert_eq!(sink.observer_count(), 0);
	}
}
