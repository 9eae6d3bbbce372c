//! The per-slot serialized actor.
//!
//! One tokio task owns one [`SlotState`] and applies commands strictly one
//! at a time off a bounded queue. Producers see two completion contracts:
//! blocking submissions carry an ack channel that fires only after the
//! state mutation and the sink call, fire-and-forget submissions carry
//! none. Both travel the same queue, so every command lands in one total
//! order per slot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use slotcast_core::{Destination, SlotCommand, SlotId, SlotState, UpdateKind};

use crate::handle::{RenderFn, SlotHandle};
use crate::sink::UpdateSink;

/// Message protocol into one slot actor task.
pub(crate) enum SlotMsg<A> {
	/// Apply one command. `done` is `Some` for blocking submissions and is
	/// acked after the state mutation and the distribution call.
	Apply {
		cmd: SlotCommand<A>,
		done: Option<oneshot::Sender<()>>,
	},
	/// Snapshot the persisted history.
	History { reply: oneshot::Sender<Vec<A>> },
}

/// Construction options for one slot.
#[derive(Debug, Clone)]
pub struct SlotConfig {
	/// Bounded command queue capacity.
	pub queue_capacity: usize,
	/// Viewer hint: draw a placeholder while the history is empty. The
	/// engine itself never reads this.
	pub show_placeholder_when_empty: bool,
}

impl Default for SlotConfig {
	fn default() -> Self {
		Self {
			queue_capacity: 128,
			show_placeholder_when_empty: true,
		}
	}
}

/// Shutdown mode for one slot actor.
#[derive(Debug, Clone, Copy)]
pub enum ShutdownMode {
	/// Cancel immediately; queued commands may be discarded.
	Immediate,
	/// Drain already-queued commands, then join with a deadline.
	Graceful {
		/// Deadline for the drain and join.
		timeout: Duration,
	},
}

/// Shutdown outcome for one slot actor.
#[derive(Debug, Clone, Copy)]
pub struct ShutdownReport {
	completed: bool,
	timed_out: bool,
}

impl ShutdownReport {
	/// Returns `true` when the actor task fully terminated.
	pub fn completed(&self) -> bool {
		self.completed
	}

	/// Returns `true` when a graceful deadline elapsed first.
	pub fn timed_out(&self) -> bool {
		self.timed_out
	}
}

/// Host-owned teardown lever for one slot actor.
///
/// Handles cannot stop the actor: the guard (or dropping it) is the only
/// terminator, matching a slot lifecycle owned by the hosting session.
pub struct SlotGuard {
	id: SlotId,
	cancel: CancellationToken,
	drain: CancellationToken,
	task: Option<JoinHandle<()>>,
}

impl SlotGuard {
	/// Identity of the guarded slot.
	pub fn id(&self) -> &SlotId {
		&self.id
	}

	/// Shuts the actor down, consuming the guard.
	pub async fn shutdown(mut self, mode: ShutdownMode) -> ShutdownReport {
		let Some(task) = self.task.take() else {
			return ShutdownReport {
				completed: true,
				timed_out: false,
			};
		};
		match mode {
			ShutdownMode::Immediate => {
				self.cancel.cancel();
				let _ = task.await;
				ShutdownReport {
					completed: true,
					timed_out: false,
				}
			}
			ShutdownMode::Graceful { timeout } => {
				self.drain.cancel();
				match tokio::time::timeout(timeout, task).await {
					Ok(_) => ShutdownReport {
						completed: true,
						timed_out: false,
					},
					Err(_) => {
						// Deadline elapsed mid-drain; fall back to cancel.
						// The detached task exits on the next select.
						self.cancel.cancel();
						ShutdownReport {
							completed: false,
							timed_out: true,
						}
					}
				}
			}
		}
	}
}

impl Drop for SlotGuard {
	fn drop(&mut self) {
		if self.task.is_some() {
			self.cancel.cancel();
		}
	}
}

/// Creates one live slot: mints an identity, spawns the actor task, and
/// returns the host's guard plus the first producer handle.
///
/// `render` converts producer values into artifacts before a command is
/// enqueued; `sink` receives every distributed update. Handles may be
/// cloned freely; all clones address the same actor.
pub fn spawn_slot<V, A>(config: SlotConfig, render: RenderFn<V, A>, sink: Arc<dyn UpdateSink<A>>) -> (SlotGuard, SlotHandle<V, A>)
where
	A: Clone + Send + Sync + 'static,
{
	let id = SlotId::mint();
	let (tx, rx) = mpsc::channel(config.queue_capacity);
	let cancel = CancellationToken::new();
	let drain = CancellationToken::new();

	tracing::trace!(slot = id.as_str(), capacity = config.queue_capacity, "slot.spawn");
	let task = tokio::spawn(run_slot(id.clone(), rx, sink, cancel.clone(), drain.clone()));

	let handle = SlotHandle::new(id.clone(), tx, render, config.show_placeholder_when_empty);
	let guard = SlotGuard {
		id,
		cancel,
		drain,
		task: Some(task),
	};
	(guard, handle)
}

/// Why one slot actor's loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotExit {
	Drained,
	Cancelled,
	PortsClosed,
}

async fn run_slot<A>(
	id: SlotId,
	mut rx: mpsc::Receiver<SlotMsg<A>>,
	sink: Arc<dyn UpdateSink<A>>,
	cancel: CancellationToken,
	drain: CancellationToken,
) where
	A: Clone + Send + Sync + 'static,
{
	let mut state = SlotState::new();
	let exit = loop {
		let msg = tokio::select! {
			biased;
			_ = cancel.cancelled() => break SlotExit::Cancelled,
			_ = drain.cancelled() => {
				// Graceful teardown: apply what is already queued, then stop.
				// Commands racing in behind the drain signal may be dropped.
				while let Ok(msg) = rx.try_recv() {
					step(&id, &mut state, sink.as_ref(), msg).await;
				}
				break SlotExit::Drained;
			}
			msg = rx.recv() => {
				let Some(msg) = msg else {
					break SlotExit::PortsClosed;
				};
				msg
			}
		};
		step(&id, &mut state, sink.as_ref(), msg).await;
	};
	tracing::debug!(slot = id.as_str(), reason = ?exit, persisted = state.len(), "slot.actor.exit");
}

/// Applies one message: mutate-then-distribute for persisting commands,
/// distribute-only for transients, snapshot for queries.
async fn step<A>(id: &SlotId, state: &mut SlotState<A>, sink: &dyn UpdateSink<A>, msg: SlotMsg<A>)
where
	A: Clone + Send + Sync + 'static,
{
	match msg {
		SlotMsg::Apply { cmd, done } => {
			let kind = cmd.kind();
			let (artifact, destination) = cmd.into_parts();
			let artifacts: Vec<A> = artifact.into_iter().collect();
			match destination {
				Destination::Default => {
					// State first: a producer blocked on the ack must see
					// its own update in any subsequent history snapshot.
					apply_persisted(state, kind, &artifacts);
					sink.persist_and_broadcast(id, &artifacts, kind).await;
				}
				Destination::AllObservers => sink.broadcast_only(id, &artifacts, kind).await,
				Destination::Observer(observer) => sink.unicast(id, &observer, &artifacts, kind).await,
			}
			if let Some(done) = done {
				// The submitter may have stopped waiting; the command is
				// applied either way and cannot be retracted.
				let _ = done.send(());
			}
		}
		SlotMsg::History { reply } => {
			let _ = reply.send(state.snapshot());
		}
	}
}

fn apply_persisted<A>(state: &mut SlotState<A>, kind: UpdateKind, artifacts: &[A])
where
	A: Clone,
{
	// The empty artifact set only ever comes from a clear.
	match (kind, artifacts.first()) {
		(UpdateKind::Append, Some(artifact)) => state.append(artifact.clone()),
		(UpdateKind::Replace, Some(artifact)) => state.replace(artifact.clone()),
		(_, None) => state.clear(),
	}
}
