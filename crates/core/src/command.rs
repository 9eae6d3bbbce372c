//! Update commands and their persistence/delivery modes.

use crate::id::ObserverId;

/// Persistence/delivery mode for one update.
///
/// A targeted update is never part of history: only [`Destination::Default`]
/// persists, so "unicast and persist" is unrepresentable rather than a
/// runtime validation case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
	/// Persist into slot history and broadcast to all current observers.
	Default,
	/// Broadcast to all current observers without persisting.
	AllObservers,
	/// Deliver to exactly one observer without persisting.
	Observer(ObserverId),
}

impl Destination {
	/// Returns `true` when updates with this destination are recorded in
	/// slot history.
	pub fn persists(&self) -> bool {
		matches!(self, Self::Default)
	}
}

/// Tag delivered alongside every sink call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
	/// The delivered artifacts supersede whatever the observer shows.
	Replace,
	/// The delivered artifacts extend what the observer shows.
	Append,
}

impl UpdateKind {
	/// Stable lowercase name for logging.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Replace => "replace",
			Self::Append => "append",
		}
	}
}

/// One slot mutation, created by a producer call and consumed exactly once
/// by the slot actor.
#[derive(Debug, Clone)]
pub enum SlotCommand<A> {
	/// Discard prior history and show a single artifact.
	Replace(A, Destination),
	/// Extend the shown sequence with one artifact.
	Append(A, Destination),
	/// Reset to the empty sequence.
	Clear(Destination),
}

impl<A> SlotCommand<A> {
	/// Destination of this command.
	pub fn destination(&self) -> &Destination {
		match self {
			Self::Replace(_, destination) | Self::Append(_, destination) | Self::Clear(destination) => destination,
		}
	}

	/// Update kind delivered with this command. Clears deliver as a
	/// `Replace` carrying the empty artifact set.
	pub fn kind(&self) -> UpdateKind {
		match self {
			Self::Append(..) => UpdateKind::Append,
			Self::Replace(..) | Self::Clear(_) => UpdateKind::Replace,
		}
	}

	/// Splits the command into its artifact (if any) and destination.
	pub fn into_parts(self) -> (Option<A>, Destination) {
		match self {
			Self::Replace(artifact, destination) | Self::Append(artifact, destination) => (Some(artifact), destination),
			Self::Clear(destination) => (None, destination),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_default_persists() {
		let observer = ObserverId::new("o1").unwrap();
		assert!(Destination::Default.persists());
		assert!(!Destination::AllObservers.persists());
		assert!(!Destination::Observer(observer).persists());
	}

	#[test]
	fn clear_delivers_as_replace() {
		let cmd: SlotCommand<&str> = SlotCommand::Clear(Destination::Default);
		assert_eq!(cmd.kind(), UpdateKind::Replace);
		let (artifact, destination) = cmd.into_parts();
		assert!(artifact.is_none());
		assert_eq!(destination, Destination::Default);
	}

	#[test]
	fn append_keeps_its_kind() {
		let cmd = SlotCommand::Append("x", Destination::AllObservers);
		assert_eq!(cmd.kind(), UpdateKind::Append);
		assert_eq!(cmd.destination(), &Destination::AllObservers);
		assert_eq!(cmd.into_parts(), (Some("x"), Destination::AllObservers));
	}

	#[test]
	fn kind_names_are_stable() {
		assert_eq!(UpdateKind::Replace.as_str(), "replace");
		assert_eq!(UpdateKind::Append.as_str(), "append");
	}
}
