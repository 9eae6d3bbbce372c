//! Ordered artifact history for one slot.

/// Canonical, replayable representation of what one slot currently shows.
///
/// The state has no concurrency control of its own: it is owned and mutated
/// exclusively by the slot actor, one command at a time, which keeps the
/// invariant `history order == application order` trivially true.
#[derive(Debug)]
pub struct SlotState<A> {
	history: Vec<A>,
}

impl<A> SlotState<A> {
	/// Creates an empty history.
	pub fn new() -> Self {
		Self { history: Vec::new() }
	}

	/// History becomes the single given artifact.
	pub fn replace(&mut self, artifact: A) {
		self.history.clear();
		self.history.push(artifact);
	}

	/// History is extended with one artifact, preserving chronological order.
	pub fn append(&mut self, artifact: A) {
		self.history.push(artifact);
	}

	/// History becomes empty.
	pub fn clear(&mut self) {
		self.history.clear();
	}

	/// Number of persisted artifacts.
	pub fn len(&self) -> usize {
		self.history.len()
	}

	/// Returns `true` when no artifact is persisted.
	pub fn is_empty(&self) -> bool {
		self.history.is_empty()
	}

	/// Chronological snapshot, oldest first.
	pub fn snapshot(&self) -> Vec<A>
	where
		A: Clone,
	{
		self.history.clone()
	}
}

impl<A> Default for SlotState<A> {
	fn default() -> Self {
		Self::new()
	}
}
