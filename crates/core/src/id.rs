//! Identity tokens for slots and observers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::SlotError;

static NEXT_SLOT: AtomicU64 = AtomicU64::new(0);

/// Globally unique identity of one live slot.
///
/// Minted once at slot creation from a process-wide monotonic counter and
/// stable for the slot's lifetime. The string form correlates commands,
/// deliveries, and reconnect history fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotId(String);

impl SlotId {
	/// Mints a fresh identity from the process-wide counter.
	pub fn mint() -> Self {
		let seq = NEXT_SLOT.fetch_add(1, Ordering::Relaxed);
		Self(format!("slot-{seq}"))
	}

	/// Returns the string form.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SlotId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Identity of one connected observer.
///
/// Validated once at the API boundary; downstream stages never re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObserverId(String);

impl ObserverId {
	/// Creates an observer identity. Empty input is a configuration error.
	pub fn new(id: impl Into<String>) -> Result<Self, SlotError> {
		let id = id.into();
		if id.is_empty() {
			return Err(SlotError::InvalidObserver("observer id must not be empty".to_string()));
		}
		Ok(Self(id))
	}

	/// Returns the string form.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ObserverId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn minted_ids_are_unique() {
		let ids: HashSet<SlotId> = (0..64).map(|_| SlotId::mint()).collect();
		assert_eq!(ids.len(), 64);
	}

	#[test]
	fn slot_id_renders_counter() {
		let id = SlotId::mint();
		assert!(id.as_str().starts_with("slot-"));
		assert_eq!(id.to_string(), id.as_str());
	}

	#[test]
	fn empty_observer_id_rejected() {
		let err = ObserverId::new("").unwrap_err();
		assert!(matches!(err, SlotError::InvalidObserver(_)));
	}

	#[test]
	fn observer_id_roundtrips() {
		let id = ObserverId::new("client-7").unwrap();
		assert_eq!(id.as_str(), "client-7");
	}
}
