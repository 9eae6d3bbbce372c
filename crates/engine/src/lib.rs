//! Serialized slot actors and update distribution.
//!
//! Each live slot is owned by one tokio task that applies commands one at a
//! time and hands the result to an [`UpdateSink`]:
//! * [`spawn_slot`]: creates the actor, its teardown guard, and the first handle
//! * [`SlotHandle`]: cloneable producer port (render / append / clear / history)
//! * [`SlotGuard`]: host-owned teardown lever
//! * [`BroadcastSink`]: in-process observer fan-out
//!
//! Producers never share state with each other or with observers; the slot
//! actor is the single serialization point per slot identity, and
//! independent slots run independently.

#![warn(missing_docs)]

pub mod actor;
pub mod handle;
pub mod sink;


pub use actor::{ShutdownMode, ShutdownReport, SlotConfig, SlotGuard, spawn_slot};
pub use handle::{RenderFn, SlotHandle};
pub use sink::{BroadcastSink, SlotUpdate, UpdateSink};

pub use slotcast_core::{Destination, ObserverId, SlotCommand, SlotError, SlotId, SlotState, UpdateKind};
