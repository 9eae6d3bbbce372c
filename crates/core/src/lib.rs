//! Core data model for slotcast live slots.
//!
//! A live slot is a named placeholder holding an ordered sequence of
//! rendered artifacts. This crate defines the synchronous model shared by
//! producers, the slot actor, and sinks:
//! * `SlotId` / `ObserverId`: identity tokens
//! * `Destination`: per-update persistence/delivery mode
//! * `SlotCommand`: the three mutations (replace / append / clear)
//! * `SlotState`: the ordered artifact history
//! * `SlotError`: submission-boundary error taxonomy
//!
//! No async code lives here; serialization and distribution are the
//! `slotcast-engine` crate's concern.

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod id;
pub mod state;

pub use command::{Destination, SlotCommand, UpdateKind};
pub use error::SlotError;
pub use id::{ObserverId, SlotId};
pub use state::SlotState;
