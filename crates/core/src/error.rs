//! Submission-boundary error taxonomy.

use thiserror::Error;

/// Errors surfaced to producers at the submission boundary.
///
/// Sink delivery problems are intentionally absent: distribution is
/// best-effort fan-out, local to the sink, and never escalated to the
/// submitting producer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
	/// Malformed observer identity, rejected before any command is enqueued.
	#[error("invalid observer id: {0}")]
	InvalidObserver(String),
	/// The transform failed on the submitted value; nothing was enqueued
	/// and slot history is unchanged.
	#[error("render failed: {0}")]
	Render(String),
	/// The slot actor has been torn down.
	#[error("slot closed")]
	Closed,
	/// A non-blocking submission found the command queue at capacity.
	#[error("slot command queue full")]
	QueueFull,
}
