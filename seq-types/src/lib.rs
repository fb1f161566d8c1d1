//! # seq-types
//!
//! Wire format types for the stepnet machine-state sync protocol.
//!
//! This crate provides the foundational types shared by all stepnet crates:
//! - [`NodeState`] - One machine's sequencing state and its frame codec
//! - [`WireReader`], [`WireWriter`] - The transport seam (pull/push integers)
//! - [`FrameQueue`] - In-memory frame source for tests and loopback delivery
//! - [`ProtocolError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod state;
mod wire;

pub use error::ProtocolError;
pub use state::{NodeState, FIELDS_PER_FRAME};
pub use wire::{FrameQueue, WireReader, WireWriter};
