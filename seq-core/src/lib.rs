//! # seq-core
//!
//! Pure sequencing logic for stepnet (no I/O, instant tests).
//!
//! This crate implements the step machine and peer bookkeeping for a
//! sequencer ensemble without any network or clock I/O.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce
//! output without side effects. The step machine reacts to events handed to
//! it (clock pulses, upstream triggers) and returns actions; the transport
//! layer that owns sockets and timing interprets those actions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod peers;
pub mod sequencer;

pub use peers::PeerTable;
pub use sequencer::{Sequencer, SequencerAction, SequencerEvent};
