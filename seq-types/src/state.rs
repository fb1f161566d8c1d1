//! NodeState - one machine's sequencing state and its frame codec.
//!
//! Every frame on the wire is the same flat five-integer layout:
//! `[machine_num, next_node, sequence_length, sequence_index,
//! pulses_since_banged]`. Two message roles share it:
//! - **full-state**: all five slots carry live data
//! - **request**: only the identity triple (first three slots) is live; the
//!   trailing two slots are padding kept for framing symmetry and must be
//!   consumed but never applied

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::{ProtocolError, WireReader, WireWriter};

/// Number of integers in every frame, full-state and request alike.
pub const FIELDS_PER_FRAME: usize = 5;

/// Which decoded slots get assigned to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldMask {
    /// All five fields are write-targets.
    Full,
    /// Only `machine_num`, `next_node`, `sequence_length`; the trailing
    /// two slots are consumed and discarded.
    Identity,
}

/// One machine's sequencing state.
///
/// `machine_num` and `next_node` together form a directed edge in the
/// ensemble graph; the graph itself is built and validated externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    /// Identifier of the machine that owns this state.
    pub machine_num: i32,
    /// Identifier of the downstream peer this machine bangs.
    pub next_node: i32,
    /// Number of steps in the sequence; always >= 1.
    pub sequence_length: i32,
    /// Current step, in `[-1, sequence_length - 1]`; -1 means idle.
    pub sequence_index: i32,
    /// Clock pulses received since the machine last banged; never negative.
    pub pulses_since_banged: i32,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            machine_num: 0,
            next_node: 0,
            sequence_length: 4,
            sequence_index: -1,
            pulses_since_banged: 0,
        }
    }
}

impl NodeState {
    /// Create a state with the given machine number and default sequencing
    /// fields.
    pub fn new(machine_num: i32) -> Self {
        Self {
            machine_num,
            ..Self::default()
        }
    }

    /// Append the five fields, in wire order, to an outgoing frame.
    pub fn encode(&self, writer: &mut impl WireWriter) {
        writer.write_int(self.machine_num);
        writer.write_int(self.next_node);
        writer.write_int(self.sequence_length);
        writer.write_int(self.sequence_index);
        writer.write_int(self.pulses_since_banged);
    }

    /// Apply every full-state frame the reader holds, in order.
    ///
    /// All five fields are overwritten per frame; with multiple frames the
    /// last one wins. Zero frames leaves state unchanged. Returns the number
    /// of frames applied.
    pub fn apply_full(&mut self, reader: &mut impl WireReader) -> Result<usize, ProtocolError> {
        self.apply(reader, FieldMask::Full)
    }

    /// Apply every request frame the reader holds, in order.
    ///
    /// Only `machine_num`, `next_node` and `sequence_length` are assigned.
    /// The trailing two integers are still consumed from each frame to keep
    /// alignment with the five-slot layout, but `sequence_index` and
    /// `pulses_since_banged` are left untouched.
    pub fn apply_request(&mut self, reader: &mut impl WireReader) -> Result<usize, ProtocolError> {
        self.apply(reader, FieldMask::Identity)
    }

    /// Shared decode loop: read exactly five integers per frame into a
    /// scratch array, validate, then assign per the mask. A frame is applied
    /// all-or-nothing; earlier complete frames in the same call stay applied
    /// when a later frame fails.
    fn apply(
        &mut self,
        reader: &mut impl WireReader,
        mask: FieldMask,
    ) -> Result<usize, ProtocolError> {
        let mut applied = 0;
        while reader.next_frame() {
            let mut fields = [0i32; FIELDS_PER_FRAME];
            for (got, slot) in fields.iter_mut().enumerate() {
                *slot = reader.read_int().ok_or(ProtocolError::MalformedFrame {
                    expected: FIELDS_PER_FRAME,
                    got,
                })?;
            }
            let [machine_num, next_node, sequence_length, sequence_index, pulses] = fields;

            // A sequence with no steps has no valid index range at all, so
            // the whole frame is rejected rather than patched up.
            if sequence_length < 1 {
                return Err(ProtocolError::InvariantViolation(format!(
                    "sequence_length {sequence_length} < 1"
                )));
            }

            self.machine_num = machine_num;
            self.next_node = next_node;
            self.sequence_length = sequence_length;
            if mask == FieldMask::Full {
                self.sequence_index = clamp_index(sequence_index, sequence_length);
                self.pulses_since_banged = clamp_pulses(pulses);
            }
            applied += 1;
        }
        Ok(applied)
    }

    /// Overwrite all five fields from another state. Pure value copy.
    pub fn copy_from(&mut self, other: &NodeState) {
        *self = *other;
    }
}

/// Clamp a decoded step index into `[-1, length - 1]`, logging when the
/// sender was out of range.
fn clamp_index(index: i32, length: i32) -> i32 {
    if index < -1 || index >= length {
        let clamped = index.clamp(-1, length - 1);
        warn!(index, length, clamped, "sequence_index out of range");
        clamped
    } else {
        index
    }
}

/// Clamp a decoded pulse count to zero when the sender went negative.
fn clamp_pulses(pulses: i32) -> i32 {
    if pulses < 0 {
        warn!(pulses, "negative pulses_since_banged");
        0
    } else {
        pulses
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "machine {} -> {}: step {}/{}, {} pulses since bang",
            self.machine_num,
            self.next_node,
            self.sequence_index,
            self.sequence_length,
            self.pulses_since_banged
        )
    }
}
