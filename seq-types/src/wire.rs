//! The transport seam: pull and push sides of the integer wire contract.
//!
//! The external transport layer owns sockets and framing. Its whole contract
//! with this crate is:
//! - inbound: "give me a source I can pull integers from, frame by frame,
//!   until exhausted" ([`WireReader`])
//! - outbound: "accept integers I push to you, in order" ([`WireWriter`])
//!
//! [`FrameQueue`] is the in-memory implementation used by tests and by
//! loopback delivery between machines hosted in the same process.

use std::collections::VecDeque;

/// Push side of the wire contract.
///
/// A frame is whatever sequence of integers the caller pushes between two
/// transport-level frame boundaries; this crate never inserts boundaries
/// itself.
pub trait WireWriter {
    /// Append one integer to the outgoing frame.
    fn write_int(&mut self, value: i32);
}

impl WireWriter for Vec<i32> {
    fn write_int(&mut self, value: i32) {
        self.push(value);
    }
}

/// Pull side of the wire contract.
///
/// A reader holds zero or more inbound frames. Callers advance with
/// [`next_frame`](WireReader::next_frame) and drain the current frame with
/// [`read_int`](WireReader::read_int); integers left unread when the caller
/// advances again are dropped with the frame.
pub trait WireReader {
    /// Advance to the next inbound frame. Returns `false` when no more
    /// frames are available.
    fn next_frame(&mut self) -> bool;

    /// Read the next integer of the current frame, or `None` if the frame
    /// is exhausted (or no frame has been entered yet).
    fn read_int(&mut self) -> Option<i32>;
}

/// In-memory FIFO of inbound frames.
#[derive(Debug, Default)]
pub struct FrameQueue {
    frames: VecDeque<Vec<i32>>,
    /// Current frame being drained, front first.
    current: VecDeque<i32>,
}

impl FrameQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one inbound frame.
    pub fn push_frame(&mut self, frame: Vec<i32>) {
        self.frames.push_back(frame);
    }

    /// Number of frames not yet entered.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check whether any frames are waiting.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl WireReader for FrameQueue {
    fn next_frame(&mut self) -> bool {
        match self.frames.pop_front() {
            Some(frame) => {
                self.current = frame.into();
                true
            }
            None => {
                self.current.clear();
                false
            }
        }
    }

    fn read_int(&mut self) -> Option<i32> {
        self.current.pop_front()
    }
}
