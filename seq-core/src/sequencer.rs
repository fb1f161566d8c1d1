//! Step machine for one sequencer node - NO I/O, just state transitions.
//!
//! The machine takes events as input (clock pulses, triggers from the
//! upstream peer) and produces a new machine plus actions for the transport
//! layer to execute (bang the downstream peer, publish a full-state frame).
//! Clock generation and message delivery live outside this crate.

use seq_types::NodeState;

/// Events a sequencer node can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// One incoming clock tick.
    Pulse,
    /// The upstream peer banged this node: restart the sequence.
    Trigger,
    /// Return to idle (step -1).
    Reset,
}

/// Actions to be executed by the transport layer.
///
/// These are instructions, not side effects. The transport interprets them
/// and performs the actual message delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerAction {
    /// Bang the downstream peer.
    Bang {
        /// Machine number of the peer to bang.
        target: i32,
    },
    /// Broadcast a full-state frame for this node.
    PublishState,
}

/// A sequencer node: its state plus the pulse/bang transition logic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequencer {
    state: NodeState,
}

impl Sequencer {
    /// Create an idle sequencer with the given machine number.
    pub fn new(machine_num: i32) -> Self {
        Self {
            state: NodeState::new(machine_num),
        }
    }

    /// Create a sequencer around an existing state, e.g. one decoded from
    /// the wire.
    pub fn from_state(state: NodeState) -> Self {
        Self { state }
    }

    /// The node's current state.
    pub fn state(&self) -> &NodeState {
        &self.state
    }

    /// Mutable access for the transport layer's decode paths.
    pub fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    /// Process an event and return the new machine plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (the transport
    /// layer) is responsible for executing the returned actions.
    pub fn on_event(self, event: SequencerEvent) -> (Self, Vec<SequencerAction>) {
        match event {
            SequencerEvent::Pulse => self.on_pulse(),
            SequencerEvent::Trigger => {
                let mut state = self.state;
                state.sequence_index = 0;
                state.pulses_since_banged = 0;
                (Self { state }, vec![SequencerAction::PublishState])
            }
            SequencerEvent::Reset => {
                let mut state = self.state;
                state.sequence_index = -1;
                state.pulses_since_banged = 0;
                (Self { state }, vec![SequencerAction::PublishState])
            }
        }
    }

    /// Advance one step. Wrapping past the final step bangs the downstream
    /// peer and zeroes the pulse counter.
    fn on_pulse(self) -> (Self, Vec<SequencerAction>) {
        let mut state = self.state;
        state.pulses_since_banged = state.pulses_since_banged.saturating_add(1);

        let next = state.sequence_index + 1;
        if next >= state.sequence_length {
            state.sequence_index = 0;
            state.pulses_since_banged = 0;
            let target = state.next_node;
            (
                Self { state },
                vec![
                    SequencerAction::Bang { target },
                    SequencerAction::PublishState,
                ],
            )
        } else {
            state.sequence_index = next;
            (Self { state }, vec![])
        }
    }
}
