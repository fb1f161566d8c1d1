//! Peer state bookkeeping for stepnet.
//!
//! The transport layer decodes full-state frames from remote machines and
//! records them here. The table is last-write-wins per machine: a newer
//! snapshot simply replaces the old one, matching the protocol's
//! last-frame-wins decode semantics.

use std::collections::HashMap;

use seq_types::NodeState;
use tracing::debug;

/// Last-known state of every remote machine, keyed by `machine_num`.
#[derive(Debug, Clone, Default)]
pub struct PeerTable {
    peers: HashMap<i32, NodeState>,
}

impl PeerTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hop cap for [`chain_from`](Self::chain_from). Keeps a walk over a
    /// malformed graph (a long next_node chain of unknown shape) bounded.
    const MAX_HOPS: usize = 256;

    /// Record a peer snapshot, replacing any previous one for the same
    /// machine.
    pub fn observe(&mut self, state: NodeState) {
        debug!(machine = state.machine_num, %state, "peer snapshot");
        self.peers.insert(state.machine_num, state);
    }

    /// Last-known state of a machine, if any frame from it was observed.
    pub fn get(&self, machine_num: i32) -> Option<&NodeState> {
        self.peers.get(&machine_num)
    }

    /// The downstream edge of a machine, if known.
    pub fn next_hop(&self, machine_num: i32) -> Option<i32> {
        self.get(machine_num).map(|s| s.next_node)
    }

    /// Walk `next_node` edges starting from (and including) a machine.
    ///
    /// Stops at the first unknown machine, on revisiting a machine already
    /// in the walk (cycle guard), or after [`MAX_HOPS`](Self::MAX_HOPS)
    /// entries. Returns the machine numbers in walk order.
    pub fn chain_from(&self, start: i32) -> Vec<i32> {
        let mut chain = Vec::new();
        let mut current = start;

        while chain.len() < Self::MAX_HOPS {
            if chain.contains(&current) {
                break;
            }
            let Some(state) = self.get(current) else {
                break;
            };
            chain.push(current);
            current = state.next_node;
        }

        chain
    }

    /// Number of machines observed.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Check whether any machine has been observed.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Forget all observed peers.
    pub fn clear(&mut self) {
        self.peers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(machine: i32, next: i32) -> NodeState {
        NodeState {
            machine_num: machine,
            next_node: next,
            ..NodeState::default()
        }
    }

    #[test]
    fn starts_empty() {
        let table = PeerTable::new();
        assert!(table.is_empty());
        assert!(table.get(0).is_none());
    }

    #[test]
    fn observe_records_snapshot() {
        let mut table = PeerTable::new();
        table.observe(peer(3, 5));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(3).unwrap().next_node, 5);
        assert_eq!(table.next_hop(3), Some(5));
    }

    #[test]
    fn observe_is_last_write_wins() {
        let mut table = PeerTable::new();
        table.observe(peer(3, 5));
        table.observe(peer(3, 8));

        assert_eq!(table.len(), 1);
        assert_eq!(table.next_hop(3), Some(8));
    }

    #[test]
    fn chain_walks_known_edges() {
        let mut table = PeerTable::new();
        table.observe(peer(1, 2));
        table.observe(peer(2, 3));
        table.observe(peer(3, 4));

        // Machine 4 never published, so the walk stops there
        assert_eq!(table.chain_from(1), vec![1, 2, 3]);
    }

    #[test]
    fn chain_from_unknown_machine_is_empty() {
        let table = PeerTable::new();
        assert!(table.chain_from(7).is_empty());
    }

    #[test]
    fn chain_stops_on_cycle() {
        let mut table = PeerTable::new();
        table.observe(peer(1, 2));
        table.observe(peer(2, 1));

        assert_eq!(table.chain_from(1), vec![1, 2]);
    }

    #[test]
    fn self_loop_is_a_single_entry() {
        let mut table = PeerTable::new();
        table.observe(peer(5, 5));

        assert_eq!(table.chain_from(5), vec![5]);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut table = PeerTable::new();
        table.observe(peer(1, 2));
        table.observe(peer(2, 3));

        table.clear();
        assert!(table.is_empty());
        assert!(table.next_hop(1).is_none());
    }

    #[test]
    fn decoded_frames_feed_the_table() {
        use seq_types::FrameQueue;

        let mut queue = FrameQueue::new();
        queue.push_frame(vec![4, 6, 8, 2, 1]);

        let mut decoded = NodeState::default();
        decoded.apply_full(&mut queue).unwrap();

        let mut table = PeerTable::new();
        table.observe(decoded);

        assert_eq!(table.next_hop(4), Some(6));
        assert_eq!(table.get(4).unwrap().sequence_index, 2);
    }
}
