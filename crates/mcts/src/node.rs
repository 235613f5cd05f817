//! Search tree node types.
//!
//! Uses arena allocation with indices for cache locality and simpler
//! memory management; no parent pointers are stored, the search retraces
//! its selection path for backpropagation.

use hexzero_core::Game;

/// Index into the node arena.
///
/// A lightweight handle referencing a node in the tree. Using indices
/// instead of pointers avoids Rc/RefCell overhead and reference cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the search tree.
///
/// Each node represents one visited game state and accumulates the
/// statistics of every simulation that passed through it. The value sum
/// is kept from the perspective of the player to move at this node.
#[derive(Clone, Debug)]
pub struct Node<G: Game> {
    /// Move that led to this node (None for the root).
    pub mv: Option<G::Move>,

    /// The state this node corresponds to.
    pub state: G::State,

    /// Number of simulations that visited this node.
    pub visit_count: u32,

    /// Sum of simulation outcomes, from this node's mover's perspective.
    pub value_sum: f32,

    /// Legal moves not yet expanded into children, stored in reverse
    /// enumeration order so `pop` yields board-scan order.
    pub untried: Vec<(G::Move, G::State)>,

    /// Children created so far: (move, node id) pairs.
    pub children: Vec<(G::Move, NodeId)>,

    /// Whether this node's state is terminal.
    pub terminal: bool,
}

impl<G: Game> Node<G> {
    /// Create a node for `state`, reached via `mv`. `untried` holds the
    /// state's legal moves in enumeration order; a state with none is
    /// terminal.
    pub fn new(mv: Option<G::Move>, state: G::State, untried: Vec<(G::Move, G::State)>) -> Self {
        let terminal = untried.is_empty();
        let mut untried = untried;
        untried.reverse();
        Self {
            mv,
            state,
            visit_count: 0,
            value_sum: 0.0,
            untried,
            children: Vec::new(),
            terminal,
        }
    }

    /// Mean outcome (Q-value) for this node, from its mover's
    /// perspective. Zero if the node has never been visited.
    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexzero_core::Game;
    use hexzero_hex::Hex;

    #[test]
    fn test_node_mean_value() {
        let hex = Hex::new(3);
        let state = hex.initial_state();
        let mut node: Node<Hex> = Node::new(None, state.clone(), hex.legal_moves(&state));

        assert_eq!(node.mean_value(), 0.0);

        node.visit_count = 2;
        node.value_sum = 1.5;
        assert!((node.mean_value() - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_untried_pops_in_enumeration_order() {
        let hex = Hex::new(3);
        let state = hex.initial_state();
        let moves = hex.legal_moves(&state);
        let mut node: Node<Hex> = Node::new(None, state, moves.clone());

        assert!(!node.terminal);
        for (mv, _) in &moves {
            assert_eq!(node.untried.pop().unwrap().0, *mv);
        }
        assert!(node.untried.is_empty());
    }

    #[test]
    fn test_terminal_when_no_moves() {
        let hex = Hex::new(3);
        let node: Node<Hex> = Node::new(None, hex.initial_state(), Vec::new());
        assert!(node.terminal);
    }
}
