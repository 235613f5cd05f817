//! Arena-allocated search tree.
//!
//! Nodes live in a contiguous vector and reference each other by index.
//! Children are owned by the arena; discarding the tree discards every
//! node built for one search.

use hexzero_core::Game;

use crate::node::{Node, NodeId};

/// Arena-allocated search tree rooted at index 0.
#[derive(Debug)]
pub struct Tree<G: Game> {
    nodes: Vec<Node<G>>,
}

impl<G: Game> Tree<G> {
    /// Create a tree holding only the given root node.
    pub fn with_root(root: Node<G>) -> Self {
        Self { nodes: vec![root] }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<G> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<G> {
        &mut self.nodes[id.0]
    }

    /// Add a new node to the tree, returning its ID.
    pub fn add(&mut self, node: Node<G>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node.
    pub fn root(&self) -> &Node<G> {
        self.get(NodeId::ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexzero_core::Game;
    use hexzero_hex::Hex;

    fn root_node(hex: &Hex) -> Node<Hex> {
        let state = hex.initial_state();
        let untried = hex.legal_moves(&state);
        Node::new(None, state, untried)
    }

    #[test]
    fn test_tree_creation() {
        let hex = Hex::new(3);
        let tree = Tree::with_root(root_node(&hex));

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert!(tree.root().mv.is_none());
    }

    #[test]
    fn test_tree_add_node() {
        let hex = Hex::new(3);
        let mut tree = Tree::with_root(root_node(&hex));

        let (mv, state) = hex.legal_moves(&hex.initial_state()).remove(0);
        let untried = hex.legal_moves(&state);
        let id = tree.add(Node::new(Some(mv), state, untried));

        assert_eq!(id.0, 1);
        assert_eq!(tree.get(id).mv, Some(mv));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_tree_modification() {
        let hex = Hex::new(3);
        let mut tree = Tree::with_root(root_node(&hex));

        tree.get_mut(NodeId::ROOT).visit_count = 10;
        assert_eq!(tree.root().visit_count, 10);
    }
}
