//! Monte Carlo Tree Search with UCB1 selection.
//!
//! Each simulation runs selection, expansion, rollout and
//! backpropagation over an arena-allocated tree. The tree is built fresh
//! for every `search` call and discarded with it; no statistics survive
//! from one move decision to the next.

use std::hash::Hash;

use hexzero_core::{Distribution, Game, HexZeroError, Result};
use rand::Rng;

use crate::{
    config::SearchConfig,
    node::{Node, NodeId},
    rollout::RolloutPolicy,
    tree::Tree,
};

/// Result of a tree search from one root state.
#[derive(Clone, Debug)]
pub struct SearchResult<M: Clone + Copy + Eq + Hash> {
    /// Visit count for each root child, in expansion order. The counts
    /// sum to the simulation budget.
    pub visit_counts: Vec<(M, u32)>,

    /// Normalized visit counts over all move indices: `N(m) / S` at each
    /// root child's index, exactly 0 at indices not legal from the root.
    pub distribution: Distribution,
}

impl<M: Clone + Copy + Eq + Hash> SearchResult<M> {
    /// The root child with the highest visit count (deterministic,
    /// used at evaluation time).
    pub fn best_move(&self) -> M {
        self.visit_counts
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(m, _)| *m)
            .expect("search always visits at least one root child")
    }

    /// Select a move: greedy on visit counts when `stochastic` is false,
    /// sampled proportionally to visit counts when true (used during
    /// self-play to preserve exploration).
    pub fn select<R: Rng>(&self, stochastic: bool, rng: &mut R) -> M {
        if !stochastic || self.visit_counts.len() <= 1 {
            return self.best_move();
        }

        let total: u32 = self.visit_counts.iter().map(|(_, c)| *c).sum();
        let mut threshold = rng.gen_range(0..total);
        for (mv, count) in &self.visit_counts {
            if threshold < *count {
                return *mv;
            }
            threshold -= count;
        }

        // Unreachable: the counts sum to `total`.
        self.best_move()
    }
}

/// Monte Carlo Tree Search engine.
///
/// Generic over the game and the injected rollout policy per call; the
/// engine itself holds only its configuration.
#[derive(Clone, Debug)]
pub struct Mcts {
    config: SearchConfig,
}

impl Mcts {
    /// Create an engine with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Run the configured simulation budget from `root`, returning the
    /// visit counts and training-target distribution over root moves.
    ///
    /// # Errors
    /// - `TerminalSearchRoot` if `root` is terminal; callers must check
    ///   `is_terminal` first.
    /// - `InvalidConfig` if the simulation budget is zero.
    /// - Any error surfaced by the rollout policy or by `Game::apply`
    ///   during playouts.
    pub fn search<G, P>(
        &self,
        game: &G,
        policy: &P,
        root: &G::State,
    ) -> Result<SearchResult<G::Move>>
    where
        G: Game,
        P: RolloutPolicy<G>,
    {
        if game.is_terminal(root) {
            return Err(HexZeroError::TerminalSearchRoot);
        }
        if self.config.simulations == 0 {
            return Err(HexZeroError::InvalidConfig(
                "simulation budget must be positive".to_string(),
            ));
        }

        let untried = game.legal_moves(root);
        let mut tree = Tree::with_root(Node::new(None, root.clone(), untried));

        for _ in 0..self.config.simulations {
            self.simulate(game, policy, &mut tree)?;
        }

        self.extract_result(game, &tree)
    }

    /// Run a single simulation: select, expand, roll out, backpropagate.
    fn simulate<G, P>(&self, game: &G, policy: &P, tree: &mut Tree<G>) -> Result<()>
    where
        G: Game,
        P: RolloutPolicy<G>,
    {
        let mut path = vec![NodeId::ROOT];
        let mut current = NodeId::ROOT;

        loop {
            // A terminal node ends the descent; its own evaluation is the
            // simulation outcome.
            if tree.get(current).terminal {
                let value = self.rollout(game, policy, &tree.get(current).state)?;
                backpropagate(tree, &path, value);
                return Ok(());
            }

            // Expand exactly one untried move, in enumeration order.
            if let Some((mv, state)) = tree.get_mut(current).untried.pop() {
                let untried = game.legal_moves(&state);
                let child = tree.add(Node::new(Some(mv), state, untried));
                tree.get_mut(current).children.push((mv, child));
                path.push(child);

                let value = self.rollout(game, policy, &tree.get(child).state)?;
                backpropagate(tree, &path, value);
                return Ok(());
            }

            // Fully expanded: descend along the best upper-confidence child.
            current = self.select_child(tree, current);
            path.push(current);
        }
    }

    /// Play `state` to a terminal position with the rollout policy and
    /// return the outcome from the perspective of the player to move at
    /// `state`.
    fn rollout<G, P>(&self, game: &G, policy: &P, state: &G::State) -> Result<f32>
    where
        G: Game,
        P: RolloutPolicy<G>,
    {
        let sign = game.to_move_sign(state) as f32;
        let mut current = state.clone();

        while !game.is_terminal(&current) {
            let mv = policy.propose(game, &current)?;
            current = game.apply(&current, mv)?;
        }

        Ok(sign * game.evaluate(&current) as f32)
    }

    /// Select the child maximizing `Q + c * sqrt(ln(N_parent) / N_child)`.
    ///
    /// Child values are stored from the child mover's perspective, so the
    /// parent negates them; an unvisited child scores infinity and is
    /// always taken first.
    fn select_child<G: Game>(&self, tree: &Tree<G>, id: NodeId) -> NodeId {
        let node = tree.get(id);
        let parent_visits = node.visit_count.max(1) as f32;
        let ln_parent = parent_visits.ln();

        let mut best = None;
        let mut best_score = f32::NEG_INFINITY;

        for &(_, child_id) in &node.children {
            let child = tree.get(child_id);
            let score = if child.visit_count == 0 {
                f32::INFINITY
            } else {
                let q = -child.mean_value();
                q + self.config.exploration * (ln_parent / child.visit_count as f32).sqrt()
            };

            if score > best_score {
                best_score = score;
                best = Some(child_id);
            }
        }

        // INVARIANT: only called on fully expanded non-terminal nodes.
        best.expect("BUG: select_child called on node without children")
    }

    /// Build the search result from the root's children.
    fn extract_result<G: Game>(&self, game: &G, tree: &Tree<G>) -> Result<SearchResult<G::Move>> {
        let root = tree.root();

        let visit_counts: Vec<(G::Move, u32)> = root
            .children
            .iter()
            .map(|&(mv, id)| (mv, tree.get(id).visit_count))
            .collect();

        let total: u32 = visit_counts.iter().map(|(_, c)| *c).sum();
        let mut probs = vec![0.0; game.num_moves()];
        for &(mv, count) in &visit_counts {
            probs[game.move_to_index(mv)] = count as f32 / total as f32;
        }

        Ok(SearchResult {
            visit_counts,
            distribution: Distribution::new(probs)?,
        })
    }
}

impl Default for Mcts {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Walk back up the selection path, crediting each node with the
/// simulation outcome. The value arrives from the leaf mover's
/// perspective and alternates sign per ply, since players alternate.
///
/// Backpropagation is atomic with respect to a single simulation: the
/// whole path is updated before the next simulation starts.
fn backpropagate<G: Game>(tree: &mut Tree<G>, path: &[NodeId], leaf_value: f32) {
    let mut value = leaf_value;

    for &node_id in path.iter().rev() {
        let node = tree.get_mut(node_id);
        node.visit_count += 1;
        node.value_sum += value;
        value = -value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollout::RandomRollout;
    use hexzero_hex::{Hex, HexState};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine(simulations: usize) -> Mcts {
        Mcts::new(SearchConfig::with_simulations(simulations))
    }

    #[test]
    fn test_search_terminal_root_errors() {
        let hex = Hex::new(3);
        let decided = HexState::from_raw(&[1, 0, 0, 1, 0, 0, 1, 0, 0], 1).unwrap();
        let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(0));

        let err = engine(10).search(&hex, &policy, &decided).unwrap_err();
        assert!(matches!(err, HexZeroError::TerminalSearchRoot));
    }

    #[test]
    fn test_search_zero_simulations_errors() {
        let hex = Hex::new(3);
        let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(0));

        let err = engine(0)
            .search(&hex, &policy, &hex.initial_state())
            .unwrap_err();
        assert!(matches!(err, HexZeroError::InvalidConfig(_)));
    }

    #[test]
    fn test_root_visits_sum_to_budget() {
        let hex = Hex::new(3);
        let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(7));

        for budget in [1, 5, 40, 200] {
            let result = engine(budget)
                .search(&hex, &policy, &hex.initial_state())
                .unwrap();
            let total: u32 = result.visit_counts.iter().map(|(_, c)| *c).sum();
            assert_eq!(total as usize, budget);
        }
    }

    #[test]
    fn test_distribution_matches_visit_counts() {
        let hex = Hex::new(3);
        let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(3));
        let result = engine(90)
            .search(&hex, &policy, &hex.initial_state())
            .unwrap();

        for &(mv, count) in &result.visit_counts {
            let expected = count as f32 / 90.0;
            let actual = result.distribution.get_or_zero(hex.move_to_index(mv));
            assert!((expected - actual).abs() < 1e-6);
        }
    }

    #[test]
    fn test_distribution_zero_for_occupied_cells() {
        let hex = Hex::new(3);
        let state = HexState::from_raw(&[1, 2, 0, 0, 0, 0, 0, 0, 0], 0).unwrap();
        let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(3));
        let result = engine(50).search(&hex, &policy, &state).unwrap();

        assert_eq!(result.distribution.get_or_zero(0), 0.0);
        assert_eq!(result.distribution.get_or_zero(1), 0.0);
        assert!((result.distribution.sum() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_best_move_is_max_visits() {
        let hex = Hex::new(3);
        let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(11));
        let result = engine(100)
            .search(&hex, &policy, &hex.initial_state())
            .unwrap();

        let best = result.best_move();
        let max = result.visit_counts.iter().map(|(_, c)| *c).max().unwrap();
        let best_count = result
            .visit_counts
            .iter()
            .find(|(m, _)| *m == best)
            .map(|(_, c)| *c)
            .unwrap();
        assert_eq!(best_count, max);
    }

    #[test]
    fn test_select_deterministic_vs_stochastic() {
        let hex = Hex::new(3);
        let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(5));
        let result = engine(100)
            .search(&hex, &policy, &hex.initial_state())
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(result.select(false, &mut rng), result.best_move());

        // A stochastic pick is always among the visited root moves.
        for _ in 0..20 {
            let mv = result.select(true, &mut rng);
            assert!(result.visit_counts.iter().any(|(m, _)| *m == mv));
        }
    }

    #[test]
    fn test_finds_immediate_win() {
        // Player A has two column stones at col 1; (2,1) completes the
        // chain and wins outright. The search should prefer it clearly.
        let hex = Hex::new(3);
        let state = HexState::from_raw(&[0, 1, 0, 2, 1, 0, 0, 0, 2], 0).unwrap();
        let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(17));

        let result = engine(400).search(&hex, &policy, &state).unwrap();
        let best = result.best_move();
        assert_eq!((best.row, best.col), (2, 1));
    }

    #[test]
    fn test_search_deterministic_with_seeded_policy() {
        let hex = Hex::new(3);
        let run = |seed: u64| {
            let policy = RandomRollout::new(ChaCha8Rng::seed_from_u64(seed));
            engine(60).search(&hex, &policy, &hex.initial_state()).unwrap()
        };

        let a = run(123);
        let b = run(123);
        assert_eq!(a.visit_counts, b.visit_counts);
        assert_eq!(a.distribution, b.distribution);
    }
}
