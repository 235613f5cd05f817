//! Edge connectivity on the hex grid.
//!
//! A Hex game is decided when one player's stones form a chain between
//! their two edges. Chains are found with an iterative depth-first search
//! over same-owner neighbours, using an explicit stack and a visited set
//! scoped to a single query.

use crate::{Hex, HexState, Player};

impl Hex {
    /// Neighbours of `(row, col)` under hex adjacency, clipped at the
    /// board edges. Interior cells have six: (y-1,x), (y-1,x+1),
    /// (y+1,x-1), (y+1,x), (y,x-1), (y,x+1).
    pub(crate) fn neighbours(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let size = self.size();
        let mut neighbours = Vec::with_capacity(6);
        if row > 0 {
            neighbours.push((row - 1, col));
            if col + 1 < size {
                neighbours.push((row - 1, col + 1));
            }
        }
        if row + 1 < size {
            if col > 0 {
                neighbours.push((row + 1, col - 1));
            }
            neighbours.push((row + 1, col));
        }
        if col > 0 {
            neighbours.push((row, col - 1));
        }
        if col + 1 < size {
            neighbours.push((row, col + 1));
        }
        neighbours
    }

    /// True if the cell at `pos` lies on a same-owner chain reaching the
    /// given edge: the far edge (bottom row for A, right column for B)
    /// when `far_edge` is set, the near edge (top row, left column)
    /// otherwise.
    ///
    /// With `player` given, the query checks that player's chains and
    /// returns false unless `pos` holds their stone; with `None`, the
    /// owner of `pos` is used (false for an empty cell).
    pub fn is_connected_to_edge(
        &self,
        state: &HexState,
        pos: (usize, usize),
        player: Option<Player>,
        far_edge: bool,
    ) -> bool {
        let size = self.size();
        let owner = match player.or_else(|| state.cell(pos.0 * size + pos.1)) {
            Some(p) => p,
            None => return false,
        };
        if state.cell(pos.0 * size + pos.1) != Some(owner) {
            return false;
        }

        let on_target_edge = |row: usize, col: usize| match owner {
            Player::A => {
                if far_edge {
                    row == size - 1
                } else {
                    row == 0
                }
            }
            Player::B => {
                if far_edge {
                    col == size - 1
                } else {
                    col == 0
                }
            }
        };

        let mut visited = vec![false; size * size];
        let mut stack = vec![pos];
        visited[pos.0 * size + pos.1] = true;

        while let Some((row, col)) = stack.pop() {
            if on_target_edge(row, col) {
                return true;
            }
            for (nr, nc) in self.neighbours(row, col) {
                let idx = nr * size + nc;
                if !visited[idx] && state.cell(idx) == Some(owner) {
                    visited[idx] = true;
                    stack.push((nr, nc));
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(raw: &[u8], to_move: u8) -> HexState {
        HexState::from_raw(raw, to_move).unwrap()
    }

    #[test]
    fn test_neighbours_interior() {
        let hex = Hex::new(5);
        let mut n = hex.neighbours(2, 2);
        n.sort();
        assert_eq!(n, vec![(1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_neighbours_corners() {
        let hex = Hex::new(5);
        let mut top_left = hex.neighbours(0, 0);
        top_left.sort();
        assert_eq!(top_left, vec![(0, 1), (1, 0)]);

        let mut bottom_right = hex.neighbours(4, 4);
        bottom_right.sort();
        assert_eq!(bottom_right, vec![(3, 4), (4, 3)]);

        // The anti-diagonal corners pick up a third, diagonal neighbour.
        let mut top_right = hex.neighbours(0, 4);
        top_right.sort();
        assert_eq!(top_right, vec![(0, 3), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_empty_cell_not_connected() {
        let hex = Hex::new(3);
        let s = state(&[0; 9], 0);
        assert!(!hex.is_connected_to_edge(&s, (0, 0), None, true));
        assert!(!hex.is_connected_to_edge(&s, (0, 0), Some(Player::A), false));
    }

    #[test]
    fn test_single_stone_on_near_edge() {
        let hex = Hex::new(3);
        let s = state(&[1, 0, 0, 0, 0, 0, 0, 0, 0], 1);
        assert!(hex.is_connected_to_edge(&s, (0, 0), None, false));
        assert!(!hex.is_connected_to_edge(&s, (0, 0), None, true));
    }

    #[test]
    fn test_vertical_chain_for_player_a() {
        let hex = Hex::new(3);
        // A column of player-A stones at col 1.
        let s = state(&[0, 1, 0, 0, 1, 0, 0, 1, 0], 1);
        assert!(hex.is_connected_to_edge(&s, (0, 1), None, true));
        assert!(hex.is_connected_to_edge(&s, (2, 1), None, false));
        // Player B owns none of these cells.
        assert!(!hex.is_connected_to_edge(&s, (0, 1), Some(Player::B), true));
    }

    #[test]
    fn test_diagonal_adjacency_links_chain() {
        let hex = Hex::new(3);
        // (0,1) and (1,0) touch via the (y+1,x-1) neighbour.
        let s = state(&[0, 1, 0, 1, 0, 0, 1, 0, 0], 1);
        assert!(hex.is_connected_to_edge(&s, (0, 1), None, true));
    }

    #[test]
    fn test_reference_position() {
        // 5x5 position decided for player B: the chain through (4,0)
        // reaches the right column.
        let hex = Hex::new(5);
        #[rustfmt::skip]
        let raw = [
            1, 1, 2, 1, 1,
            2, 1, 1, 1, 2,
            2, 0, 2, 1, 0,
            0, 2, 2, 2, 2,
            2, 0, 0, 2, 0,
        ];
        let s = state(&raw, 0);

        assert!(hex.is_connected_to_edge(&s, (4, 0), None, true));
        // Player A's top component never reaches the bottom row.
        assert!(!hex.is_connected_to_edge(&s, (0, 0), None, true));
    }
}
