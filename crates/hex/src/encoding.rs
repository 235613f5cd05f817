//! Feature encodings of Hex states for the evaluator.

use crate::{Hex, HexState, Player};

/// Encoding format for `Hex::encode`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Encoding {
    /// Two channels per cell (`[is A, is B]`, empty is all-zero) plus a
    /// two-channel turn marker. Length `n*n*2 + 2`.
    #[default]
    OneHot,
    /// The one-hot channels plus four edge-connectivity channels per
    /// cell (owner chain touches the near/far edge, per player) and the
    /// turn marker. Length `n*n*6 + 2`.
    SixChannel,
    /// One signed value per cell (A = 1, B = -1, empty = 0) plus a
    /// signed turn value. Length `n*n + 1`.
    Scalar,
}

fn push_one_hot(out: &mut Vec<f32>, cell: Option<Player>) {
    match cell {
        Some(Player::A) => out.extend([1.0, 0.0]),
        Some(Player::B) => out.extend([0.0, 1.0]),
        None => out.extend([0.0, 0.0]),
    }
}

impl Hex {
    pub(crate) fn encoding_len(&self, encoding: Encoding) -> usize {
        let area = self.size() * self.size();
        match encoding {
            Encoding::OneHot => area * 2 + 2,
            Encoding::SixChannel => area * 6 + 2,
            Encoding::Scalar => area + 1,
        }
    }

    pub(crate) fn encode_with(&self, state: &HexState, encoding: Encoding) -> Vec<f32> {
        let size = self.size();
        let mut out = Vec::with_capacity(self.encoding_len(encoding));

        for row in 0..size {
            for col in 0..size {
                let cell = state.cell(row * size + col);
                match encoding {
                    Encoding::OneHot => push_one_hot(&mut out, cell),
                    Encoding::SixChannel => {
                        push_one_hot(&mut out, cell);

                        let near = self.is_connected_to_edge(state, (row, col), None, false);
                        let far = self.is_connected_to_edge(state, (row, col), None, true);
                        out.push(f32::from(near && cell == Some(Player::A)));
                        out.push(f32::from(far && cell == Some(Player::A)));
                        out.push(f32::from(near && cell == Some(Player::B)));
                        out.push(f32::from(far && cell == Some(Player::B)));
                    }
                    Encoding::Scalar => out.push(match cell {
                        Some(Player::A) => 1.0,
                        Some(Player::B) => -1.0,
                        None => 0.0,
                    }),
                }
            }
        }

        match (encoding, state.to_move()) {
            (Encoding::Scalar, Player::A) => out.push(1.0),
            (Encoding::Scalar, Player::B) => out.push(-1.0),
            (_, Player::A) => out.extend([1.0, 0.0]),
            (_, Player::B) => out.extend([0.0, 1.0]),
        }

        out
    }
}
