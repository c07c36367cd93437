//! 随机 AI 策略

use super::{sort_and_truncate, AIStrategy, ScoredMove};
use crate::board::Board;
use rand::prelude::*;

/// 从合法列中均匀随机选择一列；无合法列时返回 None
pub fn random_legal_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    board.valid_locations().choose(rng).copied()
}

/// 随机 AI - 随机选择合法走法
pub struct RandomAI {
    rng: StdRng,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        RandomAI { rng }
    }
}

impl AIStrategy for RandomAI {
    fn select_moves(&self, board: &Board, n: usize) -> Vec<ScoredMove> {
        let mut rng = self.rng.clone();

        let mut scored: Vec<ScoredMove> = board
            .valid_locations()
            .into_iter()
            .map(|column| ScoredMove {
                column,
                score: rng.gen_range(0..1_000_000),
            })
            .collect();

        sort_and_truncate(&mut scored, n);
        scored
    }
}
