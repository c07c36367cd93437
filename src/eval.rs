//! 局面评估
//!
//! 启发式评分 = 中心列控制 + 四个方向上所有长度为 K 的窗口评分。
//! 只在非终局的搜索叶子节点调用。

use crate::board::Board;
use crate::error::EngineError;
use crate::rules::{run_cell, run_fits, DIRECTIONS};
use crate::types::Piece;
use serde::{Deserialize, Serialize};

/// 评估权重
///
/// 对手权重为正数，评分时取负。必须满足：
/// 完整窗口 > 差一子 > 差两子 > 0，且对手差一子的惩罚不小于己方差一子的奖励（防守优先）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// 中心列每子加分
    pub center: i64,
    /// K 子全为己方
    pub complete: i64,
    /// K-1 子 + 1 空
    pub threat: i64,
    /// K-2 子 + 2 空
    pub developing: i64,
    pub opp_complete: i64,
    pub opp_threat: i64,
    pub opp_developing: i64,
}

impl EvalWeights {
    /// 防守型权重（默认）
    pub const fn defensive() -> Self {
        EvalWeights {
            center: 8,
            complete: 100_000,
            threat: 1_000,
            developing: 50,
            opp_complete: 100_000,
            opp_threat: 1_200,
            opp_developing: 50,
        }
    }

    /// 对称权重：攻守等价
    pub const fn symmetric() -> Self {
        EvalWeights {
            center: 3,
            complete: 100,
            threat: 5,
            developing: 2,
            opp_complete: 100,
            opp_threat: 5,
            opp_developing: 2,
        }
    }

    /// 按名称获取预设
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "defensive" | "default" => Some(Self::defensive()),
            "symmetric" => Some(Self::symmetric()),
            _ => None,
        }
    }

    /// 检查权重的大小顺序
    pub fn validate(&self) -> Result<(), EngineError> {
        let tiers_ok = |complete: i64, threat: i64, developing: i64| {
            complete > threat && threat > developing && developing > 0
        };
        if self.center < 0 {
            return Err(EngineError::InvalidWeights(
                "center weight must not be negative".to_string(),
            ));
        }
        if !tiers_ok(self.complete, self.threat, self.developing) {
            return Err(EngineError::InvalidWeights(
                "expected complete > threat > developing > 0".to_string(),
            ));
        }
        if !tiers_ok(self.opp_complete, self.opp_threat, self.opp_developing) {
            return Err(EngineError::InvalidWeights(
                "expected opp_complete > opp_threat > opp_developing > 0".to_string(),
            ));
        }
        if self.opp_threat < self.threat {
            return Err(EngineError::InvalidWeights(
                "opp_threat must be at least threat".to_string(),
            ));
        }
        Ok(())
    }

    /// 按窗口内的计数评分
    #[inline]
    fn score_counts(&self, own: usize, opp: usize, empty: usize, len: usize) -> i64 {
        let mut score = 0;

        if own == len {
            score += self.complete;
        } else if own + 1 == len && empty == 1 {
            score += self.threat;
        } else if len >= 3 && own + 2 == len && empty == 2 {
            score += self.developing;
        }

        if opp == len {
            score -= self.opp_complete;
        } else if opp + 1 == len && empty == 1 {
            score -= self.opp_threat;
        } else if len >= 3 && opp + 2 == len && empty == 2 {
            score -= self.opp_developing;
        }

        score
    }

    /// 评估单个窗口
    pub fn evaluate_window(&self, window: &[Option<Piece>], piece: Piece) -> i64 {
        let own = window.iter().filter(|&&c| c == Some(piece)).count();
        let opp = window
            .iter()
            .filter(|&&c| c == Some(piece.opposite()))
            .count();
        let empty = window.len() - own - opp;
        self.score_counts(own, opp, empty, window.len())
    }

    /// 评估整个局面（`piece` 视角）
    pub fn score_position(&self, board: &Board, piece: Piece, window_len: usize) -> i64 {
        let mut score = 0;

        // 中心列控制
        if board.cols() > 0 {
            let center = board.center_column();
            let center_count = (0..board.rows())
                .filter(|&row| board.get(row, center) == Some(piece))
                .count() as i64;
            score += center_count * self.center;
        }

        if window_len == 0 {
            return score;
        }

        let opp_piece = piece.opposite();
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                for dir in DIRECTIONS {
                    if !run_fits(board, row, col, dir, window_len) {
                        continue;
                    }
                    let mut own = 0;
                    let mut opp = 0;
                    for i in 0..window_len {
                        let (r, c) = run_cell(row, col, dir, i);
                        match board.get(r, c) {
                            Some(p) if p == piece => own += 1,
                            Some(p) if p == opp_piece => opp += 1,
                            _ => {}
                        }
                    }
                    score += self.score_counts(own, opp, window_len - own - opp, window_len);
                }
            }
        }

        score
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self::defensive()
    }
}

/// 使用默认权重评估窗口
pub fn evaluate_window(window: &[Option<Piece>], piece: Piece) -> i64 {
    EvalWeights::default().evaluate_window(window, piece)
}

/// 使用默认权重评估局面
pub fn score_position(board: &Board, piece: Piece, window_len: usize) -> i64 {
    EvalWeights::default().score_position(board, piece, window_len)
}
