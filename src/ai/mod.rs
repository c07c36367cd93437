//! AI 策略模块
//!
//! 提供 Minimax（Alpha-Beta 剪枝）与随机两种策略，以及对外的 [`get_ai_move`] 入口。

mod minimax;
mod random;

pub use minimax::{MinimaxAI, MoveChoice, SearchResult};
pub use random::{random_legal_move, RandomAI};

use crate::board::Board;
use crate::error::NotationError;
use crate::eval::EvalWeights;
use crate::types::{Difficulty, Piece, DEFAULT_DEPTH, DEFAULT_WIN_CONDITION};
use rand::Rng;

/// 可用策略名称
pub const AVAILABLE_STRATEGIES: [&str; 2] = ["minimax", "random"];

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 搜索深度
    pub depth: u32,
    /// AI 执的棋子，对手为其反面
    pub piece: Piece,
    /// 连珠数 K
    pub win_condition: usize,
    /// 评估权重
    pub weights: EvalWeights,
    /// 是否按一层启发式分数排序走法
    pub move_ordering: bool,
    /// 随机种子（仅用于兜底随机走法）
    pub seed: Option<u64>,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            depth: DEFAULT_DEPTH,
            piece: Piece::Ai,
            win_condition: DEFAULT_WIN_CONDITION,
            weights: EvalWeights::default(),
            move_ordering: true,
            seed: None,
        }
    }
}

impl AIConfig {
    /// 按难度创建配置
    pub fn for_difficulty(difficulty: Difficulty, win_condition: usize) -> Self {
        AIConfig {
            depth: difficulty.depth(),
            win_condition,
            ..Default::default()
        }
    }
}

/// 走法评分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub column: usize,
    pub score: i64,
}

/// AI 策略接口
pub trait AIStrategy {
    /// 选择走法（返回带评分的走法列表）
    fn select_moves(&self, board: &Board, n: usize) -> Vec<ScoredMove>;

    /// 选择最佳走法
    fn select_best_move(&self, board: &Board) -> Option<usize> {
        self.select_moves(board, 1).first().map(|sm| sm.column)
    }
}

/// 排序辅助函数（稳定排序，同分保持列顺序）
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, n: usize) {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(n);
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy>,
}

impl AIEngine {
    /// 创建随机 AI
    pub fn random(seed: Option<u64>) -> Self {
        AIEngine {
            strategy: Box::new(RandomAI::new(seed)),
        }
    }

    /// 创建 Minimax AI
    pub fn minimax(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(MinimaxAI::new(config)),
        }
    }

    /// 从策略名称创建
    pub fn from_strategy(name: &str, config: &AIConfig) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "random" => Ok(Self::random(config.seed)),
            "minimax" | "alphabeta" => Ok(Self::minimax(config)),
            _ => Err(format!(
                "Unknown strategy: {}. Available: {}",
                name,
                AVAILABLE_STRATEGIES.join(", ")
            )),
        }
    }

    /// 对棋盘选择走法
    pub fn select_moves(&self, board: &Board, n: usize) -> Vec<ScoredMove> {
        self.strategy.select_moves(board, n)
    }

    /// 从记号选择走法（返回带评分的列）
    pub fn select_moves_grid(&self, grid: &str, n: usize) -> Result<Vec<(usize, i64)>, NotationError> {
        let board = Board::from_grid(grid)?;
        Ok(self
            .strategy
            .select_moves(&board, n)
            .into_iter()
            .map(|sm| (sm.column, sm.score))
            .collect())
    }

    /// 从记号选择最佳走法
    pub fn select_best_move_grid(&self, grid: &str) -> Result<Option<usize>, NotationError> {
        let board = Board::from_grid(grid)?;
        Ok(self.strategy.select_best_move(&board))
    }
}

/// 按难度为 AI 方（[`Piece::Ai`]）选择走法
///
/// 依次检查：己方一步胜、阻挡对手一步胜、Minimax 搜索。
/// 搜索无可用结果时随机选一个合法列；无合法列时返回 None。
/// 棋盘以共享引用传入，调用前后保持不变。
pub fn get_ai_move(board: &Board, difficulty: Difficulty, win_condition: usize) -> Option<usize> {
    MinimaxAI::new(&AIConfig::for_difficulty(difficulty, win_condition)).get_move(board)
}

/// 同 [`get_ai_move`]，兜底随机走法使用调用方提供的随机源
pub fn get_ai_move_with_rng<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    win_condition: usize,
    rng: &mut R,
) -> Option<usize> {
    MinimaxAI::new(&AIConfig::for_difficulty(difficulty, win_condition)).choose_move(board, rng)
}
