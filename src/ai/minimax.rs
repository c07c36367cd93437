//! Minimax AI 策略

use super::random::random_legal_move;
use super::{sort_and_truncate, AIConfig, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::error::EngineError;
use crate::eval::EvalWeights;
use crate::rules::{is_playable_win_condition, winning_move};
use crate::types::{Piece, WIN_SCORE};
use rand::prelude::*;

/// 一次搜索的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// 选择的列；仅在无合法走法或局面已分胜负时为 None
    pub column: Option<usize>,
    /// 根节点分数（AI 视角）
    pub score: i64,
    /// 访问的节点数
    pub nodes: u64,
}

/// 一次走法选择：选出的列以及实际运行的搜索
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveChoice {
    pub column: Option<usize>,
    /// 一步胜、阻挡、无合法走法或随机兜底时为 None
    pub search: Option<SearchResult>,
}

/// Minimax AI - 使用 Alpha-Beta 剪枝
pub struct MinimaxAI {
    depth: u32,
    piece: Piece,
    win_condition: usize,
    weights: EvalWeights,
    move_ordering: bool,
    rng: StdRng,
}

impl MinimaxAI {
    pub fn new(config: &AIConfig) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        MinimaxAI {
            depth: config.depth,
            piece: config.piece,
            win_condition: config.win_condition,
            weights: config.weights,
            move_ordering: config.move_ordering,
            rng,
        }
    }

    /// 搜索深度
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// AI 执的棋子
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// 评估局面（公开方法，AI 视角）
    pub fn evaluate_position(&self, board: &Board) -> i64 {
        self.weights
            .score_position(board, self.piece, self.win_condition)
    }

    /// 终局判定：返回终局分数，非终局返回 None
    fn terminal_score(&self, board: &Board, has_moves: bool) -> Option<i64> {
        if winning_move(board, self.piece, self.win_condition) {
            Some(WIN_SCORE)
        } else if winning_move(board, self.piece.opposite(), self.win_condition) {
            Some(-WIN_SCORE)
        } else if !has_moves {
            Some(0)
        } else {
            None
        }
    }

    /// 按一层启发式分数排序：己方走降序，对方走升序（稳定排序）
    fn order_moves(&self, board: &mut Board, columns: Vec<usize>, maximizing: bool) -> Vec<usize> {
        if !self.move_ordering {
            return columns;
        }

        let mover = if maximizing {
            self.piece
        } else {
            self.piece.opposite()
        };

        let mut scored: Vec<(usize, i64)> = columns
            .into_iter()
            .filter_map(|col| {
                let placed = board.place(col, mover)?;
                Some((col, self.evaluate_position(&placed)))
            })
            .collect();

        if maximizing {
            scored.sort_by(|a, b| b.1.cmp(&a.1));
        } else {
            scored.sort_by(|a, b| a.1.cmp(&b.1));
        }
        scored.into_iter().map(|(col, _)| col).collect()
    }

    /// Minimax 搜索（带 Alpha-Beta 剪枝）
    ///
    /// 每个子节点通过 [`Board::place`] 守卫落子，返回前必定撤销。
    fn minimax(
        &self,
        board: &mut Board,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
        nodes: &mut u64,
    ) -> (Option<usize>, i64) {
        *nodes += 1;

        let valid_locations = board.valid_locations();
        if let Some(score) = self.terminal_score(board, !valid_locations.is_empty()) {
            return (None, score);
        }
        if depth == 0 {
            return (None, self.evaluate_position(board));
        }

        let ordered = self.order_moves(board, valid_locations, maximizing);

        if maximizing {
            let mut value = i64::MIN;
            let mut best_col = None;
            for col in ordered {
                let new_score = match board.place(col, self.piece) {
                    Some(mut placed) => {
                        self.minimax(&mut placed, depth - 1, alpha, beta, false, nodes).1
                    }
                    None => continue,
                };
                if best_col.is_none() || new_score > value {
                    value = new_score;
                    best_col = Some(col);
                }
                alpha = alpha.max(value);
                if alpha >= beta {
                    break; // Beta 剪枝
                }
            }
            (best_col, value)
        } else {
            let opponent = self.piece.opposite();
            let mut value = i64::MAX;
            let mut best_col = None;
            for col in ordered {
                let new_score = match board.place(col, opponent) {
                    Some(mut placed) => {
                        self.minimax(&mut placed, depth - 1, alpha, beta, true, nodes).1
                    }
                    None => continue,
                };
                if best_col.is_none() || new_score < value {
                    value = new_score;
                    best_col = Some(col);
                }
                beta = beta.min(value);
                if alpha >= beta {
                    break; // Alpha 剪枝
                }
            }
            (best_col, value)
        }
    }

    /// 从根节点搜索（在棋盘副本上进行，调用方棋盘不变）
    pub fn search(&self, board: &Board) -> SearchResult {
        let mut scratch = board.clone();
        let mut nodes = 0;
        let (mut column, mut score) = self.minimax(
            &mut scratch,
            self.depth,
            i64::MIN,
            i64::MAX,
            true,
            &mut nodes,
        );

        // 深度 0 的根节点按一层静态评估选列
        if column.is_none() && self.depth == 0 && self.terminal_score(&scratch, true).is_none() {
            if let Some((col, value)) = self.best_static_child(&mut scratch, &mut nodes) {
                column = Some(col);
                score = value;
            }
        }
        debug_assert_eq!(&scratch, board);

        log::debug!(
            "minimax depth={} column={:?} score={} nodes={}",
            self.depth,
            column,
            score,
            nodes
        );

        SearchResult {
            column,
            score,
            nodes,
        }
    }

    /// 每个合法列落子后静态评估，取最高分（同分取靠前的列）
    fn best_static_child(&self, board: &mut Board, nodes: &mut u64) -> Option<(usize, i64)> {
        let mut best: Option<(usize, i64)> = None;
        for col in board.valid_locations() {
            let Some(placed) = board.place(col, self.piece) else {
                continue;
            };
            *nodes += 1;
            let has_moves = !placed.valid_locations().is_empty();
            let value = self
                .terminal_score(&placed, has_moves)
                .unwrap_or_else(|| self.evaluate_position(&placed));
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((col, value));
            }
        }
        best
    }

    /// 落子后是否立即连成
    fn wins_immediately(&self, board: &mut Board, col: usize, piece: Piece) -> bool {
        match board.place(col, piece) {
            Some(placed) => winning_move(&placed, piece, self.win_condition),
            None => false,
        }
    }

    /// 选择走法，失败时返回错误而不是随机兜底
    ///
    /// 顺序：一步胜 -> 阻挡对手一步胜 -> 搜索。无合法走法时列为 None。
    pub fn try_select_choice(&self, board: &Board) -> Result<MoveChoice, EngineError> {
        let valid_locations = board.valid_locations();
        if valid_locations.is_empty() {
            return Ok(MoveChoice {
                column: None,
                search: None,
            });
        }

        if !is_playable_win_condition(board, self.win_condition) {
            return Err(EngineError::InvalidWinCondition {
                win_condition: self.win_condition,
                rows: board.rows(),
                cols: board.cols(),
            });
        }

        let mut scratch = board.clone();

        // 一步胜
        if let Some(&col) = valid_locations
            .iter()
            .find(|&&col| self.wins_immediately(&mut scratch, col, self.piece))
        {
            log::debug!("immediate win at column {}", col);
            return Ok(MoveChoice {
                column: Some(col),
                search: None,
            });
        }

        // 阻挡对手一步胜
        let opponent = self.piece.opposite();
        if let Some(&col) = valid_locations
            .iter()
            .find(|&&col| self.wins_immediately(&mut scratch, col, opponent))
        {
            log::debug!("blocking opponent at column {}", col);
            return Ok(MoveChoice {
                column: Some(col),
                search: None,
            });
        }

        let result = self.search(board);
        match result.column {
            Some(col) if board.is_valid_location(col) => Ok(MoveChoice {
                column: Some(col),
                search: Some(result),
            }),
            _ => Err(EngineError::NoUsableResult {
                legal: valid_locations,
            }),
        }
    }

    /// 同 [`MinimaxAI::try_select_choice`]，只返回列。无合法走法时返回 `Ok(None)`。
    pub fn try_select_move(&self, board: &Board) -> Result<Option<usize>, EngineError> {
        self.try_select_choice(board).map(|choice| choice.column)
    }

    /// 选择走法并附带搜索统计；失败时从 `rng` 随机选择合法列
    pub fn choose_with_stats<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> MoveChoice {
        match self.try_select_choice(board) {
            Ok(choice) => choice,
            Err(e) => {
                log::warn!("{}; falling back to a random legal column", e);
                MoveChoice {
                    column: random_legal_move(board, rng),
                    search: None,
                }
            }
        }
    }

    /// 选择走法；搜索无可用结果时从 `rng` 随机选择合法列
    pub fn choose_move<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<usize> {
        self.choose_with_stats(board, rng).column
    }

    /// 同 [`MinimaxAI::choose_with_stats`]，兜底随机源来自配置的种子
    pub fn get_move_with_stats(&self, board: &Board) -> MoveChoice {
        let mut rng = self.rng.clone();
        self.choose_with_stats(board, &mut rng)
    }

    /// 选择走法，兜底随机源来自配置的种子
    pub fn get_move(&self, board: &Board) -> Option<usize> {
        self.get_move_with_stats(board).column
    }

    /// 所有合法列的搜索分数（按列顺序）
    pub fn score_moves(&self, board: &Board) -> Vec<ScoredMove> {
        let mut scratch = board.clone();
        let mut nodes = 0;
        let child_depth = self.depth.saturating_sub(1);

        let scored: Vec<ScoredMove> = board
            .valid_locations()
            .into_iter()
            .filter_map(|col| {
                let mut placed = scratch.place(col, self.piece)?;
                let score = self
                    .minimax(&mut placed, child_depth, i64::MIN, i64::MAX, false, &mut nodes)
                    .1;
                Some(ScoredMove { column: col, score })
            })
            .collect();

        log::debug!("scored root moves depth={} nodes={}", self.depth, nodes);
        scored
    }

    /// 静态评估一个棋盘局面（不搜索）
    pub fn evaluate_static(board: &Board, piece: Piece, win_condition: usize) -> i64 {
        EvalWeights::default().score_position(board, piece, win_condition)
    }
}

impl AIStrategy for MinimaxAI {
    fn select_moves(&self, board: &Board, n: usize) -> Vec<ScoredMove> {
        let mut scored = self.score_moves(board);
        sort_and_truncate(&mut scored, n);
        scored
    }

    fn select_best_move(&self, board: &Board) -> Option<usize> {
        self.get_move(board)
    }
}
