//! Connect-N AI Engine
//!
//! 可配置行数、列数和连珠数 K 的连珠棋 AI 引擎 - 支持棋盘记号输入输出

pub mod ai;
pub mod arena;
pub mod board;
pub mod error;
pub mod eval;
pub mod grid;
pub mod rules;
pub mod test_positions;
pub mod types;

pub use ai::{
    get_ai_move, get_ai_move_with_rng, random_legal_move, AIConfig, AIEngine, AIStrategy,
    MinimaxAI, MoveChoice, RandomAI, ScoredMove, SearchResult, AVAILABLE_STRATEGIES,
};
pub use arena::{
    run_series, ArenaConfig, Contender, MatchRecord, Performance, SeriesReport, Tournament,
};
pub use board::{create_board, drop_piece, get_next_open_row, is_valid_location, Board, Placement};
pub use error::{ArenaError, EngineError, NotationError};
pub use eval::{evaluate_window, score_position, EvalWeights};
pub use grid::{
    apply_move_to_grid, format_grid, get_legal_moves_from_grid, parse_grid, MAX_GRID_SIZE,
};
pub use rules::{game_result, winning_move};
pub use types::{depth_for_label, Difficulty, GameResult, Piece, DEFAULT_DEPTH, DEFAULT_WIN_CONDITION, WIN_SCORE};
