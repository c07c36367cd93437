//! 错误类型
//!
//! 每个模块一个错误枚举，均由 thiserror 派生。

use std::path::PathBuf;

/// 棋盘记号解析错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("empty grid notation")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid symbol '{symbol}' in row {row}")]
    InvalidSymbol { row: usize, symbol: char },

    #[error("piece at row {row}, column {col} is floating above an empty cell")]
    FloatingPiece { row: usize, col: usize },

    #[error("column {col} is full or out of range")]
    ColumnUnavailable { col: usize },

    #[error("grid exceeds {limit} rows or columns")]
    TooLarge { limit: usize },
}

/// 搜索引擎错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("win condition {win_condition} is not playable on a {rows}x{cols} board")]
    InvalidWinCondition {
        win_condition: usize,
        rows: usize,
        cols: usize,
    },

    #[error("search produced no usable column (legal: {legal:?})")]
    NoUsableResult { legal: Vec<usize> },

    #[error("invalid evaluation weights: {0}")]
    InvalidWeights(String),
}

/// 对局记录错误
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("failed to write match log {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
