//! 四子棋（N 子连珠）核心类型定义
//!
//! 定义棋子、难度、对局结果等基础数据类型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 棋子（对局双方）
///
/// 数值与对局记录中的编号一致：玩家为 1，AI 为 2，空格为 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    Player,
    Ai,
}

impl Piece {
    /// 获取对方棋子
    #[inline]
    pub fn opposite(&self) -> Piece {
        match self {
            Piece::Player => Piece::Ai,
            Piece::Ai => Piece::Player,
        }
    }

    /// 从记号字符解析
    pub fn from_grid_char(c: char) -> Option<Piece> {
        match c {
            'x' | 'X' => Some(Piece::Player),
            'o' | 'O' => Some(Piece::Ai),
            _ => None,
        }
    }

    /// 转换为记号字符
    pub fn to_grid_char(&self) -> char {
        match self {
            Piece::Player => 'x',
            Piece::Ai => 'o',
        }
    }

    /// 对局记录中的数值编号
    pub fn id(&self) -> u8 {
        match self {
            Piece::Player => 1,
            Piece::Ai => 2,
        }
    }

    /// 从名称解析（"ai" / "player"）
    pub fn from_name(name: &str) -> Option<Piece> {
        match name.to_lowercase().as_str() {
            "player" | "x" | "1" => Some(Piece::Player),
            "ai" | "o" | "2" => Some(Piece::Ai),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Player => write!(f, "Player"),
            Piece::Ai => write!(f, "AI"),
        }
    }
}

/// 未识别难度时使用的默认搜索深度
pub const DEFAULT_DEPTH: u32 = 4;

/// 默认连珠数
pub const DEFAULT_WIN_CONDITION: usize = 4;

/// AI 获胜的终局分数（必须压过任何启发式分数）
pub const WIN_SCORE: i64 = 1_000_000_000;

/// 难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// 对应的搜索深度
    pub fn depth(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }

    /// 从名称解析（不区分大小写）
    pub fn from_label(label: &str) -> Option<Difficulty> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 难度名称 -> 搜索深度，未知名称回落到 [`DEFAULT_DEPTH`]
pub fn depth_for_label(label: &str) -> u32 {
    match Difficulty::from_label(label) {
        Some(d) => d.depth(),
        None => {
            log::warn!(
                "unknown difficulty '{}', using default depth {}",
                label,
                DEFAULT_DEPTH
            );
            DEFAULT_DEPTH
        }
    }
}

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    Win(Piece),
    Draw,
}
