//! 测试局面库
//!
//! 提供命名的棋盘记号，方便测试、基准和调试
//!
//! 命名规范:
//! - EMPTY: 空棋盘
//! - WIN_n: AI（o）一步可胜
//! - BLOCK_n: 对手（x）一步可胜，AI 必须阻挡
//! - MID_n: 中局
//! - FULL_n / END_n: 满盘或接近满盘
//! - VARIANT_n: 非标准尺寸或连珠数
//!
//! 除 VARIANT 外均为 6x7、K = 4 的局面，且轮到 AI 走棋。

// =============================================================================
// 空棋盘
// =============================================================================

/// 标准 6x7 空棋盘
pub const EMPTY: &str = "7/7/7/7/7/7";

// =============================================================================
// 一步胜 (WIN)
// =============================================================================

/// 底行横向三子，第 3 列取胜
pub const WIN_1: &str = "7/7/7/7/xxx4/ooo4";

/// 第 0 列纵向三子，第 0 列取胜
pub const WIN_2: &str = "7/7/7/o6/o5x/o4xx";

/// 斜线 (5,0)-(4,1)-(3,2)，第 3 列取胜
pub const WIN_3: &str = "7/7/7/2ox3/1oxx3/oxxo3";

/// 己方可胜且对手也有一步胜：应取胜（第 0 列）
pub const WIN_4: &str = "7/7/7/o6/o5x/o3xxx";

// =============================================================================
// 阻挡 (BLOCK)
// =============================================================================

/// 对手底行横向三子，阻挡第 3 列
pub const BLOCK_1: &str = "7/7/7/7/7/xxx1oo1";

/// 对手第 0 列纵向三子，阻挡第 0 列
pub const BLOCK_2: &str = "7/7/7/x6/x6/xo1o3";

/// 对手中间空一格的横向威胁，阻挡第 2 列
pub const BLOCK_3: &str = "7/7/7/7/7/xx1xoo1";

// =============================================================================
// 中局 (MID)
// =============================================================================

/// 中心附近的早期中局
pub const MID_1: &str = "7/7/7/3x3/2ox3/1xoox2";

/// 双方多子的中局
pub const MID_2: &str = "7/7/3o3/2xx3/1ooxo2/1xxox2";

// =============================================================================
// 终局 (FULL / END)
// =============================================================================

/// 满盘和棋（无人连成四子）
pub const FULL_1: &str = "xxooxxo/ooxxoox/xxooxxo/ooxxoox/xxooxxo/ooxxoox";

/// 只剩第 6 列顶格
pub const END_1: &str = "xxooxx1/ooxxoox/xxooxxo/ooxxoox/xxooxxo/ooxxoox";

// =============================================================================
// 变体 (VARIANT)
// =============================================================================

/// 4x4 空棋盘，配合 K = 3
pub const VARIANT_1: &str = "4/4/4/4";

/// 8x9 空棋盘，配合 K = 5
pub const VARIANT_2: &str = "9/9/9/9/9/9/9/9";

// =============================================================================
// 局面集合
// =============================================================================

/// 一步胜局面及其取胜列
pub const WIN_POSITIONS: [(&str, usize); 4] = [(WIN_1, 3), (WIN_2, 0), (WIN_3, 3), (WIN_4, 0)];

/// 阻挡局面及其阻挡列
pub const BLOCK_POSITIONS: [(&str, usize); 3] = [(BLOCK_1, 3), (BLOCK_2, 0), (BLOCK_3, 2)];

/// 所有标准尺寸的局面
pub const STANDARD_POSITIONS: [&str; 12] = [
    EMPTY, WIN_1, WIN_2, WIN_3, WIN_4, BLOCK_1, BLOCK_2, BLOCK_3, MID_1, MID_2, FULL_1, END_1,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{game_result, winning_move};
    use crate::types::{GameResult, Piece};
    use crate::Board;

    #[test]
    fn test_all_standard_positions_valid() {
        for (i, grid) in STANDARD_POSITIONS.iter().enumerate() {
            let board = Board::from_grid(grid);
            assert!(board.is_ok(), "position {} invalid: {:?}", i, board.err());
            let board = board.unwrap();
            assert_eq!((board.rows(), board.cols()), (6, 7), "position {}", i);
        }
    }

    #[test]
    fn test_positions_are_not_decided() {
        for grid in STANDARD_POSITIONS.iter().filter(|&&g| g != FULL_1) {
            let board = Board::from_grid(grid).unwrap();
            assert_eq!(game_result(&board, 4), GameResult::Ongoing, "{}", grid);
        }
    }

    #[test]
    fn test_ai_to_move() {
        for grid in STANDARD_POSITIONS {
            let board = Board::from_grid(grid).unwrap();
            let count = |piece: Piece| {
                (0..board.rows())
                    .flat_map(|r| (0..board.cols()).map(move |c| (r, c)))
                    .filter(|&(r, c)| board.get(r, c) == Some(piece))
                    .count()
            };
            let (x, o) = (count(Piece::Player), count(Piece::Ai));
            assert!(x == o || x == o + 1, "{}: x={} o={}", grid, x, o);
        }
    }

    #[test]
    fn test_win_positions_complete_a_line() {
        for (grid, col) in WIN_POSITIONS {
            let mut board = Board::from_grid(grid).unwrap();
            board.simulate_move(col, Piece::Ai).unwrap();
            assert!(winning_move(&board, Piece::Ai, 4), "{}", grid);
        }
    }

    #[test]
    fn test_block_positions_threaten() {
        for (grid, col) in BLOCK_POSITIONS {
            let mut board = Board::from_grid(grid).unwrap();
            board.simulate_move(col, Piece::Player).unwrap();
            assert!(winning_move(&board, Piece::Player, 4), "{}", grid);
        }
    }

    #[test]
    fn test_full_position_is_draw() {
        let board = Board::from_grid(FULL_1).unwrap();
        assert!(board.is_full());
        assert_eq!(game_result(&board, 4), GameResult::Draw);
        assert_eq!(Board::from_grid(END_1).unwrap().valid_locations(), vec![6]);
    }

    #[test]
    fn test_variant_sizes() {
        let small = Board::from_grid(VARIANT_1).unwrap();
        assert_eq!((small.rows(), small.cols()), (4, 4));
        let wide = Board::from_grid(VARIANT_2).unwrap();
        assert_eq!((wide.rows(), wide.cols()), (8, 9));
    }
}
