//! 胜负判定
//!
//! 四个方向（→ ↓ ↘ ↙）扫描连续 `win_condition` 个同色棋子。

use crate::board::Board;
use crate::types::{GameResult, Piece};

/// 扫描方向 (row_delta, col_delta)
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// 从 (row, col) 出发沿方向走 `len` 格，整段都在棋盘内时返回 true
#[inline]
pub(crate) fn run_fits(board: &Board, row: usize, col: usize, dir: (isize, isize), len: usize) -> bool {
    if len == 0 {
        return true;
    }
    // 超过棋盘最长边的段不可能放下，也避免下面的 isize 转换回绕
    if len > board.rows().max(board.cols()) {
        return false;
    }
    let last = (len - 1) as isize;
    let end_row = row as isize + dir.0 * last;
    let end_col = col as isize + dir.1 * last;
    end_row >= 0 && end_row < board.rows() as isize && end_col >= 0 && end_col < board.cols() as isize
}

/// 段内第 i 个格子的坐标（调用前需确认 [`run_fits`]）
#[inline]
pub(crate) fn run_cell(row: usize, col: usize, dir: (isize, isize), i: usize) -> (usize, usize) {
    (
        (row as isize + dir.0 * i as isize) as usize,
        (col as isize + dir.1 * i as isize) as usize,
    )
}

/// 指定棋子是否已连成 `win_condition` 子
///
/// `win_condition` 为 0 时恒为 false。
pub fn winning_move(board: &Board, piece: Piece, win_condition: usize) -> bool {
    if win_condition == 0 {
        return false;
    }

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            if board.get(row, col) != Some(piece) {
                continue;
            }
            for dir in DIRECTIONS {
                if !run_fits(board, row, col, dir, win_condition) {
                    continue;
                }
                let complete = (1..win_condition).all(|i| {
                    let (r, c) = run_cell(row, col, dir, i);
                    board.get(r, c) == Some(piece)
                });
                if complete {
                    return true;
                }
            }
        }
    }

    false
}

/// 判断对局结果
pub fn game_result(board: &Board, win_condition: usize) -> GameResult {
    if winning_move(board, Piece::Ai, win_condition) {
        GameResult::Win(Piece::Ai)
    } else if winning_move(board, Piece::Player, win_condition) {
        GameResult::Win(Piece::Player)
    } else if board.is_full() {
        GameResult::Draw
    } else {
        GameResult::Ongoing
    }
}

/// 连珠数在该棋盘上是否可行（2 <= K <= max(rows, cols)）
pub fn is_playable_win_condition(board: &Board, win_condition: usize) -> bool {
    win_condition >= 2 && win_condition <= board.rows().max(board.cols())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::create_board;

    #[test]
    fn test_horizontal_win_and_removal() {
        let mut board = create_board(6, 7);
        for col in 0..4 {
            board.drop_piece(5, col, Piece::Ai);
        }
        assert!(winning_move(&board, Piece::Ai, 4));
        assert!(!winning_move(&board, Piece::Player, 4));

        // 去掉任意一个都不再获胜
        for col in 0..4 {
            let mut b = board.clone();
            b.undo_move(5, col);
            assert!(!winning_move(&b, Piece::Ai, 4), "removed column {}", col);
        }
    }

    #[test]
    fn test_vertical_win() {
        let mut board = create_board(6, 7);
        for _ in 0..4 {
            board.simulate_move(6, Piece::Player).unwrap();
        }
        assert!(winning_move(&board, Piece::Player, 4));
        assert!(!winning_move(&board, Piece::Player, 5));
    }

    #[test]
    fn test_diagonal_down_right_win() {
        let board = Board::from_grid("7/7/o6/xo5/xxo4/xxxo3").unwrap();
        assert!(winning_move(&board, Piece::Ai, 4));
    }

    #[test]
    fn test_diagonal_down_left_win() {
        let board = Board::from_grid("7/7/6o/5ox/4oxx/3oxxx").unwrap();
        assert!(winning_move(&board, Piece::Ai, 4));
        assert!(!winning_move(&board, Piece::Player, 4));
    }

    #[test]
    fn test_no_wrap_across_edges() {
        // 行尾 3 子 + 下一行行首 1 子，按一维下标是连续的
        let board = Board::from_grid("7/7/7/7/4ooo/o3xxx").unwrap();
        assert!(!winning_move(&board, Piece::Ai, 4));
    }

    #[test]
    fn test_three_is_not_four() {
        let board = Board::from_grid("7/7/7/7/7/ooo4").unwrap();
        assert!(!winning_move(&board, Piece::Ai, 4));
        assert!(winning_move(&board, Piece::Ai, 3));
        assert!(winning_move(&board, Piece::Ai, 2));
    }

    #[test]
    fn test_win_condition_up_to_board_dimension() {
        let board = Board::from_grid("5/5/5/ooooo").unwrap();
        assert!(winning_move(&board, Piece::Ai, 5));
        assert!(!winning_move(&board, Piece::Ai, 6));
    }

    #[test]
    fn test_huge_win_condition_never_wins() {
        let board = Board::from_grid("7/7/7/7/7/o6").unwrap();
        assert!(!winning_move(&board, Piece::Ai, usize::MAX));
        assert!(!winning_move(&board, Piece::Ai, 8));
        assert!(!run_fits(&board, 0, 0, (0, 1), usize::MAX));
        assert_eq!(game_result(&board, usize::MAX), GameResult::Ongoing);
    }

    #[test]
    fn test_game_result() {
        assert_eq!(game_result(&Board::standard(), 4), GameResult::Ongoing);

        let board = Board::from_grid("7/7/7/7/7/xxxx3").unwrap();
        assert_eq!(game_result(&board, 4), GameResult::Win(Piece::Player));

        let board = Board::from_grid("xo/ox").unwrap();
        assert_eq!(game_result(&board, 3), GameResult::Draw);
    }

    #[test]
    fn test_playable_win_condition() {
        let board = Board::standard();
        assert!(is_playable_win_condition(&board, 4));
        assert!(is_playable_win_condition(&board, 7));
        assert!(!is_playable_win_condition(&board, 8));
        assert!(!is_playable_win_condition(&board, 1));
    }
}
