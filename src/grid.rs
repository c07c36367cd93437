//! 棋盘记号解析和生成
//!
//! 格式: `<行>/<行>/...`，从顶行（row 0）到底行。
//!
//! 符号：
//! - 玩家棋子：x
//! - AI 棋子：o
//! - 空格：十进制数字（连续空格数，可多位，如 `12`），或单个 `.`
//!
//! 例：标准 6x7 空棋盘为 `7/7/7/7/7/7`。

use crate::board::Board;
use crate::error::NotationError;
use crate::types::Piece;

/// 记号允许的最大行数和列数
pub const MAX_GRID_SIZE: usize = 64;

/// 解析棋盘记号
pub fn parse_grid(grid: &str) -> Result<Board, NotationError> {
    let grid = grid.trim();
    if grid.is_empty() {
        return Err(NotationError::Empty);
    }

    if grid.split('/').count() > MAX_GRID_SIZE {
        return Err(NotationError::TooLarge {
            limit: MAX_GRID_SIZE,
        });
    }

    let mut rows: Vec<Vec<Option<Piece>>> = Vec::new();
    for (row_idx, row_str) in grid.split('/').enumerate() {
        rows.push(parse_row(row_idx, row_str.trim())?);
    }

    let cols = rows[0].len();
    if cols == 0 {
        return Err(NotationError::Empty);
    }
    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != cols {
            return Err(NotationError::RaggedRow {
                row: row_idx,
                expected: cols,
                found: row.len(),
            });
        }
    }

    // 重力规则：棋子下方不能有空格
    for row_idx in 0..rows.len() - 1 {
        for col in 0..cols {
            if rows[row_idx][col].is_some() && rows[row_idx + 1][col].is_none() {
                return Err(NotationError::FloatingPiece { row: row_idx, col });
            }
        }
    }

    let height = rows.len();
    let cells = rows.into_iter().flatten().collect();
    Ok(Board::from_cells(height, cols, cells))
}

/// 解析单行
fn parse_row(row_idx: usize, row_str: &str) -> Result<Vec<Option<Piece>>, NotationError> {
    let too_large = NotationError::TooLarge {
        limit: MAX_GRID_SIZE,
    };
    let mut cells = Vec::new();
    let mut empty_run: usize = 0;

    for ch in row_str.chars() {
        if let Some(digit) = ch.to_digit(10) {
            empty_run = empty_run
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit as usize))
                .filter(|&n| n <= MAX_GRID_SIZE)
                .ok_or_else(|| too_large.clone())?;
            continue;
        }

        cells.extend(std::iter::repeat(None).take(empty_run));
        empty_run = 0;
        if cells.len() >= MAX_GRID_SIZE {
            return Err(too_large);
        }

        match ch {
            '.' => cells.push(None),
            _ => {
                let piece = Piece::from_grid_char(ch).ok_or(NotationError::InvalidSymbol {
                    row: row_idx,
                    symbol: ch,
                })?;
                cells.push(Some(piece));
            }
        }
    }
    cells.extend(std::iter::repeat(None).take(empty_run));
    if cells.len() > MAX_GRID_SIZE {
        return Err(too_large);
    }

    Ok(cells)
}

/// 生成棋盘记号
pub fn format_grid(board: &Board) -> String {
    let mut rows = Vec::with_capacity(board.rows());

    for row in 0..board.rows() {
        let mut row_str = String::new();
        let mut empty_count = 0;

        for col in 0..board.cols() {
            match board.get(row, col) {
                Some(piece) => {
                    if empty_count > 0 {
                        row_str.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row_str.push(piece.to_grid_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            row_str.push_str(&empty_count.to_string());
        }

        rows.push(row_str);
    }

    rows.join("/")
}

/// 在记号上落子，返回新的记号
pub fn apply_move_to_grid(grid: &str, col: usize, piece: Piece) -> Result<String, NotationError> {
    let mut board = parse_grid(grid)?;
    board
        .simulate_move(col, piece)
        .ok_or(NotationError::ColumnUnavailable { col })?;
    Ok(format_grid(&board))
}

/// 从记号获取合法列
pub fn get_legal_moves_from_grid(grid: &str) -> Result<Vec<usize>, NotationError> {
    Ok(parse_grid(grid)?.valid_locations())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_standard_board() {
        let board = parse_grid("7/7/7/7/7/7").unwrap();
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 7);
        assert!(board.is_empty());
    }

    #[test]
    fn test_parse_pieces() {
        let board = parse_grid("7/7/7/7/3o3/2xox2").unwrap();
        assert_eq!(board.get(5, 2), Some(Piece::Player));
        assert_eq!(board.get(5, 3), Some(Piece::Ai));
        assert_eq!(board.get(4, 3), Some(Piece::Ai));
        assert_eq!(board.get(4, 2), None);
        assert_eq!(board.piece_count(), 4);
    }

    #[test]
    fn test_parse_multi_digit_runs() {
        let board = parse_grid("12/5x6").unwrap();
        assert_eq!(board.cols(), 12);
        assert_eq!(board.get(1, 5), Some(Piece::Player));
    }

    #[test]
    fn test_dots_are_empty_cells() {
        let a = parse_grid(".../.o.").unwrap();
        let b = parse_grid("3/1o1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_grid() {
        let board = parse_grid("7/7/7/7/3o3/2xox2").unwrap();
        assert_eq!(format_grid(&board), "7/7/7/7/3o3/2xox2");
        assert_eq!(board.to_grid(), "7/7/7/7/3o3/2xox2");
    }

    #[test]
    fn test_ragged_row_rejected() {
        assert_eq!(
            parse_grid("7/6/7"),
            Err(NotationError::RaggedRow {
                row: 1,
                expected: 7,
                found: 6
            })
        );
    }

    #[test]
    fn test_invalid_symbol_rejected() {
        assert_eq!(
            parse_grid("3/1z1"),
            Err(NotationError::InvalidSymbol { row: 1, symbol: 'z' })
        );
    }

    #[test]
    fn test_floating_piece_rejected() {
        assert_eq!(
            parse_grid("1x1/3"),
            Err(NotationError::FloatingPiece { row: 0, col: 1 })
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(parse_grid("   "), Err(NotationError::Empty));
        assert_eq!(parse_grid("/"), Err(NotationError::Empty));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let too_large = Err(NotationError::TooLarge {
            limit: MAX_GRID_SIZE,
        });
        // 数字溢出
        assert_eq!(parse_grid("99999999999999999999999"), too_large);
        // 单段空格过长
        assert_eq!(parse_grid("4000000000"), too_large);
        // 多段累计过宽
        assert_eq!(parse_grid("60x60"), too_large);
        // 行数过多
        assert_eq!(parse_grid(&vec!["1"; MAX_GRID_SIZE + 1].join("/")), too_large);
    }

    #[test]
    fn test_grid_at_size_limit_accepted() {
        let row = MAX_GRID_SIZE.to_string();
        let board = parse_grid(&vec![row.as_str(); MAX_GRID_SIZE].join("/")).unwrap();
        assert_eq!((board.rows(), board.cols()), (MAX_GRID_SIZE, MAX_GRID_SIZE));
    }

    #[test]
    fn test_apply_move() {
        let grid = apply_move_to_grid("7/7/7/7/7/7", 3, Piece::Ai).unwrap();
        assert_eq!(grid, "7/7/7/7/7/3o3");

        let grid = apply_move_to_grid(&grid, 3, Piece::Player).unwrap();
        assert_eq!(grid, "7/7/7/7/3x3/3o3");

        assert_eq!(
            apply_move_to_grid("1o/xo", 1, Piece::Ai),
            Err(NotationError::ColumnUnavailable { col: 1 })
        );
    }

    #[test]
    fn test_legal_moves_from_grid() {
        assert_eq!(get_legal_moves_from_grid("o1x/oxx").unwrap(), vec![1]);
    }
}
