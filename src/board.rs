//! 棋盘模型
//!
//! rows x cols 的格子，row 0 为顶部（落子入口），最大行号为底部。
//! 使用一维数组存储，搜索时通过落子/撤销（或作用域守卫 [`Placement`]）原地模拟，
//! 不为每个节点复制整个棋盘。

use crate::error::NotationError;
use crate::grid::{format_grid, parse_grid};
use crate::types::Piece;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// rows * cols 个格子，按行存储；None 为空格
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn new(rows: usize, cols: usize) -> Board {
        Board {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// 标准 6x7 棋盘
    pub fn standard() -> Board {
        Board::new(6, 7)
    }

    /// 从记号字符串创建棋盘
    pub fn from_grid(grid: &str) -> Result<Board, NotationError> {
        parse_grid(grid)
    }

    /// 转换为记号字符串
    pub fn to_grid(&self) -> String {
        format_grid(self)
    }

    /// 从按行排列的格子创建棋盘（不检查重力规则）
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Option<Piece>>) -> Board {
        debug_assert_eq!(cells.len(), rows * cols);
        Board { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// 获取某格的棋子
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells[self.index(row, col)]
    }

    /// 列是否可落子（顶格为空）
    ///
    /// 越界的列返回 false，而不是越界访问。
    #[inline]
    pub fn is_valid_location(&self, col: usize) -> bool {
        col < self.cols && self.rows > 0 && self.get(0, col).is_none()
    }

    /// 该列下一个空行（从底部向上扫描）；列满或越界时返回 None
    #[inline]
    pub fn get_next_open_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).rev().find(|&row| self.get(row, col).is_none())
    }

    /// 直接设置格子，不检查合法性
    #[inline]
    pub fn drop_piece(&mut self, row: usize, col: usize, piece: Piece) {
        let idx = self.index(row, col);
        self.cells[idx] = Some(piece);
    }

    /// 按重力规则模拟落子，返回落子所在行；列满时返回 None
    ///
    /// 必须与 [`Board::undo_move`] 成对使用。
    #[inline]
    pub fn simulate_move(&mut self, col: usize, piece: Piece) -> Option<usize> {
        let row = self.get_next_open_row(col)?;
        self.drop_piece(row, col, piece);
        Some(row)
    }

    /// 撤销落子（清空格子）
    #[inline]
    pub fn undo_move(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.cells[idx] = None;
    }

    /// 落子并返回作用域守卫，守卫析构时自动撤销
    ///
    /// 无论递归如何返回（包括剪枝提前返回），格子都会被清空。
    pub fn place(&mut self, col: usize, piece: Piece) -> Option<Placement<'_>> {
        let row = self.simulate_move(col, piece)?;
        Some(Placement {
            board: self,
            row,
            col,
        })
    }

    /// 所有可落子的列（从左到右）
    pub fn valid_locations(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| self.is_valid_location(col))
            .collect()
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| !self.is_valid_location(col))
    }

    /// 中心列
    #[inline]
    pub fn center_column(&self) -> usize {
        self.cols / 2
    }

    /// 棋盘上的棋子数
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// 是否为空棋盘
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// 以数值形式导出（0 = 空，1 = 玩家，2 = AI），用于对局记录
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.get(row, col).map_or(0, |p| p.id()))
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| self.get(row, col).map_or('.', |p| p.to_grid_char()))
                .collect();
            writeln!(f, "{}", line)?;
        }
        let footer: String = (0..self.cols)
            .map(|col| std::char::from_digit((col % 10) as u32, 10).unwrap_or('?'))
            .collect();
        write!(f, "{}", footer)
    }
}

/// 落子守卫：持有棋盘的可变借用，析构时撤销落子
pub struct Placement<'a> {
    board: &'a mut Board,
    row: usize,
    col: usize,
}

impl Placement<'_> {
    /// 落子所在行
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// 落子所在列
    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.undo_move(self.row, self.col);
    }
}

/// 创建空棋盘
pub fn create_board(rows: usize, cols: usize) -> Board {
    Board::new(rows, cols)
}

/// 列是否可落子
pub fn is_valid_location(board: &Board, col: usize) -> bool {
    board.is_valid_location(col)
}

/// 该列下一个空行
pub fn get_next_open_row(board: &Board, col: usize) -> Option<usize> {
    board.get_next_open_row(col)
}

/// 直接设置格子，不检查合法性
pub fn drop_piece(board: &mut Board, row: usize, col: usize, piece: Piece) {
    board.drop_piece(row, col, piece);
}
