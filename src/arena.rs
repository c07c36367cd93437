//! 对战场：让不同难度的 AI 互相对局并统计胜负
//!
//! 先手按对局编号交替（偶数局选手 1 先走）。选手 1 执 [`Piece::Player`]，选手 2 执 [`Piece::Ai`]。

use crate::ai::{random_legal_move, AIConfig, MinimaxAI};
use crate::board::Board;
use crate::error::ArenaError;
use crate::rules::winning_move;
use crate::types::{Difficulty, Piece, DEFAULT_WIN_CONDITION};
use rand::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// 参赛者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contender {
    Engine(Difficulty),
    Random,
}

impl Contender {
    /// 从名称解析："random" 或难度名称
    pub fn from_label(label: &str) -> Option<Contender> {
        if label.trim().eq_ignore_ascii_case("random") {
            return Some(Contender::Random);
        }
        Difficulty::from_label(label).map(Contender::Engine)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Contender::Engine(d) => d.label(),
            Contender::Random => "random",
        }
    }

    /// 为一局对局入座，执指定棋子
    fn seat(&self, piece: Piece, win_condition: usize) -> Seat {
        match self {
            Contender::Engine(difficulty) => Seat::Engine(MinimaxAI::new(&AIConfig {
                depth: difficulty.depth(),
                piece,
                win_condition,
                ..Default::default()
            })),
            Contender::Random => Seat::Random,
        }
    }
}

/// 一局中的一方；引擎每局只创建一次
enum Seat {
    Engine(MinimaxAI),
    Random,
}

impl Seat {
    /// 选择一列。引擎自带的随机源不使用，兜底随机走法取自对战场的 `rng`
    fn choose(&self, board: &Board, rng: &mut StdRng) -> Option<usize> {
        match self {
            Seat::Engine(ai) => ai.choose_move(board, rng),
            Seat::Random => random_legal_move(board, rng),
        }
    }
}

impl fmt::Display for Contender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 对战配置
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_condition: usize,
    /// 每组对局数
    pub games: usize,
    /// 开局随机走的步数（让确定性的 AI 产生不同对局）
    pub random_openings: usize,
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            rows: 6,
            cols: 7,
            win_condition: DEFAULT_WIN_CONDITION,
            games: 50,
            random_openings: 0,
            seed: None,
        }
    }
}

/// 单步记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: u8,
    pub row: usize,
    pub col: usize,
}

/// 单局记录
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub match_index: usize,
    pub contender1: String,
    pub contender2: String,
    pub starting_player: u8,
    /// 1 / 2 为获胜方，0 为和棋
    pub winner: u8,
    pub moves: Vec<MoveRecord>,
    pub final_grid: Vec<Vec<u8>>,
}

/// 胜负统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Performance {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

/// 一组对局的结果
#[derive(Debug, Clone)]
pub struct SeriesReport {
    pub contender1: Contender,
    pub contender2: Contender,
    pub wins1: usize,
    pub wins2: usize,
    pub draws: usize,
    pub matches: Vec<MatchRecord>,
}

impl SeriesReport {
    pub fn total(&self) -> usize {
        self.wins1 + self.wins2 + self.draws
    }

    fn percent(&self, n: usize) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            n as f64 / self.total() as f64 * 100.0
        }
    }
}

impl fmt::Display for SeriesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (c1, c2) = (self.contender1.label(), self.contender2.label());
        writeln!(f, "Match: {} vs {}", c1.to_uppercase(), c2.to_uppercase())?;
        writeln!(f, "  #1 ({}) wins: {} ({:.1}%)", c1, self.wins1, self.percent(self.wins1))?;
        writeln!(f, "  #2 ({}) wins: {} ({:.1}%)", c2, self.wins2, self.percent(self.wins2))?;
        write!(f, "  draws: {} ({:.1}%)", self.draws, self.percent(self.draws))
    }
}

/// 进行一局
pub fn play_match(
    contender1: Contender,
    contender2: Contender,
    config: &ArenaConfig,
    match_index: usize,
    rng: &mut StdRng,
) -> MatchRecord {
    let mut board = Board::new(config.rows, config.cols);
    let starting = if match_index % 2 == 0 {
        Piece::Player
    } else {
        Piece::Ai
    };
    let mut turn = starting;
    let mut moves = Vec::new();
    let mut winner = 0;
    let seat1 = contender1.seat(Piece::Player, config.win_condition);
    let seat2 = contender2.seat(Piece::Ai, config.win_condition);

    loop {
        let (contender, seat) = if turn == Piece::Player {
            (contender1, &seat1)
        } else {
            (contender2, &seat2)
        };

        let choice = if moves.len() < config.random_openings {
            random_legal_move(&board, rng)
        } else {
            seat.choose(&board, rng)
        };

        // 无走法或非法走法按和棋处理
        let Some(col) = choice.filter(|&c| board.is_valid_location(c)) else {
            log::warn!("match {}: {} produced no legal move, scoring a draw", match_index, contender);
            break;
        };
        let Some(row) = board.simulate_move(col, turn) else {
            break;
        };
        moves.push(MoveRecord {
            player: turn.id(),
            row,
            col,
        });

        if winning_move(&board, turn, config.win_condition) {
            winner = turn.id();
            break;
        }
        if board.is_full() {
            break;
        }
        turn = turn.opposite();
    }

    MatchRecord {
        match_index,
        contender1: contender1.label().to_string(),
        contender2: contender2.label().to_string(),
        starting_player: starting.id(),
        winner,
        moves,
        final_grid: board.to_rows(),
    }
}

/// 进行一组对局
pub fn run_series(contender1: Contender, contender2: Contender, config: &ArenaConfig) -> SeriesReport {
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut report = SeriesReport {
        contender1,
        contender2,
        wins1: 0,
        wins2: 0,
        draws: 0,
        matches: Vec::with_capacity(config.games),
    };

    for match_index in 0..config.games {
        let record = play_match(contender1, contender2, config, match_index, &mut rng);
        match record.winner {
            1 => report.wins1 += 1,
            2 => report.wins2 += 1,
            _ => report.draws += 1,
        }
        report.matches.push(record);
    }

    log::info!(
        "{} vs {}: {}-{} ({} draws)",
        contender1,
        contender2,
        report.wins1,
        report.wins2,
        report.draws
    );
    report
}

/// 默认对阵表
pub const DEFAULT_MATCHUPS: [(Difficulty, Difficulty); 6] = [
    (Difficulty::Easy, Difficulty::Easy),
    (Difficulty::Medium, Difficulty::Medium),
    (Difficulty::Hard, Difficulty::Hard),
    (Difficulty::Easy, Difficulty::Medium),
    (Difficulty::Easy, Difficulty::Hard),
    (Difficulty::Medium, Difficulty::Hard),
];

#[derive(Serialize)]
struct TournamentLog<'a> {
    match_history: &'a [MatchRecord],
    performance: &'a BTreeMap<String, Performance>,
}

/// 锦标赛：累计多组对局的记录和各参赛者的战绩
pub struct Tournament {
    config: ArenaConfig,
    match_history: Vec<MatchRecord>,
    performance: BTreeMap<String, Performance>,
}

impl Tournament {
    pub fn new(config: ArenaConfig) -> Self {
        Tournament {
            config,
            match_history: Vec::new(),
            performance: BTreeMap::new(),
        }
    }

    /// 进行一组对局并计入战绩
    pub fn run_series(&mut self, contender1: Contender, contender2: Contender) -> SeriesReport {
        let report = run_series(contender1, contender2, &self.config);

        let (label1, label2) = (contender1.label(), contender2.label());
        for record in &report.matches {
            match record.winner {
                1 => {
                    self.performance.entry(label1.to_string()).or_default().wins += 1;
                    self.performance.entry(label2.to_string()).or_default().losses += 1;
                }
                2 => {
                    self.performance.entry(label2.to_string()).or_default().wins += 1;
                    self.performance.entry(label1.to_string()).or_default().losses += 1;
                }
                _ => {
                    self.performance.entry(label1.to_string()).or_default().draws += 1;
                    self.performance.entry(label2.to_string()).or_default().draws += 1;
                }
            }
        }
        self.match_history.extend(report.matches.iter().cloned());

        report
    }

    /// 进行默认的六组对阵
    pub fn run_default_matchups(&mut self) -> Vec<SeriesReport> {
        DEFAULT_MATCHUPS
            .iter()
            .map(|&(d1, d2)| self.run_series(Contender::Engine(d1), Contender::Engine(d2)))
            .collect()
    }

    pub fn match_history(&self) -> &[MatchRecord] {
        &self.match_history
    }

    pub fn performance(&self) -> &BTreeMap<String, Performance> {
        &self.performance
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> Result<String, ArenaError> {
        let log = TournamentLog {
            match_history: &self.match_history,
            performance: &self.performance,
        };
        Ok(serde_json::to_string_pretty(&log)?)
    }

    /// 写入 JSON 文件
    pub fn write_json(&self, path: &Path) -> Result<(), ArenaError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ArenaError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(games: usize) -> ArenaConfig {
        ArenaConfig {
            games,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_contender_from_label() {
        assert_eq!(Contender::from_label("random"), Some(Contender::Random));
        assert_eq!(
            Contender::from_label("Hard"),
            Some(Contender::Engine(Difficulty::Hard))
        );
        assert_eq!(Contender::from_label("grandmaster"), None);
    }

    #[test]
    fn test_match_record_is_consistent() {
        let config = small_config(1);
        let mut rng = StdRng::seed_from_u64(9);
        let record = play_match(Contender::Random, Contender::Random, &config, 0, &mut rng);

        assert_eq!(record.starting_player, 1);
        assert_eq!(record.moves[0].player, 1);
        // 双方交替落子
        for pair in record.moves.windows(2) {
            assert_ne!(pair[0].player, pair[1].player);
        }
        let pieces: usize = record
            .final_grid
            .iter()
            .flatten()
            .filter(|&&c| c != 0)
            .count();
        assert_eq!(pieces, record.moves.len());
        if record.winner == 0 {
            assert_eq!(record.moves.len(), 42);
        } else {
            assert_eq!(record.moves.last().unwrap().player, record.winner);
        }
    }

    #[test]
    fn test_starting_player_alternates() {
        let report = run_series(Contender::Random, Contender::Random, &small_config(4));
        let starters: Vec<u8> = report.matches.iter().map(|m| m.starting_player).collect();
        assert_eq!(starters, vec![1, 2, 1, 2]);
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn test_engine_beats_random() {
        let report = run_series(
            Contender::Engine(Difficulty::Medium),
            Contender::Random,
            &small_config(6),
        );
        assert!(report.wins1 >= 5, "{}", report);
    }

    #[test]
    fn test_engine_seat_plays_its_own_piece() {
        let seat = Contender::Engine(Difficulty::Easy).seat(Piece::Player, 4);
        let mut rng = StdRng::seed_from_u64(3);
        // 执 x 时补成四连，而不是去堵 o
        let board = Board::from_grid("7/7/7/7/ooo4/xxx4").unwrap();
        assert_eq!(seat.choose(&board, &mut rng), Some(3));

        let seat = Contender::Engine(Difficulty::Easy).seat(Piece::Ai, 4);
        assert_eq!(seat.choose(&board, &mut rng), Some(3));
        assert!(matches!(Contender::Random.seat(Piece::Ai, 4), Seat::Random));
    }

    #[test]
    fn test_seeded_series_is_reproducible() {
        let config = ArenaConfig {
            random_openings: 2,
            ..small_config(3)
        };
        let first = run_series(Contender::Engine(Difficulty::Medium), Contender::Random, &config);
        let second = run_series(Contender::Engine(Difficulty::Medium), Contender::Random, &config);
        for (a, b) in first.matches.iter().zip(&second.matches) {
            assert_eq!(a.moves, b.moves);
            assert_eq!(a.winner, b.winner);
        }
        assert_eq!(first.matches.len(), 3);
    }

    #[test]
    fn test_tournament_performance_and_json() {
        let mut tournament = Tournament::new(small_config(2));
        tournament.run_series(Contender::Engine(Difficulty::Easy), Contender::Random);

        let easy = tournament.performance()["easy"];
        let random = tournament.performance()["random"];
        assert_eq!(easy.wins + easy.losses + easy.draws, 2);
        assert_eq!(easy.wins, random.losses);
        assert_eq!(easy.draws, random.draws);
        assert_eq!(tournament.match_history().len(), 2);

        let json: serde_json::Value = serde_json::from_str(&tournament.to_json().unwrap()).unwrap();
        assert_eq!(json["match_history"].as_array().unwrap().len(), 2);
        assert!(json["performance"]["easy"]["wins"].is_u64());
        assert_eq!(json["match_history"][0]["final_grid"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_series_report_display() {
        let report = SeriesReport {
            contender1: Contender::Engine(Difficulty::Easy),
            contender2: Contender::Random,
            wins1: 3,
            wins2: 1,
            draws: 0,
            matches: Vec::new(),
        };
        let text = report.to_string();
        assert!(text.starts_with("Match: EASY vs RANDOM"));
        assert!(text.contains("#1 (easy) wins: 3 (75.0%)"));
    }
}
