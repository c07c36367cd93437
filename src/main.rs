//! Connect-N AI CLI
//!
//! 命令行界面，用于测试 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 通信

use clap::{Parser, Subcommand};
use connect_n_ai::{
    depth_for_label, get_legal_moves_from_grid, AIConfig, AIEngine, ArenaConfig, Board, Contender,
    EvalWeights, MinimaxAI, Piece, ScoredMove, Tournament, DEFAULT_WIN_CONDITION,
};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "connect-n-ai")]
#[command(about = "Connect-N AI Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// 棋盘记号
        #[arg(long)]
        grid: String,
    },

    /// 选择最佳走法
    Best {
        /// 棋盘记号
        #[arg(long)]
        grid: String,

        /// 难度 (easy, medium, hard)
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// 连珠数 K
        #[arg(long, default_value_t = DEFAULT_WIN_CONDITION)]
        win: usize,

        /// AI 执的棋子 (ai, player)
        #[arg(long, default_value = "ai")]
        piece: String,

        /// 返回的走法数量
        #[arg(long, default_value = "1")]
        n: usize,

        /// 随机种子（兜底随机走法）
        #[arg(long)]
        seed: Option<u64>,

        /// 评估权重 JSON 文件
        #[arg(long)]
        weights: Option<PathBuf>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数
    Score {
        /// 棋盘记号
        #[arg(long)]
        grid: String,

        /// 评估视角 (ai, player)
        #[arg(long, default_value = "ai")]
        piece: String,

        /// 连珠数 K
        #[arg(long, default_value_t = DEFAULT_WIN_CONDITION)]
        win: usize,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// AI 对战
    Arena {
        /// 选手 1 (easy, medium, hard, random)
        #[arg(long)]
        first: String,

        /// 选手 2
        #[arg(long)]
        second: String,

        /// 对局数
        #[arg(long, default_value = "50")]
        games: usize,

        #[arg(long, default_value = "6")]
        rows: usize,

        #[arg(long, default_value = "7")]
        cols: usize,

        /// 连珠数 K
        #[arg(long, default_value_t = DEFAULT_WIN_CONDITION)]
        win: usize,

        /// 开局随机步数
        #[arg(long, default_value = "0")]
        openings: usize,

        #[arg(long)]
        seed: Option<u64>,

        /// 对局记录输出文件
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct MoveResult {
    column: usize,
    /// 一步胜或阻挡时未搜索，没有分数
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<i64>,
}

impl From<ScoredMove> for MoveResult {
    fn from(sm: ScoredMove) -> Self {
        MoveResult {
            column: sm.column,
            score: Some(sm.score),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct MovesResponse {
    best: Option<usize>,
    moves: Vec<MoveResult>,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    grid: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    win: Option<usize>,
    #[serde(default)]
    piece: Option<String>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default)]
    weights: Option<EvalWeights>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    best: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    // eval 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    eval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    piece: Option<Piece>,
}

impl ServerResponse {
    fn success_moves(best: Option<usize>, moves: Vec<MoveResult>, depth: u32, nodes: Option<u64>, elapsed_ms: f64) -> Self {
        Self {
            ok: true,
            best,
            moves: Some(moves),
            depth: Some(depth),
            nodes,
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_legal_moves(legal_moves: Vec<usize>) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            ..Default::default()
        }
    }

    fn success_eval(eval_score: i64, piece: Piece) -> Self {
        Self {
            ok: true,
            eval: Some(eval_score),
            piece: Some(piece),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

/// 一次 best 计算的结果
struct BestOutcome {
    best: Option<usize>,
    moves: Vec<MoveResult>,
    depth: u32,
    /// 选出最佳列的那次搜索的节点数；一步胜或阻挡时为 None
    nodes: Option<u64>,
    elapsed_secs: f64,
}

impl BestOutcome {
    fn stats(&self) -> String {
        let nodes = self.nodes.map_or_else(|| "-".to_string(), |n| n.to_string());
        format!(
            "Stats: depth={}, nodes={}, time={:.3}s",
            self.depth, nodes, self.elapsed_secs
        )
    }
}

fn parse_piece(name: &str) -> Result<Piece, String> {
    Piece::from_name(name).ok_or_else(|| format!("Unknown piece: {} (expected ai or player)", name))
}

/// 从 JSON 文件读取评估权重
fn load_weights(path: &Path) -> Result<EvalWeights, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read weights {}: {}", path.display(), e))?;
    let weights: EvalWeights =
        serde_json::from_str(&text).map_err(|e| format!("Invalid weights JSON: {}", e))?;
    weights.validate().map_err(|e| e.to_string())?;
    Ok(weights)
}

/// 选择最佳列；只有 n > 1 时才为每个合法列单独打分
fn compute_best(board: &Board, config: &AIConfig, n: usize) -> BestOutcome {
    let start = Instant::now();

    let choice = MinimaxAI::new(config).get_move_with_stats(board);
    let moves = if n > 1 {
        AIEngine::minimax(config)
            .select_moves(board, n)
            .into_iter()
            .map(MoveResult::from)
            .collect()
    } else {
        choice
            .column
            .map(|column| MoveResult {
                column,
                score: choice.search.map(|s| s.score),
            })
            .into_iter()
            .take(n)
            .collect()
    };

    BestOutcome {
        best: choice.column,
        moves,
        depth: config.depth,
        nodes: choice.search.map(|s| s.nodes),
        elapsed_secs: start.elapsed().as_secs_f64(),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn exit_with(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { grid } => match get_legal_moves_from_grid(&grid) {
            Ok(moves) => {
                println!("Legal moves ({}):", moves.len());
                for col in &moves {
                    println!("  {}", col);
                }
            }
            Err(e) => exit_with(e),
        },

        Commands::Best {
            grid,
            difficulty,
            win,
            piece,
            n,
            seed,
            weights,
            json,
        } => {
            let board = Board::from_grid(&grid).unwrap_or_else(|e| exit_with(e));
            let piece = parse_piece(&piece).unwrap_or_else(|e| exit_with(e));
            let weights = match weights {
                Some(path) => load_weights(&path).unwrap_or_else(|e| exit_with(e)),
                None => EvalWeights::default(),
            };

            let config = AIConfig {
                depth: depth_for_label(&difficulty),
                piece,
                win_condition: win,
                weights,
                seed,
                ..Default::default()
            };

            let outcome = compute_best(&board, &config, n);
            let stats = outcome.stats();

            if json {
                let response = MovesResponse {
                    best: outcome.best,
                    total: outcome.moves.len(),
                    nodes: outcome.nodes,
                    moves: outcome.moves,
                };
                print_json(&response, true);
                eprintln!("{}", stats);
            } else {
                println!("{}\n", board);
                match outcome.best {
                    Some(col) => println!("Best column (difficulty={}): {}", difficulty, col),
                    None => println!("No legal move"),
                }
                for mv in &outcome.moves {
                    match mv.score {
                        Some(score) => println!("  {} (score: {})", mv.column, score),
                        None => println!("  {}", mv.column),
                    }
                }
                println!("\n{}", stats);
            }
        }

        Commands::Score {
            grid,
            piece,
            win,
            json,
        } => {
            let board = Board::from_grid(&grid).unwrap_or_else(|e| exit_with(e));
            let piece = parse_piece(&piece).unwrap_or_else(|e| exit_with(e));
            let score = MinimaxAI::evaluate_static(&board, piece, win);

            if json {
                print_json(&ServerResponse::success_eval(score, piece), true);
            } else {
                println!("局面评估 ({} 视角): {}", piece, score);
            }
        }

        Commands::Arena {
            first,
            second,
            games,
            rows,
            cols,
            win,
            openings,
            seed,
            out,
        } => {
            let contender1 = Contender::from_label(&first)
                .unwrap_or_else(|| exit_with(format!("Unknown contender: {}", first)));
            let contender2 = Contender::from_label(&second)
                .unwrap_or_else(|| exit_with(format!("Unknown contender: {}", second)));

            let mut tournament = Tournament::new(ArenaConfig {
                rows,
                cols,
                win_condition: win,
                games,
                random_openings: openings,
                seed,
            });
            let report = tournament.run_series(contender1, contender2);
            println!("{}", report);

            println!("\nPerformance:");
            for (label, perf) in tournament.performance() {
                println!(
                    "  {}: wins={}, losses={}, draws={}",
                    label, perf.wins, perf.losses, perf.draws
                );
            }

            if let Some(path) = out {
                if let Err(e) = tournament.write_json(&path) {
                    exit_with(e);
                }
                println!("\nMatch log written to {}", path.display());
            }
        }

        Commands::Server => {
            run_server();
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        // 解析请求
        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                print_json(&ServerResponse::error(&format!("Invalid JSON: {}", e)), false);
                let _ = stdout.flush();
                continue;
            }
        };

        // 处理命令
        let response = match request.cmd.as_str() {
            "best" => handle_best_request(&request),
            "moves" => handle_moves_request(&request),
            "eval" => handle_eval_request(&request),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        // 返回响应
        print_json(&response, false);
        let _ = stdout.flush();
    }
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let board = match Board::from_grid(&request.grid) {
        Ok(b) => b,
        Err(e) => return ServerResponse::error(&format!("Invalid grid: {}", e)),
    };
    let piece = match parse_piece(request.piece.as_deref().unwrap_or("ai")) {
        Ok(p) => p,
        Err(e) => return ServerResponse::error(&e),
    };
    let weights = request.weights.unwrap_or_default();
    if let Err(e) = weights.validate() {
        return ServerResponse::error(&e.to_string());
    }

    let config = AIConfig {
        depth: depth_for_label(request.difficulty.as_deref().unwrap_or("medium")),
        piece,
        win_condition: request.win.unwrap_or(DEFAULT_WIN_CONDITION),
        weights,
        ..Default::default()
    };

    let outcome = compute_best(&board, &config, request.n.unwrap_or(5));
    ServerResponse::success_moves(
        outcome.best,
        outcome.moves,
        outcome.depth,
        outcome.nodes,
        outcome.elapsed_secs * 1000.0,
    )
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match get_legal_moves_from_grid(&request.grid) {
        Ok(moves) => ServerResponse::success_legal_moves(moves),
        Err(e) => ServerResponse::error(&format!("Invalid grid: {}", e)),
    }
}

/// 处理 eval 命令（静态评估）
fn handle_eval_request(request: &ServerRequest) -> ServerResponse {
    let board = match Board::from_grid(&request.grid) {
        Ok(b) => b,
        Err(e) => return ServerResponse::error(&format!("Invalid grid: {}", e)),
    };
    let piece = match parse_piece(request.piece.as_deref().unwrap_or("ai")) {
        Ok(p) => p,
        Err(e) => return ServerResponse::error(&e),
    };
    let weights = request.weights.unwrap_or_default();
    let win = request.win.unwrap_or(DEFAULT_WIN_CONDITION);
    ServerResponse::success_eval(weights.score_position(&board, piece, win), piece)
}
