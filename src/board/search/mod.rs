//! Depth-limited minimax search with alpha-beta pruning.
//!
//! White maximizes and Black minimizes the static evaluation. Every node
//! works on its own copy of the position, so searching never touches the
//! caller's state.
//!
//! # Example
//! ```
//! use chess_game::board::{find_best_move, Position};
//!
//! let pos = Position::new();
//! let mv = find_best_move(&pos, 2).expect("start position has moves");
//! assert!(pos.legal_moves().contains(&mv));
//! ```

mod move_order;

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};

use super::{Color, Move, Position};
use move_order::order_moves;

/// Base score of a checkmate; the remaining depth is added so faster mates
/// score higher.
pub const MATE_SCORE: i32 = 100_000;

/// Bounds for a single search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Plies to search; 0 is treated as 1
    pub depth: u32,
    /// Abort after visiting this many nodes
    pub node_limit: Option<u64>,
}

impl SearchLimits {
    #[must_use]
    pub const fn depth(depth: u32) -> Self {
        SearchLimits {
            depth,
            node_limit: None,
        }
    }

    #[must_use]
    pub const fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::depth(3)
    }
}

/// Outcome of [`search`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the root position has no legal moves
    pub best_move: Option<Move>,
    /// Score of `best_move` from White's point of view
    pub score: i32,
    /// Depth actually requested after clamping
    pub depth: u32,
    pub nodes: u64,
    /// True if the stop flag or node limit cut the search short
    pub stopped: bool,
}

struct SearchContext<'a> {
    stop: &'a AtomicBool,
    node_limit: Option<u64>,
    nodes: u64,
    stopped: bool,
}

impl SearchContext<'_> {
    fn should_stop(&mut self) -> bool {
        if !self.stopped {
            let over_budget = self.node_limit.is_some_and(|limit| self.nodes >= limit);
            self.stopped = over_budget || self.stop.load(Ordering::Relaxed);
        }
        self.stopped
    }

    fn alpha_beta(&mut self, position: &Position, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return if position.has_legal_moves() {
                position.evaluate()
            } else {
                terminal_score(position, depth)
            };
        }

        let mut moves = position.legal_moves();
        if moves.is_empty() {
            return terminal_score(position, depth);
        }
        order_moves(position, &mut moves);

        let maximizing = position.side_to_move() == Color::White;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            if self.should_stop() {
                break;
            }
            let score = self.alpha_beta(&position.after(mv), depth - 1, alpha, beta);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Score for a side with no legal moves: mated or stalemated.
fn terminal_score(position: &Position, depth: u32) -> i32 {
    if position.is_in_check() {
        // Remaining depth is tiny compared to the mate score.
        -position.side_to_move().sign() * (MATE_SCORE + depth as i32)
    } else {
        0
    }
}

/// Search `position` within `limits`, polling `stop` between moves.
///
/// When the search is cut short the result holds the best root move whose
/// subtree finished, or the first legal move if none did.
pub fn search(position: &Position, limits: &SearchLimits, stop: &AtomicBool) -> SearchResult {
    let depth = limits.depth.max(1);
    let mut ctx = SearchContext {
        stop,
        node_limit: limits.node_limit,
        nodes: 1,
        stopped: false,
    };

    let mut moves = position.legal_moves();
    let Some(&first) = moves.first() else {
        return SearchResult {
            best_move: None,
            score: terminal_score(position, depth),
            depth,
            nodes: ctx.nodes,
            stopped: false,
        };
    };
    order_moves(position, &mut moves);

    let maximizing = position.side_to_move() == Color::White;
    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        if ctx.should_stop() {
            break;
        }
        let score = ctx.alpha_beta(&position.after(mv), depth - 1, alpha, beta);
        if ctx.stopped {
            break;
        }
        trace!("root move {mv} score {score}");

        let improves = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((mv, score));
        }
        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
    }

    let (best_move, score) = best.unwrap_or((first, position.evaluate()));
    debug!(
        "search depth {depth} nodes {} best {best_move} score {score}{}",
        ctx.nodes,
        if ctx.stopped { " (stopped)" } else { "" }
    );

    SearchResult {
        best_move: Some(best_move),
        score,
        depth,
        nodes: ctx.nodes,
        stopped: ctx.stopped,
    }
}

/// Best move for the side to move at a fixed depth, or `None` if the game
/// is over. Identical inputs always give the same move.
#[must_use]
pub fn find_best_move(position: &Position, depth: u32) -> Option<Move> {
    let stop = AtomicBool::new(false);
    search(position, &SearchLimits::depth(depth), &stop).best_move
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn test_finds_white_mate_in_one() {
        let pos = Position::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        );
        for depth in 1..=3 {
            let mv = find_best_move(&pos, depth).unwrap();
            assert_eq!(mv.to_string(), "h5f7", "depth {depth}");
        }
    }

    #[test]
    fn test_finds_black_mate_in_one() {
        let pos = Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2");
        let result = search(&pos, &SearchLimits::depth(2), &AtomicBool::new(false));
        assert_eq!(result.best_move.unwrap().to_string(), "d8h4");
        assert_eq!(result.score, -(MATE_SCORE + 1));
    }

    #[test]
    fn test_takes_hanging_queen() {
        let pos = Position::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
        let mv = find_best_move(&pos, 1).unwrap();
        assert_eq!((mv.from(), mv.to()), (Square(1, 3), Square(4, 3)));
    }

    #[test]
    fn test_no_move_in_terminal_position() {
        let mate = Position::from_fen("7k/7Q/7K/8/8/8/8/8 b - - 0 1");
        assert_eq!(find_best_move(&mate, 3), None);
        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let result = search(&stalemate, &SearchLimits::depth(2), &AtomicBool::new(false));
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_depth_zero_behaves_like_depth_one() {
        let pos = Position::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
        assert_eq!(find_best_move(&pos, 0), find_best_move(&pos, 1));
    }

    #[test]
    fn test_deterministic() {
        let pos = Position::new();
        assert_eq!(find_best_move(&pos, 3), find_best_move(&pos, 3));
    }

    #[test]
    fn test_preset_stop_returns_first_legal_move() {
        let pos = Position::new();
        let result = search(&pos, &SearchLimits::depth(4), &AtomicBool::new(true));
        assert!(result.stopped);
        assert_eq!(result.best_move, pos.legal_moves().first().copied());
    }

    #[test]
    fn test_node_limit_stops_search() {
        let pos = Position::new();
        let limits = SearchLimits::depth(5).with_node_limit(200);
        let result = search(&pos, &limits, &AtomicBool::new(false));
        assert!(result.stopped);
        assert!(pos.legal_moves().contains(&result.best_move.unwrap()));
    }

    #[test]
    fn test_unbounded_search_matches_find_best_move() {
        let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let result = search(&pos, &SearchLimits::depth(2), &AtomicBool::new(false));
        assert!(!result.stopped);
        assert_eq!(result.best_move, find_best_move(&pos, 2));
    }
}
