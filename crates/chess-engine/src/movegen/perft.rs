//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! The game is walked with apply/undo, so a successful run also exercises
//! exact move reversal.

use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(game: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    if depth == 1 {
        return game.legal_moves().len() as u64;
    }

    let moves = game.legal_moves().to_vec();
    let mut nodes = 0u64;
    for m in moves {
        game.play(m);
        nodes += perft(game, depth - 1);
        game.undo_last_move();
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(game: &mut GameState, depth: u32) -> Vec<(String, u64)> {
    let moves = game.legal_moves().to_vec();
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        game.play(m);
        let nodes = if depth > 1 { perft(game, depth - 1) } else { 1 };
        game.undo_last_move();
        results.push((m.notation(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
