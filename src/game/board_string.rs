//! Full-board strings.
//!
//! The server sends complete boards in one of two shapes:
//!
//! * its grid dump, rank 8 first, one rank per line, `#` for an empty square,
//!   uppercase for white and lowercase for black, with optional rank labels
//!   and an `a b c d e f g h` footer;
//! * a FEN string, of which only the piece placement field is used.
//!
//! Whitespace inside a grid row is optional, so a bare 64-character string in
//! the same reading order also decodes.

use chess::ALL_SQUARES;

use crate::error::ProtocolError;
use crate::game::utils::{piece_from_letter, piece_letter};
use crate::models::board::{BoardPiece, BoardState};

const FILES: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

pub fn decode(encoded: &str) -> Result<BoardState, ProtocolError> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::BoardString {
            reason: "empty board string".to_string(),
        });
    }

    let cells = if trimmed.contains('/') {
        fen_cells(trimmed)?
    } else {
        grid_cells(trimmed)?
    };

    // cells run a8..h8, a7..h7, ... a1..h1
    let mut squares = [None; 64];
    for (position, cell) in cells.into_iter().enumerate() {
        let rank = 7 - position / 8;
        let file = position % 8;
        squares[rank * 8 + file] = cell;
    }
    Ok(BoardState::from_squares(squares))
}

/// Grid dump of `board` from white's side, the same shape the server prints.
pub fn encode(board: &BoardState) -> String {
    let mut rows = Vec::with_capacity(9);
    for rank in (0..8).rev() {
        let mut row = (rank + 1).to_string();
        for file in 0..8 {
            let cell = match board.occupant(ALL_SQUARES[rank * 8 + file]) {
                Some(piece) => piece_letter(piece.color, piece.kind),
                None => '#',
            };
            row.push(' ');
            row.push(cell);
        }
        rows.push(row);
    }
    rows.push(format!("  {}", FILES.join(" ")));
    rows.join("\n")
}

fn fen_cells(fen: &str) -> Result<Vec<Option<BoardPiece>>, ProtocolError> {
    let placement = fen.split_whitespace().next().unwrap_or_default();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ProtocolError::BoardString {
            reason: format!("expected 8 ranks, found {}", ranks.len()),
        });
    }

    let mut cells = Vec::with_capacity(64);
    for (index, rank) in ranks.iter().enumerate() {
        let start = cells.len();
        for symbol in rank.chars() {
            if let Some(skip) = symbol.to_digit(10) {
                cells.extend(std::iter::repeat(None).take(skip as usize));
            } else {
                cells.push(Some(cell_piece(symbol)?));
            }
        }
        if cells.len() - start != 8 {
            return Err(ProtocolError::BoardString {
                reason: format!("rank {} does not cover 8 files", 8 - index),
            });
        }
    }
    Ok(cells)
}

fn grid_cells(grid: &str) -> Result<Vec<Option<BoardPiece>>, ProtocolError> {
    let mut cells = Vec::with_capacity(64);
    for line in grid.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() || tokens == FILES {
            continue;
        }
        let body = match tokens.split_first() {
            Some((label, rest)) if !rest.is_empty() && is_rank_label(label) => rest,
            _ => &tokens[..],
        };
        for symbol in body.iter().flat_map(|token| token.chars()) {
            cells.push(match symbol {
                '#' | '.' => None,
                other => Some(cell_piece(other)?),
            });
        }
    }
    if cells.len() != 64 {
        return Err(ProtocolError::BoardString {
            reason: format!("expected 64 squares, found {}", cells.len()),
        });
    }
    Ok(cells)
}

fn is_rank_label(token: &str) -> bool {
    matches!(token, "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8")
}

fn cell_piece(symbol: char) -> Result<BoardPiece, ProtocolError> {
    piece_from_letter(symbol)
        .map(|(color, kind)| BoardPiece::new(color, kind))
        .ok_or_else(|| ProtocolError::BoardString {
            reason: format!("unexpected symbol {symbol:?}"),
        })
}
