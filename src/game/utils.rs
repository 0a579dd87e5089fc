use chess::{Color, Piece, Square};
use std::str::FromStr;

use crate::error::ProtocolError;

/// Parse a wire color name; case-insensitive
pub fn color_from_str(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "white" => Some(Color::White),
        "black" => Some(Color::Black),
        _ => None,
    }
}

pub fn piece_from_str(name: &str) -> Option<Piece> {
    match name.trim().to_lowercase().as_str() {
        "pawn" => Some(Piece::Pawn),
        "knight" => Some(Piece::Knight),
        "bishop" => Some(Piece::Bishop),
        "rook" => Some(Piece::Rook),
        "queen" => Some(Piece::Queen),
        "king" => Some(Piece::King),
        _ => None,
    }
}

/// Board letter for a piece: uppercase for white, lowercase for black
pub fn piece_letter(color: Color, piece: Piece) -> char {
    let letter = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => letter.to_ascii_uppercase(),
        Color::Black => letter,
    }
}

pub fn piece_from_letter(letter: char) -> Option<(Color, Piece)> {
    let piece = match letter.to_ascii_lowercase() {
        'p' => Piece::Pawn,
        'n' => Piece::Knight,
        'b' => Piece::Bishop,
        'r' => Piece::Rook,
        'q' => Piece::Queen,
        'k' => Piece::King,
        _ => return None,
    };
    let color = if letter.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some((color, piece))
}

/// Parse an algebraic square name such as `e2`
pub fn parse_square(name: &str) -> Result<Square, ProtocolError> {
    let normalized = name.trim().to_lowercase();
    if normalized.len() != 2 {
        return Err(ProtocolError::InvalidSquare(name.to_string()));
    }
    Square::from_str(&normalized).map_err(|_| ProtocolError::InvalidSquare(name.to_string()))
}
