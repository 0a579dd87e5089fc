use chess::Square;

use crate::models::messages::ClientMessage;

/// A proposed move, sent to the server without any legality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub source: Square,
    pub destination: Square,
}

impl MoveIntent {
    pub fn to_message(self) -> ClientMessage {
        ClientMessage::MovePiece {
            start_position: self.source.to_string(),
            end_position: self.destination.to_string(),
        }
    }
}

/// Two-click move gesture.
///
/// The first click must land on an occupied square (either color, the client
/// does not know whose turn it is). The second click always completes the
/// move, even on the source square itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    SourceSelected(Square),
}

impl SelectionState {
    pub fn click(&mut self, square: Square, occupied: bool) -> Option<MoveIntent> {
        match *self {
            SelectionState::Idle => {
                if occupied {
                    *self = SelectionState::SourceSelected(square);
                }
                None
            }
            SelectionState::SourceSelected(source) => {
                *self = SelectionState::Idle;
                Some(MoveIntent {
                    source,
                    destination: square,
                })
            }
        }
    }

    pub fn source(&self) -> Option<Square> {
        match self {
            SelectionState::Idle => None,
            SelectionState::SourceSelected(square) => Some(*square),
        }
    }
}
