use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::messages::{lenient_id, ClientMessage};

/// A player as the server describes one
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerRef {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// One lobby row. Seats are `None` until the server assigns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub game_id: String,
    pub white_player: Option<PlayerRef>,
    pub black_player: Option<PlayerRef>,
}

impl GameSummary {
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            white_player: None,
            black_player: None,
        }
    }
}

/// What the user supplies to take a seat, kept exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub game_id: String,
    pub color: String,
}

impl SessionIdentity {
    /// Only presence is checked; the server decides whether the seat and
    /// color are valid.
    pub fn is_complete(&self) -> bool {
        [&self.user_id, &self.game_id, &self.color]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    pub fn to_message(&self) -> ClientMessage {
        ClientMessage::JoinGame {
            game_id: self.game_id.clone(),
            user_id: self.user_id.clone(),
            color: self.color.clone(),
        }
    }
}

/// Server-owned status fields. The client stores and shows them, never derives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusFlag {
    GameOver,
    Check,
    Checkmate,
    Draw,
    EnPassant,
    PawnPromotion,
    KingInCheck,
    KingInCheckmate,
    PawnPromotePosition,
}

impl StatusFlag {
    /// Flags carried at the top level of an `update_game` payload
    pub const TOP_LEVEL: [StatusFlag; 6] = [
        StatusFlag::GameOver,
        StatusFlag::Check,
        StatusFlag::Checkmate,
        StatusFlag::Draw,
        StatusFlag::EnPassant,
        StatusFlag::PawnPromotion,
    ];

    /// Flags carried inside the `result` object of a move
    pub const MOVE_RESULT: [StatusFlag; 4] = [
        StatusFlag::KingInCheck,
        StatusFlag::KingInCheckmate,
        StatusFlag::PawnPromotePosition,
        StatusFlag::Draw,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            StatusFlag::GameOver => "game_over",
            StatusFlag::Check => "check",
            StatusFlag::Checkmate => "checkmate",
            StatusFlag::Draw => "draw",
            StatusFlag::EnPassant => "en_passant",
            StatusFlag::PawnPromotion => "pawn_promotion",
            StatusFlag::KingInCheck => "king_in_check",
            StatusFlag::KingInCheckmate => "king_in_checkmate",
            StatusFlag::PawnPromotePosition => "pawn_promote_position",
        }
    }
}

/// The match currently on screen
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameView {
    pub game_id: Option<String>,
    /// Last full board string as received, for renderers that draw it directly
    pub board_string: Option<String>,
    pub current_player: Option<PlayerRef>,
    pub white_player: Option<PlayerRef>,
    pub black_player: Option<PlayerRef>,
    pub status: BTreeMap<StatusFlag, Value>,
}

impl GameView {
    pub fn status(&self, flag: StatusFlag) -> Option<&Value> {
        self.status.get(&flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_ref_tolerates_missing_and_numeric_ids() {
        let bob: PlayerRef = serde_json::from_str(r#"{"username": "bob"}"#).unwrap();
        assert_eq!(bob.id, None);
        assert_eq!(bob.username.as_deref(), Some("bob"));

        let alice: PlayerRef = serde_json::from_str(r#"{"id": 7, "username": "alice"}"#).unwrap();
        assert_eq!(alice.id.as_deref(), Some("7"));

        assert!(serde_json::from_str::<PlayerRef>(r#"{"id": [1]}"#).is_err());
    }

    #[test]
    fn identity_needs_every_field() {
        let mut identity = SessionIdentity {
            user_id: "42".into(),
            game_id: "g1".into(),
            color: "White".into(),
        };
        assert!(identity.is_complete());
        assert_eq!(
            identity.to_message(),
            ClientMessage::JoinGame {
                game_id: "g1".into(),
                user_id: "42".into(),
                color: "White".into(),
            }
        );

        identity.color = String::new();
        assert!(!identity.is_complete());
        identity.color = "white".into();
        identity.user_id = "  ".into();
        assert!(!identity.is_complete());
    }
}
