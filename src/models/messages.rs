use log::warn;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ProtocolError;
use crate::models::game_state::{GameSummary, PlayerRef};

/// Message sent from client to server, framed as `{"event": ..., "data": {...}}`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinGame {
        game_id: String,
        user_id: String,
        color: String,
    },
    NewGame {
        #[serde(skip_serializing_if = "Option::is_none")]
        fen: Option<String>,
    },
    RemoveGame {
        game_id: String,
    },
    MovePiece {
        start_position: String,
        end_position: String,
    },
}

impl ClientMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientMessage::JoinGame { .. } => "join_game",
            ClientMessage::NewGame { .. } => "new_game",
            ClientMessage::RemoveGame { .. } => "remove_game",
            ClientMessage::MovePiece { .. } => "move_piece",
        }
    }

    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Raw inbound frame before the payload is interpreted
#[derive(Deserialize, Debug, Clone)]
struct ServerFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Message received from the server
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    GameCreated(GameSummary),
    GameRemoved { game_id: String },
    /// Kept as a raw field map so each field can be applied, or skipped, on its own.
    UpdateGame(Map<String, Value>),
    Error { message: String },
}

impl ServerMessage {
    pub fn from_frame(text: &str) -> Result<Self, ProtocolError> {
        let frame: ServerFrame = serde_json::from_str(text)?;
        match frame.event.as_str() {
            "game_created" => parse_game_created(&frame.data).map(ServerMessage::GameCreated),
            "game_removed" => {
                let game_id = required_id(&frame.data, &["game_id", "room"], "game_id")?;
                Ok(ServerMessage::GameRemoved { game_id })
            }
            "update_game" => match frame.data {
                Value::Object(fields) => Ok(ServerMessage::UpdateGame(fields)),
                Value::Null => Ok(ServerMessage::UpdateGame(Map::new())),
                _ => Err(ProtocolError::MalformedField {
                    field: "data",
                    reason: "update_game payload is not an object".to_string(),
                }),
            },
            "error" => {
                let message = match frame.data.get("error") {
                    Some(Value::String(message)) => message.clone(),
                    Some(other) => other.to_string(),
                    None => match &frame.data {
                        Value::String(message) => message.clone(),
                        _ => "unspecified error".to_string(),
                    },
                };
                Ok(ServerMessage::Error { message })
            }
            other => Err(ProtocolError::UnknownEvent(other.to_string())),
        }
    }
}

fn parse_game_created(data: &Value) -> Result<GameSummary, ProtocolError> {
    let game_id = required_id(data, &["game_id", "room"], "game_id")?;
    let mut summary = GameSummary::new(game_id);
    // A bad seat does not sink the row; the seat is left unassigned.
    for (key, seat) in [
        ("white_player", &mut summary.white_player),
        ("black_player", &mut summary.black_player),
    ] {
        if let Some(value) = data.get(key) {
            match player_from_value(key, value) {
                Ok(player) => *seat = player,
                Err(e) => warn!("game_created for {}: {}", summary.game_id, e),
            }
        }
    }
    Ok(summary)
}

fn required_id(
    data: &Value,
    keys: &[&str],
    field: &'static str,
) -> Result<String, ProtocolError> {
    keys.iter()
        .find_map(|key| data.get(*key))
        .map(|value| id_from_value(field, value))
        .transpose()?
        .flatten()
        .ok_or_else(|| ProtocolError::MalformedField {
            field,
            reason: "missing".to_string(),
        })
}

/// Read an identifier that may arrive as a string or a number.
pub fn id_from_value(field: &'static str, value: &Value) -> Result<Option<String>, ProtocolError> {
    match value {
        Value::Null => Ok(None),
        Value::String(id) if id.trim().is_empty() => Ok(None),
        Value::String(id) => Ok(Some(id.clone())),
        Value::Number(id) => Ok(Some(id.to_string())),
        other => Err(ProtocolError::MalformedField {
            field,
            reason: format!("expected a string or number, got {other}"),
        }),
    }
}

/// Read a player field; `null` means the seat is empty.
pub fn player_from_value(field: &'static str, value: &Value) -> Result<Option<PlayerRef>, ProtocolError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(_) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| ProtocolError::MalformedField {
                field,
                reason: e.to_string(),
            }),
        other => Err(ProtocolError::MalformedField {
            field,
            reason: format!("expected an object, got {other}"),
        }),
    }
}

/// serde adapter for ids that may be strings or numbers
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(value) => id_from_value("id", &value).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outbound_frames_match_the_wire_contract() {
        let frame = ClientMessage::MovePiece {
            start_position: "e2".into(),
            end_position: "e4".into(),
        }
        .to_frame()
        .unwrap();
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(
            value,
            json!({"event": "move_piece", "data": {"start_position": "e2", "end_position": "e4"}})
        );

        let frame = ClientMessage::NewGame { fen: None }.to_frame().unwrap();
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value, json!({"event": "new_game", "data": {}}));

        let join = ClientMessage::JoinGame {
            game_id: "7".into(),
            user_id: "42".into(),
            color: "black".into(),
        };
        assert_eq!(join.event_name(), "join_game");
        let value: Value = serde_json::from_str(&join.to_frame().unwrap()).unwrap();
        assert_eq!(value["data"], json!({"game_id": "7", "user_id": "42", "color": "black"}));
    }

    #[test]
    fn game_created_accepts_room_and_numeric_ids() {
        let frame = json!({
            "event": "game_created",
            "data": {"room": 12, "white_player": {"id": 3, "username": "alice"}}
        })
        .to_string();
        match ServerMessage::from_frame(&frame).unwrap() {
            ServerMessage::GameCreated(summary) => {
                assert_eq!(summary.game_id, "12");
                let white = summary.white_player.unwrap();
                assert_eq!(white.id.as_deref(), Some("3"));
                assert_eq!(white.username.as_deref(), Some("alice"));
                assert!(summary.black_player.is_none());
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn game_created_with_bad_seat_keeps_the_row() {
        let frame = json!({
            "event": "game_created",
            "data": {"game_id": "g1", "white_player": "alice"}
        })
        .to_string();
        match ServerMessage::from_frame(&frame).unwrap() {
            ServerMessage::GameCreated(summary) => assert!(summary.white_player.is_none()),
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn game_created_without_id_is_rejected() {
        let frame = json!({"event": "game_created", "data": {}}).to_string();
        assert!(matches!(
            ServerMessage::from_frame(&frame),
            Err(ProtocolError::MalformedField { field: "game_id", .. })
        ));
    }

    #[test]
    fn error_frames_carry_the_message() {
        let frame = json!({"event": "error", "data": {"error": "Not your turn"}}).to_string();
        assert_eq!(
            ServerMessage::from_frame(&frame).unwrap(),
            ServerMessage::Error {
                message: "Not your turn".into()
            }
        );
    }

    #[test]
    fn unknown_events_and_garbage_are_protocol_errors() {
        let frame = json!({"event": "chat", "data": {}}).to_string();
        assert!(matches!(
            ServerMessage::from_frame(&frame),
            Err(ProtocolError::UnknownEvent(name)) if name == "chat"
        ));
        assert!(matches!(
            ServerMessage::from_frame("{not json"),
            Err(ProtocolError::InvalidFrame(_))
        ));
    }

    #[test]
    fn duplicate_diff_keys_keep_the_last_value() {
        let frame = r#"{"event": "update_game", "data": {"result": {"update_positions":
            {"e4": null, "e4": {"color": "white", "type": "pawn"}}}}}"#;
        match ServerMessage::from_frame(frame).unwrap() {
            ServerMessage::UpdateGame(fields) => {
                assert_eq!(
                    fields["result"]["update_positions"]["e4"],
                    json!({"color": "white", "type": "pawn"})
                );
            }
            other => panic!("unexpected message {other:?}"),
        }
    }
}
