use chess::Square;
use log::{info, warn};
use serde_json::{Map, Value};

use crate::error::ProtocolError;
use crate::game::utils::{color_from_str, parse_square, piece_from_str};
use crate::models::*;
use crate::render::{GameField, RenderEvent};
use crate::websocket::session::SessionContext;

impl SessionContext {
    /// Apply one inbound frame. Nothing here fails the session: bad frames and
    /// bad fields are logged and skipped.
    pub fn handle_frame(&mut self, text: &str) {
        match ServerMessage::from_frame(text) {
            Ok(message) => self.handle_message(message),
            Err(e) => warn!("Session {}: ignoring frame: {}", self.id, e),
        }
    }

    pub fn handle_message(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::GameCreated(summary) => self.handle_game_created(summary),
            ServerMessage::GameRemoved { game_id } => self.handle_game_removed(&game_id),
            ServerMessage::UpdateGame(fields) => self.handle_update_game(&fields),
            ServerMessage::Error { message } => self.handle_error(message),
        }
    }

    fn handle_game_created(&mut self, summary: GameSummary) {
        info!("Session {}: game {} created", self.id, summary.game_id);
        let change = self.roster.record_game_created(summary);
        self.notify(RenderEvent::Roster(change));
    }

    fn handle_game_removed(&mut self, game_id: &str) {
        info!("Session {}: game {} removed", self.id, game_id);
        if let Some(change) = self.roster.record_game_removed(game_id) {
            self.notify(RenderEvent::Roster(change));
        }
    }

    fn handle_error(&mut self, message: String) {
        warn!("Session {}: server reported error: {}", self.id, message);
        self.notify(RenderEvent::Error(message));
    }

    /// Route each field that is present; absent fields keep their value.
    fn handle_update_game(&mut self, fields: &Map<String, Value>) {
        let game_id = self.apply_game_id(fields);

        let mut encoded_board = None;
        for key in ["board_string", "board"] {
            match fields.get(key) {
                Some(Value::String(encoded)) => {
                    encoded_board = encoded_board.or(Some(encoded));
                }
                Some(other) => self.protocol_error(ProtocolError::MalformedField {
                    field: key,
                    reason: format!("expected a string, got {other}"),
                }),
                None => {}
            }
        }
        if let Some(encoded) = encoded_board {
            self.apply_board_string(encoded);
        }

        match fields.get("result") {
            Some(Value::Object(result)) => self.apply_move_result(result),
            Some(Value::Null) | None => {}
            Some(other) => self.protocol_error(ProtocolError::MalformedField {
                field: "result",
                reason: format!("expected an object, got {other}"),
            }),
        }

        let current = self.read_player(fields, "current_player");
        let white = self.read_player(fields, "white_player");
        let black = self.read_player(fields, "black_player");
        if let Some(player) = current {
            self.game.current_player = player;
            self.notify(RenderEvent::Game(GameField::CurrentPlayer));
        }
        if let Some(player) = white.clone() {
            self.game.white_player = player;
            self.notify(RenderEvent::Game(GameField::WhitePlayer));
        }
        if let Some(player) = black.clone() {
            self.game.black_player = player;
            self.notify(RenderEvent::Game(GameField::BlackPlayer));
        }
        // An unreadable game_id names no row, so the seats stay off the roster.
        let seat_game = if fields.contains_key("game_id") {
            game_id
        } else {
            self.game.game_id.clone()
        };
        if white.is_some() || black.is_some() {
            if let Some(game_id) = seat_game {
                if let Some(change) = self.roster.record_seats(&game_id, white, black) {
                    self.notify(RenderEvent::Roster(change));
                }
            }
        }

        for flag in StatusFlag::TOP_LEVEL {
            if let Some(value) = fields.get(flag.wire_name()) {
                self.set_status(flag, value);
            }
        }
    }

    /// Returns the game id named by this update, if any.
    fn apply_game_id(&mut self, fields: &Map<String, Value>) -> Option<String> {
        let value = fields.get("game_id")?;
        let game_id = match id_from_value("game_id", value) {
            Ok(game_id) => game_id,
            Err(e) => {
                self.protocol_error(e);
                return None;
            }
        };
        if self.game.game_id != game_id {
            self.game.game_id = game_id.clone();
            self.notify(RenderEvent::Game(GameField::GameId));
        }
        let game_id = game_id?;
        // The server still talks about this game, so a predicted removal was wrong.
        if let Some(change) = self.roster.reinstate(&game_id) {
            info!("Session {}: game {} still exists, restoring row", self.id, game_id);
            self.notify(RenderEvent::Roster(change));
        }
        Some(game_id)
    }

    fn apply_board_string(&mut self, encoded: &str) {
        self.game.board_string = Some(encoded.to_string());
        self.notify(RenderEvent::Game(GameField::BoardString));
        match self.board.apply_full_board(encoded) {
            Ok(change) => self.notify(RenderEvent::Board(change)),
            Err(e) => self.protocol_error(e),
        }
    }

    fn apply_move_result(&mut self, result: &Map<String, Value>) {
        match result.get("update_positions") {
            Some(Value::Object(positions)) => {
                let entries = self.read_position_diff(positions);
                let change = self.board.apply_update(&entries);
                if !change.is_empty() {
                    self.notify(RenderEvent::Board(change));
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => self.protocol_error(ProtocolError::MalformedField {
                field: "update_positions",
                reason: format!("expected an object, got {other}"),
            }),
        }

        for flag in StatusFlag::MOVE_RESULT {
            if let Some(value) = result.get(flag.wire_name()) {
                self.set_status(flag, value);
            }
        }
    }

    fn read_position_diff(&mut self, positions: &Map<String, Value>) -> Vec<(Square, Option<BoardPiece>)> {
        let mut entries = Vec::with_capacity(positions.len());
        for (name, value) in positions {
            match parse_square(name).and_then(|square| Ok((square, occupant_from_value(name, value)?))) {
                Ok(entry) => entries.push(entry),
                Err(e) => self.protocol_error(e),
            }
        }
        entries
    }

    /// `None` when the field is absent or malformed, `Some(None)` for an empty seat.
    fn read_player(&mut self, fields: &Map<String, Value>, key: &'static str) -> Option<Option<PlayerRef>> {
        let value = fields.get(key)?;
        match player_from_value(key, value) {
            Ok(player) => Some(player),
            Err(e) => {
                self.protocol_error(e);
                None
            }
        }
    }

    fn set_status(&mut self, flag: StatusFlag, value: &Value) {
        if self.game.status.get(&flag) != Some(value) {
            self.game.status.insert(flag, value.clone());
            self.notify(RenderEvent::Game(GameField::Status(flag)));
        }
    }

    fn protocol_error(&self, error: ProtocolError) {
        warn!("Session {}: skipping field: {}", self.id, error);
    }
}

/// A diff value: falsy clears the square, `{color, type}` places a piece.
fn occupant_from_value(square: &str, value: &Value) -> Result<Option<BoardPiece>, ProtocolError> {
    let invalid = |reason: String| ProtocolError::InvalidPiece {
        square: square.to_string(),
        reason,
    };
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(text) if text.is_empty() => Ok(None),
        Value::Number(number) if number.as_f64() == Some(0.0) => Ok(None),
        Value::Object(piece) if piece.is_empty() => Ok(None),
        Value::Object(piece) => {
            let color = piece
                .get("color")
                .and_then(Value::as_str)
                .and_then(color_from_str)
                .ok_or_else(|| invalid(format!("bad color in {value}")))?;
            let kind = piece
                .get("type")
                .and_then(Value::as_str)
                .and_then(piece_from_str)
                .ok_or_else(|| invalid(format!("bad type in {value}")))?;
            Ok(Some(BoardPiece::new(color, kind)))
        }
        other => Err(invalid(format!("unexpected value {other}"))),
    }
}
