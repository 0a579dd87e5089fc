use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::game::utils::parse_square;
use crate::models::*;
use crate::render::{RenderBridge, RenderEvent};
use crate::websocket::channel::OutboundChannel;

/// Everything one page knows about the game, owned in one place.
///
/// Inbound frames and user gestures both mutate it; the renderer only reads
/// what it is told about.
pub struct SessionContext {
    pub id: String,
    pub(crate) board: BoardState,
    pub(crate) roster: LobbyRoster,
    pub(crate) selection: SelectionState,
    pub(crate) game: GameView,
    pub(crate) identity: Option<SessionIdentity>,
    predict_removals: bool,
    channel: Box<dyn OutboundChannel>,
    renderer: Box<dyn RenderBridge>,
}

/// Copy of the session state, for readers outside the actor
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub board: BoardState,
    pub roster: LobbyRoster,
    pub selection: SelectionState,
    pub game: GameView,
    pub identity: Option<SessionIdentity>,
}

impl SessionContext {
    pub fn new(
        config: &ClientConfig,
        channel: Box<dyn OutboundChannel>,
        renderer: Box<dyn RenderBridge>,
    ) -> Self {
        let id = Uuid::new_v4().to_string();
        info!("New client session {} for {}", id, config.channel_url());
        Self {
            id,
            board: BoardState::new(),
            roster: LobbyRoster::new(),
            selection: SelectionState::Idle,
            game: GameView::default(),
            identity: None,
            predict_removals: config.predict_removals,
            channel,
            renderer,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn roster(&self) -> &LobbyRoster {
        &self.roster
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn game(&self) -> &GameView {
        &self.game
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.clone(),
            roster: self.roster.clone(),
            selection: self.selection,
            game: self.game.clone(),
            identity: self.identity.clone(),
        }
    }

    /// A click on a board square, by name.
    pub fn click_square(&mut self, name: &str) {
        let square = match parse_square(name) {
            Ok(square) => square,
            Err(e) => {
                warn!("Session {}: ignoring click: {}", self.id, e);
                return;
            }
        };

        let before = self.selection;
        let occupied = self.board.is_occupied(square);
        if let Some(intent) = self.selection.click(square, occupied) {
            info!(
                "Session {}: move {} -> {}",
                self.id, intent.source, intent.destination
            );
            self.emit(intent.to_message());
        } else if before == self.selection {
            debug!("Session {}: click on empty {} ignored", self.id, square);
        }

        if before != self.selection {
            self.notify(RenderEvent::Selection(self.selection));
        }
    }

    /// Fields go out as typed. Only blank ones stop the request.
    pub fn request_join(&mut self, game_id: &str, user_id: &str, color: &str) {
        let identity = SessionIdentity {
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
            color: color.to_string(),
        };
        match self.roster.record_join_requested(&identity) {
            Some(message) => {
                info!("Session {}: joining game {}", self.id, identity.game_id);
                self.identity = Some(identity);
                self.emit(message);
            }
            None => warn!(
                "Session {}: join needs a game id, user id and color",
                self.id
            ),
        }
    }

    pub fn request_new_game(&mut self, fen: Option<String>) {
        let fen = fen.filter(|fen| !fen.trim().is_empty());
        self.emit(ClientMessage::NewGame { fen });
    }

    pub fn request_remove(&mut self, game_id: &str) {
        let game_id = game_id.trim();
        if game_id.is_empty() {
            warn!("Session {}: remove needs a game id", self.id);
            return;
        }
        if self.predict_removals {
            if let Some(change) = self.roster.predict_removal(game_id) {
                self.notify(RenderEvent::Roster(change));
            }
        }
        self.emit(ClientMessage::RemoveGame {
            game_id: game_id.to_string(),
        });
    }

    /// At most one send per gesture; a failed send is logged and dropped.
    pub(crate) fn emit(&mut self, message: ClientMessage) {
        debug!("Session {}: emit {}", self.id, message.event_name());
        if let Err(e) = self.channel.emit(&message) {
            warn!(
                "Session {}: failed to send {}: {}",
                self.id,
                message.event_name(),
                e
            );
        }
    }

    pub(crate) fn notify(&mut self, event: RenderEvent) {
        self.renderer.notify(event);
    }
}
