use actix::prelude::*;
use log::info;
use serde::Deserialize;

use crate::websocket::session::{SessionContext, SessionSnapshot};

/// Actor owning one page's session.
///
/// The mailbox is the event loop: inbound frames and gestures are handled one
/// at a time, in arrival order, so the context needs no locking.
pub struct ClientSession {
    context: SessionContext,
}

impl ClientSession {
    pub fn new(context: SessionContext) -> Self {
        Self { context }
    }
}

impl Actor for ClientSession {
    type Context = Context<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        info!("Client session started: {}", self.context.id);
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        info!("Client session closed: {}", self.context.id);
    }
}

/// Text frame delivered by the channel
#[derive(Message)]
#[rtype(result = "()")]
pub struct InboundFrame(pub String);

/// Something the user did on the page
#[derive(Message, Deserialize, Debug, Clone, PartialEq, Eq)]
#[rtype(result = "()")]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    Click {
        square: String,
    },
    Join {
        game_id: String,
        user_id: String,
        color: String,
    },
    NewGame {
        #[serde(default)]
        fen: Option<String>,
    },
    Remove {
        game_id: String,
    },
}

/// Ask for a copy of the current state
#[derive(Message)]
#[rtype(result = "SessionSnapshot")]
pub struct GetSnapshot;

impl Handler<InboundFrame> for ClientSession {
    type Result = ();

    fn handle(&mut self, msg: InboundFrame, _: &mut Self::Context) {
        self.context.handle_frame(&msg.0);
    }
}

impl Handler<Gesture> for ClientSession {
    type Result = ();

    fn handle(&mut self, msg: Gesture, _: &mut Self::Context) {
        match msg {
            Gesture::Click { square } => self.context.click_square(&square),
            Gesture::Join {
                game_id,
                user_id,
                color,
            } => self.context.request_join(&game_id, &user_id, &color),
            Gesture::NewGame { fen } => self.context.request_new_game(fen),
            Gesture::Remove { game_id } => self.context.request_remove(&game_id),
        }
    }
}

impl Handler<GetSnapshot> for ClientSession {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.context.snapshot())
    }
}
