//! Boundary to whatever draws the page.
//!
//! The session never touches the DOM. It reports what changed through a
//! [`RenderBridge`] and the bridge decides how much to redraw.

use log::{info, warn};
use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{BoardChange, RosterChange, SelectionState, StatusFlag};

/// Fields of the on-screen game that can change independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameField {
    GameId,
    BoardString,
    CurrentPlayer,
    WhitePlayer,
    BlackPlayer,
    Status(StatusFlag),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Board(BoardChange),
    Roster(RosterChange),
    Game(GameField),
    Selection(SelectionState),
    Error(String),
}

pub trait RenderBridge {
    fn notify(&mut self, event: RenderEvent);
}

/// Writes every change to the log
#[derive(Debug, Default)]
pub struct LogRenderer;

impl RenderBridge for LogRenderer {
    fn notify(&mut self, event: RenderEvent) {
        match event {
            RenderEvent::Board(BoardChange::All) => info!("Redraw whole board"),
            RenderEvent::Board(BoardChange::Squares(squares)) => {
                let names: Vec<String> = squares.iter().map(|square| square.to_string()).collect();
                info!("Redraw squares {}", names.join(", "));
            }
            RenderEvent::Roster(change) => info!("Lobby changed: {:?}", change),
            RenderEvent::Game(field) => info!("Game view changed: {:?}", field),
            RenderEvent::Selection(selection) => info!("Selection: {:?}", selection),
            RenderEvent::Error(message) => warn!("Server error: {}", message),
        }
    }
}

/// Keeps every event in a buffer shared with its clones
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    events: Rc<RefCell<Vec<RenderEvent>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.borrow().clone()
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<RenderEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl RenderBridge for RecordingRenderer {
    fn notify(&mut self, event: RenderEvent) {
        self.events.borrow_mut().push(event);
    }
}
