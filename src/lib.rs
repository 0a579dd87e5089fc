//! Client side of a realtime chess lobby.
//!
//! Turns user gestures into outbound intents and folds the server's pushed
//! snapshots and diffs into local board, lobby and game state. Move legality,
//! turn order and game-end detection belong to the server; the client only
//! shows what it is sent.

pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod render;
pub mod replay;
pub mod websocket;
