pub mod board;
pub mod game_state;
pub mod lobby;
pub mod messages;
pub mod selection;

// Re-export important types
pub use board::*;
pub use game_state::*;
pub use lobby::*;
pub use messages::*;
pub use selection::*;
