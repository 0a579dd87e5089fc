pub mod channel;
pub mod game_handlers;
pub mod handler;
pub mod session;

pub use channel::{FrameChannel, OutboundChannel};
pub use handler::{ClientSession, Gesture, GetSnapshot, InboundFrame};
pub use session::{SessionContext, SessionSnapshot};
