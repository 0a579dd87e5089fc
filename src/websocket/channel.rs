use futures::channel::mpsc::UnboundedSender;

use crate::error::ChannelError;
use crate::models::ClientMessage;

/// Outbound half of the realtime channel. Sending never waits for a reply.
pub trait OutboundChannel {
    fn emit(&mut self, message: &ClientMessage) -> Result<(), ChannelError>;
}

/// Serialises each message to a JSON frame and queues it for the socket pump.
#[derive(Debug, Clone)]
pub struct FrameChannel {
    sender: UnboundedSender<String>,
}

impl FrameChannel {
    pub fn new(sender: UnboundedSender<String>) -> Self {
        Self { sender }
    }
}

impl OutboundChannel for FrameChannel {
    fn emit(&mut self, message: &ClientMessage) -> Result<(), ChannelError> {
        let frame = message.to_frame()?;
        self.sender
            .unbounded_send(frame)
            .map_err(|_| ChannelError::Closed)
    }
}
