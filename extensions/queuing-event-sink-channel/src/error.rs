use std::fmt;

/// Reasons an event could not be forwarded into a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventChannelError {
    /// A bounded channel has no free slot.
    Full,
    /// The receiving half was dropped, or the stream already ended.
    Disconnected,
}

impl fmt::Display for EventChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventChannelError::Full => write!(f, "Event channel is full"),
            EventChannelError::Disconnected => write!(f, "Event channel is disconnected"),
        }
    }
}

impl std::error::Error for EventChannelError {}
