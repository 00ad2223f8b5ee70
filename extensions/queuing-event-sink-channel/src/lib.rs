pub mod dynamic_channel;
mod error;
mod event_channel;

pub use dynamic_channel::{
    ChannelDelegate, DynamicChannelType, DynamicReceiver, DynamicSender, EventResult, event_channel,
};
pub use error::EventChannelError;
pub use event_channel::EventChannel;
