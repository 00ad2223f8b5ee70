mod queuing_event_sink;
mod shared_queuing_event_sink;
mod sink_event;
mod sink_state;
pub mod sink_trait;

pub use queuing_event_sink::QueuingEventSink;
pub use shared_queuing_event_sink::SharedQueuingEventSink;
pub use sink_event::{EventError, SinkEvent, SinkEventKind};
pub use sink_state::SinkState;
pub use sink_trait::{BoxedSinkDelegate, SinkDelegate};
