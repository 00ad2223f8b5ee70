use crate::dynamic_channel::{DynamicChannelType, DynamicReceiver, event_channel};
use queuing_event_sink::sink::SharedQueuingEventSink;

/// Listen/cancel transport over a shared queuing sink.
///
/// Producers publish through [`sink`](Self::sink) at any time. Each
/// [`listen`](Self::listen) call attaches a fresh channel delegate, replaying
/// the backlog into it, and returns the stream half. [`cancel`](Self::cancel)
/// detaches the delegate; events produced afterwards queue up for the next
/// listener.
///
/// Only one listener is attached at a time. Listening again replaces the
/// previous listener, whose stream then ends.
pub struct EventChannel<T> {
    sink: SharedQueuingEventSink<T>,
    channel_type: DynamicChannelType,
}

impl<T: Send + 'static> EventChannel<T> {
    pub fn new(channel_type: DynamicChannelType) -> Self {
        Self::with_sink(SharedQueuingEventSink::new(), channel_type)
    }

    pub fn with_sink(sink: SharedQueuingEventSink<T>, channel_type: DynamicChannelType) -> Self {
        Self { sink, channel_type }
    }

    /// Producer handle. Clones share the same underlying queue.
    pub fn sink(&self) -> SharedQueuingEventSink<T> {
        self.sink.clone()
    }

    pub fn channel_type(&self) -> DynamicChannelType {
        self.channel_type
    }

    /// Attaches a new listener and returns its stream.
    ///
    /// If the stream already ended (the sink is closed and its
    /// `EndOfStream` has been delivered), nothing is attached and the
    /// returned stream is already terminated.
    pub fn listen(&self) -> DynamicReceiver<T> {
        let (delegate, receiver) = event_channel(self.channel_type);

        let previous = self.sink.with_sink(|sink| {
            if sink.is_closed() && sink.pending_len() == 0 {
                tracing::debug!(
                    sink_id = sink.sink_id(),
                    "Listening on an ended stream; returning a closed receiver"
                );
                // Dropping the delegate drops its sender
                drop(delegate);
                return None;
            }

            sink.set_delegate(Some(delegate.into_boxed()))
        });

        if previous.is_some() {
            tracing::debug!(
                sink_id = self.sink.sink_id(),
                "New listener replaced an existing one"
            );
        }

        receiver
    }

    /// Detaches the current listener. Returns `false` if none was attached.
    pub fn cancel(&self) -> bool {
        self.sink.detach().is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.sink.is_attached()
    }
}

impl<T: Send + 'static> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new(DynamicChannelType::default())
    }
}
