use crate::EventChannelError;
use futures::{
    Stream, StreamExt,
    channel::mpsc::{self, Receiver, Sender, TrySendError, UnboundedReceiver, UnboundedSender},
    task::{Context, Poll},
};
use queuing_event_sink::{
    constants::DEFAULT_EVENT_CHANNEL_BUFFER_SIZE,
    sink::{BoxedSinkDelegate, EventError, SinkEvent},
};
use std::pin::Pin;

/// Item yielded by an event stream: a success payload or a relayed error.
pub type EventResult<T> = Result<T, EventError<T>>;

/// Selects the kind of channel backing an event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DynamicChannelType {
    /// Holds up to `n` undelivered events. Events forwarded into a full
    /// channel are dropped and logged, so this mode does NOT guarantee that
    /// every event reaches the listener. A backlog larger than `n` replayed
    /// on `listen` is truncated. Use `Unbounded` when no event may be lost.
    Bounded(usize),

    /// Never drops events while the receiver is alive.
    #[default]
    Unbounded,
}

impl DynamicChannelType {
    pub fn bounded() -> Self {
        DynamicChannelType::Bounded(DEFAULT_EVENT_CHANNEL_BUFFER_SIZE)
    }
}

/// An enum to hold either a bounded or unbounded sender, unifying their interfaces.
pub enum DynamicSender<T> {
    Bounded(Sender<EventResult<T>>),
    Unbounded(UnboundedSender<EventResult<T>>),
}

impl<T> DynamicSender<T> {
    /// Non-blocking send. Never waits for capacity.
    pub fn try_send(&mut self, item: EventResult<T>) -> Result<(), EventChannelError> {
        let result = match self {
            DynamicSender::Bounded(sender) => sender.try_send(item),
            DynamicSender::Unbounded(sender) => sender.unbounded_send(item),
        };

        result.map_err(|err: TrySendError<EventResult<T>>| {
            if err.is_full() {
                EventChannelError::Full
            } else {
                EventChannelError::Disconnected
            }
        })
    }
}

/// An enum to hold either a bounded or unbounded receiver.
pub enum DynamicReceiver<T> {
    Bounded(Receiver<EventResult<T>>),
    Unbounded(UnboundedReceiver<EventResult<T>>),
}

/// Ends (yields `None`) after the sink delivers `EndOfStream`, or once the
/// delegate feeding it is detached and dropped.
impl<T> Stream for DynamicReceiver<T> {
    type Item = EventResult<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.get_mut() {
            DynamicReceiver::Bounded(receiver) => receiver.poll_next_unpin(cx),
            DynamicReceiver::Unbounded(receiver) => receiver.poll_next_unpin(cx),
        }
    }
}

/// Sink delegate that forwards events into a channel.
///
/// `Success` and `Error` become `Ok` and `Err` items. `EndOfStream` drops the
/// sender, which terminates the receiving stream once the buffered items are
/// drained.
pub struct ChannelDelegate<T> {
    sender: Option<DynamicSender<T>>,
}

impl<T> ChannelDelegate<T> {
    pub fn new(sender: DynamicSender<T>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub fn forward(&mut self, event: SinkEvent<T>) {
        let kind = event.kind();

        let Some(item) = event.into_result() else {
            // Dropping the sender closes the stream
            self.sender = None;
            return;
        };

        let Some(sender) = self.sender.as_mut() else {
            tracing::warn!(?kind, "Event forwarded after the channel was closed");
            return;
        };

        if let Err(err) = sender.try_send(item) {
            tracing::warn!(?kind, %err, "Dropping event");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_none()
    }
}

impl<T: Send + 'static> ChannelDelegate<T> {
    pub fn into_boxed(mut self) -> BoxedSinkDelegate<'static, T> {
        Box::new(move |event| self.forward(event))
    }
}

/// Creates a connected delegate/receiver pair.
pub fn event_channel<T>(channel_type: DynamicChannelType) -> (ChannelDelegate<T>, DynamicReceiver<T>) {
    let (sender, receiver) = match channel_type {
        DynamicChannelType::Bounded(buffer_size) => {
            let (sender, receiver) = mpsc::channel(buffer_size);
            (
                DynamicSender::Bounded(sender),
                DynamicReceiver::Bounded(receiver),
            )
        }
        DynamicChannelType::Unbounded => {
            let (sender, receiver) = mpsc::unbounded();
            (
                DynamicSender::Unbounded(sender),
                DynamicReceiver::Unbounded(receiver),
            )
        }
    };

    (ChannelDelegate::new(sender), receiver)
}
