use crate::{
    constants::DEFAULT_PENDING_QUEUE_CAPACITY,
    sink::{BoxedSinkDelegate, EventError, SinkDelegate, SinkEvent, SinkState},
    utils::{next_sink_id, now},
};
use std::collections::VecDeque;

struct PendingEvent<T> {
    event: SinkEvent<T>,
    queued_at: u64, // Microseconds, see `utils::now`
}

/// Buffers events until a delegate is attached, then forwards them in order.
///
/// Producers call [`success`](Self::success), [`error`](Self::error) and
/// [`end_of_stream`](Self::end_of_stream) without knowing whether anyone is
/// listening. While detached, events are appended to a pending queue. Attaching
/// a delegate replays that queue head-to-tail before the attach call returns,
/// after which new events are handed to the delegate synchronously.
///
/// The pending queue is only ever non-empty while detached, so the delegate
/// observes events in exactly the order they were produced.
///
/// Once `end_of_stream` has been accepted the sink is closed: later producer
/// calls are dropped and logged. Attaching a delegate still works after close,
/// so a late listener receives the queued backlog including the terminal
/// `EndOfStream`.
pub struct QueuingEventSink<'a, T> {
    sink_id: u32,
    delegate: Option<BoxedSinkDelegate<'a, T>>,
    pending_events: VecDeque<PendingEvent<T>>,
    is_closed: bool,
}

impl<'a, T> QueuingEventSink<'a, T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PENDING_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sink_id: next_sink_id(),
            delegate: None,
            pending_events: VecDeque::with_capacity(capacity),
            is_closed: false,
        }
    }

    /// Attaches (`Some`) or clears (`None`) the delegate.
    ///
    /// Attaching flushes every pending event into the new delegate before
    /// returning. Clearing neither delivers nor discards anything that is
    /// already queued.
    ///
    /// Returns the previously attached delegate, if any.
    pub fn set_delegate(
        &mut self,
        delegate: Option<BoxedSinkDelegate<'a, T>>,
    ) -> Option<BoxedSinkDelegate<'a, T>> {
        let previous = std::mem::replace(&mut self.delegate, delegate);

        match (previous.is_some(), self.delegate.is_some()) {
            (false, true) => tracing::debug!(sink_id = self.sink_id, "delegate attached"),
            (true, true) => tracing::debug!(sink_id = self.sink_id, "delegate replaced"),
            (true, false) => tracing::debug!(sink_id = self.sink_id, "delegate detached"),
            (false, false) => {}
        }

        self.flush_pending();

        previous
    }

    /// Shorthand for `set_delegate(Some(Box::new(delegate)))`.
    pub fn attach<D>(&mut self, delegate: D) -> Option<BoxedSinkDelegate<'a, T>>
    where
        D: SinkDelegate<T> + 'a,
    {
        self.set_delegate(Some(Box::new(delegate)))
    }

    /// Shorthand for `set_delegate(None)`.
    pub fn detach(&mut self) -> Option<BoxedSinkDelegate<'a, T>> {
        self.set_delegate(None)
    }

    pub fn success(&mut self, payload: T) {
        self.deliver_or_queue(SinkEvent::Success { payload });
    }

    pub fn error(&mut self, code: impl Into<String>, message: Option<&str>, details: Option<T>) {
        self.deliver_or_queue(SinkEvent::Error(EventError::new(code, message, details)));
    }

    pub fn end_of_stream(&mut self) {
        self.deliver_or_queue(SinkEvent::EndOfStream);
    }

    pub fn state(&self) -> SinkState {
        if self.delegate.is_some() {
            SinkState::Attached
        } else {
            SinkState::Detached
        }
    }

    pub fn is_attached(&self) -> bool {
        self.state() == SinkState::Attached
    }

    /// `true` once `end_of_stream` has been accepted, whether or not it has
    /// been delivered yet.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn pending_len(&self) -> usize {
        self.pending_events.len()
    }

    pub fn sink_id(&self) -> u32 {
        self.sink_id
    }

    fn deliver_or_queue(&mut self, event: SinkEvent<T>) {
        if self.is_closed {
            tracing::warn!(
                sink_id = self.sink_id,
                kind = ?event.kind(),
                "Ignoring event produced after end of stream"
            );
            return;
        }

        if event.is_end_of_stream() {
            self.is_closed = true;
        }

        match self.delegate.as_mut() {
            Some(delegate) => {
                tracing::trace!(sink_id = self.sink_id, kind = ?event.kind(), "delivering event");
                delegate(event);
            }
            None => {
                tracing::trace!(sink_id = self.sink_id, kind = ?event.kind(), "queueing event");
                self.pending_events.push_back(PendingEvent {
                    event,
                    queued_at: now(),
                });
            }
        }
    }

    fn flush_pending(&mut self) {
        let Some(delegate) = self.delegate.as_mut() else {
            return;
        };

        let Some(oldest) = self.pending_events.front() else {
            return;
        };

        tracing::debug!(
            sink_id = self.sink_id,
            pending = self.pending_events.len(),
            oldest_age_us = now().saturating_sub(oldest.queued_at),
            "Replaying pending events"
        );

        // Pop one at a time so a panicking delegate only loses the event in
        // flight; the rest stay queued for the next delegate.
        while let Some(pending) = self.pending_events.pop_front() {
            delegate(pending.event);
        }
    }
}

impl<T> Default for QueuingEventSink<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for QueuingEventSink<'_, T> {
    fn drop(&mut self) {
        if !self.pending_events.is_empty() {
            tracing::debug!(
                sink_id = self.sink_id,
                pending = self.pending_events.len(),
                "Dropping sink with undelivered events"
            );
        }
    }
}
