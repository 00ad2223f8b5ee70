use crate::sink::{BoxedSinkDelegate, QueuingEventSink, SinkDelegate, SinkState};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, thread-safe handle to a [`QueuingEventSink`].
///
/// Every clone refers to the same sink, so producers on different threads and
/// the transport that attaches the delegate can each hold their own handle.
/// Calls are serialized by a mutex, which keeps the ordering guarantee of the
/// inner sink: events are observed in the order their producer calls acquired
/// the lock.
///
/// The delegate runs while the lock is held. A delegate must not call back
/// into the same sink, or it will deadlock.
pub struct SharedQueuingEventSink<T> {
    inner: Arc<Mutex<QueuingEventSink<'static, T>>>,
}

impl<T> Clone for SharedQueuingEventSink<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedQueuingEventSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SharedQueuingEventSink<T> {
    pub fn new() -> Self {
        Self::from_sink(QueuingEventSink::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_sink(QueuingEventSink::with_capacity(capacity))
    }

    pub fn from_sink(sink: QueuingEventSink<'static, T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    /// Runs `f` with exclusive access to the inner sink.
    pub fn with_sink<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut QueuingEventSink<'static, T>) -> R,
    {
        f(&mut self.lock())
    }

    pub fn set_delegate(
        &self,
        delegate: Option<BoxedSinkDelegate<'static, T>>,
    ) -> Option<BoxedSinkDelegate<'static, T>> {
        self.lock().set_delegate(delegate)
    }

    pub fn attach<D>(&self, delegate: D) -> Option<BoxedSinkDelegate<'static, T>>
    where
        D: SinkDelegate<T> + 'static,
    {
        self.lock().attach(delegate)
    }

    pub fn detach(&self) -> Option<BoxedSinkDelegate<'static, T>> {
        self.lock().detach()
    }

    pub fn success(&self, payload: T) {
        self.lock().success(payload);
    }

    pub fn error(&self, code: impl Into<String>, message: Option<&str>, details: Option<T>) {
        self.lock().error(code, message, details);
    }

    pub fn end_of_stream(&self) {
        self.lock().end_of_stream();
    }

    pub fn state(&self) -> SinkState {
        self.lock().state()
    }

    pub fn is_attached(&self) -> bool {
        self.lock().is_attached()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_closed()
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending_len()
    }

    pub fn sink_id(&self) -> u32 {
        self.lock().sink_id()
    }

    // A delegate that panicked mid-delivery poisons the lock. Only the event
    // it was handling is lost; undelivered events are still queued.
    fn lock(&self) -> MutexGuard<'_, QueuingEventSink<'static, T>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Sink lock poisoned by a panicking delegate; recovering");
                poisoned.into_inner()
            }
        }
    }
}
