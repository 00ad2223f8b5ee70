use std::fmt;

/// Fieldless discriminant of a [`SinkEvent`].
///
/// Lets log records describe an event without requiring `T: Debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEventKind {
    Success,
    Error,
    EndOfStream,
}

/// Error outcome relayed from a producer to the delegate.
///
/// The sink never inspects these fields; `code` is whatever the producer
/// chose, and `details` is an optional payload of the same type as regular
/// success events.
#[derive(Debug, Clone, PartialEq)]
pub struct EventError<T> {
    pub code: String,
    pub message: Option<String>,
    pub details: Option<T>,
}

impl<T> EventError<T> {
    pub fn new(code: impl Into<String>, message: Option<&str>, details: Option<T>) -> Self {
        Self {
            code: code.into(),
            message: message.map(str::to_owned),
            details,
        }
    }
}

impl<T> fmt::Display for EventError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.code, message),
            None => write!(f, "{}", self.code),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for EventError<T> {}

/// A single outcome flowing from a producer to the attached delegate.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent<T> {
    Success { payload: T },
    Error(EventError<T>),
    /// Terminal marker. Nothing is accepted by a sink after this.
    EndOfStream,
}

impl<T> SinkEvent<T> {
    pub fn kind(&self) -> SinkEventKind {
        match self {
            SinkEvent::Success { .. } => SinkEventKind::Success,
            SinkEvent::Error(_) => SinkEventKind::Error,
            SinkEvent::EndOfStream => SinkEventKind::EndOfStream,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SinkEvent::Error(_))
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SinkEvent::EndOfStream)
    }

    /// Converts the event into the item shape used by async consumers.
    ///
    /// Returns `None` for [`SinkEvent::EndOfStream`], which has no item and
    /// instead terminates the consuming stream.
    pub fn into_result(self) -> Option<Result<T, EventError<T>>> {
        match self {
            SinkEvent::Success { payload } => Some(Ok(payload)),
            SinkEvent::Error(err) => Some(Err(err)),
            SinkEvent::EndOfStream => None,
        }
    }
}
