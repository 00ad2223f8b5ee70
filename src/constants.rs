/// Initial capacity reserved for the pending queue of a newly created sink.
///
/// This is a number of *events*, not bytes. The queue grows past this value
/// on demand; it only avoids reallocations for short detached bursts (e.g.
/// events produced between creating a sink and the first listener
/// subscribing).
pub const DEFAULT_PENDING_QUEUE_CAPACITY: usize = 8;

/// The default buffer size for bounded event channels.
///
/// As with the pending queue, this counts events. A bounded channel that is
/// full drops the event being forwarded, so hosts that replay large backlogs
/// should prefer an unbounded channel.
pub const DEFAULT_EVENT_CHANNEL_BUFFER_SIZE: usize = 32;
