/// Returns the current timestamp in microseconds since the UNIX epoch.
///
/// Used to stamp events as they enter a pending queue so the replay delay can
/// be reported when a delegate finally attaches. Clocks set before the epoch
/// yield `0`.
///
/// # Example:
/// ```rust
/// use queuing_event_sink::utils::now;
/// let timestamp = now(); // Gets the current time in microseconds
/// assert!(timestamp > 0);
/// ```
pub fn now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_micros()).unwrap_or(0)
}
