use std::sync::atomic::{AtomicU32, Ordering};

/// Process-wide counter; the first sink gets id `1`.
static NEXT_SINK_ID: AtomicU32 = AtomicU32::new(1);

/// Returns a process-unique id used to correlate log records of one sink.
#[inline]
pub fn next_sink_id() -> u32 {
    NEXT_SINK_ID.fetch_add(1, Ordering::Relaxed)
}
