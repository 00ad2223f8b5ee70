/// Whether a sink currently has a delegate to forward events to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkState {
    /// No delegate; producer calls accumulate in the pending queue.
    #[default]
    Detached,

    /// A delegate is present; producer calls pass straight through.
    Attached,
}
