mod next_sink_id;
mod now;

pub use next_sink_id::next_sink_id;
pub use now::now;
