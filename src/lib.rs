pub mod constants;
pub mod sink;
pub mod utils;
