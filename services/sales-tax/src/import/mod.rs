pub mod parse;
pub mod queue;
pub mod worker;

pub use parse::{decode_file_bytes, parse_rows, ImportRow};
pub use queue::ImportQueue;
