//! Utility functions.

pub mod parser;

pub use parser::{parse_bool, parse_duration, parse_list, round_secs};
