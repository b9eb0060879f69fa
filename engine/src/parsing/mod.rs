// Conversion of raw user text into numbers, lists and durations
pub mod time;
pub mod values;

pub use time::{format_time, is_valid_time, parse_time};
pub use values::{is_valid_number, parse_number_list, parse_number_list_with, parse_value, ParsedList};
