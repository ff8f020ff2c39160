//! Locale-aware rendering of integers and dates.

mod date;
mod number;

pub use date::{DateFormat, DateStyle, format_date};
pub use number::{IntFormat, format_int, grouping_separator};
