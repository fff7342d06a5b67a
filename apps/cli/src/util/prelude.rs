pub use crate::print_output;
pub use crate::util::output::{format_timestamp, print_done, tags_cell};
