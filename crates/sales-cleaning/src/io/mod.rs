//! Reading and writing comma-delimited tables.

mod reader;
mod writer;

pub use reader::load_table;
pub use writer::write_table;
