pub mod cell;
pub mod pagination;

pub use cell::{cell_link, cell_text, parse_quantity, split_tags};
pub use pagination::*;
