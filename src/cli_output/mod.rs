//! CLI output utilities.
//!
//! Headers and status lines live in `boxes`; the insights table and prompt
//! cards are drawn by `table`.

mod boxes;
mod table;

pub use boxes::*;
pub use table::*;
