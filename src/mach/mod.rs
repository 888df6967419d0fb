/*!
## Machine Module

This module assembles tokenized lines into program images and lists
finished images back as source text.

*/

mod listing;
mod program;

pub use listing::list;
pub use program::Program;
