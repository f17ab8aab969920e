//! Terminal front end for the counter demo.

pub mod render;
pub mod terminal_guard;

pub use terminal_guard::setup_terminal;
