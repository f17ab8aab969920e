//! The counter: its store, the provider that scopes it to a subtree, and
//! the accessor descendants use to read it.

mod provider;
mod state;

pub use provider::{use_count_store, CountProvider};
pub use state::{create_count_store, CountState, CountStore};
