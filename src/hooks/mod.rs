//! Store accessor hooks for components.

mod selector;

pub use selector::{use_store, use_store_with_eq};
