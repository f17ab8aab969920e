//! Mounted component instances: hook slots and tree-scoped context.

mod scope;

pub use scope::{Scope, ScopeHandle};
