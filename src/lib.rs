//! # Scoped Store
//!
//! Tree-scoped reactive state for Rust component trees.
//!
//! ## Store (state container)
//!
//! - `Store<S>` - state plus listeners, notified synchronously on every write
//! - `create_store` - build a store whose state may capture its own setter
//! - `Subscription` - RAII guard that unsubscribes on drop
//!
//! ## Component tree
//!
//! - `Component` / `Element` / `View` - what renders and what it renders to
//! - `Scope` - one mounted component: hook slots and context bindings
//! - `Root` - mounts a tree, re-renders dirty scopes, resolves the view
//!
//! ## Scoped stores
//!
//! - `use_store` - subscribe a scope to a selected slice of a store
//! - `CountProvider` / `use_count_store` - a counter store bound to a subtree

pub mod app;
pub mod count;
pub mod error;
pub mod hooks;
pub mod scope;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use app::{App, Counter};
pub use count::{create_count_store, use_count_store, CountProvider, CountState, CountStore};
pub use error::ContextError;
pub use hooks::{use_store, use_store_with_eq};
pub use scope::{Scope, ScopeHandle};
pub use store::{create_store, Action, SetState, Store, Subscription};
pub use view::{Component, Element, Root, View};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let root = Root::mount(App::new(0)).unwrap();
        root.press(0).unwrap();
        assert_eq!(root.buttons(), vec!["count is 1".to_string()]);
    }
}
