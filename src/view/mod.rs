//! A minimal retained component tree.
//!
//! Components render [`Element`]s; [`Root`] mounts them into scopes,
//! reconciles child components across renders, re-renders dirty scopes on
//! [`Root::flush`], and resolves the tree into a [`View`] for display.

mod component;
mod element;
mod root;

pub use component::Component;
pub use element::{Element, View};
pub use root::Root;
