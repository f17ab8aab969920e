//! Store factory: state containers with synchronous, re-entrant-safe
//! change notification.

mod action;
mod store;
mod subscription;

pub use action::Action;
pub use store::{create_store, SetState, Store};
pub use subscription::Subscription;
