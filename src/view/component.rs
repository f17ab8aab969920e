use crate::error::ContextError;
use crate::scope::Scope;

use super::element::Element;

/// A node in the component tree.
///
/// `render` is called on mount, whenever the scope is marked dirty, and
/// whenever the parent re-renders. State that must survive re-renders lives
/// in hook slots on `cx` ([`Scope::use_hook`]).
pub trait Component: Send + Sync + 'static {
    fn render(&self, cx: &Scope) -> Result<Element, ContextError>;

    /// Identifies the component kind when matching children across renders.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
