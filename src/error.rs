use thiserror::Error;

/// Errors raised while rendering a component tree.
///
/// These are wiring mistakes rather than runtime conditions: they are not
/// retried and propagate out of [`Root`](crate::Root) to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A component asked for a context that no ancestor provides.
    #[error("{context}.Provider is missing")]
    MissingProvider { context: &'static str },

    /// A button index that is not present in the current view.
    #[error("no button at index {0}")]
    UnknownButton(usize),
}
