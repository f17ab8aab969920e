use std::fmt;
use std::sync::Arc;

/// A shareable, argument-less callback stored inside state or attached to
/// a button.
///
/// Two actions are equal only if they are the same closure instance, so a
/// state snapshot holding an action compares equal across updates as long
/// as the action itself was not replaced.
#[derive(Clone)]
pub struct Action {
    run: Arc<dyn Fn() + Send + Sync>,
}

impl Action {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self { run: Arc::new(f) }
    }

    /// Invoke the callback.
    pub fn call(&self) {
        (self.run)();
    }

    /// A no-op action.
    pub fn noop() -> Self {
        Self::new(|| {})
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.run, &other.run)
    }
}

impl Eq for Action {}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
