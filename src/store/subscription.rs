use std::sync::Weak;

/// Something a [`Subscription`] can remove its listener from.
pub(crate) trait ListenerRegistry: Send + Sync {
    /// Remove the listener with `id`. Returns `false` if it was already gone.
    fn remove_listener(&self, id: usize) -> bool;
}

/// RAII guard for a store listener.
///
/// Dropping the guard unsubscribes. Use [`Subscription::detach`] to keep the
/// listener registered for as long as the store lives.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: usize,
    registry: Option<Weak<dyn ListenerRegistry>>,
}

impl Subscription {
    pub(crate) fn new(id: usize, registry: Weak<dyn ListenerRegistry>) -> Self {
        Self {
            id,
            registry: Some(registry),
        }
    }

    /// Remove the listener now.
    ///
    /// Returns `true` if this call removed it. Calling it again, or after the
    /// store is gone, returns `false`.
    pub fn unsubscribe(&mut self) -> bool {
        match self.registry.take().and_then(|registry| registry.upgrade()) {
            Some(registry) => registry.remove_listener(self.id),
            None => false,
        }
    }

    /// Whether this guard still owns a registered listener.
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|registry| registry.strong_count() > 0)
    }

    /// Keep the listener for the lifetime of the store.
    pub fn detach(mut self) {
        self.registry = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
