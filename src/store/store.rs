use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use super::subscription::{ListenerRegistry, Subscription};

type Listener<S> = Arc<dyn Fn(&S, &S) + Send + Sync>;

struct StoreInner<S> {
    state: RwLock<S>,
    initial: S,
    listeners: Mutex<Vec<(usize, Listener<S>)>>,
    next_listener_id: AtomicUsize,
}

impl<S: Clone + Send + Sync + 'static> StoreInner<S> {
    fn new(initial: S) -> Self {
        Self {
            state: RwLock::new(initial.clone()),
            initial,
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicUsize::new(0),
        }
    }

    fn write<F>(&self, f: F)
    where
        F: FnOnce(&mut S),
    {
        let (next, prev) = {
            let mut state = self.state.write();
            let prev = state.clone();
            f(&mut state);
            (state.clone(), prev)
        };
        self.notify(&next, &prev);
    }

    /// Deliver `(next, prev)` to every listener registered when the pass
    /// starts. No lock is held while a listener runs, so listeners may write
    /// to the store (which runs a nested pass) or unsubscribe.
    fn notify(&self, next: &S, prev: &S) {
        let snapshot: Vec<(usize, Listener<S>)> = self.listeners.lock().clone();
        tracing::trace!(listeners = snapshot.len(), "notifying store listeners");

        for (id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            listener(next, prev);
        }
    }

    fn is_registered(&self, id: usize) -> bool {
        self.listeners.lock().iter().any(|(existing, _)| *existing == id)
    }
}

impl<S: Send + Sync> ListenerRegistry for StoreInner<S> {
    fn remove_listener(&self, id: usize) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        let removed = listeners.len() != before;
        if removed {
            tracing::debug!(listener = id, remaining = listeners.len(), "store listener removed");
        }
        removed
    }
}

/// A store holding state `S` and the listeners observing it.
///
/// Cloning a `Store` yields another handle to the same instance; use
/// [`create_store`] or [`Store::new`] to make an independent one.
///
/// Writes notify listeners synchronously with the new and previous state.
/// A write issued from inside a listener is applied immediately and fully
/// notified before the outer notification pass resumes, so no update is
/// dropped.
pub struct Store<S> {
    inner: Arc<StoreInner<S>>,
}

impl<S: Clone + Send + Sync + 'static> Store<S> {
    /// Create a store from a plain initial state.
    pub fn new(initial: S) -> Self {
        Self {
            inner: Arc::new(StoreInner::new(initial)),
        }
    }

    /// Get a clone of the current state.
    pub fn get_state(&self) -> S {
        self.inner.state.read().clone()
    }

    /// The state the store was created with.
    pub fn initial_state(&self) -> &S {
        &self.inner.initial
    }

    /// Read state without cloning it.
    ///
    /// `f` must not write to this store.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        let state = self.inner.state.read();
        f(&state)
    }

    /// Compute the next state from the current one.
    ///
    /// Struct update syntax (`S { field, ..state.clone() }`) gives the usual
    /// shallow-merge behaviour.
    pub fn set<F>(&self, f: F)
    where
        F: FnOnce(&S) -> S,
    {
        self.inner.write(|state| *state = f(state));
    }

    /// Mutate the state in place.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut S),
    {
        self.inner.write(f);
    }

    /// Replace the whole state.
    pub fn replace(&self, new_state: S) {
        self.inner.write(|state| *state = new_state);
    }

    /// Subscribe to state changes.
    ///
    /// `listener` receives `(new, previous)` after every write. The returned
    /// guard unsubscribes when dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&S, &S) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::SeqCst);
        let count = {
            let mut listeners = self.inner.listeners.lock();
            listeners.push((id, Arc::new(listener)));
            listeners.len()
        };
        tracing::debug!(listener = id, listeners = count, "store listener added");

        let inner: Arc<dyn ListenerRegistry> = self.inner.clone();
        Subscription::new(id, Arc::downgrade(&inner))
    }

    /// Number of currently registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// A setter bound to this store.
    pub fn setter(&self) -> SetState<S> {
        SetState {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Identity of the underlying instance, shared by all clones.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    /// Whether two handles point at the same store instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Write access to a store, handed to the initializer of [`create_store`].
///
/// Holds a weak reference, so actions stored inside the state do not keep
/// the store alive. Writes through a setter whose store is gone are ignored.
pub struct SetState<S> {
    inner: Weak<StoreInner<S>>,
}

impl<S: Clone + Send + Sync + 'static> SetState<S> {
    pub fn set<F>(&self, f: F)
    where
        F: FnOnce(&S) -> S,
    {
        self.with_inner(|inner| inner.write(|state| *state = f(state)));
    }

    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut S),
    {
        self.with_inner(|inner| inner.write(f));
    }

    pub fn replace(&self, new_state: S) {
        self.with_inner(|inner| inner.write(|state| *state = new_state));
    }

    /// Current state, if the store is still alive.
    pub fn get(&self) -> Option<S> {
        self.inner.upgrade().map(|inner| inner.state.read().clone())
    }

    fn with_inner(&self, f: impl FnOnce(&StoreInner<S>)) {
        match self.inner.upgrade() {
            Some(inner) => f(&inner),
            None => tracing::debug!("write to a dropped store ignored"),
        }
    }
}

impl<S> Clone for SetState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

/// Create a store whose initial state may capture its own setter.
///
/// ```
/// use scoped_store::{create_store, Action, SetState};
///
/// #[derive(Clone)]
/// struct Counter {
///     count: u64,
///     increment: Action,
/// }
///
/// let store = create_store(|set: SetState<Counter>| Counter {
///     count: 0,
///     increment: Action::new(move || set.update(|s| s.count += 1)),
/// });
///
/// store.get_state().increment.call();
/// assert_eq!(store.get_state().count, 1);
/// ```
pub fn create_store<S, F>(initializer: F) -> Store<S>
where
    S: Clone + Send + Sync + 'static,
    F: FnOnce(SetState<S>) -> S,
{
    let inner = Arc::new_cyclic(|weak| {
        let initial = initializer(SetState {
            inner: Weak::clone(weak),
        });
        StoreInner::new(initial)
    });
    Store { inner }
}
