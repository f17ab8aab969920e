use parking_lot::Mutex;
use std::sync::Arc;

use crate::scope::{Scope, ScopeHandle};
use crate::store::{Store, Subscription};

type Selector<S, T> = Arc<dyn Fn(&S) -> T + Send + Sync>;
type Equality<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// The latest selector and equality function, shared with the listener so
/// it always compares with what the component asked for on its last render.
struct Filter<S, T> {
    selector: Selector<S, T>,
    eq: Equality<T>,
}

impl<S, T> Clone for Filter<S, T> {
    fn clone(&self) -> Self {
        Self {
            selector: Arc::clone(&self.selector),
            eq: Arc::clone(&self.eq),
        }
    }
}

/// Hook slot holding one scope's subscription to one store.
struct SliceSubscription<S, T> {
    filter: Arc<Mutex<Filter<S, T>>>,
    // (store id, guard); replaced if the component switches stores.
    subscription: Mutex<Option<(usize, Subscription)>>,
}

impl<S, T> SliceSubscription<S, T>
where
    S: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn new(filter: Filter<S, T>) -> Self {
        Self {
            filter: Arc::new(Mutex::new(filter)),
            subscription: Mutex::new(None),
        }
    }

    fn ensure_subscribed(&self, store: &Store<S>, scope: ScopeHandle) {
        let mut subscription = self.subscription.lock();
        if matches!(&*subscription, Some((id, _)) if *id == store.id()) {
            return;
        }

        let filter = Arc::clone(&self.filter);
        let guard = store.subscribe(move |next, prev| {
            let Filter { selector, eq } = filter.lock().clone();
            if !eq(&selector(next), &selector(prev)) {
                scope.mark_dirty();
            }
        });
        // Assigning drops any guard for a previous store.
        *subscription = Some((store.id(), guard));
    }
}

/// Select a slice of `store` for the calling component.
///
/// The first call in a scope subscribes it to the store; the scope is marked
/// dirty only when `selector(new) != selector(previous)`. The value is
/// returned synchronously on every call. The subscription is released when
/// the scope unmounts.
pub fn use_store<S, T, F>(cx: &Scope, store: &Store<S>, selector: F) -> T
where
    S: Clone + Send + Sync + 'static,
    T: PartialEq + Send + Sync + 'static,
    F: Fn(&S) -> T + Send + Sync + 'static,
{
    use_store_with_eq(cx, store, selector, |a: &T, b: &T| a == b)
}

/// [`use_store`] with a caller-supplied equality function.
pub fn use_store_with_eq<S, T, F, E>(cx: &Scope, store: &Store<S>, selector: F, eq: E) -> T
where
    S: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(&S) -> T + Send + Sync + 'static,
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    let filter = Filter {
        selector: Arc::new(selector) as Selector<S, T>,
        eq: Arc::new(eq) as Equality<T>,
    };

    let slot = cx.use_hook(|| SliceSubscription::new(filter.clone()));
    *slot.filter.lock() = filter.clone();
    slot.ensure_subscribed(store, cx.handle());

    store.read(|state| (filter.selector)(state))
}
