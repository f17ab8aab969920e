use parking_lot::{Mutex, RwLock};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use crate::error::ContextError;
use crate::view::{Component, Element};

type Slot = Arc<dyn Any + Send + Sync>;

static NEXT_SCOPE_ID: AtomicUsize = AtomicUsize::new(0);

struct ScopeInner {
    id: usize,
    name: &'static str,
    parent: Option<Weak<ScopeInner>>,
    hooks: Mutex<Vec<Slot>>,
    hook_cursor: AtomicUsize,
    contexts: RwLock<HashMap<TypeId, Slot>>,
    component: Mutex<Option<Arc<dyn Component>>>,
    output: Mutex<Element>,
    children: Mutex<Vec<Scope>>,
    dirty: AtomicBool,
    render_count: AtomicUsize,
    // Shared by every scope of one tree; set whenever any scope turns dirty.
    pending: Arc<AtomicBool>,
}

/// One mounted component instance.
///
/// A scope owns the component's hook slots, the context values it provides
/// to its subtree, and its child scopes. Context lookups walk from a scope
/// towards the root, so a value is visible only inside the subtree of the
/// scope that provides it.
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

impl Scope {
    pub(crate) fn root(name: &'static str) -> Self {
        Self::with_parent(name, None, Arc::new(AtomicBool::new(false)))
    }

    pub(crate) fn child(&self, name: &'static str) -> Self {
        Self::with_parent(
            name,
            Some(Arc::downgrade(&self.inner)),
            Arc::clone(&self.inner.pending),
        )
    }

    fn with_parent(
        name: &'static str,
        parent: Option<Weak<ScopeInner>>,
        pending: Arc<AtomicBool>,
    ) -> Self {
        let id = NEXT_SCOPE_ID.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(scope = id, component = name, "scope mounted");
        Self {
            inner: Arc::new(ScopeInner {
                id,
                name,
                parent,
                hooks: Mutex::new(Vec::new()),
                hook_cursor: AtomicUsize::new(0),
                contexts: RwLock::new(HashMap::new()),
                component: Mutex::new(None),
                output: Mutex::new(Element::Empty),
                children: Mutex::new(Vec::new()),
                dirty: AtomicBool::new(false),
                render_count: AtomicUsize::new(0),
                pending,
            }),
        }
    }

    pub fn id(&self) -> usize {
        self.inner.id
    }

    /// Name of the component mounted in this scope.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// How many times the component in this scope has rendered.
    pub fn render_count(&self) -> usize {
        self.inner.render_count.load(Ordering::SeqCst)
    }

    /// Whether a subscription has asked for this scope to re-render.
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.load(Ordering::SeqCst)
    }

    /// A weak handle that can mark this scope dirty from a store listener.
    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            id: self.inner.id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Return the value stored at the current hook position, creating it
    /// with `init` on the first render of this scope.
    ///
    /// Hooks are matched by call order, so a component must call them in the
    /// same order on every render. `init` runs without the hooks lock; hooks
    /// it calls get the slots after this one but only run on the first
    /// render, so later hooks of the component must not depend on them.
    pub fn use_hook<T, F>(&self, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let index = self.inner.hook_cursor.fetch_add(1, Ordering::SeqCst);

        let existing = self.inner.hooks.lock().get(index).cloned();
        if let Some(slot) = existing {
            match slot.downcast::<T>() {
                Ok(value) => return value,
                Err(_) => tracing::warn!(
                    scope = self.inner.id,
                    component = self.inner.name,
                    hook = index,
                    expected = type_name::<T>(),
                    "hook order changed between renders, reinitializing slot"
                ),
            }
        }

        // Reserve the slot first so hooks called from `init` land after it.
        {
            let mut hooks = self.inner.hooks.lock();
            let placeholder: Slot = Arc::new(());
            if index < hooks.len() {
                hooks[index] = placeholder;
            } else {
                hooks.resize(index + 1, placeholder);
            }
        }

        let value = Arc::new(init());
        if let Some(slot) = self.inner.hooks.lock().get_mut(index) {
            *slot = value.clone();
        }
        value
    }

    /// Bind `value` for this scope and every scope below it.
    ///
    /// Providing the same type again replaces the previous binding.
    pub fn provide_context<T>(&self, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.inner
            .contexts
            .write()
            .insert(TypeId::of::<T>(), Arc::new(value));
    }

    /// Find the nearest binding of `T`, starting at this scope.
    pub fn use_context<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut current = Some(Arc::clone(&self.inner));
        while let Some(scope) = current {
            let found = scope
                .contexts
                .read()
                .get(&TypeId::of::<T>())
                .and_then(|slot| slot.downcast_ref::<T>())
                .cloned();
            if found.is_some() {
                return found;
            }
            current = scope.parent.as_ref().and_then(Weak::upgrade);
        }
        None
    }

    /// Like [`use_context`](Self::use_context), but a missing binding is an
    /// error naming the requested type.
    pub fn expect_context<T>(&self) -> Result<T, ContextError>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.use_context::<T>()
            .ok_or(ContextError::MissingProvider {
                context: type_name::<T>(),
            })
    }

    pub(crate) fn begin_render(&self, component: &Arc<dyn Component>) {
        self.inner.hook_cursor.store(0, Ordering::SeqCst);
        self.inner.dirty.store(false, Ordering::SeqCst);
        self.inner.render_count.fetch_add(1, Ordering::SeqCst);
        *self.inner.component.lock() = Some(Arc::clone(component));
    }

    #[cfg(test)]
    pub(crate) fn reset_hook_cursor(&self) {
        self.inner.hook_cursor.store(0, Ordering::SeqCst);
    }

    pub(crate) fn component(&self) -> Option<Arc<dyn Component>> {
        self.inner.component.lock().clone()
    }

    pub(crate) fn set_output(&self, element: Element) {
        *self.inner.output.lock() = element;
    }

    pub(crate) fn output(&self) -> Element {
        self.inner.output.lock().clone()
    }

    pub(crate) fn take_children(&self) -> Vec<Scope> {
        std::mem::take(&mut *self.inner.children.lock())
    }

    pub(crate) fn set_children(&self, children: Vec<Scope>) {
        *self.inner.children.lock() = children;
    }

    /// Child scopes in render order.
    pub fn children(&self) -> Vec<Scope> {
        self.inner.children.lock().clone()
    }

    pub(crate) fn take_pending(&self) -> bool {
        self.inner.pending.swap(false, Ordering::SeqCst)
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.inner.pending.load(Ordering::SeqCst)
    }

    /// Tear down this scope and its subtree.
    ///
    /// Hook slots are dropped, which releases any store subscriptions they
    /// hold, and context bindings are removed.
    pub(crate) fn unmount(&self) {
        for child in self.take_children() {
            child.unmount();
        }
        let hooks = std::mem::take(&mut *self.inner.hooks.lock());
        self.inner.contexts.write().clear();
        self.inner.component.lock().take();
        *self.inner.output.lock() = Element::Empty;
        tracing::debug!(
            scope = self.inner.id,
            component = self.inner.name,
            hooks = hooks.len(),
            "scope unmounted"
        );
        drop(hooks);
    }
}

/// Weak reference to a [`Scope`], safe to capture in store listeners.
#[derive(Clone)]
pub struct ScopeHandle {
    id: usize,
    inner: Weak<ScopeInner>,
}

impl ScopeHandle {
    /// Schedule the scope for re-render on the next flush.
    ///
    /// Returns `false` if the scope has already been dropped.
    pub fn mark_dirty(&self) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                tracing::trace!(scope = self.id, component = inner.name, "scope marked dirty");
                inner.dirty.store(true, Ordering::SeqCst);
                inner.pending.store(true, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }
}
