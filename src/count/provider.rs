use crate::error::ContextError;
use crate::hooks::use_store;
use crate::scope::Scope;
use crate::view::{Component, Element};

use super::state::{create_count_store, CountState, CountStore};

/// Owns one counter store per mount and exposes it to its subtree.
///
/// `initial_count` is read on the first render only; later renders of the
/// same mounted provider keep the store they already have.
#[derive(Default)]
pub struct CountProvider {
    initial_count: u64,
    children: Element,
}

impl CountProvider {
    pub fn new(children: Element) -> Self {
        Self {
            initial_count: 0,
            children,
        }
    }

    pub fn with_initial_count(mut self, initial_count: u64) -> Self {
        self.initial_count = initial_count;
        self
    }
}

impl Component for CountProvider {
    fn render(&self, cx: &Scope) -> Result<Element, ContextError> {
        let initial_count = self.initial_count;
        let store = cx.use_hook(|| {
            tracing::debug!(scope = cx.id(), initial_count, "creating count store");
            create_count_store(initial_count)
        });
        cx.provide_context(CountStore::clone(&store));
        Ok(self.children.clone())
    }
}

/// Select a slice of the nearest enclosing counter store.
///
/// Fails with [`ContextError::MissingProvider`] when no [`CountProvider`]
/// encloses `cx`.
pub fn use_count_store<T, F>(cx: &Scope, selector: F) -> Result<T, ContextError>
where
    T: PartialEq + Send + Sync + 'static,
    F: Fn(&CountState) -> T + Send + Sync + 'static,
{
    let store = cx
        .use_context::<CountStore>()
        .ok_or(ContextError::MissingProvider {
            context: "CountContext",
        })?;
    Ok(use_store(cx, &store, selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Root;

    struct Reader;

    impl Component for Reader {
        fn render(&self, cx: &Scope) -> Result<Element, ContextError> {
            let count = use_count_store(cx, |s| s.count)?;
            Ok(Element::text(count.to_string()))
        }
    }

    #[test]
    fn provider_defaults_to_zero() {
        let root = Root::mount(CountProvider::new(Element::component(Reader))).unwrap();
        assert_eq!(root.view().to_plain_text(), "0");
    }

    #[test]
    fn provider_seeds_store_once() {
        let root = Root::mount(
            CountProvider::new(Element::component(Reader)).with_initial_count(9),
        )
        .unwrap();
        let store = root.scope().use_context::<CountStore>().unwrap();

        store.get_state().increment.call();
        root.flush().unwrap();
        root.rerender().unwrap();

        let same = root.scope().use_context::<CountStore>().unwrap();
        assert!(store.ptr_eq(&same));
        assert_eq!(root.view().to_plain_text(), "10");
    }

    #[test]
    fn reader_without_provider_fails() {
        let err = Root::mount(Reader).err();
        assert_eq!(
            err,
            Some(ContextError::MissingProvider {
                context: "CountContext"
            })
        );
        assert_eq!(
            err.map(|e| e.to_string()).as_deref(),
            Some("CountContext.Provider is missing")
        );
    }
}
