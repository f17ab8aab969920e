use std::slice;
use std::sync::Arc;

use crate::error::ContextError;
use crate::scope::Scope;

use super::component::Component;
use super::element::{Element, View};

/// A mounted component tree.
///
/// ```
/// use scoped_store::{ContextError, Element, Root, Scope, Component};
///
/// struct Hello;
///
/// impl Component for Hello {
///     fn render(&self, _cx: &Scope) -> Result<Element, ContextError> {
///         Ok(Element::text("hello"))
///     }
/// }
///
/// let root = Root::mount(Hello).unwrap();
/// assert_eq!(root.view().to_plain_text(), "hello");
/// ```
pub struct Root {
    scope: Scope,
    component: Arc<dyn Component>,
}

impl Root {
    /// Mount `component` and render the whole tree once.
    pub fn mount(component: impl Component) -> Result<Self, ContextError> {
        let component: Arc<dyn Component> = Arc::new(component);
        let scope = Scope::root(component.name());
        render_scope(&scope, &component)?;
        tracing::debug!(component = component.name(), "tree mounted");
        Ok(Self { scope, component })
    }

    /// The root scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Whether any scope is waiting to re-render.
    pub fn has_pending(&self) -> bool {
        self.scope.has_pending()
    }

    /// Re-render every dirty scope and its subtree.
    ///
    /// Returns the number of component renders performed.
    pub fn flush(&self) -> Result<usize, ContextError> {
        if !self.scope.take_pending() {
            return Ok(0);
        }
        let renders = flush_scope(&self.scope)?;
        tracing::trace!(renders, "flushed dirty scopes");
        Ok(renders)
    }

    /// Re-render the whole tree from the root without remounting anything.
    pub fn rerender(&self) -> Result<usize, ContextError> {
        self.scope.take_pending();
        render_scope(&self.scope, &self.component)
    }

    /// Resolve the mounted tree into a component-free view.
    pub fn view(&self) -> View {
        resolve_scope(&self.scope)
    }

    /// Labels of the buttons in the current view, in display order.
    pub fn buttons(&self) -> Vec<String> {
        self.view()
            .buttons()
            .into_iter()
            .map(|(label, _)| label.to_string())
            .collect()
    }

    /// Invoke the button at `index` and flush the resulting updates.
    pub fn press(&self, index: usize) -> Result<usize, ContextError> {
        let view = self.view();
        let action = view
            .buttons()
            .get(index)
            .map(|(_, action)| (*action).clone())
            .ok_or(ContextError::UnknownButton(index))?;
        action.call();
        self.flush()
    }

    /// Tear the tree down, releasing every hook and subscription.
    pub fn unmount(self) {
        self.scope.unmount();
        tracing::debug!(component = self.component.name(), "tree unmounted");
    }
}

fn render_scope(scope: &Scope, component: &Arc<dyn Component>) -> Result<usize, ContextError> {
    scope.begin_render(component);
    let element = component.render(scope)?;
    let renders = reconcile(scope, &element)?;
    scope.set_output(element);
    Ok(renders + 1)
}

/// Match the child components of `element` against the scope's existing
/// children by position and name, then render each of them.
fn reconcile(scope: &Scope, element: &Element) -> Result<usize, ContextError> {
    let mut previous = scope.take_children().into_iter();
    let mut next = Vec::new();
    let mut renders = 0;

    for component in element.components() {
        let child = match previous.next() {
            Some(existing) if existing.name() == component.name() => existing,
            Some(stale) => {
                stale.unmount();
                scope.child(component.name())
            }
            None => scope.child(component.name()),
        };
        let rendered = render_scope(&child, &component);
        next.push(child);
        match rendered {
            Ok(count) => renders += count,
            Err(err) => {
                // Keep the live children so the last good output still resolves.
                next.extend(previous);
                scope.set_children(next);
                return Err(err);
            }
        }
    }

    for stale in previous {
        stale.unmount();
    }
    scope.set_children(next);
    Ok(renders)
}

fn flush_scope(scope: &Scope) -> Result<usize, ContextError> {
    if scope.is_dirty() {
        if let Some(component) = scope.component() {
            return render_scope(scope, &component);
        }
    }

    let mut renders = 0;
    for child in scope.children() {
        renders += flush_scope(&child)?;
    }
    Ok(renders)
}

fn resolve_scope(scope: &Scope) -> View {
    let children = scope.children();
    resolve_element(&scope.output(), &mut children.iter())
}

fn resolve_element(element: &Element, children: &mut slice::Iter<'_, Scope>) -> View {
    match element {
        Element::Empty => View::Empty,
        Element::Text(text) => View::Text(text.clone()),
        Element::Heading(text) => View::Heading(text.clone()),
        Element::Button { label, on_press } => View::Button {
            label: label.clone(),
            on_press: on_press.clone(),
        },
        Element::Group(items) => View::Group(
            items
                .iter()
                .map(|item| resolve_element(item, children))
                .collect(),
        ),
        Element::Component(_) => children.next().map(resolve_scope).unwrap_or(View::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Counter;
    use crate::count::CountProvider;
    use crate::store::Action;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Label(&'static str);

    impl Component for Label {
        fn render(&self, _cx: &Scope) -> Result<Element, ContextError> {
            Ok(Element::text(self.0))
        }
    }

    struct Other;

    impl Component for Other {
        fn render(&self, _cx: &Scope) -> Result<Element, ContextError> {
            Ok(Element::text("other"))
        }
    }

    /// Renders whatever children the test puts in `layout`.
    struct Host {
        layout: Arc<Mutex<Vec<Element>>>,
    }

    impl Component for Host {
        fn render(&self, _cx: &Scope) -> Result<Element, ContextError> {
            Ok(Element::group(self.layout.lock().clone()))
        }
    }

    struct Memory {
        inits: Arc<AtomicUsize>,
    }

    impl Component for Memory {
        fn render(&self, cx: &Scope) -> Result<Element, ContextError> {
            let inits = self.inits.clone();
            let id = cx.use_hook(move || inits.fetch_add(1, Ordering::SeqCst));
            Ok(Element::text(format!("memory {id}")))
        }
    }

    #[test]
    fn mount_resolves_nested_components() {
        let layout = Arc::new(Mutex::new(vec![
            Element::heading("title"),
            Element::component(Label("a")),
            Element::group([Element::component(Label("b"))]),
        ]));
        let root = Root::mount(Host { layout }).unwrap();

        assert_eq!(root.view().to_plain_text(), "# title\na\nb");
        assert_eq!(root.scope().children().len(), 2);
    }

    #[test]
    fn rerender_keeps_matching_children_mounted() {
        let inits = Arc::new(AtomicUsize::new(0));
        let layout = Arc::new(Mutex::new(vec![Element::component(Memory {
            inits: inits.clone(),
        })]));
        let root = Root::mount(Host {
            layout: layout.clone(),
        })
        .unwrap();
        let child = root.scope().children()[0].clone();

        root.rerender().unwrap();
        root.rerender().unwrap();

        assert_eq!(inits.load(Ordering::SeqCst), 1);
        assert_eq!(child.render_count(), 3);
        assert_eq!(root.scope().children()[0].id(), child.id());
    }

    #[test]
    fn changed_component_kind_remounts() {
        let layout = Arc::new(Mutex::new(vec![Element::component(Label("a"))]));
        let root = Root::mount(Host {
            layout: layout.clone(),
        })
        .unwrap();
        let before = root.scope().children()[0].id();

        *layout.lock() = vec![Element::component(Other)];
        root.rerender().unwrap();

        assert_ne!(root.scope().children()[0].id(), before);
        assert_eq!(root.view().to_plain_text(), "other");
    }

    #[test]
    fn surplus_children_are_unmounted() {
        let layout = Arc::new(Mutex::new(vec![
            Element::component(Label("a")),
            Element::component(Label("b")),
        ]));
        let root = Root::mount(Host {
            layout: layout.clone(),
        })
        .unwrap();

        layout.lock().pop();
        root.rerender().unwrap();

        assert_eq!(root.scope().children().len(), 1);
        assert_eq!(root.view().to_plain_text(), "a");
    }

    #[test]
    fn flush_only_renders_dirty_subtrees() {
        let layout = Arc::new(Mutex::new(vec![
            Element::component(Label("a")),
            Element::component(Label("b")),
        ]));
        let root = Root::mount(Host { layout }).unwrap();
        let children = root.scope().children();

        assert_eq!(root.flush().unwrap(), 0);

        children[1].handle().mark_dirty();
        assert!(root.has_pending());
        assert_eq!(root.flush().unwrap(), 1);
        assert_eq!(children[0].render_count(), 1);
        assert_eq!(children[1].render_count(), 2);
        assert!(!root.has_pending());
    }

    #[test]
    fn failed_rerender_keeps_live_children() {
        let layout = Arc::new(Mutex::new(vec![Element::component(
            CountProvider::new(Element::component(Counter)).with_initial_count(3),
        )]));
        let root = Root::mount(Host {
            layout: layout.clone(),
        })
        .unwrap();
        root.press(0).unwrap();

        // A counter outside the provider fails to render.
        layout.lock().push(Element::component(Counter));
        assert!(matches!(
            root.rerender(),
            Err(ContextError::MissingProvider { .. })
        ));
        assert_eq!(root.buttons(), vec!["count is 4".to_string()]);

        layout.lock().pop();
        root.rerender().unwrap();
        assert_eq!(root.buttons(), vec!["count is 4".to_string()]);
        assert_eq!(root.scope().children().len(), 1);
    }

    #[test]
    fn press_out_of_range_is_an_error() {
        let layout = Arc::new(Mutex::new(vec![Element::button("ok", Action::noop())]));
        let root = Root::mount(Host { layout }).unwrap();

        assert_eq!(root.buttons(), vec!["ok".to_string()]);
        assert!(root.press(0).is_ok());
        assert_eq!(root.press(1), Err(ContextError::UnknownButton(1)));
    }
}
