//! The demo application: one provider, one counter button.

use crate::count::{use_count_store, CountProvider, CountState};
use crate::error::ContextError;
use crate::scope::Scope;
use crate::view::{Component, Element};

pub const HEADING: &str = "Rust + Ratatui + Scoped Store";

/// Root component: a [`CountProvider`] around a [`Counter`].
#[derive(Debug, Default, Clone, Copy)]
pub struct App {
    pub initial_count: u64,
}

impl App {
    pub fn new(initial_count: u64) -> Self {
        Self { initial_count }
    }
}

impl Component for App {
    fn render(&self, _cx: &Scope) -> Result<Element, ContextError> {
        Ok(Element::component(
            CountProvider::new(Element::component(Counter)).with_initial_count(self.initial_count),
        ))
    }
}

/// Heading plus a button showing the count; pressing it increments.
#[derive(Debug, Default, Clone, Copy)]
pub struct Counter;

impl Component for Counter {
    fn render(&self, cx: &Scope) -> Result<Element, ContextError> {
        let CountState { count, increment } = use_count_store(cx, CountState::clone)?;
        Ok(Element::group([
            Element::heading(HEADING),
            Element::button(format!("count is {count}"), increment),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Root;

    #[test]
    fn app_renders_heading_and_button() {
        let root = Root::mount(App::new(3)).unwrap();
        assert_eq!(
            root.view().to_plain_text(),
            format!("# {HEADING}\n[ count is 3 ]")
        );
    }

    #[test]
    fn counter_alone_needs_a_provider() {
        assert!(matches!(
            Root::mount(Counter),
            Err(ContextError::MissingProvider { .. })
        ));
    }
}
