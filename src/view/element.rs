use std::fmt;
use std::sync::Arc;

use super::component::Component;
use crate::store::Action;

/// What a component renders: primitives plus nested components.
#[derive(Clone, Default)]
pub enum Element {
    #[default]
    Empty,
    Text(String),
    Heading(String),
    Button { label: String, on_press: Action },
    Group(Vec<Element>),
    /// A child component, mounted in its own scope below the renderer.
    Component(Arc<dyn Component>),
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text(text.into())
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Element::Heading(text.into())
    }

    pub fn button(label: impl Into<String>, on_press: Action) -> Self {
        Element::Button {
            label: label.into(),
            on_press,
        }
    }

    pub fn group(children: impl IntoIterator<Item = Element>) -> Self {
        Element::Group(children.into_iter().collect())
    }

    pub fn component(component: impl Component) -> Self {
        Element::Component(Arc::new(component))
    }

    /// Child components in render order.
    pub(crate) fn components(&self) -> Vec<Arc<dyn Component>> {
        let mut found = Vec::new();
        self.collect_components(&mut found);
        found
    }

    fn collect_components(&self, found: &mut Vec<Arc<dyn Component>>) {
        match self {
            Element::Component(component) => found.push(Arc::clone(component)),
            Element::Group(children) => {
                for child in children {
                    child.collect_components(found);
                }
            }
            Element::Empty | Element::Text(_) | Element::Heading(_) | Element::Button { .. } => {}
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Empty => f.write_str("Empty"),
            Element::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Element::Heading(text) => f.debug_tuple("Heading").field(text).finish(),
            Element::Button { label, .. } => {
                f.debug_struct("Button").field("label", label).finish()
            }
            Element::Group(children) => f.debug_tuple("Group").field(children).finish(),
            Element::Component(component) => {
                f.debug_tuple("Component").field(&component.name()).finish()
            }
        }
    }
}

/// A fully resolved tree with every component replaced by its output.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Empty,
    Text(String),
    Heading(String),
    Button { label: String, on_press: Action },
    Group(Vec<View>),
}

impl View {
    /// Buttons in display order.
    pub fn buttons(&self) -> Vec<(&str, &Action)> {
        let mut found = Vec::new();
        self.collect_buttons(&mut found);
        found
    }

    fn collect_buttons<'a>(&'a self, found: &mut Vec<(&'a str, &'a Action)>) {
        match self {
            View::Button { label, on_press } => found.push((label.as_str(), on_press)),
            View::Group(children) => {
                for child in children {
                    child.collect_buttons(found);
                }
            }
            View::Empty | View::Text(_) | View::Heading(_) => {}
        }
    }

    /// One line per leaf: headings as `# text`, buttons as `[ label ]`.
    pub fn to_plain_text(&self) -> String {
        let mut lines = Vec::new();
        self.collect_lines(&mut lines);
        lines.join("\n")
    }

    fn collect_lines(&self, lines: &mut Vec<String>) {
        match self {
            View::Empty => {}
            View::Text(text) => lines.push(text.clone()),
            View::Heading(text) => lines.push(format!("# {text}")),
            View::Button { label, .. } => lines.push(format!("[ {label} ]")),
            View::Group(children) => {
                for child in children {
                    child.collect_lines(lines);
                }
            }
        }
    }
}
