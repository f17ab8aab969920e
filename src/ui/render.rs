use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use scoped_store::View;

const FOOTER: &str = "Enter/Space: press  Tab: next  q: quit";

pub fn draw(frame: &mut Frame<'_>, view: &View, focus: usize) {
    let mut lines = Vec::new();
    let mut button_index = 0;
    view_lines(view, focus, &mut button_index, &mut lines);
    lines.push(Line::from(""));
    lines.push(Line::styled(FOOTER, Style::default().add_modifier(Modifier::DIM)));

    let block = Block::default().borders(Borders::ALL).title(" counter-demo ");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, frame.area());
}

fn view_lines(view: &View, focus: usize, button_index: &mut usize, lines: &mut Vec<Line<'static>>) {
    match view {
        View::Empty => {}
        View::Text(text) => lines.push(Line::from(text.clone())),
        View::Heading(text) => {
            lines.push(Line::styled(
                text.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from(""));
        }
        View::Button { label, .. } => {
            let style = if *button_index == focus {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::styled(format!("[ {label} ]"), style));
            *button_index += 1;
        }
        View::Group(children) => {
            for child in children {
                view_lines(child, focus, button_index, lines);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_store::{Action, App, Root};

    #[test]
    fn one_line_per_button_and_heading_spacing() {
        let root = Root::mount(App::new(3)).unwrap();
        let mut lines = Vec::new();
        let mut index = 0;
        view_lines(&root.view(), 0, &mut index, &mut lines);

        assert_eq!(index, 1);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].to_string(), "[ count is 3 ]");
    }

    #[test]
    fn focus_highlights_matching_button() {
        let view = View::Group(vec![
            View::Button {
                label: "a".into(),
                on_press: Action::noop(),
            },
            View::Button {
                label: "b".into(),
                on_press: Action::noop(),
            },
        ]);
        let mut lines = Vec::new();
        let mut index = 0;
        view_lines(&view, 1, &mut index, &mut lines);

        assert_eq!(lines[0].style, Style::default());
        assert_eq!(lines[1].style, Style::default().add_modifier(Modifier::REVERSED));
    }
}
