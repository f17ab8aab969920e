mod logging;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use scoped_store::{App, Root};
use std::io::Stdout;

/// Counter demo for tree-scoped stores.
#[derive(Debug, Parser)]
#[command(name = "counter-demo", version, about)]
struct Cli {
    /// Value the counter starts from.
    #[arg(long, default_value_t = 3)]
    initial_count: u64,

    /// Print the rendered view once and exit instead of opening the UI.
    #[arg(long)]
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();
    tracing::info!(initial_count = cli.initial_count, plain = cli.plain, "starting counter-demo");

    let root = Root::mount(App::new(cli.initial_count)).context("failed to mount app")?;

    if cli.plain {
        println!("{}", root.view().to_plain_text());
        return Ok(());
    }

    let (mut terminal, _guard) = ui::setup_terminal().context("failed to set up terminal")?;
    let result = run(&mut terminal, &root);
    root.unmount();
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, root: &Root) -> anyhow::Result<()> {
    let mut focus = 0usize;
    loop {
        let view = root.view();
        terminal.draw(|frame| ui::render::draw(frame, &view, focus))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Tab => {
                let buttons = view.buttons().len();
                if buttons > 0 {
                    focus = (focus + 1) % buttons;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let renders = root.press(focus)?;
                tracing::debug!(button = focus, renders, "button pressed");
            }
            _ => {}
        }
    }
    tracing::info!("counter-demo exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["counter-demo"]);
        assert_eq!(cli.initial_count, 3);
        assert!(!cli.plain);
    }

    #[test]
    fn cli_accepts_initial_count() {
        let cli = Cli::parse_from(["counter-demo", "--initial-count", "10", "--plain"]);
        assert_eq!(cli.initial_count, 10);
        assert!(cli.plain);
    }
}
