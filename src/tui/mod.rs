pub mod widgets;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use crate::pipeline::AnalysisResult;
use crate::theme::Mode;
use widgets::ThemePreview;

/// State for the interactive theme preview.
pub struct TuiApp {
    result: AnalysisResult,
    mode_index: usize,
}

impl TuiApp {
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            result,
            mode_index: 0,
        }
    }

    fn mode(&self) -> Mode {
        Mode::ALL[self.mode_index]
    }

    fn next_mode(&mut self) {
        self.mode_index = (self.mode_index + 1) % Mode::ALL.len();
    }

    fn prev_mode(&mut self) {
        self.mode_index = (self.mode_index + Mode::ALL.len() - 1) % Mode::ALL.len();
    }
}

/// Run the preview until the user quits.
pub fn run(app: TuiApp) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, mut app: TuiApp) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let theme = app.result.theme(app.mode());
            frame.render_widget(ThemePreview::new(theme), frame.area());
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_mode(),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_mode(),
                _ => {}
            }
        }
    }
}
