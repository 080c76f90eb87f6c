//! Application state and TUI event loop for the chart screen.
//!
//! [`App`] owns the theme and the header context, and drives the
//! [`ChartState`] from keyboard input until the user quits.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::chart_state::{ChartState, Interaction};
use crate::chart_view;
use crate::components::header::ScreenContext;
use crate::presentation::ChartSpec;
use crate::themes::Theme;

/// Map a key press to a chart interaction.
///
/// `←`/`→` (or `h`/`l`) move the hover marker, `1`–`9` toggle a series,
/// `a`/`n` show or hide every series and `q`/`Esc`/`Ctrl+C` quit.
pub fn interaction_for_key(key: KeyEvent) -> Option<Interaction> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Interaction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Interaction::Quit),
        KeyCode::Right | KeyCode::Char('l') => Some(Interaction::HoverNext),
        KeyCode::Left | KeyCode::Char('h') => Some(Interaction::HoverPrev),
        KeyCode::Char('a') => Some(Interaction::ShowAll),
        KeyCode::Char('n') => Some(Interaction::HideAll),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|d| Interaction::ToggleSeries(d as usize - 1)),
        _ => None,
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
    /// Analysis, parameters and counts shown in the header.
    pub context: ScreenContext,
}

impl App {
    pub fn new(theme_name: &str, context: ScreenContext) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            context,
        }
    }

    /// Show `spec` interactively until `q` / `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays on
    /// the current thread.
    pub async fn run_chart(self, spec: ChartSpec) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut state = ChartState::new(spec);
        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| {
                let area = frame.area();
                chart_view::render_chart_screen(
                    frame,
                    area,
                    &state,
                    &self.context,
                    &self.theme,
                );
            }) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        if let Some(interaction) = interaction_for_key(key) {
                            debug!("chart interaction: {:?}", interaction);
                            state.apply(interaction);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if state.should_quit() {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
