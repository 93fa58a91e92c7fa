//! Main TUI application state and logic

use crate::listing::{listing, Language, Listing};
use crate::playback::session::{Algorithm, Session};
use crate::playback::{PlaybackError, Tick};
use crate::steps::{self, GenerateError};
use crate::ui::panes::{self, StatusRenderData};
use crate::ui::theme::ThemeMode;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Visual,
    Narration,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> narration -> visual)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Narration,
            FocusedPane::Narration => FocusedPane::Visual,
            FocusedPane::Visual => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    pub session: Session,

    /// Listing for the current algorithm, mode and language
    pub listing: Listing,
    pub language: Language,
    pub theme_mode: ThemeMode,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub visual_scroll: usize,
    pub narration_scroll: usize,

    pub should_quit: bool,

    pub status_message: String,
    /// Whether the status message reports rejected input
    pub status_is_error: bool,

    /// Text being typed while in input mode
    pub input: Option<String>,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(session: Session, language: Language, theme_mode: ThemeMode) -> Self {
        let listing = listing(session.algorithm(), session.is_optimized(), language);
        App {
            session,
            listing,
            language,
            theme_mode,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            visual_scroll: 0,
            narration_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
            input: None,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            match self.session.tick(Instant::now()) {
                Tick::Idle => {}
                Tick::Advanced => {
                    self.set_status("Playing...");
                    self.narration_scroll = usize::MAX;
                }
                Tick::Finished => {
                    self.set_status("Playback complete");
                    self.narration_scroll = usize::MAX;
                }
            }

            // Poll with a timeout so autoplay keeps ticking without input
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let theme = self.theme_mode.theme();
        let size = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), size);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Listing (top) | Narration (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[0]);

        let walkthrough = self.session.walkthrough();
        let highlighted = walkthrough
            .current_record()
            .map(|record| self.listing.highlighted(record.listing_key()))
            .unwrap_or(&[]);

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.listing,
            highlighted,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
            theme,
        );

        panes::render_narration_pane(
            frame,
            left_rows[1],
            &walkthrough.records(),
            self.session.position(),
            self.focused_pane == FocusedPane::Narration,
            &mut self.narration_scroll,
            theme,
        );

        panes::render_visual_pane(
            frame,
            columns[1],
            walkthrough,
            self.focused_pane == FocusedPane::Visual,
            &mut self.visual_scroll,
            theme,
        );

        let prompt = match self.session.algorithm() {
            Algorithm::Factors => "Number",
            Algorithm::FindMax => "Values",
        };
        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                current_step: self.session.position(),
                total_steps: self.session.len(),
                is_playing: self.session.is_playing(),
                is_error: self.status_is_error,
                input: self.input.as_deref().map(|text| (prompt, text)),
            },
            theme,
        );
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, error: &GenerateError) {
        self.status_message = error.reason().to_string();
        self.status_is_error = true;
    }

    fn refresh_listing(&mut self) {
        self.listing = listing(
            self.session.algorithm(),
            self.session.is_optimized(),
            self.language,
        );
        self.source_scroll = 0;
        self.visual_scroll = 0;
        self.narration_scroll = usize::MAX;
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input.is_some() {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = self.session.step_forward_by(n);
                self.set_status(format!("Stepped forward {} step(s)", stepped));
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                let result = self.session.step_backward();
                self.report_step(result, "Stepped backward", "Cannot step backward");
            }
            KeyCode::Right => {
                let result = self.session.step_forward();
                self.report_step(result, "Stepped forward", "Cannot step forward");
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    if self.session.toggle_play(Instant::now()) {
                        self.set_status("Playing...");
                    } else {
                        self.set_status("Paused");
                    }
                    self.narration_scroll = usize::MAX;
                }
            }
            KeyCode::Enter => {
                let result = self.session.jump_to_end();
                self.report_step(result, "Jumped to end", "Cannot jump");
            }
            KeyCode::Backspace => {
                let result = self.session.rewind_to_start();
                self.report_step(result, "Jumped to start", "Cannot jump");
            }
            KeyCode::Char('o') => match self.session.toggle_optimized() {
                Ok(optimized) => {
                    self.refresh_listing();
                    self.set_status(if optimized {
                        "Optimized mode: checking up to the square root"
                    } else {
                        "Naive mode: checking every divisor"
                    });
                }
                Err(e) => self.set_error(&e),
            },
            KeyCode::Char('a') => {
                let next = self.session.algorithm().next();
                match self.session.switch_algorithm(next) {
                    Ok(()) => {
                        self.refresh_listing();
                        self.set_status(format!("Switched to {}", next.title()));
                    }
                    Err(e) => self.set_error(&e),
                }
            }
            KeyCode::Char('l') => {
                self.language = self.language.next();
                self.refresh_listing();
                self.set_status(format!("Listing: {}", self.language));
            }
            KeyCode::Char('t') => {
                self.theme_mode = self.theme_mode.toggle();
                info!(theme = %self.theme_mode, "theme toggled");
                self.set_status(format!("Theme: {}", self.theme_mode));
            }
            KeyCode::Char('n') => {
                self.session.stop_autoplay();
                self.input = Some(String::new());
                self.set_status("");
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(buffer) = self.input.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.input = None;
                self.set_status("Input cancelled");
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '-' | ',' | '.' | ' ') => {
                if buffer.len() < 64 {
                    buffer.push(c);
                }
            }
            KeyCode::Enter => {
                let text = buffer.clone();
                self.commit_input(&text);
            }
            _ => {}
        }
    }

    /// Validate typed input and regenerate; invalid input keeps the prompt open
    fn commit_input(&mut self, text: &str) {
        let result = match self.session.algorithm() {
            Algorithm::Factors => steps::parse_number(text, self.session.max_number())
                .and_then(|n| self.session.set_number(i64::from(n))),
            Algorithm::FindMax => {
                steps::parse_values(text).and_then(|values| self.session.set_values(values))
            }
        };

        match result {
            Ok(()) => {
                debug!(input = text, "input applied");
                self.input = None;
                self.refresh_listing();
                self.set_status(format!(
                    "Generated {} steps for {}",
                    self.session.len(),
                    self.session.walkthrough().input_label()
                ));
            }
            Err(e) => self.set_error(&e),
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Visual => &mut self.visual_scroll,
            FocusedPane::Narration => &mut self.narration_scroll,
        }
    }

    fn report_step(&mut self, result: Result<(), PlaybackError>, ok: &str, failed: &str) {
        match result {
            Ok(()) => self.set_status(ok),
            Err(e) => self.set_status(format!("{}: {}", failed, e)),
        }
        self.narration_scroll = usize::MAX;
    }
}
