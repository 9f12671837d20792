//! TUI (Terminal User Interface) for the player guessing games
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `Prompt`: the search box; owns the typed text and a debounced `SearchSelector`
//! - `TuiInterface`: terminal rendering and the `GameInterface` implementation
//!
//! # State Machine
//! - `Playing` → `GameOver` on a win or loss, back to `Playing` on a new game
//! - The dropdown is visible only while `Playing` and the search has matches

use crate::error::GameError;
use crate::feedback::{Feedback, GuessReport};
use crate::game_state::{GameInterface, Hint, HintKind, NewGameInfo, Progress, UserAction};
use crate::profile::SportProfile;
use crate::schema::Record;
use crate::search::{SearchOptions, SearchSelector};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const EVENT_POLL_TIMEOUT_MS: u64 = 50;
const DROPDOWN_ROWS: u16 = 8;
const NAME_WIDTH: usize = 24;
const CELL_WIDTH: usize = 10;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const HIGHLIGHT_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

fn feedback_colors(feedback: Feedback) -> (Color, Color) {
    match feedback {
        Feedback::Correct => (Color::Green, Color::Black),
        Feedback::Close(_) => (Color::Yellow, Color::Black),
        Feedback::Wrong(_) => (Color::DarkGray, Color::White),
    }
}

fn fit(text: &str, width: usize) -> String {
    let clipped: String = text.chars().take(width).collect();
    format!("{clipped:<width$}")
}

fn report_line(report: &GuessReport) -> Line<'static> {
    let mut spans = vec![Span::raw(fit(&report.player, NAME_WIDTH))];
    for cell in &report.cells {
        let (bg, fg) = feedback_colors(cell.feedback);
        spans.push(Span::styled(
            fit(&cell.display, CELL_WIDTH),
            Style::default().fg(fg).bg(bg),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn header_line(profile: &SportProfile) -> Line<'static> {
    let mut spans = vec![Span::styled(fit("Player", NAME_WIDTH), HEADER_STYLE)];
    let labels = profile
        .categorical
        .iter()
        .copied()
        .chain(profile.numeric.iter().map(|s| s.label));
    for label in labels {
        spans.push(Span::styled(fit(label, CELL_WIDTH), HEADER_STYLE));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// The search box: typed text plus the debounced player dropdown.
struct Prompt {
    profile: &'static SportProfile,
    input: String,
    selector: SearchSelector<Record>,
    error: String,
}

impl Prompt {
    fn new(profile: &'static SportProfile, players: Vec<Record>, options: SearchOptions) -> Self {
        let selector = SearchSelector::new(options, move |query| profile.filter(&players, query))
            .on_select(move |record: &Record| {
                log::debug!("Selected {} from dropdown", profile.identity(record));
            });
        Self {
            profile,
            input: String::new(),
            selector,
            error: String::new(),
        }
    }

    fn reset(&mut self) {
        self.input.clear();
        self.selector.clear();
        self.error.clear();
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<UserAction> {
        self.error.clear();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('t') if ctrl => return Some(UserAction::Hint(HintKind::Team)),
            KeyCode::Char('l') if ctrl => return Some(UserAction::Hint(HintKind::Initial)),
            KeyCode::Char('n') if ctrl => return Some(UserAction::NewGame),
            KeyCode::Char(c) if !ctrl && !alt => {
                self.input.push(c);
                self.selector.input(&self.input, now);
            }
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    self.selector.input(&self.input, now);
                }
            }
            KeyCode::Down => self.selector.move_down(),
            KeyCode::Up => self.selector.move_up(),
            KeyCode::Esc if self.selector.is_visible() => self.selector.hide(),
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Enter => return self.submit(),
            _ => {
                debug_log!("Prompt::handle_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn submit(&mut self) -> Option<UserAction> {
        let name = match self.selector.confirm() {
            Some(record) => self.profile.identity(&record).to_string(),
            None if self.input.trim().is_empty() => {
                self.error = "Type a player name first".to_string();
                return None;
            }
            None => self.input.trim().to_string(),
        };
        self.input.clear();
        self.selector.clear();
        Some(UserAction::Guess(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Playing,
    /// Won or lost; the outcome is in the interface message.
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    profile: &'static SportProfile,
    reports: &'a [GuessReport],
    prompt: &'a Prompt,
    state: TuiState,
    hints: &'a [HintKind],
    message: &'a str,
    status: &'a str,
}

/// Full-screen guessing game.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    profile: &'static SportProfile,
    prompt: Prompt,
    reports: Vec<GuessReport>,
    state: TuiState,
    hints: Vec<HintKind>,
    message: String,
    status: String,
}

impl TuiInterface {
    /// Take over the terminal.
    ///
    /// # Errors
    /// Fails when raw mode or the alternate screen cannot be entered.
    pub fn new(
        profile: &'static SportProfile,
        players: Vec<Record>,
        options: SearchOptions,
    ) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            profile,
            prompt: Prompt::new(profile, players, options),
            reports: Vec::new(),
            state: TuiState::Playing,
            hints: Vec::new(),
            message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    /// # Errors
    /// Fails when the terminal cannot be restored.
    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            profile: self.profile,
            reports: &self.reports,
            prompt: &self.prompt,
            state: self.state,
            hints: &self.hints,
            message: &self.message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            log::warn!("Draw error: {e}");
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let dropdown_rows = if ctx.prompt.selector.is_visible() {
            DROPDOWN_ROWS
        } else {
            0
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),             // Title
                Constraint::Min(6),                // Guess board
                Constraint::Length(3),             // Search box
                Constraint::Length(dropdown_rows), // Dropdown
                Constraint::Length(5),             // Messages
                Constraint::Length(3),             // Status line
                Constraint::Length(3),             // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.profile);
        Self::render_board(f, chunks[1], ctx.profile, ctx.reports);
        Self::render_input(f, chunks[2], ctx.prompt, ctx.state);
        if dropdown_rows > 0 {
            Self::render_dropdown(f, chunks[3], ctx.prompt);
        }
        Self::render_info(f, chunks[4], ctx.hints, ctx.message, &ctx.prompt.error);
        Self::render_status(f, chunks[5], ctx.status);
        Self::render_instructions(f, chunks[6], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, profile: &SportProfile) {
        let title = Paragraph::new(format!("GUESS THE {} PLAYER", profile.name))
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, profile: &SportProfile, reports: &[GuessReport]) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        // Header plus the most recent guesses that fit
        let available = (inner.height as usize).saturating_sub(1);
        let skip = reports.len().saturating_sub(available);
        let mut lines = vec![header_line(profile)];
        lines.extend(reports.iter().skip(skip).map(report_line));
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn render_input(f: &mut Frame, area: Rect, prompt: &Prompt, state: TuiState) {
        let text = match state {
            TuiState::Playing => format!("{}_", prompt.input),
            TuiState::GameOver => String::new(),
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().title("Search players").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_dropdown(f: &mut Frame, area: Rect, prompt: &Prompt) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let candidates = prompt.selector.candidates();
        let visible = inner.height as usize;
        // Keep the highlighted row on screen
        let first = prompt
            .selector
            .highlighted()
            .map_or(0, |i| (i + 1).saturating_sub(visible));
        let lines: Vec<Line> = candidates
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(i, record)| {
                let label = prompt.profile.format_item(record);
                if prompt.selector.highlighted() == Some(i) {
                    Line::from(Span::styled(label, HIGHLIGHT_STYLE))
                } else {
                    Line::from(label)
                }
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn render_info(f: &mut Frame, area: Rect, hints: &[HintKind], message: &str, error: &str) {
        let mut lines = Vec::new();

        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }

        if !hints.is_empty() {
            let keys: Vec<&str> = hints
                .iter()
                .map(|h| match h {
                    HintKind::Team => "Ctrl+T: team hint",
                    HintKind::Initial => "Ctrl+L: initial hint",
                })
                .collect();
            lines.push(Line::from(vec![Span::styled(
                format!("Hint available - {}", keys.join(" | ")),
                INFO_STYLE,
            )]));
        }

        if !error.is_empty() {
            lines.push(Line::from(vec![Span::styled(error, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Playing => {
                "Type to search | ↑/↓: Select | ENTER: Guess | Ctrl+N: New game | ESC: Close list / Quit"
            }
            TuiState::GameOver => "N: New Game | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(SUCCESS_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Garbage from escape sequences when alt-tabbing
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        Ok(match self.state {
            TuiState::Playing => self.prompt.handle_key(key, Instant::now()),
            TuiState::GameOver => Self::handle_game_over_input(key),
        })
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn transition_to_game_over(&mut self) {
        self.state = TuiState::GameOver;
        self.hints.clear();
        self.prompt.reset();
    }
}

impl GameInterface for TuiInterface {
    fn display_new_game(&mut self, info: &NewGameInfo) {
        self.reports.clear();
        self.hints.clear();
        self.prompt.reset();
        self.state = TuiState::Playing;
        self.message = format!(
            "New game: {} players loaded. You have {} guesses.",
            info.player_count, info.max_guesses
        );
        self.status = format!("Guess 1/{}", info.max_guesses);
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            // Debounced search runs here, between key events
            self.prompt.selector.poll(Instant::now());

            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("read_action() - Error handling input: {e}");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_guess(&mut self, report: &GuessReport, progress: Progress) {
        self.reports.push(report.clone());
        self.message.clear();
        self.status = format!("Guess {}/{}", progress.made, progress.max);
        self.draw_or_log();
    }

    fn display_hints_available(&mut self, hints: &[HintKind]) {
        self.hints = hints.to_vec();
        self.draw_or_log();
    }

    fn display_hint(&mut self, hint: &Hint) {
        self.message = match hint {
            Hint::Team(team) => format!("Hint: the player is on {team}"),
            Hint::Initial(initial) => format!("Hint: the player's first name starts with {initial}"),
        };
        self.draw_or_log();
    }

    fn display_error(&mut self, error: &GameError) {
        self.prompt.error = error.to_string();
        self.draw_or_log();
    }

    fn display_won(&mut self, answer: &str, guesses: usize) {
        self.transition_to_game_over();
        self.message = format!("✓ Correct! It was {answer}.");
        self.status = format!("Game Over - solved in {guesses} guesses");
        self.draw_or_log();
    }

    fn display_lost(&mut self, answer: &str, details: &str) {
        self.transition_to_game_over();
        self.message = format!("Out of guesses! The player was {details}");
        self.status = format!("Game Over - the answer was {answer}");
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{Cell, Direction as Arrow};
    use crate::profile::MLB;

    fn players() -> Vec<Record> {
        ["Aaron Judge", "Juan Soto", "Julio Rodriguez"]
            .iter()
            .map(|name| Record::new().with("Player", *name).with("Team", "NYY").with("League", "AL"))
            .collect()
    }

    fn prompt() -> Prompt {
        Prompt::new(&MLB, players(), SearchOptions::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(p: &mut Prompt, text: &str, now: Instant) {
        for c in text.chars() {
            assert!(p.handle_key(key(KeyCode::Char(c)), now).is_none());
        }
    }

    #[test]
    fn test_dropdown_selection_submits_player() {
        let mut p = prompt();
        let start = Instant::now();
        type_text(&mut p, "soto", start);
        assert!(!p.selector.is_visible());
        p.selector.poll(start + Duration::from_millis(300));
        assert_eq!(p.selector.candidates().len(), 1);

        p.handle_key(key(KeyCode::Down), start);
        match p.handle_key(key(KeyCode::Enter), start) {
            Some(UserAction::Guess(name)) => assert_eq!(name, "Juan Soto"),
            other => panic!("Expected guess, got {other:?}"),
        }
        assert!(p.input.is_empty());
        assert!(!p.selector.is_visible());
    }

    #[test]
    fn test_enter_without_highlight_submits_text() {
        let mut p = prompt();
        type_text(&mut p, "ju", Instant::now());
        match p.handle_key(key(KeyCode::Enter), Instant::now()) {
            Some(UserAction::Guess(name)) => assert_eq!(name, "ju"),
            other => panic!("Expected guess, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_on_empty_input_is_error() {
        let mut p = prompt();
        assert!(p.handle_key(key(KeyCode::Enter), Instant::now()).is_none());
        assert!(!p.error.is_empty());
    }

    #[test]
    fn test_escape_closes_dropdown_before_exit() {
        let mut p = prompt();
        let start = Instant::now();
        type_text(&mut p, "ju", start);
        p.selector.poll(start + Duration::from_millis(300));
        assert!(p.selector.is_visible());
        assert!(p.handle_key(key(KeyCode::Esc), start).is_none());
        assert!(!p.selector.is_visible());
        assert!(matches!(
            p.handle_key(key(KeyCode::Esc), start),
            Some(UserAction::Exit)
        ));
    }

    #[test]
    fn test_control_shortcuts() {
        let mut p = prompt();
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert!(matches!(
            p.handle_key(ctrl('t'), Instant::now()),
            Some(UserAction::Hint(HintKind::Team))
        ));
        assert!(matches!(
            p.handle_key(ctrl('l'), Instant::now()),
            Some(UserAction::Hint(HintKind::Initial))
        ));
        assert!(matches!(
            p.handle_key(ctrl('n'), Instant::now()),
            Some(UserAction::NewGame)
        ));
        assert!(p.input.is_empty());
    }

    #[test]
    fn test_backspace_restarts_search() {
        let mut p = prompt();
        let start = Instant::now();
        type_text(&mut p, "soto", start);
        p.selector.poll(start + Duration::from_millis(300));
        p.handle_key(key(KeyCode::Backspace), start + Duration::from_millis(400));
        assert_eq!(p.input, "sot");
        assert!(p.selector.is_pending());
    }

    #[test]
    fn test_report_line_colors_cells() {
        let report = GuessReport {
            player: "Juan Soto".to_string(),
            cells: vec![
                Cell {
                    label: "League",
                    display: "AL".to_string(),
                    feedback: Feedback::Correct,
                },
                Cell {
                    label: "HR",
                    display: "41 ↑".to_string(),
                    feedback: Feedback::Close(Arrow::Up),
                },
            ],
        };
        let line = report_line(&report);
        assert_eq!(line.spans[0].content.trim_end(), "Juan Soto");
        assert_eq!(line.spans[1].style.bg, Some(Color::Green));
        assert_eq!(line.spans[3].style.bg, Some(Color::Yellow));
        assert_eq!(line.spans[3].content.trim_end(), "41 ↑");
    }

    #[test]
    fn test_fit_pads_and_clips() {
        assert_eq!(fit("AL", 4), "AL  ");
        assert_eq!(fit("Vladimir Guerrero Jr.", 8), "Vladimir");
    }
}
