use crate::{
    clock::Clock,
    config::Config,
    error::TodoError,
    task::{Task, TaskId},
    todo_list::TodoList,
};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::style::Color;
use std::mem;
use tracing::{debug, warn};

/// Background choices cycled with `b`.
pub const PALETTE: [Color; 5] = [
    Color::Reset,
    Color::Rgb(0x1e, 0x1e, 0x2e),
    Color::Rgb(0x2e, 0x34, 0x40),
    Color::Rgb(0x28, 0x2a, 0x36),
    Color::Rgb(0x00, 0x2b, 0x36),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Text,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Editing(Field),
}

pub fn parse_task_text(raw: &str) -> Result<String, TodoError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TodoError::EmptyText);
    }
    Ok(text.to_string())
}

/// An empty field means "no due date".
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, TodoError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| TodoError::InvalidDate(raw.to_string()))
}

/// Session state: owns the list for the lifetime of the UI.
pub struct App {
    pub list: TodoList,
    pub selected: usize,
    pub mode: Mode,
    pub text_input: String,
    pub date_input: String,
    pub error: Option<String>,
    pub background: Color,
    pub date_format: String,
    pub should_quit: bool,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn new(config: &Config, clock: Box<dyn Clock>) -> Result<Self, TodoError> {
        Ok(Self {
            list: TodoList::new(),
            selected: 0,
            mode: Mode::Browsing,
            text_input: String::new(),
            date_input: String::new(),
            error: None,
            background: config.background_color()?.unwrap_or(Color::Reset),
            date_format: config.date_format.clone(),
            should_quit: false,
            clock,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.list.tasks().get(self.selected)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.mode {
            Mode::Browsing => self.handle_browsing_key(key.code),
            Mode::Editing(field) => self.handle_editing_key(field, key.code),
        }
    }

    fn handle_browsing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') => self.mode = Mode::Editing(Field::Text),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.list.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Char('c') => self.clear_completed(),
            KeyCode::Char('b') => self.cycle_background(),
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, field: Field, code: KeyCode) {
        match code {
            KeyCode::Esc => self.mode = Mode::Browsing,
            KeyCode::Tab | KeyCode::BackTab => {
                self.mode = Mode::Editing(match field {
                    Field::Text => Field::Date,
                    Field::Date => Field::Text,
                });
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input_mut(field).pop();
            }
            KeyCode::Char(c) => self.input_mut(field).push(c),
            _ => {}
        }
    }

    fn input_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Text => &mut self.text_input,
            Field::Date => &mut self.date_input,
        }
    }

    /// Validates the form and adds the task. On failure the form stays open
    /// with the error shown.
    pub fn submit(&mut self) {
        let parsed = parse_task_text(&self.text_input)
            .and_then(|text| Ok((text, parse_due_date(&self.date_input)?)));
        match parsed {
            Ok((text, due_date)) => {
                self.list = mem::take(&mut self.list).add(text, due_date);
                self.text_input.clear();
                self.date_input.clear();
                self.error = None;
                self.mode = Mode::Browsing;
            }
            Err(err) => {
                warn!(error = %err, "rejected task input");
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some((id, completed)) = self.selected_task().map(|t| (t.id, t.completed)) {
            self.list = mem::take(&mut self.list).toggle_complete(id, !completed);
        }
    }

    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.remove(id);
        }
    }

    pub fn remove(&mut self, id: TaskId) {
        self.list = mem::take(&mut self.list).remove(id);
        self.clamp_selection();
    }

    pub fn clear_completed(&mut self) {
        self.list = mem::take(&mut self.list).clear_completed();
        self.clamp_selection();
    }

    pub fn cycle_background(&mut self) {
        let next = PALETTE
            .iter()
            .position(|c| *c == self.background)
            .map_or(0, |i| (i + 1) % PALETTE.len());
        self.background = PALETTE[next];
        debug!(background = ?self.background, "changed background");
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.list.len().saturating_sub(1));
    }
}
