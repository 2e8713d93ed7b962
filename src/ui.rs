use crate::{
    app::{App, Field, Mode},
    task::{Status, Task, Urgency},
};
use crossterm::event::{self, Event};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

const COMPLETED_TEXT: Color = Color::Rgb(0x99, 0x99, 0x99);

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn urgency_color(urgency: Urgency) -> Color {
    match urgency {
        Urgency::Overdue => Color::Rgb(0xdc, 0x35, 0x45),
        Urgency::DueToday => Color::Rgb(0xff, 0x98, 0x00),
        Urgency::Upcoming => Color::Rgb(0x28, 0xa7, 0x45),
        Urgency::NoDueDate => Color::Rgb(0x33, 0x33, 0x33),
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    f.render_widget(
        Block::default().style(Style::default().bg(app.background)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_form(f, app, chunks[0]);

    if let Some(error) = &app.error {
        f.render_widget(
            Paragraph::new(error.as_str())
                .style(Style::default().fg(urgency_color(Urgency::Overdue))),
            chunks[1],
        );
    }

    draw_tasks(f, app, chunks[2]);

    let counts = app.list.counts();
    f.render_widget(
        Paragraph::new(format!("Tasks remaining: {}", counts.remaining)),
        chunks[3],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(urgency_color(Urgency::Upcoming)))
            .percent(counts.percent())
            .label(format!("{}%", counts.percent())),
        chunks[4],
    );

    let help = match app.mode {
        Mode::Browsing => "a add  space toggle  d remove  c clear completed  b background  q quit",
        Mode::Editing(_) => "enter add  tab switch field  esc cancel",
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().add_modifier(Modifier::DIM)),
        chunks[5],
    );
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let fields = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let border = |field: Field| {
        if app.mode == Mode::Editing(field) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    };

    f.render_widget(
        Paragraph::new(app.text_input.as_str()).block(
            Block::default()
                .title("New task")
                .borders(Borders::ALL)
                .border_style(border(Field::Text)),
        ),
        fields[0],
    );
    f.render_widget(
        Paragraph::new(app.date_input.as_str()).block(
            Block::default()
                .title("Due (YYYY-MM-DD)")
                .borders(Borders::ALL)
                .border_style(border(Field::Date)),
        ),
        fields[1],
    );
}

fn task_line<'a>(app: &App, task: &'a Task) -> Line<'a> {
    let text_style = match task.status(app.today()) {
        Status::Completed => Style::default()
            .fg(COMPLETED_TEXT)
            .add_modifier(Modifier::CROSSED_OUT),
        Status::Overdue => Style::default().add_modifier(Modifier::BOLD),
        Status::Pending => Style::default(),
    };

    let mut spans = vec![
        Span::raw(if task.completed { "[x] " } else { "[ ] " }),
        Span::styled(task.text.as_str(), text_style),
    ];
    if let Some(due) = task.due_date {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            app.format_date(due),
            Style::default().fg(urgency_color(task.urgency(app.today()))),
        ));
    }
    Line::from(spans)
}

fn draw_tasks(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .list
        .tasks()
        .iter()
        .map(|t| ListItem::new(task_line(app, t)))
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Todo").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if app.mode == Mode::Browsing && !app.list.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}
