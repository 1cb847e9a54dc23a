//! Main application logic for the issue viewer.
//!
//! The `App` renders the issue list through the presenter on every frame and
//! turns key presses into clicks delivered with `events::dispatch`. Callback
//! notifications are queued as `Command`s and applied to the in-memory store
//! after dispatch returns, so the tree is never mutated mid-walk.

use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::events::{dispatch, DispatchOutcome, Target, TaskCallbacks};
use crate::presenter;
use crate::renderer::RenderContext;
use crate::store::IssueStore;
use crate::task::Task;
use crate::theme::Theme;
use crate::tui::{
    colors::ACCENT,
    enums::{AppState, Command},
    input::InputField,
    list::draw_task_list,
    utils::centered_rect,
};
use crate::view::{ActionKind, TaskListView};

/// Callback sink used by the viewer.
#[derive(Default)]
struct CommandQueue {
    commands: Vec<Command>,
}

impl TaskCallbacks for CommandQueue {
    fn on_edit(&mut self, task: &Task) {
        self.commands.push(Command::Edit {
            id: task.id.clone(),
            title: task.title.clone(),
        });
    }

    fn on_delete(&mut self, task_id: &str) {
        self.commands.push(Command::Delete(task_id.to_string()));
    }

    fn on_add_subtask(&mut self, task_id: &str) {
        self.commands.push(Command::AddSubtask(task_id.to_string()));
    }

    fn on_card_click(&mut self, task: &Task) {
        self.commands.push(Command::Focus(task.id.clone()));
    }
}

/// Main application state for the issue viewer.
pub struct App {
    state: AppState,
    store: IssueStore,
    config: Config,
    theme: &'static Theme,
    list_state: ListState,
    title_input: InputField,
    editing_id: Option<String>,
    pending_delete: Option<String>,
    status_message: String,
}

impl App {
    pub fn new(store: IssueStore, config: Config) -> Self {
        let mut app = App {
            state: AppState::IssueList,
            store,
            config,
            theme: Theme::global(),
            list_state: ListState::default(),
            title_input: InputField::default(),
            editing_id: None,
            pending_delete: None,
            status_message: String::new(),
        };
        if !app.store.tasks.is_empty() {
            app.list_state.select(Some(0));
        }
        app
    }

    pub fn store(&self) -> &IssueStore {
        &self.store
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn view(&self) -> TaskListView {
        let ctx = RenderContext::from_config(self.theme, &self.config, Utc::now());
        presenter::render(&self.store.tasks, &ctx)
    }

    /// `(path, id)` for every visible card in display order.
    fn card_index(&self) -> Vec<(Vec<usize>, String)> {
        self.view()
            .flatten_with_paths()
            .into_iter()
            .map(|(path, card)| (path, card.id.clone()))
            .collect()
    }

    fn selected_path(&self) -> Option<Vec<usize>> {
        let selected = self.list_state.selected()?;
        self.card_index().into_iter().nth(selected).map(|(path, _)| path)
    }

    fn select_id(&mut self, id: &str) {
        if let Some(pos) = self.card_index().iter().position(|(_, card_id)| card_id == id) {
            self.list_state.select(Some(pos));
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.card_index().len();
        match self.list_state.selected() {
            _ if count == 0 => self.list_state.select(None),
            Some(i) if i >= count => self.list_state.select(Some(count - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    fn move_selection(&mut self, down: bool) {
        let count = self.card_index().len();
        if count == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if down => (i + 1).min(count - 1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    /// Deliver a click on the selected card and apply whatever it asked for.
    pub fn click(&mut self, target: Target) {
        let Some(path) = self.selected_path() else {
            self.status_message = "No issue selected".to_string();
            return;
        };
        let mut queue = CommandQueue::default();
        if dispatch(&self.store.tasks, &path, target, &mut queue) == DispatchOutcome::Unresolved {
            return;
        }
        let mut focused = false;
        for command in queue.commands {
            if let Command::Focus(_) = command {
                // Bubbling reports the innermost card first; ancestors follow.
                if focused {
                    continue;
                }
                focused = true;
            }
            self.apply(command);
        }
    }

    fn apply(&mut self, command: Command) {
        debug!(?command, "applying viewer command");
        match command {
            Command::Edit { id, title } => {
                self.title_input = InputField::with_value(&title);
                self.editing_id = Some(id);
                self.state = AppState::EditTitle;
            }
            Command::Delete(id) => {
                self.pending_delete = Some(id);
                self.state = AppState::ConfirmDelete;
            }
            Command::AddSubtask(parent_id) => {
                let id = self.store.next_id();
                if self.store.add_subtask(&parent_id, Task::new(id.clone(), "New subtask")) {
                    info!(parent = %parent_id, id = %id, "subtask added");
                    self.select_id(&id);
                    self.status_message = format!("Added subtask {id} under {parent_id}");
                }
            }
            Command::Focus(id) => self.select_id(&id),
        }
    }

    fn commit_title(&mut self) {
        let title = self.title_input.value.trim().to_string();
        if title.is_empty() {
            self.status_message = "Title cannot be empty".to_string();
            return;
        }
        if let Some(id) = self.editing_id.take() {
            if let Some(task) = self.store.get_mut(&id) {
                task.title = title;
                info!(id = %id, "title updated");
                self.status_message = format!("Renamed {id}");
            }
        }
        self.state = AppState::IssueList;
    }

    fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            if let Some(removed) = self.store.remove(&id) {
                info!(id = %id, "issue deleted");
                self.status_message = format!("Deleted {} ({})", removed.title, removed.id);
            }
        }
        self.state = AppState::IssueList;
        self.clamp_selection();
    }

    /// Handle a key press. Returns true if the viewer should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match self.state {
            AppState::IssueList => return self.handle_list_key(key),
            AppState::EditTitle => match key {
                KeyCode::Enter => self.commit_title(),
                KeyCode::Esc => {
                    self.editing_id = None;
                    self.state = AppState::IssueList;
                }
                KeyCode::Backspace => self.title_input.handle_backspace(),
                KeyCode::Delete => self.title_input.handle_delete(),
                KeyCode::Left => self.title_input.move_cursor_left(),
                KeyCode::Right => self.title_input.move_cursor_right(),
                KeyCode::Home => self.title_input.move_home(),
                KeyCode::End => self.title_input.move_end(),
                KeyCode::Char(c) => self.title_input.handle_char(c),
                _ => {}
            },
            AppState::ConfirmDelete => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.pending_delete = None;
                    self.state = AppState::IssueList;
                }
                _ => {}
            },
            AppState::Help => self.state = AppState::IssueList,
        }
        false
    }

    fn handle_list_key(&mut self, key: KeyCode) -> bool {
        self.status_message.clear();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter => self.click(Target::Title),
            KeyCode::Char('e') => self.click(Target::Action(ActionKind::Edit)),
            KeyCode::Char('a') => self.click(Target::Action(ActionKind::AddSubtask)),
            KeyCode::Char('d') => self.click(Target::Action(ActionKind::Delete)),
            KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn render_edit_title(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 20, area);
        f.render_widget(Clear, area);
        let block = Block::default()
            .title("Edit title - Enter to save, Esc to cancel")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(area);
        f.render_widget(Paragraph::new(self.title_input.value.clone()).block(block), area);
        let cursor_x = inner.x + (self.title_input.cursor as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position((cursor_x, inner.y));
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);
        let title = self
            .pending_delete
            .as_deref()
            .and_then(|id| self.store.get(id))
            .map(|t| t.title.clone())
            .unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Delete this issue and all of its subtasks?", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(title),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().title("Confirm Delete").borders(Borders::ALL).style(Style::default().bg(Color::Rgb(114, 0, 0))))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Issue Viewer Help", bold)),
            Line::from(""),
            Line::from("  ↑/k, ↓/j     Select issue"),
            Line::from("  Enter        Open the title (edit)"),
            Line::from("  e            Edit title"),
            Line::from("  a            Add subtask"),
            Line::from("  d            Delete issue and its subtasks"),
            Line::from("  h/F1         Show this help"),
            Line::from("  q/Esc        Quit"),
            Line::from(""),
            Line::from("Changes are kept in memory only."),
        ];
        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help - Press any key to return"))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if self.status_message.is_empty() {
            format!(
                "{} issues | Enter: Edit | a: Add subtask | d: Delete | h: Help | q: Quit",
                self.store.len_deep()
            )
        } else {
            self.status_message.clone()
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(ACCENT).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the screen for the current state.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        if self.state == AppState::Help {
            self.render_help(f, chunks[0]);
        } else {
            let view = self.view();
            draw_task_list(
                f,
                chunks[0],
                &view,
                &mut self.list_state,
                self.config.cells_per_indent_unit,
                self.theme,
            );
            match self.state {
                AppState::EditTitle => self.render_edit_title(f, chunks[0]),
                AppState::ConfirmDelete => self.render_confirm(f, chunks[0]),
                _ => {}
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop. Redraws after every input event or poll timeout so
    /// overdue colouring follows the clock.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
