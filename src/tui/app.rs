use std::collections::HashSet;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::data_dir::DataDir;
use crate::io::storage::{FileStorage, Storage};
use crate::io::store::TaskStore;
use crate::model::config::UiConfig;
use crate::model::task::{Task, TaskStatus};
use crate::ops::group::{StatusGroups, project};
use crate::ops::task_ops::today_str;

use super::form::{FormOutcome, TaskForm, TextField};
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    Form,
    Confirm,
}

/// One line of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Header(TaskStatus),
    Task { status: TaskStatus, id: String },
    /// Placeholder for an expanded section with no matching tasks
    Empty(TaskStatus),
}

impl Row {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, Row::Empty(_))
    }
}

/// Main application state
pub struct App {
    pub store: TaskStore<Box<dyn Storage>>,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Live search box; filtering follows every keystroke
    pub search: TextField,
    /// Sections whose tasks are shown
    pub expanded: HashSet<TaskStatus>,
    /// Index into `rows()`
    pub cursor: usize,
    /// First visible board row
    pub scroll_offset: usize,
    pub form: Option<TaskForm>,
    /// Id awaiting delete confirmation
    pub confirm_delete: Option<String>,
    /// One-shot message for the status row
    pub message: Option<String>,
    pub show_key_hints: bool,
}

impl App {
    pub fn new(store: TaskStore<Box<dyn Storage>>, ui: &UiConfig) -> Self {
        App {
            store,
            theme: Theme::from_config(ui),
            mode: Mode::Navigate,
            should_quit: false,
            search: TextField::default(),
            expanded: ui.expanded.iter().copied().collect(),
            cursor: 0,
            scroll_offset: 0,
            form: None,
            confirm_delete: None,
            message: None,
            show_key_hints: ui.show_key_hints,
        }
    }

    pub fn query(&self) -> &str {
        &self.search.text
    }

    /// The board's current projection: search filter, then status buckets.
    pub fn groups(&self) -> StatusGroups<'_> {
        project(self.store.tasks(), self.query())
    }

    /// Flattened board lines in display order.
    pub fn rows(&self) -> Vec<Row> {
        let groups = self.groups();
        let mut rows = Vec::new();
        for (status, tasks) in groups.iter() {
            rows.push(Row::Header(status));
            if !self.expanded.contains(&status) {
                continue;
            }
            if tasks.is_empty() {
                rows.push(Row::Empty(status));
            }
            for task in tasks {
                rows.push(Row::Task {
                    status,
                    id: task.id.clone(),
                });
            }
        }
        rows
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.cursor)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        match self.selected_row()? {
            Row::Task { id, .. } => self.store.get(&id),
            _ => None,
        }
    }

    /// Move by `delta` selectable rows, stopping at either end.
    pub fn move_cursor(&mut self, delta: isize) {
        let rows = self.rows();
        let selectable: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_selectable())
            .map(|(i, _)| i)
            .collect();
        if selectable.is_empty() {
            self.cursor = 0;
            return;
        }
        let pos = selectable
            .iter()
            .position(|&i| i >= self.cursor)
            .unwrap_or(selectable.len() - 1);
        let target = (pos as isize + delta).clamp(0, selectable.len() as isize - 1);
        self.cursor = selectable[target as usize];
    }

    pub fn cursor_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_bottom(&mut self) {
        self.cursor = self.rows().len().saturating_sub(1);
        self.move_cursor(0);
    }

    /// Keep the cursor on a valid selectable row after the rows changed.
    pub fn clamp_cursor(&mut self) {
        let len = self.rows().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        self.move_cursor(0);
    }

    /// Expand or collapse the section under the cursor (or the section of
    /// the task under it). The cursor lands on that section's header.
    pub fn toggle_section(&mut self) {
        let status = match self.selected_row() {
            Some(Row::Header(s)) | Some(Row::Empty(s)) | Some(Row::Task { status: s, .. }) => s,
            None => return,
        };
        if !self.expanded.remove(&status) {
            self.expanded.insert(status);
        }
        if let Some(idx) = self
            .rows()
            .iter()
            .position(|r| *r == Row::Header(status))
        {
            self.cursor = idx;
        }
    }

    /// Put the cursor on the row for `id`, expanding its section if needed.
    pub fn reveal_task(&mut self, id: &str) {
        let Some(task) = self.store.get(id) else {
            return;
        };
        self.expanded.insert(task.status);
        if let Some(idx) = self
            .rows()
            .iter()
            .position(|r| matches!(r, Row::Task { id: rid, .. } if rid == id))
        {
            self.cursor = idx;
        }
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    pub fn begin_search(&mut self) {
        self.mode = Mode::Search;
        self.search.end();
    }

    /// Query changed: the board re-projects, so re-anchor the cursor.
    pub fn query_changed(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.query_changed();
    }

    // -----------------------------------------------------------------------
    // Add / edit
    // -----------------------------------------------------------------------

    pub fn open_add_form(&mut self) {
        self.form = Some(TaskForm::for_add(today_str()));
        self.mode = Mode::Form;
    }

    pub fn open_edit_form(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let form = TaskForm::for_edit(task);
        self.form = Some(form);
        self.mode = Mode::Form;
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = Mode::Navigate;
    }

    /// Validate the open form and apply it. An invalid form stays open with
    /// its error shown.
    pub fn submit_form(&mut self) {
        let Some(form) = &mut self.form else {
            return;
        };
        let Some(outcome) = form.submit() else {
            return;
        };
        self.form = None;
        self.mode = Mode::Navigate;
        match outcome {
            FormOutcome::Add(payload) => {
                let task = self.store.add(payload);
                self.message = Some(format!("Added \"{}\"", task.title));
                self.reveal_task(&task.id);
            }
            FormOutcome::Update { id, patch } => {
                if self.store.update(&id, &patch) {
                    self.message = Some("Task updated".to_string());
                    self.reveal_task(&id);
                } else {
                    self.message = Some(format!("No task with id {}", id));
                }
            }
        }
        self.clamp_cursor();
    }

    // -----------------------------------------------------------------------
    // Status / delete
    // -----------------------------------------------------------------------

    /// Advance the selected task to the next status.
    pub fn cycle_status(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        let next = task.status.cycle();
        self.store.set_status(&id, next);
        self.message = Some(format!("Moved to {}", next.label()));
        self.reveal_task(&id);
        self.clamp_cursor();
    }

    pub fn request_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        self.confirm_delete = Some(id);
        self.mode = Mode::Confirm;
    }

    /// Answer the pending delete prompt. Declining leaves the list untouched.
    pub fn resolve_delete(&mut self, confirmed: bool) {
        let id = self.confirm_delete.take();
        self.mode = Mode::Navigate;
        if !confirmed {
            return;
        }
        if let Some(id) = id
            && let Some(task) = self.store.delete(&id)
        {
            self.message = Some(format!("Deleted \"{}\"", task.title));
        }
        self.clamp_cursor();
    }

    /// Hand the store back for the final save.
    pub fn into_store(self) -> TaskStore<Box<dyn Storage>> {
        self.store
    }
}

/// Run the TUI application
pub fn run(data: &DataDir) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Box<dyn Storage> = Box::new(FileStorage::new(&data.root));
    let store = TaskStore::new(storage, data.config.storage.key.clone())
        .with_sink(data.diagnostics())
        .hydrate();

    let mut app = App::new(store, &data.config.ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.into_store().close();
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
