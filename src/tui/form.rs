use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// Single-line text buffer with a byte-offset cursor on a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub text: String,
    pub cursor: usize,
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        TextField { text, cursor }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Which form control has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Date,
    Status,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::Date,
        FormField::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Date => "Date",
            FormField::Status => "Status",
        }
    }

    fn index(self) -> usize {
        match self {
            FormField::Title => 0,
            FormField::Description => 1,
            FormField::Date => 2,
            FormField::Status => 3,
        }
    }

    pub fn next(self) -> FormField {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> FormField {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// What a submitted form asks the store to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Add(NewTask),
    Update { id: String, patch: TaskPatch },
}

/// The add/edit dialog state
#[derive(Debug, Clone)]
pub struct TaskForm {
    /// `Some(id)` when editing an existing task
    pub editing: Option<String>,
    pub title: TextField,
    pub description: TextField,
    pub date: TextField,
    pub status: TaskStatus,
    pub focus: FormField,
    pub error: Option<String>,
}

impl TaskForm {
    pub fn for_add(today: String) -> Self {
        TaskForm {
            editing: None,
            title: TextField::default(),
            description: TextField::default(),
            date: TextField::new(today),
            status: TaskStatus::Pending,
            focus: FormField::Title,
            error: None,
        }
    }

    pub fn for_edit(task: &Task) -> Self {
        TaskForm {
            editing: Some(task.id.clone()),
            title: TextField::new(task.title.clone()),
            description: TextField::new(task.description_text()),
            date: TextField::new(task.date.clone()),
            status: task.status,
            focus: FormField::Title,
            error: None,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Add Task"
        }
    }

    /// The text field with focus, or None when the status selector has it.
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Date => Some(&mut self.date),
            FormField::Status => None,
        }
    }

    pub fn field(&self, field: FormField) -> Option<&TextField> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::Date => Some(&self.date),
            FormField::Status => None,
        }
    }

    /// Validate and turn the form into a store call. The title must not be
    /// blank; an empty description is stored as absent.
    pub fn submit(&mut self) -> Option<FormOutcome> {
        let title = self.title.text.trim();
        if title.is_empty() {
            self.error = Some("Title is required".to_string());
            self.focus = FormField::Title;
            return None;
        }
        let title = title.to_string();
        let description = match self.description.text.trim() {
            "" => None,
            d => Some(d.to_string()),
        };
        let date = self.date.text.trim().to_string();

        Some(match &self.editing {
            Some(id) => FormOutcome::Update {
                id: id.clone(),
                patch: TaskPatch {
                    title: Some(title),
                    description: Some(description),
                    date: Some(date),
                    status: Some(self.status),
                },
            },
            None => FormOutcome::Add(NewTask {
                title,
                description,
                date,
                status: self.status,
            }),
        })
    }
}
