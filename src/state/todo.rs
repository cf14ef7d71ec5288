//! To-do widget state.
//!
//! The collection is written through to its store after every mutation, so
//! the in-memory list and the persisted copy never diverge. Storage failures
//! are logged and otherwise ignored.

use crate::storage::{StorageError, TodoStore};
use fake::Dummy;
use log::*;
use serde::{Deserialize, Serialize};

/// Defines a single to-do entry.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Specifying which items are rendered.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Active, FilterMode::Completed];

    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !item.completed,
            FilterMode::Completed => item.completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::All => "전체",
            FilterMode::Active => "미완료",
            FilterMode::Completed => "완료",
        }
    }

    pub fn next(&self) -> FilterMode {
        match self {
            FilterMode::All => FilterMode::Active,
            FilterMode::Active => FilterMode::Completed,
            FilterMode::Completed => FilterMode::All,
        }
    }
}

/// Houses the to-do collection, its view filter and the input line.
///
#[derive(Default)]
pub struct TodoList {
    items: Vec<TodoItem>,
    filter: FilterMode,
    store: Option<Box<dyn TodoStore>>,
    input: String,
    input_mode: bool,
    selected: usize,
}

impl TodoList {
    /// Attach the store and populate the collection from it. Missing data
    /// starts an empty list; unreadable data is logged and also starts empty.
    ///
    pub fn load(&mut self, store: Box<dyn TodoStore>) {
        self.items = match store.load() {
            Ok(Some(items)) => {
                info!("Loaded {} to-do items", items.len());
                items
            }
            Ok(None) => {
                debug!("No stored to-do list, starting empty");
                vec![]
            }
            Err(e @ StorageError::Corrupt(_)) => {
                warn!("Ignoring stored to-do list: {}", e);
                vec![]
            }
            Err(e) => {
                error!("Failed to load to-do list: {}", e);
                vec![]
            }
        };
        self.store = Some(store);
        self.selected = 0;
    }

    /// Append a new item for non-blank text. Returns whether one was added.
    ///
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.items.push(TodoItem {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_owned(),
            completed: false,
        });
        self.persist();
        true
    }

    /// Flip completion of the item with the id. Returns whether it was found.
    ///
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.completed = !item.completed;
        self.persist();
        self.clamp_selection();
        true
    }

    /// Remove the item with the id. Returns whether it was found.
    ///
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        self.clamp_selection();
        true
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
        self.clamp_selection();
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Return the items matching the filter, in insertion order.
    ///
    pub fn visible(&self) -> Vec<&TodoItem> {
        self.items
            .iter()
            .filter(|item| self.filter.matches(item))
            .collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    pub fn toggle_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.toggle(&id),
            None => false,
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.delete(&id),
            None => false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_input_mode(&self) -> bool {
        self.input_mode
    }

    pub fn enter_input_mode(&mut self) {
        self.input_mode = true;
    }

    pub fn leave_input_mode(&mut self) {
        self.input_mode = false;
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Add the input line as a new item; the line is cleared once added.
    ///
    pub fn submit_input(&mut self) -> bool {
        let input = std::mem::take(&mut self.input);
        if self.add(&input) {
            true
        } else {
            self.input = input;
            false
        }
    }

    fn selected_id(&self) -> Option<String> {
        self.visible()
            .get(self.selected)
            .map(|item| item.id.to_owned())
    }

    fn clamp_selection(&mut self) {
        let count = self.visible().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.items) {
                error!("Failed to save to-do list: {}", e);
            }
        }
    }
}
