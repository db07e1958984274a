use std::sync::mpsc::Receiver;
use std::time::Instant;

use todo_core::projection::DashboardView;
use todo_core::runtime::{CoreHandle, DataChange};
use todo_core::{Action, DashboardSession, Todo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys drive navigation, filtering and toggles
    Normal,
    /// Keys go into the add-todo input
    Editing,
}

pub struct App {
    pub running: bool,
    /// First Ctrl+C pressed; a second one quits
    pub pending_quit: bool,
    pub input_mode: InputMode,
    pub session: DashboardSession,
    /// Row cursor within the displayed (filtered) list
    pub selected_index: usize,
    pub status_message: Option<String>,
    core_handle: Option<CoreHandle>,
    data_rx: Option<Receiver<DataChange>>,
}

impl App {
    pub fn new(session: DashboardSession) -> Self {
        Self {
            running: true,
            pending_quit: false,
            input_mode: InputMode::Normal,
            session,
            selected_index: 0,
            status_message: None,
            core_handle: None,
            data_rx: None,
        }
    }

    pub fn set_core_handle(&mut self, handle: CoreHandle, data_rx: Receiver<DataChange>) {
        self.core_handle = Some(handle);
        self.data_rx = Some(data_rx);
    }

    /// Resolve the first page.
    pub fn start(&mut self) {
        let effects = self.session.start(Instant::now());
        self.send_effects(effects);
    }

    /// Run one action through the session and forward its effects to the
    /// fetch worker.
    pub fn dispatch(&mut self, action: Action) {
        let effects = self.session.reduce(action, Instant::now());
        self.send_effects(effects);
        self.clamp_selection();
    }

    fn send_effects(&mut self, effects: Vec<todo_core::Effect>) {
        if effects.is_empty() {
            return;
        }
        let Some(handle) = &self.core_handle else {
            tracing::warn!(count = effects.len(), "no fetch worker, dropping effects");
            return;
        };
        if let Err(e) = handle.dispatch(effects) {
            self.set_status(&format!("Fetch worker unavailable: {}", e));
        }
    }

    /// Feed every pending worker message into the session.
    /// Returns true when anything arrived.
    pub fn drain_data_changes(&mut self) -> bool {
        let Some(rx) = self.data_rx.as_ref() else {
            return false;
        };
        let changes: Vec<DataChange> = rx.try_iter().collect();
        let received = !changes.is_empty();
        for change in changes {
            self.dispatch(change.into());
        }
        received
    }

    pub fn view(&self) -> DashboardView {
        self.session.view(Instant::now())
    }

    pub fn selected_todo(&self) -> Option<Todo> {
        self.view().todos.displayed.get(self.selected_index).cloned()
    }

    pub fn select_next(&mut self) {
        let len = self.view().todos.displayed.len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.view().todos.displayed.len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn go_prev(&mut self) {
        if self.view().can_prev {
            self.selected_index = 0;
            self.dispatch(Action::PrevPage);
        }
    }

    pub fn go_next(&mut self) {
        if self.view().can_next {
            self.selected_index = 0;
            self.dispatch(Action::NextPage);
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(todo) = self.selected_todo() {
            self.dispatch(Action::Toggle(todo.id));
        }
    }

    pub fn retry(&mut self) {
        if self.view().can_retry {
            self.dispatch(Action::Retry);
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let mut draft = self.session.draft().to_string();
        draft.push(c);
        self.dispatch(Action::EditDraft(draft));
    }

    pub fn paste(&mut self, text: &str) {
        let mut draft = self.session.draft().to_string();
        // Single-line input
        draft.extend(text.chars().filter(|c| !c.is_control()));
        self.dispatch(Action::EditDraft(draft));
    }

    pub fn delete_char(&mut self) {
        let mut draft = self.session.draft().to_string();
        draft.pop();
        self.dispatch(Action::EditDraft(draft));
    }

    /// Submit the add form. Leaves editing mode once the todo is in.
    pub fn submit_draft(&mut self) {
        self.dispatch(Action::SubmitDraft);
        if self.session.draft().is_empty() && self.session.input_error().is_none() {
            self.selected_index = 0;
            self.input_mode = InputMode::Normal;
            self.set_status("Added locally - not sent to the API");
        }
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
