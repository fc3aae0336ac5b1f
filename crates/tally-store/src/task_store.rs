use crate::backend::Backend;
use crate::error::StoreError;
use crate::persistence::{Loaded, Persistence};
use chrono::{Days, NaiveDate};
use tally_core::clock::Clock;
use tally_core::draft::Draft;
use tally_core::error::CoreError;
use tally_core::task::{Priority, Task, TaskId};
use tally_core::view::{derive_view, FilterMode, SortMode, View, ViewParams};
use tracing::{debug, info, warn};

/// Whether the draft is a new task or changes to an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(TaskId),
}

/// Owner of the canonical task collection.
///
/// Every mutation goes through a method here and is written through to
/// persistence before the method returns. Write failures never fail the
/// operation: the in-memory collection stays authoritative for the session,
/// and the failure is logged and kept in [`TaskStore::write_error`] until a
/// later write succeeds.
pub struct TaskStore<B, C> {
    persistence: Persistence<B>,
    clock: C,
    tasks: Vec<Task>,
    draft: Draft,
    edit: EditState,
    params: ViewParams,
    dark_mode: bool,
    write_error: Option<String>,
}

impl<B: Backend, C: Clock> TaskStore<B, C> {
    /// Load stored state, seeding two example tasks if nothing usable is
    /// stored.
    pub fn initialize(persistence: Persistence<B>, clock: C) -> Self {
        let (tasks, seeded) = match persistence.load_tasks() {
            Loaded::Present(tasks) => (tasks, false),
            Loaded::Absent => {
                info!("no stored tasks, seeding examples");
                (seed_tasks(clock.today()), true)
            }
            Loaded::Corrupt(reason) => {
                warn!(%reason, "stored tasks unusable, seeding examples");
                (seed_tasks(clock.today()), true)
            }
        };
        let dark_mode = persistence.load_theme_flag().present().unwrap_or(false);

        let mut store = Self {
            persistence,
            clock,
            tasks,
            draft: Draft::default(),
            edit: EditState::Idle,
            params: ViewParams::default(),
            dark_mode,
            write_error: None,
        };
        if seeded {
            store.persist();
        }
        debug!(count = store.tasks.len(), "task store ready");
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn persistence(&self) -> &Persistence<B> {
        &self.persistence
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // --- Draft ---

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn set_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Why the most recent write failed, if it did.
    pub fn write_error(&self) -> Option<&str> {
        self.write_error.as_deref()
    }

    // --- Mutations ---

    /// Commit the draft as a new task at the front of the collection.
    ///
    /// Returns `None`, leaving everything untouched, if the draft text is
    /// blank.
    pub fn add_task(&mut self) -> Option<TaskId> {
        let id = self.fresh_id();
        let task = match self.draft.to_task(id, self.clock.today()) {
            Ok(task) => task,
            Err(e) => {
                debug!(error = %e, "add rejected");
                return None;
            }
        };
        let id = task.id.clone();
        self.tasks.insert(0, task);
        self.draft = Draft::default();
        debug!(%id, "task added");
        self.persist();
        Some(id)
    }

    /// Flip `completed`. Returns false if no task has this id.
    pub fn toggle_complete(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        debug!(%id, completed = task.completed, "task toggled");
        self.persist();
        true
    }

    /// Remove a task. Deleting the task under edit also abandons the edit.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let len = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        if self.tasks.len() == len {
            return false;
        }
        if self.edit == EditState::Editing(id.clone()) {
            self.reset_form();
        }
        debug!(%id, "task deleted");
        self.persist();
        true
    }

    /// Load a task's fields into the draft and mark it as the edit target.
    /// Any unsaved draft for a previous target is discarded.
    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        let Some(draft) = self.get(id).map(Draft::from_task) else {
            return false;
        };
        self.draft = draft;
        self.edit = EditState::Editing(id.clone());
        true
    }

    /// Write the draft over the task under edit and return to idle.
    ///
    /// On error nothing changes: the draft and edit target are kept so the
    /// caller can correct the input.
    pub fn save_edit(&mut self) -> Result<TaskId, StoreError> {
        let EditState::Editing(id) = &self.edit else {
            return Err(StoreError::NotEditing);
        };
        let id = id.clone();
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::EditTargetMissing(id.as_str().to_string()))?;
        self.draft.apply_to(task)?;
        self.reset_form();
        debug!(%id, "task saved");
        self.persist();
        Ok(id)
    }

    /// Drop the draft and return to idle.
    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Form submission: add when idle, save when editing.
    pub fn submit(&mut self) -> Result<TaskId, StoreError> {
        match self.edit {
            EditState::Idle => self
                .add_task()
                .ok_or(StoreError::Core(CoreError::EmptyText)),
            EditState::Editing(_) => self.save_edit(),
        }
    }

    // --- View ---

    pub fn view_params(&self) -> &ViewParams {
        &self.params
    }

    /// Update whichever view parameters are given. Never persisted.
    pub fn set_view_parameters(
        &mut self,
        search: Option<String>,
        filter: Option<FilterMode>,
        sort: Option<SortMode>,
    ) {
        self.params.update(search, filter, sort);
    }

    pub fn derive_view(&self) -> View<'_> {
        derive_view(&self.tasks, &self.params, self.clock.today())
    }

    /// Resolve an exact id or a unique id prefix.
    pub fn resolve_id(&self, prefix: &str) -> Result<TaskId, StoreError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(StoreError::TaskNotFound(String::new()));
        }
        if let Some(task) = self.tasks.iter().find(|t| t.id.as_str() == prefix) {
            return Ok(task.id.clone());
        }
        let matches: Vec<&TaskId> = self
            .tasks
            .iter()
            .map(|t| &t.id)
            .filter(|id| id.starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [] => Err(StoreError::TaskNotFound(prefix.to_string())),
            [id] => Ok((*id).clone()),
            many => Err(StoreError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                count: many.len(),
            }),
        }
    }

    // --- Theme ---

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
        let result = self.persistence.save_theme_flag(dark);
        self.record_write("theme flag", result);
    }

    // --- Internals ---

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn reset_form(&mut self) {
        self.edit = EditState::Idle;
        self.draft = Draft::default();
    }

    fn persist(&mut self) {
        let result = self.persistence.save_tasks(&self.tasks);
        self.record_write("tasks", result);
    }

    fn record_write(&mut self, what: &str, result: Result<(), StoreError>) {
        self.write_error = match result {
            Ok(()) => None,
            Err(e) => {
                warn!(what, error = %e, "failed to persist");
                Some(e.to_string())
            }
        };
    }
}

/// Example tasks shown on first run.
fn seed_tasks(today: NaiveDate) -> Vec<Task> {
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    vec![
        Task {
            id: TaskId::generate(),
            text: "Finish the report".into(),
            priority: Priority::High,
            date: today,
            completed: false,
            category: "Work".into(),
        },
        Task {
            id: TaskId::generate(),
            text: "Buy groceries".into(),
            priority: Priority::Medium,
            date: tomorrow,
            completed: false,
            category: "Personal".into(),
        },
    ]
}
