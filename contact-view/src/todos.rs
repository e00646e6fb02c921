//! Action item list with optimistic completion toggles.
//!
//! A toggle is a two-step transition: [`TodoListController::begin_toggle`]
//! flips the displayed state and marks the row in flight, and
//! [`TodoListController::resolve`] either keeps the flip or rolls it back.
//! A row accepts no new toggle until its pending one is resolved. Each
//! request carries the generation of the slot it opened; a response only
//! settles the slot it belongs to.

use std::collections::HashMap;

use contact_core::{TodoItem, ViewConfig};
use yew::prelude::*;

use crate::collaborator::TodoToggleService;
use crate::render::render_to_string;

pub const EMPTY_TODOS_TEXT: &str = "No action items yet.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    #[error("no action item with id `{0}`")]
    NotFound(String),
    #[error("action item `{0}` already has a toggle in flight")]
    InFlight(String),
}

/// Pending completion change. Consumed by [`TodoListController::resolve`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a toggle request must be resolved or the row stays locked"]
pub struct ToggleRequest {
    id: String,
    desired_state: bool,
    generation: u64,
}

impl ToggleRequest {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn desired_state(&self) -> bool {
        self.desired_state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Confirmed,
    RolledBack,
    /// The slot this request opened is gone: the list was reloaded meanwhile.
    Stale,
}

/// Display state of one action item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    item: TodoItem,
    pending: bool,
}

impl TodoRow {
    pub fn item(&self) -> &TodoItem {
        &self.item
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// Completion as currently shown, including an unconfirmed flip.
    pub fn is_complete(&self) -> bool {
        self.item.is_complete
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn view(&self, config: &ViewConfig) -> Html {
        let due = self.item.due_date.map(|due| {
            html! { <p class="todo-due">{ format!("Due: {}", config.format_date(due)) }</p> }
        });

        html! {
            <div
                class="todo-row"
                data-id={self.item.id.clone()}
                data-pending={if self.pending { "true" } else { "false" }}
            >
                <input
                    type="checkbox"
                    class="todo-checkbox"
                    data-todo-id={self.item.id.clone()}
                    checked={self.item.is_complete}
                />
                <div class="todo-details">
                    <p class={classes!("todo-text", self.item.is_complete.then_some("is-complete"))}>
                        { self.item.text.clone() }
                    </p>
                    { due.unwrap_or_default() }
                </div>
            </div>
        }
    }
}

/// Renders action items and relays completion toggles.
#[derive(Debug, Clone, Default)]
pub struct TodoListController {
    config: ViewConfig,
    rows: Vec<TodoRow>,
    in_flight: HashMap<String, u64>,
    next_generation: u64,
}

impl TodoListController {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replaces the rows with a fresh snapshot, in the order given.
    ///
    /// Requests still pending against the old rows resolve as
    /// [`ToggleOutcome::Stale`] and leave the new rows untouched, including
    /// rows toggled again after the reload.
    pub fn render(&mut self, todos: &[TodoItem]) {
        if !self.in_flight.is_empty() {
            tracing::debug!(
                pending = self.in_flight.len(),
                "reloading action items with toggles in flight"
            );
        }
        self.in_flight.clear();
        self.rows = todos
            .iter()
            .cloned()
            .map(|item| TodoRow {
                item,
                pending: false,
            })
            .collect();
    }

    pub fn rows(&self) -> &[TodoRow] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&TodoRow> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn is_in_flight(&self, id: &str) -> bool {
        self.in_flight.contains_key(id)
    }

    /// Placeholder text when there is nothing to show.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(EMPTY_TODOS_TEXT)
    }

    /// Optimistically flips the row and returns the request to send.
    pub fn begin_toggle(&mut self, id: &str) -> Result<ToggleRequest, TodoError> {
        if self.in_flight.contains_key(id) {
            return Err(TodoError::InFlight(id.to_string()));
        }
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.item.id == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;

        let desired_state = !row.item.is_complete;
        row.item.is_complete = desired_state;
        row.pending = true;

        self.next_generation += 1;
        let generation = self.next_generation;
        self.in_flight.insert(id.to_string(), generation);

        Ok(ToggleRequest {
            id: id.to_string(),
            desired_state,
            generation,
        })
    }

    /// Settles a request: keeps the flip when `confirmed`, reverts it otherwise.
    pub fn resolve(&mut self, request: ToggleRequest, confirmed: bool) -> ToggleOutcome {
        if self.in_flight.get(&request.id) != Some(&request.generation) {
            tracing::debug!(id = %request.id, "ignoring stale toggle response");
            return ToggleOutcome::Stale;
        }
        self.in_flight.remove(&request.id);

        let Some(row) = self.rows.iter_mut().find(|row| row.item.id == request.id) else {
            return ToggleOutcome::Stale;
        };
        row.pending = false;

        if confirmed {
            ToggleOutcome::Confirmed
        } else {
            row.item.is_complete = !request.desired_state;
            ToggleOutcome::RolledBack
        }
    }

    /// Full toggle round-trip against the host service.
    ///
    /// Dropping the returned future before it completes rolls the row back
    /// and frees it for the next toggle.
    pub async fn toggle<S>(&mut self, id: &str, service: &S) -> Result<ToggleOutcome, TodoError>
    where
        S: TodoToggleService + ?Sized,
    {
        let request = self.begin_toggle(id)?;
        let desired_state = request.desired_state();
        let pending = PendingToggle {
            list: self,
            request: Some(request),
        };

        let confirmed = match service.request_todo_toggle(id, desired_state).await {
            Ok(()) => {
                tracing::info!(%id, complete = desired_state, "action item toggle confirmed");
                true
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "action item toggle failed, reverting");
                false
            }
        };

        Ok(pending.settle(confirmed))
    }

    pub fn view(&self) -> Html {
        html! {
            <div id="todos-list" class="todos-list">
                {
                    match self.placeholder() {
                        Some(text) => html! { <div class="todos-empty">{ text }</div> },
                        None => html! { for self.rows.iter().map(|row| row.view(&self.config)) },
                    }
                }
            </div>
        }
    }

    pub async fn to_html(&self) -> String {
        render_to_string(self.view()).await
    }
}

/// Open toggle owned by an in-progress [`TodoListController::toggle`].
struct PendingToggle<'a> {
    list: &'a mut TodoListController,
    request: Option<ToggleRequest>,
}

impl PendingToggle<'_> {
    fn settle(mut self, confirmed: bool) -> ToggleOutcome {
        match self.request.take() {
            Some(request) => self.list.resolve(request, confirmed),
            None => ToggleOutcome::Stale,
        }
    }
}

impl Drop for PendingToggle<'_> {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            tracing::warn!(id = %request.id, "action item toggle abandoned, reverting");
            let _ = self.list.resolve(request, false);
        }
    }
}
