//! Contact detail view: communication feed, category filter and action items.
//!
//! Output is yew markup rendered server-side to HTML; the host page owns
//! mounting, event wiring and the dialogs.

pub mod collaborator;
pub mod filter;
pub mod render;
pub mod timeline;
pub mod todos;

pub use collaborator::{CollaboratorError, DialogHost, TodoToggleService};
pub use filter::{FilterBar, FilterButton, FilterController};
pub use render::render_to_string;
pub use timeline::{RenderedTimeline, TimelineItem, TimelineRenderer, EMPTY_TIMELINE_TEXT};
pub use todos::{
    TodoError, TodoListController, TodoRow, ToggleOutcome, ToggleRequest, EMPTY_TODOS_TEXT,
};

use contact_core::{ContactSnapshot, FilterCategory, ViewConfig};
use yew::prelude::*;

/// Everything the contact page shows below the contact card.
#[derive(Debug, Clone)]
pub struct ContactView {
    renderer: TimelineRenderer,
    timeline: RenderedTimeline,
    filter_bar: FilterBar,
    filter: FilterController,
    todos: TodoListController,
}

impl ContactView {
    pub fn load(snapshot: &ContactSnapshot, config: ViewConfig) -> Self {
        let mut view = Self {
            renderer: TimelineRenderer::new(config.clone()),
            timeline: RenderedTimeline::default(),
            filter_bar: FilterBar::default(),
            filter: FilterController::new(),
            todos: TodoListController::new(config),
        };
        view.reload(snapshot);
        view
    }

    /// Re-renders both lists from a new snapshot; the selected filter survives.
    pub fn reload(&mut self, snapshot: &ContactSnapshot) {
        self.renderer
            .render_into(snapshot.timeline(), &mut self.timeline);
        self.filter.apply(&mut self.filter_bar, &mut self.timeline);
        self.todos.render(snapshot.todos());
    }

    pub fn select_filter_category(&mut self, category: FilterCategory) {
        self.filter
            .select(category, &mut self.filter_bar, &mut self.timeline);
    }

    pub fn selected_filter(&self) -> FilterCategory {
        self.filter.selected()
    }

    pub async fn toggle_todo_completion<S>(
        &mut self,
        id: &str,
        service: &S,
    ) -> Result<ToggleOutcome, TodoError>
    where
        S: TodoToggleService + ?Sized,
    {
        self.todos.toggle(id, service).await
    }

    pub fn begin_todo_toggle(&mut self, id: &str) -> Result<ToggleRequest, TodoError> {
        self.todos.begin_toggle(id)
    }

    pub fn resolve_todo_toggle(&mut self, request: ToggleRequest, confirmed: bool) -> ToggleOutcome {
        self.todos.resolve(request, confirmed)
    }

    pub fn open_log_communication_dialog(&self, host: &dyn DialogHost) {
        tracing::debug!("opening log communication dialog");
        host.open_log_communication_dialog();
    }

    pub fn open_add_todo_dialog(&self, host: &dyn DialogHost) {
        tracing::debug!("opening add todo dialog");
        host.open_add_todo_dialog();
    }

    pub fn timeline(&self) -> &RenderedTimeline {
        &self.timeline
    }

    pub fn filter_bar(&self) -> &FilterBar {
        &self.filter_bar
    }

    pub fn todos(&self) -> &TodoListController {
        &self.todos
    }

    pub fn view(&self) -> Html {
        html! {
            <div class="contact-activity">
                <section class="communication-history">
                    { render_section_header("Communication History", "log-communication", "Log Communication") }
                    { self.filter_bar.view() }
                    { self.timeline.view() }
                </section>
                <section class="action-items">
                    { render_section_header("Action Items", "add-todo", "Add Todo") }
                    { self.todos.view() }
                </section>
            </div>
        }
    }

    pub async fn to_html(&self) -> String {
        render_to_string(self.view()).await
    }
}

fn render_section_header(title: &'static str, action: &'static str, action_label: &'static str) -> Html {
    html! {
        <div class="section-header">
            <h3>{ title }</h3>
            <button type="button" class="section-action" data-action={action}>
                { action_label }
            </button>
        </div>
    }
}
