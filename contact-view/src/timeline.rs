//! Communication feed rendering.

use contact_core::{CommunicationRecord, DisplayEntry, EntryKind, Normalize, RecordKind, ViewConfig};
use yew::prelude::*;

use crate::render::render_to_string;

pub const EMPTY_TIMELINE_TEXT: &str = "No communication history yet. Log your first interaction.";

/// One rendered feed entry. `visible` is the only part filtering touches.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItem {
    entry: DisplayEntry,
    visible: bool,
}

impl TimelineItem {
    pub fn entry(&self) -> &DisplayEntry {
        &self.entry
    }

    /// Filter tag, matching the `data-type` attribute.
    pub fn tag(&self) -> &EntryKind {
        &self.entry.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn view(&self) -> Html {
        let entry = &self.entry;
        html! {
            <div
                class="communication-log"
                data-type={entry.kind.as_tag().to_string()}
                data-id={entry.id.clone()}
                hidden={!self.visible}
            >
                { render_icon(entry.icon_kind) }
                <div class="communication-body">
                    <div class="communication-heading">
                        <h4 class="communication-title">{ entry.title.clone() }</h4>
                        <span class="communication-date">{ entry.occurred_at_label.clone() }</span>
                    </div>
                    { entry.primary_line.as_ref().map(render_primary_line).unwrap_or_default() }
                    { entry.secondary_line.as_ref().map(render_secondary_line).unwrap_or_default() }
                </div>
            </div>
        }
    }
}

fn render_icon(kind: RecordKind) -> Html {
    let tone = match kind {
        RecordKind::Email => "icon-blue",
        RecordKind::Text => "icon-green",
        RecordKind::Call => "icon-purple",
        RecordKind::Note => "icon-amber",
    };
    html! {
        <span
            class={classes!("communication-icon", tone)}
            data-icon={kind.as_str()}
            aria-hidden="true"
        ></span>
    }
}

fn render_primary_line(line: &String) -> Html {
    html! { <p class="communication-primary">{ line.clone() }</p> }
}

fn render_secondary_line(line: &String) -> Html {
    html! { <p class="communication-secondary">{ line.clone() }</p> }
}

/// The rendered feed: the handle the filter operates on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedTimeline {
    items: Vec<TimelineItem>,
}

impl RenderedTimeline {
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [TimelineItem] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn visible(&self) -> impl Iterator<Item = &TimelineItem> {
        self.items.iter().filter(|item| item.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// Placeholder text when there is nothing to show.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.items.is_empty().then_some(EMPTY_TIMELINE_TEXT)
    }

    pub fn view(&self) -> Html {
        html! {
            <div id="communication-logs" class="communication-logs">
                {
                    match self.placeholder() {
                        Some(text) => html! { <div class="timeline-empty">{ text }</div> },
                        None => html! { for self.items.iter().map(TimelineItem::view) },
                    }
                }
            </div>
        }
    }

    pub async fn to_html(&self) -> String {
        render_to_string(self.view()).await
    }
}

/// Stateless renderer from records to a [`RenderedTimeline`].
#[derive(Debug, Clone, Default)]
pub struct TimelineRenderer {
    config: ViewConfig,
}

impl TimelineRenderer {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Renders `records` in the order given, replacing whatever `target` held.
    pub fn render_into(&self, records: &[CommunicationRecord], target: &mut RenderedTimeline) {
        target.items.clear();
        target.items.extend(records.iter().map(|record| TimelineItem {
            entry: record.normalize(&self.config),
            visible: true,
        }));
        tracing::debug!(items = target.items.len(), "rendered communication timeline");
    }

    pub fn render(&self, records: &[CommunicationRecord]) -> RenderedTimeline {
        let mut timeline = RenderedTimeline::default();
        self.render_into(records, &mut timeline);
        timeline
    }
}
