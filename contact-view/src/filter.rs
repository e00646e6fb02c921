//! Client-side category filter over an already rendered feed.

use contact_core::FilterCategory;
use yew::prelude::*;

use crate::render::render_to_string;
use crate::timeline::RenderedTimeline;

/// One filter button in the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterButton {
    pub category: FilterCategory,
    pub active: bool,
}

impl FilterButton {
    fn view(self) -> Html {
        html! {
            <button
                type="button"
                class={classes!("filter-btn", self.active.then_some("is-active"))}
                data-filter={self.category.as_str()}
                aria-pressed={if self.active { "true" } else { "false" }}
            >
                { self.category.label() }
            </button>
        }
    }
}

/// Rendered filter affordances, one per category, `All` first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    buttons: Vec<FilterButton>,
}

impl Default for FilterBar {
    fn default() -> Self {
        Self::with_active(FilterCategory::default())
    }
}

impl FilterBar {
    pub fn with_active(active: FilterCategory) -> Self {
        Self {
            buttons: FilterCategory::ALL
                .into_iter()
                .map(|category| FilterButton {
                    category,
                    active: category == active,
                })
                .collect(),
        }
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    /// Categories currently marked active.
    pub fn active(&self) -> Vec<FilterCategory> {
        self.buttons
            .iter()
            .filter(|button| button.active)
            .map(|button| button.category)
            .collect()
    }

    fn mark_active(&mut self, category: FilterCategory) {
        for button in &mut self.buttons {
            button.active = button.category == category;
        }
    }

    pub fn view(&self) -> Html {
        html! {
            <div
                id="communication-filters"
                class="filter-bar"
                role="group"
                aria-label="Filter communications by type"
            >
                { for self.buttons.iter().map(|button| button.view()) }
            </div>
        }
    }

    pub async fn to_html(&self) -> String {
        render_to_string(self.view()).await
    }
}

/// Owns the selected category. Initial state is [`FilterCategory::All`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterController {
    selected: FilterCategory,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> FilterCategory {
        self.selected
    }

    /// Last click wins. Returns the previously selected category.
    pub fn select(
        &mut self,
        category: FilterCategory,
        bar: &mut FilterBar,
        timeline: &mut RenderedTimeline,
    ) -> FilterCategory {
        let previous = std::mem::replace(&mut self.selected, category);
        self.apply(bar, timeline);
        tracing::debug!(
            from = %previous,
            to = %category,
            visible = timeline.visible_count(),
            "filter category selected"
        );
        previous
    }

    /// Projects the current selection onto the bar and the rendered items.
    pub fn apply(&self, bar: &mut FilterBar, timeline: &mut RenderedTimeline) {
        bar.mark_active(self.selected);
        for item in timeline.items_mut() {
            let visible = self.selected.admits(item.tag());
            item.set_visible(visible);
        }
    }
}
