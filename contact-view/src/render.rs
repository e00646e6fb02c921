//! Server-side rendering of view fragments to HTML strings.

use yew::prelude::*;
use yew::LocalServerRenderer;

#[derive(Properties, PartialEq)]
struct MarkupProps {
    content: Html,
}

#[function_component(StaticMarkup)]
fn static_markup(props: &MarkupProps) -> Html {
    props.content.clone()
}

/// Serializes a fragment without hydration markers, for the host page to embed.
pub async fn render_to_string(content: Html) -> String {
    LocalServerRenderer::<StaticMarkup>::with_props(MarkupProps { content })
        .hydratable(false)
        .render()
        .await
}
