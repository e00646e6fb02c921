//! Framework-neutral WASM <-> JavaScript bridge for the contact view.

use std::collections::HashMap;

use contact_core::{ContactError, ContactSnapshot, FilterCategory, ViewConfig};
use contact_view::{ContactView, ToggleOutcome, ToggleRequest};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use wasm_bindgen_futures::js_sys::Promise;

#[derive(Deserialize)]
struct JsViewConfig {
    #[serde(default)]
    excerpt_chars: Option<usize>,
    #[serde(default)]
    date_format: Option<String>,
}

impl From<JsViewConfig> for ViewConfig {
    fn from(cfg: JsViewConfig) -> Self {
        let mut base = ViewConfig::default();
        if let Some(chars) = cfg.excerpt_chars {
            base.excerpt_chars = chars;
        }
        if let Some(format) = cfg.date_format {
            base.date_format = format;
        }
        base
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsToggleRequest {
    pub id: String,
    pub desired_state: bool,
}

fn read_config(config: Option<JsValue>) -> Result<ViewConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsViewConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            Ok(ViewConfig::from(cfg))
        }
        _ => Ok(ViewConfig::default()),
    }
}

fn read_view(payload: JsValue, config: Option<JsValue>) -> Result<ContactView, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let payload_value = from_value::<serde_json::Value>(payload)
        .map_err(|err| JsValue::from_str(&format!("Could not read contact payload: {err}")))?;
    let config = read_config(config)?;

    let snapshot = contact_json::load_contact_value(&payload_value)
        .map_err(|err| JsValue::from_str(&format_contact_error(err)))?;

    Ok(ContactView::load(&snapshot, config))
}

/// One-shot render of the contact activity sections to an HTML string.
#[wasm_bindgen]
pub async fn render_contact_view(
    payload: JsValue,
    config: Option<JsValue>,
) -> Result<String, JsValue> {
    let view = read_view(payload, config)?;
    Ok(view.to_html().await)
}

/// Stateful view for hosts that keep the page alive and wire events back in.
#[wasm_bindgen]
pub struct ContactViewHandle {
    view: ContactView,
    pending: HashMap<String, ToggleRequest>,
}

#[wasm_bindgen]
impl ContactViewHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(payload: JsValue, config: Option<JsValue>) -> Result<ContactViewHandle, JsValue> {
        Ok(Self::from_view(read_view(payload, config)?))
    }

    /// Resolves to the current markup.
    pub fn html(&self) -> Promise {
        let view = self.view.clone();
        future_to_promise(async move { Ok(JsValue::from_str(&view.to_html().await)) })
    }

    #[wasm_bindgen(js_name = selectFilterCategory)]
    pub fn select_filter_category(&mut self, category: &str) -> Result<(), JsValue> {
        self.select_category(category)
            .map_err(|err| JsValue::from_str(&err))
    }

    /// Flips the row and returns `{ id, desiredState }` for the host to send.
    #[wasm_bindgen(js_name = beginTodoToggle)]
    pub fn begin_todo_toggle(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let request = self
            .begin_toggle_request(id)
            .map_err(|err| JsValue::from_str(&err))?;
        to_value(&request).map_err(|err| {
            self.cancel_toggle(id);
            JsValue::from_str(&format!("Could not serialize request: {err}"))
        })
    }

    /// Settles a pending toggle; returns `"confirmed"`, `"rolled_back"` or `"stale"`.
    #[wasm_bindgen(js_name = resolveTodoToggle)]
    pub fn resolve_todo_toggle(&mut self, id: &str, success: bool) -> Result<String, JsValue> {
        self.resolve_toggle(id, success)
            .map(str::to_string)
            .map_err(|err| JsValue::from_str(&err))
    }
}

impl ContactViewHandle {
    pub fn from_snapshot(snapshot: &ContactSnapshot, config: ViewConfig) -> Self {
        Self::from_view(ContactView::load(snapshot, config))
    }

    fn from_view(view: ContactView) -> Self {
        Self {
            view,
            pending: HashMap::new(),
        }
    }

    pub fn view(&self) -> &ContactView {
        &self.view
    }

    pub fn has_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn select_category(&mut self, category: &str) -> Result<(), String> {
        let category: FilterCategory = category.parse().map_err(format_contact_error)?;
        self.view.select_filter_category(category);
        Ok(())
    }

    pub fn begin_toggle_request(&mut self, id: &str) -> Result<JsToggleRequest, String> {
        let request = self
            .view
            .begin_todo_toggle(id)
            .map_err(|err| err.to_string())?;
        let staged = JsToggleRequest {
            id: request.id().to_string(),
            desired_state: request.desired_state(),
        };
        self.pending.insert(id.to_string(), request);
        Ok(staged)
    }

    /// Drops a staged toggle the host never sent and puts the row back.
    pub fn cancel_toggle(&mut self, id: &str) {
        if let Some(request) = self.pending.remove(id) {
            self.view.resolve_todo_toggle(request, false);
        }
    }

    pub fn resolve_toggle(&mut self, id: &str, success: bool) -> Result<&'static str, String> {
        let request = self
            .pending
            .remove(id)
            .ok_or_else(|| format!("No pending toggle for `{id}`"))?;
        Ok(match self.view.resolve_todo_toggle(request, success) {
            ToggleOutcome::Confirmed => "confirmed",
            ToggleOutcome::RolledBack => "rolled_back",
            ToggleOutcome::Stale => "stale",
        })
    }
}

fn format_contact_error(err: ContactError) -> String {
    format!("Contact view error: {err}")
}
