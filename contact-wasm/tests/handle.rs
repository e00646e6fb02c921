use contact_core::{ContactSnapshot, FilterCategory, ViewConfig};
use contact_json::load_contact_str;
use contact_wasm::{ContactViewHandle, JsToggleRequest};
use pretty_assertions::assert_eq;

fn snapshot() -> ContactSnapshot {
    load_contact_str(
        r#"{
            "communicationLogs": [
                { "id": 1, "type": "email", "timestamp": "2024-03-14T09:30:00Z",
                  "content": { "subject": "Welcome", "body": "Hi there" } },
                { "id": 2, "type": "call", "timestamp": "2024-03-15T16:05:00Z",
                  "content": { "duration": 15, "notes": "Discussed renewal" } }
            ],
            "todos": [
                { "id": 10, "text": "Send renewal quote", "is_complete": 0 },
                { "id": 11, "text": "Book follow-up call", "is_complete": 1 }
            ]
        }"#,
    )
    .unwrap()
}

fn handle() -> ContactViewHandle {
    ContactViewHandle::from_snapshot(&snapshot(), ViewConfig::default())
}

#[test]
fn begin_stages_request_and_flips_row() {
    let mut handle = handle();

    let request = handle.begin_toggle_request("10").unwrap();

    assert_eq!(
        request,
        JsToggleRequest {
            id: "10".into(),
            desired_state: true,
        }
    );
    assert!(handle.has_pending("10"));
    let row = handle.view().todos().row("10").unwrap();
    assert!(row.is_complete());
    assert!(row.is_pending());
}

#[test]
fn resolve_reports_outcome_names() {
    let mut handle = handle();

    handle.begin_toggle_request("10").unwrap();
    assert_eq!(handle.resolve_toggle("10", true), Ok("confirmed"));
    assert!(handle.view().todos().row("10").unwrap().is_complete());

    handle.begin_toggle_request("11").unwrap();
    assert_eq!(handle.resolve_toggle("11", false), Ok("rolled_back"));
    assert!(handle.view().todos().row("11").unwrap().is_complete());
    assert!(!handle.has_pending("11"));
}

#[test]
fn resolve_without_pending_toggle_is_an_error() {
    let mut handle = handle();

    let err = handle.resolve_toggle("10", true).unwrap_err();

    assert!(err.contains("No pending toggle"));
    assert!(!handle.view().todos().row("10").unwrap().is_complete());
}

#[test]
fn second_begin_is_refused_while_pending() {
    let mut handle = handle();
    handle.begin_toggle_request("10").unwrap();

    assert!(handle.begin_toggle_request("10").is_err());
    assert!(handle.begin_toggle_request("404").is_err());
    assert!(!handle.has_pending("404"));
}

#[test]
fn cancelled_toggle_reverts_and_frees_the_row() {
    let mut handle = handle();
    handle.begin_toggle_request("10").unwrap();

    handle.cancel_toggle("10");

    assert!(!handle.has_pending("10"));
    let row = handle.view().todos().row("10").unwrap();
    assert!(!row.is_complete());
    assert!(!row.is_pending());
    assert!(!handle.view().todos().is_in_flight("10"));

    let again = handle.begin_toggle_request("10").unwrap();
    assert!(again.desired_state);
}

#[test]
fn cancel_without_pending_toggle_changes_nothing() {
    let mut handle = handle();

    handle.cancel_toggle("11");

    assert!(handle.view().todos().row("11").unwrap().is_complete());
}

#[test]
fn category_names_are_parsed() {
    let mut handle = handle();

    handle.select_category("call").unwrap();
    assert_eq!(handle.view().selected_filter(), FilterCategory::Call);
    assert_eq!(handle.view().timeline().visible_count(), 1);

    let err = handle.select_category("fax").unwrap_err();
    assert!(err.starts_with("Contact view error:"));
    assert_eq!(handle.view().selected_filter(), FilterCategory::Call);
}

#[tokio::test]
async fn rendered_markup_follows_handle_state() {
    let mut handle = handle();
    handle.select_category("email").unwrap();
    handle.begin_toggle_request("10").unwrap();

    let html = handle.view().to_html().await;

    assert!(html.contains("data-filter=\"email\""));
    assert_eq!(html.matches(" hidden").count(), 1);
    assert!(html.contains("data-pending=\"true\""));
}
