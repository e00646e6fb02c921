//! Seams to the host application.

use async_trait::async_trait;

/// Failure reported by the host when persisting a todo toggle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Persists todo completion changes. Retries, if any, live behind this trait.
#[async_trait(?Send)]
pub trait TodoToggleService {
    async fn request_todo_toggle(
        &self,
        id: &str,
        desired_state: bool,
    ) -> Result<(), CollaboratorError>;
}

/// Opens the host's modal dialogs. No data crosses this boundary.
pub trait DialogHost {
    fn open_log_communication_dialog(&self);
    fn open_add_todo_dialog(&self);
}
