#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid form data: {0}")]
    InvalidForm(#[from] serde_json::Error),
}
