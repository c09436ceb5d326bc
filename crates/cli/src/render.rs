//! Status lines and result panels shown after a publish attempt.

use obitpub_client::{PublishError, PublishResponse};

pub const MSG_PUBLISHED: &str = "Obituary published successfully!";

/// Success panel: id, redirector URL and warnings when present.
pub fn success_panel(resp: &PublishResponse) -> String {
    let mut lines = vec![
        MSG_PUBLISHED.to_string(),
        String::new(),
        "Publication Successful".to_string(),
    ];
    match resp.obituary_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => lines.push(format!("Obituary ID: {id}")),
        None => lines.push("Obituary ID: (not returned)".to_string()),
    }
    if let Some(url) = resp.redirector_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(format!("Redirector URL: {url}"));
    }
    if !resp.warnings.is_empty() {
        let warnings = serde_json::to_string(&resp.warnings).unwrap_or_default();
        lines.push(format!("Warnings: {warnings}"));
    }
    lines.join("\n")
}

/// One-line status for a failed publish. Server errors are prefixed with
/// their status unless the message already carries one.
pub fn failure_status(err: &PublishError) -> String {
    let message = err.to_string();
    match err.status_code() {
        Some(status) if !message.starts_with("HTTP ") => format!("HTTP {status}: {message}"),
        _ => message,
    }
}

/// Failure panel shown under the status line.
pub fn failure_panel(err: &PublishError) -> String {
    format!("Publication Failed\nError: {}", failure_status(err))
}
