//! User-facing alert texts.

use crate::error::GatewayError;

pub const NETWORK_ERROR: &str = "A network error occurred.";
pub const SELECT_TWO_OR_MORE: &str = "Select two or more companies to compare.";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this company?";
pub const DELETED: &str = "The company has been deleted.";
pub const SAVED: &str = "The company information has been saved.";
const NO_SERVER_MESSAGE: &str = "unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureContext {
    Refresh,
    Submit,
    LoadForEdit,
    Delete,
    Compare,
}

/// Logical rejections surface the server's message, transport failures a
/// fixed fallback for the operation.
pub fn failure_alert(context: FailureContext, error: &GatewayError) -> String {
    if error.is_transport() {
        return match context {
            FailureContext::Refresh | FailureContext::Submit => NETWORK_ERROR,
            FailureContext::LoadForEdit => "Failed to load the company for editing.",
            FailureContext::Delete => "An error occurred while deleting the company.",
            FailureContext::Compare => "An error occurred while loading the comparison.",
        }
        .to_string();
    }

    let message = error.server_message().unwrap_or(NO_SERVER_MESSAGE);
    match context {
        FailureContext::Refresh => format!("Failed to load companies: {message}"),
        FailureContext::Submit | FailureContext::LoadForEdit => message.to_string(),
        FailureContext::Delete => format!("Failed to delete the company: {message}"),
        FailureContext::Compare => format!("Failed to load the comparison: {message}"),
    }
}
