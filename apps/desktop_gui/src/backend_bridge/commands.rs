//! Backend commands queued from UI to backend worker.

use client_core::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// Forward a user action to the controller.
    Dispatch(Action),
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Dispatch(action) => match action {
                Action::Navigate(_) => "navigate",
                Action::SetField { .. } => "set_field",
                Action::Submit => "submit",
                Action::Edit(_) => "edit",
                Action::RequestDelete(_) => "request_delete",
                Action::ConfirmDelete => "confirm_delete",
                Action::CancelDelete => "cancel_delete",
                Action::SetSelected { .. } => "set_selected",
                Action::Compare => "compare",
                Action::ShowDetails(_) => "show_details",
                Action::CloseModal(_) => "close_modal",
                Action::ModalClicked { .. } => "modal_clicked",
            },
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
