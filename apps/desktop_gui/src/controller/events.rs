//! Events flowing from the backend worker to the UI thread.

use client_core::ViewModel;

#[derive(Debug)]
pub enum UiEvent {
    /// Latest controller state; the UI repaints from it wholesale.
    Render(Box<ViewModel>),
    Info(String),
    /// The worker could not start and no further renders will arrive.
    Fatal(String),
}
