//! Controller layer: user actions and call completions in, state transitions
//! and requested API calls out.

pub mod compare;
pub mod form;
pub mod list;
pub mod messages;
pub mod modal;
pub mod router;

use shared::{
    domain::CompanyId,
    schema::{FieldKind, COMPANY_FIELDS},
};
use tracing::{info, warn};

use crate::{
    effects::{ApiCall, Completion, Effect},
    error::GatewayError,
    format::DateStyle,
    render::{render_details, CompareView, DetailsView, ListView},
};

use compare::ComparePresenter;
use form::{FormController, FormMode};
use list::ListPresenter;
use messages::{failure_alert, FailureContext};
use modal::{ClickTarget, ModalKind, ModalPresenter};
use router::{EntryEffect, View, ViewRouter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(View),
    SetField { key: String, value: String },
    Submit,
    Edit(CompanyId),
    RequestDelete(CompanyId),
    ConfirmDelete,
    CancelDelete,
    SetSelected { id: CompanyId, selected: bool },
    Compare,
    ShowDetails(CompanyId),
    CloseModal(ModalKind),
    ModalClicked { kind: ModalKind, target: ClickTarget },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub mode: FormMode,
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FormFieldView>,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub id: CompanyId,
    pub message: &'static str,
}

/// Snapshot of everything a host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub active_view: View,
    pub list: ListView,
    pub form: FormView,
    pub compare: CompareView,
    pub alert: Option<String>,
    pub details: Option<DetailsView>,
    pub confirm: Option<ConfirmPrompt>,
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    router: ViewRouter,
    form: FormController,
    list: ListPresenter,
    compare: ComparePresenter,
    modals: ModalPresenter,
    pending_delete: Option<CompanyId>,
    /// Alert text of a failure raised since the last user action.
    failure: Option<String>,
    dates: DateStyle,
}

impl Controller {
    pub fn new(dates: DateStyle) -> Self {
        Self {
            dates,
            ..Self::default()
        }
    }

    pub fn active_view(&self) -> View {
        self.router.active()
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn list(&self) -> &ListPresenter {
        &self.list
    }

    pub fn modals(&self) -> &ModalPresenter {
        &self.modals
    }

    pub fn pending_delete(&self) -> Option<&CompanyId> {
        self.pending_delete.as_ref()
    }

    /// Set when the latest action, or a call it caused, failed. Cleared by
    /// the next action.
    pub fn last_failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        self.failure = None;
        match action {
            Action::Navigate(view) => self.navigate(view),
            Action::SetField { key, value } => {
                self.form.set(&key, value);
                Vec::new()
            }
            Action::Submit => vec![Effect::Call(self.form.submission())],
            Action::Edit(id) => vec![Effect::Call(ApiCall::GetCompany(id))],
            Action::RequestDelete(id) => {
                self.pending_delete = Some(id);
                Vec::new()
            }
            Action::ConfirmDelete => self
                .pending_delete
                .take()
                .map(|id| Effect::Call(ApiCall::DeleteCompany(id)))
                .into_iter()
                .collect(),
            Action::CancelDelete => {
                self.pending_delete = None;
                Vec::new()
            }
            Action::SetSelected { id, selected } => {
                if !self.list.set_selected(&id, selected) {
                    warn!(%id, "selection change for a company that is not rendered");
                }
                Vec::new()
            }
            Action::Compare => self.compare_selected(),
            Action::ShowDetails(id) => {
                match self.list.record(&id) {
                    Some(record) => self.modals.show_details(render_details(record, &self.dates)),
                    None => warn!(%id, "details requested for a company that is not rendered"),
                }
                Vec::new()
            }
            Action::CloseModal(kind) => {
                self.modals.close(kind);
                Vec::new()
            }
            Action::ModalClicked { kind, target } => {
                self.modals.click(kind, target);
                Vec::new()
            }
        }
    }

    pub fn complete(&mut self, completion: Completion) -> Vec<Effect> {
        match completion {
            Completion::Listed(Ok(records)) => {
                self.list.finish_refresh(records);
                Vec::new()
            }
            Completion::Listed(Err(err)) => {
                self.list.abort_refresh();
                self.fail(FailureContext::Refresh, &err);
                Vec::new()
            }
            Completion::Loaded(Ok(record)) => {
                self.form.load(&record);
                // Entering through `activate` would reset the form just filled.
                self.router.show(View::Register);
                Vec::new()
            }
            Completion::Loaded(Err(err)) => {
                self.fail(FailureContext::LoadForEdit, &err);
                Vec::new()
            }
            Completion::Saved(Ok(message)) => {
                info!("company saved");
                self.modals
                    .show_alert(message.unwrap_or_else(|| messages::SAVED.to_string()));
                self.form.reset();
                self.navigate(View::List)
            }
            Completion::Saved(Err(err)) => {
                self.fail(FailureContext::Submit, &err);
                Vec::new()
            }
            Completion::Deleted { id, result: Ok(_) } => {
                info!(%id, "company deleted");
                self.modals.show_alert(messages::DELETED);
                self.refresh()
            }
            Completion::Deleted { id, result: Err(err) } => {
                warn!(%id, "company deletion failed");
                self.fail(FailureContext::Delete, &err);
                Vec::new()
            }
            Completion::Compared(Ok(records)) => {
                self.router.show(View::Compare);
                self.compare.show(records);
                Vec::new()
            }
            Completion::Compared(Err(err)) => {
                self.fail(FailureContext::Compare, &err);
                Vec::new()
            }
        }
    }

    pub fn view(&self) -> ViewModel {
        ViewModel {
            active_view: self.router.active(),
            list: self.list.view(&self.dates),
            form: self.form_view(),
            compare: self.compare.view(&self.dates),
            alert: self.modals.alert().map(str::to_string),
            details: self.modals.details().cloned(),
            confirm: self.pending_delete.as_ref().map(|id| ConfirmPrompt {
                id: id.clone(),
                message: messages::CONFIRM_DELETE,
            }),
        }
    }

    fn navigate(&mut self, view: View) -> Vec<Effect> {
        let leaving_edit = self.router.is_active(View::Register)
            && view != View::Register
            && matches!(self.form.mode(), FormMode::Edit(_));
        if leaving_edit {
            // Navigating away abandons the edit; unsaved input is discarded.
            self.form.reset();
        }
        match self.router.activate(view) {
            Some(EntryEffect::RefreshList) => self.refresh(),
            Some(EntryEffect::ResetForm) => {
                self.form.reset();
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn refresh(&mut self) -> Vec<Effect> {
        self.list.begin_refresh();
        vec![Effect::Call(ApiCall::ListCompanies)]
    }

    fn compare_selected(&mut self) -> Vec<Effect> {
        match self.compare.request(self.list.selected_ids()) {
            Some(ids) => vec![Effect::Call(ApiCall::CompareCompanies(ids))],
            None => {
                self.modals.show_alert(messages::SELECT_TWO_OR_MORE);
                self.failure = Some(messages::SELECT_TWO_OR_MORE.to_string());
                Vec::new()
            }
        }
    }

    fn fail(&mut self, context: FailureContext, err: &GatewayError) {
        warn!(?context, "company operation failed: {err}");
        let alert = failure_alert(context, err);
        self.modals.show_alert(alert.clone());
        self.failure = Some(alert);
    }

    fn form_view(&self) -> FormView {
        FormView {
            mode: self.form.mode().clone(),
            title: self.form.title(),
            submit_label: self.form.submit_label(),
            fields: COMPANY_FIELDS
                .iter()
                .map(|def| FormFieldView {
                    key: def.key,
                    label: def.label,
                    kind: def.kind,
                    required: def.required,
                    value: self.form.value(def.key).unwrap_or_default().to_string(),
                })
                .collect(),
            revision: self.form.revision(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
