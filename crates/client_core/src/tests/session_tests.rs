use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::{
    domain::{CompanyId, CompanyRecord},
    protocol::CompanyPayload,
    schema::comparison_fields,
};

use super::*;
use crate::{
    controller::{form::FormMode, router::View},
    error::GatewayError,
    render::{CardAction, CompareView, ListView},
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List,
    Get(CompanyId),
    Create(CompanyPayload),
    Update(CompanyId, CompanyPayload),
    Delete(CompanyId),
    Compare(Vec<CompanyId>),
}

/// In-memory backend that records every call it receives.
#[derive(Default)]
struct FakeApi {
    records: Mutex<Vec<CompanyRecord>>,
    calls: Mutex<Vec<Call>>,
    reject_with: Option<String>,
}

impl FakeApi {
    fn with_records(records: Vec<CompanyRecord>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            ..Self::default()
        })
    }

    fn rejecting(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reject_with: Some(message.to_string()),
            ..Self::default()
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record_call(&self, call: Call) -> Result<(), GatewayError> {
        self.calls.lock().expect("calls lock").push(call);
        match &self.reject_with {
            Some(message) => Err(GatewayError::rejected(Some(message.clone()))),
            None => Ok(()),
        }
    }

    fn find(&self, id: &CompanyId) -> Option<CompanyRecord> {
        self.records
            .lock()
            .expect("records lock")
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }
}

#[async_trait]
impl CompanyApi for FakeApi {
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, GatewayError> {
        self.record_call(Call::List)?;
        Ok(self.records.lock().expect("records lock").clone())
    }

    async fn get_company(&self, id: &CompanyId) -> Result<CompanyRecord, GatewayError> {
        self.record_call(Call::Get(id.clone()))?;
        self.find(id)
            .ok_or_else(|| GatewayError::rejected(Some("company not found".into())))
    }

    async fn create_company(
        &self,
        payload: &CompanyPayload,
    ) -> Result<Option<String>, GatewayError> {
        self.record_call(Call::Create(payload.clone()))?;
        let mut records = self.records.lock().expect("records lock");
        let next_id = CompanyId::new((records.len() + 1).to_string());
        let mut record = CompanyRecord::new(next_id);
        for (key, value) in payload {
            record = record.with(key, value.clone());
        }
        records.push(record);
        Ok(Some("saved".into()))
    }

    async fn update_company(
        &self,
        id: &CompanyId,
        payload: &CompanyPayload,
    ) -> Result<Option<String>, GatewayError> {
        self.record_call(Call::Update(id.clone(), payload.clone()))?;
        Ok(Some("updated".into()))
    }

    async fn delete_company(&self, id: &CompanyId) -> Result<Option<String>, GatewayError> {
        self.record_call(Call::Delete(id.clone()))?;
        self.records
            .lock()
            .expect("records lock")
            .retain(|r| &r.id != id);
        Ok(Some("deleted".into()))
    }

    async fn compare_companies(
        &self,
        ids: &[CompanyId],
    ) -> Result<Vec<CompanyRecord>, GatewayError> {
        self.record_call(Call::Compare(ids.to_vec()))?;
        // Unknown ids are silently dropped, like the real backend.
        Ok(ids.iter().filter_map(|id| self.find(id)).collect())
    }
}

fn company(raw_id: &str, name: &str) -> CompanyRecord {
    CompanyRecord::new(raw_id).with("companyName", name)
}

fn session(api: Arc<FakeApi>) -> Session<Arc<FakeApi>> {
    Session::new(api, DateStyle::default())
}

#[tokio::test]
async fn card_count_matches_returned_records() {
    let api = FakeApi::with_records(vec![company("1", "A"), company("2", "B"), company("3", "C")]);
    let mut session = session(api.clone());

    session.dispatch(Action::Navigate(View::List)).await;

    assert_eq!(session.view().list.cards().len(), 3);
    assert_eq!(api.calls(), vec![Call::List]);
}

#[tokio::test]
async fn empty_backend_renders_empty_message() {
    let mut session = session(FakeApi::with_records(Vec::new()));
    session.dispatch(Action::Navigate(View::List)).await;
    assert!(matches!(session.view().list, ListView::Empty { .. }));
}

#[tokio::test]
async fn create_submit_posts_once_then_lists() {
    let api = FakeApi::with_records(Vec::new());
    let mut session = session(api.clone());

    session.dispatch(Action::Navigate(View::Register)).await;
    for (key, value) in [("companyName", "Acme"), ("employees", "50")] {
        session
            .dispatch(Action::SetField {
                key: key.into(),
                value: value.into(),
            })
            .await;
    }
    session.dispatch(Action::Submit).await;

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    let Call::Create(payload) = &calls[0] else {
        panic!("expected create first, got {calls:?}");
    };
    assert_eq!(payload.get("companyName").map(String::as_str), Some("Acme"));
    assert_eq!(payload.get("employees").map(String::as_str), Some("50"));
    assert_eq!(calls[1], Call::List);

    let view = session.view();
    assert_eq!(view.active_view, View::List);
    assert_eq!(view.alert.as_deref(), Some("saved"));
    assert_eq!(view.form.mode, FormMode::Create);
    assert_eq!(view.list.cards().len(), 1);
}

#[tokio::test]
async fn edit_then_submit_issues_put_for_that_id() {
    let seven = company("7", "Acme").with("employees", 50);
    let api = FakeApi::with_records(vec![seven]);
    let mut session = session(api.clone());
    session.dispatch(Action::Navigate(View::List)).await;

    let card = session.view().list.cards()[0].clone();
    session.dispatch(card.action(CardAction::Edit)).await;
    assert_eq!(session.view().form.submit_label, "Update");
    assert_eq!(session.controller().form().value("employees"), Some("50"));

    session.dispatch(Action::Submit).await;

    let calls = api.calls();
    assert_eq!(calls[1], Call::Get(CompanyId::new("7")));
    assert!(matches!(&calls[2], Call::Update(id, _) if id.as_str() == "7"));
    assert!(!calls.iter().any(|c| matches!(c, Call::Create(_))));
}

#[tokio::test]
async fn unconfirmed_delete_sends_nothing() {
    let api = FakeApi::with_records(vec![company("1", "A")]);
    let mut session = session(api.clone());
    session.dispatch(Action::Navigate(View::List)).await;

    session
        .dispatch(Action::RequestDelete(CompanyId::new("1")))
        .await;
    session.dispatch(Action::CancelDelete).await;

    assert_eq!(api.calls(), vec![Call::List]);
    assert_eq!(session.view().list.cards().len(), 1);
}

#[tokio::test]
async fn confirmed_delete_refetches_list() {
    let api = FakeApi::with_records(vec![company("1", "A"), company("2", "B")]);
    let mut session = session(api.clone());
    session.dispatch(Action::Navigate(View::List)).await;

    session
        .dispatch(Action::RequestDelete(CompanyId::new("1")))
        .await;
    session.dispatch(Action::ConfirmDelete).await;

    assert_eq!(
        api.calls(),
        vec![Call::List, Call::Delete(CompanyId::new("1")), Call::List]
    );
    let cards = session.view().list.cards().to_vec();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "B");
}

#[tokio::test]
async fn single_selection_compare_makes_no_request() {
    let api = FakeApi::with_records(vec![company("1", "A"), company("2", "B")]);
    let mut session = session(api.clone());
    session.dispatch(Action::Navigate(View::List)).await;

    let card = session.view().list.cards()[0].clone();
    session.dispatch(card.action(CardAction::ToggleSelect)).await;
    session.dispatch(Action::Compare).await;

    assert_eq!(api.calls(), vec![Call::List]);
    assert_eq!(
        session.view().alert.as_deref(),
        Some("Select two or more companies to compare.")
    );
}

#[tokio::test]
async fn compare_renders_returned_columns_and_skips_missing_ids() {
    let api = FakeApi::with_records(vec![company("1", "A"), company("2", "B"), company("3", "C")]);
    let mut session = session(api.clone());
    session.dispatch(Action::Navigate(View::List)).await;
    for card in session.view().list.cards().to_vec() {
        session.dispatch(card.action(CardAction::ToggleSelect)).await;
    }
    // Deleted elsewhere after the list was rendered; the backend omits it.
    api.records
        .lock()
        .expect("records lock")
        .retain(|r| r.id.as_str() != "2");

    session.dispatch(Action::Compare).await;

    assert_eq!(
        api.calls().last(),
        Some(&Call::Compare(vec![
            CompanyId::new("1"),
            CompanyId::new("2"),
            CompanyId::new("3")
        ]))
    );
    let view = session.view();
    assert_eq!(view.active_view, View::Compare);
    let CompareView::Table(table) = &view.compare else {
        panic!("expected table, got {:?}", view.compare);
    };
    assert_eq!(table.header, vec!["Field", "A", "C"]);
    assert_eq!(table.rows.len(), comparison_fields().count());
}

#[tokio::test]
async fn rejected_list_reports_server_message() {
    let mut session = session(FakeApi::rejecting("database unavailable"));
    session.dispatch(Action::Navigate(View::List)).await;

    let view = session.view();
    assert_eq!(view.list, ListView::NotLoaded);
    assert_eq!(
        view.alert.as_deref(),
        Some("Failed to load companies: database unavailable")
    );
}

#[tokio::test]
async fn rejected_create_is_reported_as_failure() {
    let mut session = session(FakeApi::rejecting("company name already registered"));
    session.dispatch(Action::Navigate(View::Register)).await;
    session.dispatch(Action::Submit).await;

    assert_eq!(session.failure(), Some("company name already registered"));
    assert_eq!(session.view().active_view, View::Register);
}

#[tokio::test]
async fn successful_dispatch_reports_no_failure() {
    let api = FakeApi::with_records(vec![company("1", "A")]);
    let mut session = session(api);
    session.dispatch(Action::Navigate(View::List)).await;
    assert_eq!(session.failure(), None);
}
