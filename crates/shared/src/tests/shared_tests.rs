use std::collections::HashSet;

use serde_json::json;

use crate::{
    domain::{CompanyId, CompanyRecord},
    protocol::{CompareRequest, ListCompaniesResponse, MutationResponse},
    schema::{comparison_fields, field_def, FieldKind, COMPANY_FIELDS, NAME_KEY},
};

#[test]
fn company_id_accepts_numbers_and_strings() {
    let from_number: CompanyId = serde_json::from_value(json!(7)).expect("number id");
    let from_text: CompanyId = serde_json::from_value(json!("7")).expect("string id");
    assert_eq!(from_number, from_text);
    assert_eq!(from_number.as_str(), "7");
}

#[test]
fn record_keeps_flat_attributes_next_to_id() {
    let record: CompanyRecord = serde_json::from_value(json!({
        "id": 3,
        "companyName": "Acme",
        "employees": 50,
        "notes": null,
        "bonus": ""
    }))
    .expect("record");

    assert_eq!(record.id, CompanyId::new("3"));
    assert!(record.get("id").is_none());
    assert_eq!(record.company_name(), "Acme");
    assert_eq!(record.text("employees").as_deref(), Some("50"));
    assert_eq!(record.text("notes"), None);
    assert_eq!(record.text("bonus"), None);
    assert_eq!(record.text("missing"), None);
}

#[test]
fn failed_list_envelope_defaults_to_no_companies() {
    let response: ListCompaniesResponse =
        serde_json::from_value(json!({"success": false, "message": "db down"})).expect("envelope");
    assert!(!response.success);
    assert!(response.companies.is_empty());
    assert_eq!(response.message.as_deref(), Some("db down"));

    let mutation: MutationResponse =
        serde_json::from_value(json!({"success": true})).expect("mutation");
    assert!(mutation.message.is_none());
}

#[test]
fn compare_request_sends_ids_as_strings() {
    let request = CompareRequest::from_ids(&[CompanyId::from(1_i64), CompanyId::from("abc")]);
    assert_eq!(
        serde_json::to_value(&request).expect("json"),
        json!({"ids": ["1", "abc"]})
    );
}

#[test]
fn schema_keys_are_unique_and_name_leads() {
    let keys: HashSet<_> = COMPANY_FIELDS.iter().map(|f| f.key).collect();
    assert_eq!(keys.len(), COMPANY_FIELDS.len());
    assert_eq!(COMPANY_FIELDS[0].key, NAME_KEY);
    assert!(COMPANY_FIELDS[0].required);
    assert_eq!(comparison_fields().count(), COMPANY_FIELDS.len() - 1);
    assert!(comparison_fields().all(|f| f.key != NAME_KEY));
    assert_eq!(
        field_def("foundedDate").map(|f| f.kind),
        Some(FieldKind::Date)
    );
}
