use std::collections::BTreeSet;

use shared::{
    domain::{CompanyId, CompanyRecord},
    schema::{comparison_fields, COMPANY_FIELDS},
};

use super::*;
use crate::format::{iso_date, parse_date};

fn acme() -> CompanyRecord {
    CompanyRecord::new("1")
        .with("companyName", "Acme")
        .with("foundedDate", "2020-05-01")
        .with("employees", 50)
        .with("headquarters", "Osaka")
}

fn globex() -> CompanyRecord {
    CompanyRecord::new("2")
        .with("companyName", "Globex")
        .with("foundedDate", serde_json::Value::Null)
}

#[test]
fn parses_backend_date_shapes() {
    let expected = chrono::NaiveDate::from_ymd_opt(2020, 5, 1);
    assert_eq!(parse_date("2020-05-01"), expected);
    assert_eq!(parse_date("Fri, 01 May 2020 00:00:00 GMT"), expected);
    assert_eq!(parse_date("2020-05-01T00:00:00+09:00"), expected);
    assert_eq!(parse_date("2020-05-01 12:30:00"), expected);
    assert_eq!(parse_date("not a date"), None);
    assert_eq!(parse_date("  "), None);
}

#[test]
fn formats_dates_with_configured_pattern() {
    assert_eq!(DateStyle::default().format("2020-05-01"), "2020/05/01");
    assert_eq!(DateStyle::new("%d.%m.%Y").format("2020-05-01"), "01.05.2020");
    assert_eq!(DateStyle::default().format("someday"), "someday");
    assert_eq!(
        iso_date("Fri, 01 May 2020 00:00:00 GMT").as_deref(),
        Some("2020-05-01")
    );
}

#[test]
fn renders_one_card_per_record_in_response_order() {
    let records = vec![globex(), acme()];
    let view = render_cards(&records, &BTreeSet::new(), &DateStyle::default());

    let cards = view.cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].name, "Globex");
    assert_eq!(cards[0].founded, UNKNOWN);
    assert_eq!(cards[0].employees, UNKNOWN);
    assert_eq!(cards[1].name, "Acme");
    assert_eq!(cards[1].founded, "2020/05/01");
    assert_eq!(cards[1].employees, "50");
}

#[test]
fn empty_record_set_renders_only_the_empty_message() {
    let view = render_cards(&[], &BTreeSet::new(), &DateStyle::default());
    assert_eq!(
        view,
        ListView::Empty {
            message: EMPTY_LIST_MESSAGE
        }
    );
    assert!(view.cards().is_empty());
}

#[test]
fn card_controls_map_to_single_actions() {
    let selected = BTreeSet::from([CompanyId::from("1")]);
    let view = render_cards(&[acme()], &selected, &DateStyle::default());
    let card = &view.cards()[0];
    let id = CompanyId::from("1");

    assert!(card.selected);
    assert_eq!(
        card.action(CardAction::ToggleSelect),
        Action::SetSelected {
            id: id.clone(),
            selected: false
        }
    );
    assert_eq!(card.action(CardAction::Edit), Action::Edit(id.clone()));
    assert_eq!(
        card.action(CardAction::Delete),
        Action::RequestDelete(id.clone())
    );
    assert_eq!(card.action(CardAction::ShowDetails), Action::ShowDetails(id));
}

#[test]
fn details_list_every_schema_field_with_sentinel() {
    let details = render_details(&acme(), &DateStyle::default());

    assert_eq!(details.title, "Acme");
    assert_eq!(details.entries.len(), COMPANY_FIELDS.len());
    assert_eq!(details.entries[0].label, COMPANY_FIELDS[0].label);
    assert_eq!(details.entries[0].value, "Acme");

    let founded = details
        .entries
        .iter()
        .find(|e| e.label == "Founded")
        .expect("founded entry");
    assert_eq!(founded.value, "2020/05/01");

    let notes = details
        .entries
        .iter()
        .find(|e| e.label == "Notes")
        .expect("notes entry");
    assert_eq!(notes.value, NOT_SET);
}

#[test]
fn comparison_table_transposes_records_in_given_order() {
    let view = render_compare(&[acme(), globex()], &DateStyle::default());
    let CompareView::Table(table) = &view else {
        panic!("expected a table, got {view:?}");
    };

    assert_eq!(table.header, vec!["Field", "Acme", "Globex"]);
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.rows.len(), comparison_fields().count());
    assert!(table.rows.iter().all(|row| row.cells.len() == 2));

    let founded = table
        .rows
        .iter()
        .find(|row| row.key == "foundedDate")
        .expect("founded row");
    assert_eq!(founded.cells, vec!["2020/05/01", MISSING_CELL]);

    let hq = table
        .rows
        .iter()
        .find(|row| row.key == "headquarters")
        .expect("hq row");
    assert_eq!(hq.cells, vec!["Osaka", MISSING_CELL]);
}

#[test]
fn comparison_with_no_records_shows_message() {
    assert_eq!(
        render_compare(&[], &DateStyle::default()),
        CompareView::Empty {
            message: EMPTY_COMPARE_MESSAGE
        }
    );
}
