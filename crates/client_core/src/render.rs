//! Pure projections from records to view descriptors. Nothing here touches
//! a display surface; hosts bind the descriptors' actions by id.

use std::collections::BTreeSet;

use shared::{
    domain::{CompanyId, CompanyRecord},
    schema::{
        comparison_fields, FieldDef, FieldKind, COMPANY_FIELDS, EMPLOYEES_KEY, FOUNDED_DATE_KEY,
    },
};

use crate::{controller::Action, format::DateStyle};

pub const UNKNOWN: &str = "Unknown";
pub const MISSING_CELL: &str = "-";
pub const NOT_SET: &str = "None";

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_LIST_MESSAGE: &str = "No companies have been registered yet.";
pub const EMPTY_COMPARE_MESSAGE: &str = "No companies were found to compare.";
pub const COMPARE_LABEL_HEADER: &str = "Field";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    ToggleSelect,
    Edit,
    Delete,
    ShowDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCard {
    pub id: CompanyId,
    pub name: String,
    pub founded: String,
    pub employees: String,
    pub selected: bool,
}

impl CompanyCard {
    /// Each control maps to exactly one action, so activating edit or
    /// delete never also opens the details dialog.
    pub fn action(&self, action: CardAction) -> Action {
        let id = self.id.clone();
        match action {
            CardAction::ToggleSelect => Action::SetSelected {
                id,
                selected: !self.selected,
            },
            CardAction::Edit => Action::Edit(id),
            CardAction::Delete => Action::RequestDelete(id),
            CardAction::ShowDetails => Action::ShowDetails(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    NotLoaded,
    Loading { message: &'static str },
    Empty { message: &'static str },
    Cards(Vec<CompanyCard>),
}

impl ListView {
    pub fn cards(&self) -> &[CompanyCard] {
        match self {
            ListView::Cards(cards) => cards,
            _ => &[],
        }
    }
}

/// One card per record, in response order.
pub fn render_cards(
    records: &[CompanyRecord],
    selected: &BTreeSet<CompanyId>,
    dates: &DateStyle,
) -> ListView {
    if records.is_empty() {
        return ListView::Empty {
            message: EMPTY_LIST_MESSAGE,
        };
    }

    let cards = records
        .iter()
        .map(|record| CompanyCard {
            id: record.id.clone(),
            name: record.company_name(),
            founded: record
                .text(FOUNDED_DATE_KEY)
                .map(|raw| dates.format(&raw))
                .unwrap_or_else(|| UNKNOWN.to_string()),
            employees: record
                .text(EMPLOYEES_KEY)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            selected: selected.contains(&record.id),
        })
        .collect();
    ListView::Cards(cards)
}

/// Display value of one schema field, date-formatted where the schema says
/// so. `None` when the record has nothing to show.
pub fn field_display(
    record: &CompanyRecord,
    def: &FieldDef,
    dates: &DateStyle,
) -> Option<String> {
    let raw = record.text(def.key)?;
    Some(match def.kind {
        FieldKind::Date => dates.format(&raw),
        FieldKind::Text | FieldKind::Number | FieldKind::MultiLine => raw,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEntry {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub id: CompanyId,
    pub title: String,
    pub entries: Vec<DetailEntry>,
}

pub fn render_details(record: &CompanyRecord, dates: &DateStyle) -> DetailsView {
    let entries = COMPANY_FIELDS
        .iter()
        .map(|def| DetailEntry {
            label: def.label,
            value: field_display(record, def, dates).unwrap_or_else(|| NOT_SET.to_string()),
        })
        .collect();

    DetailsView {
        id: record.id.clone(),
        title: record.company_name(),
        entries,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRow {
    pub key: &'static str,
    pub label: &'static str,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareTable {
    /// Label column header followed by one header per record.
    pub header: Vec<String>,
    pub rows: Vec<CompareRow>,
}

impl CompareTable {
    pub fn column_count(&self) -> usize {
        self.header.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareView {
    Idle,
    Empty { message: &'static str },
    Table(CompareTable),
}

/// Transposed table: records become columns in the order given, schema
/// fields become rows.
pub fn render_compare(records: &[CompanyRecord], dates: &DateStyle) -> CompareView {
    if records.is_empty() {
        return CompareView::Empty {
            message: EMPTY_COMPARE_MESSAGE,
        };
    }

    let header = std::iter::once(COMPARE_LABEL_HEADER.to_string())
        .chain(records.iter().map(CompanyRecord::company_name))
        .collect();
    let rows = comparison_fields()
        .map(|def| CompareRow {
            key: def.key,
            label: def.label,
            cells: records
                .iter()
                .map(|record| {
                    field_display(record, def, dates).unwrap_or_else(|| MISSING_CELL.to_string())
                })
                .collect(),
        })
        .collect();

    CompareView::Table(CompareTable { header, rows })
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
