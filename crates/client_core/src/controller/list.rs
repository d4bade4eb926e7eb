use std::collections::BTreeSet;

use shared::domain::{CompanyId, CompanyRecord};

use crate::{
    format::DateStyle,
    render::{render_cards, ListView, LOADING_MESSAGE},
};

/// Last good record set, the checkbox selection over it, and whether a
/// refresh is outstanding.
#[derive(Debug, Clone, Default)]
pub struct ListPresenter {
    records: Vec<CompanyRecord>,
    selected: BTreeSet<CompanyId>,
    loaded: bool,
    in_flight: usize,
}

impl ListPresenter {
    pub fn begin_refresh(&mut self) {
        self.in_flight += 1;
    }

    /// Replaces the rendered set in one step; cards are rebuilt so the
    /// selection starts empty.
    pub fn finish_refresh(&mut self, records: Vec<CompanyRecord>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.records = records;
        self.selected.clear();
        self.loaded = true;
    }

    /// A failed refresh leaves the last good render in place.
    pub fn abort_refresh(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn record(&self, id: &CompanyId) -> Option<&CompanyRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Returns false when no rendered card carries `id`.
    pub fn set_selected(&mut self, id: &CompanyId, selected: bool) -> bool {
        if self.is_loading() || self.record(id).is_none() {
            return false;
        }
        if selected {
            self.selected.insert(id.clone());
        } else {
            self.selected.remove(id);
        }
        true
    }

    /// Checked ids in card order. Nothing is checkable while the loading
    /// placeholder is shown.
    pub fn selected_ids(&self) -> Vec<CompanyId> {
        if self.is_loading() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|record| self.selected.contains(&record.id))
            .map(|record| record.id.clone())
            .collect()
    }

    pub fn view(&self, dates: &DateStyle) -> ListView {
        if self.is_loading() {
            ListView::Loading {
                message: LOADING_MESSAGE,
            }
        } else if !self.loaded {
            ListView::NotLoaded
        } else {
            render_cards(&self.records, &self.selected, dates)
        }
    }
}
