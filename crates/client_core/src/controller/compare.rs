use shared::domain::{CompanyId, CompanyRecord};

use crate::{
    format::DateStyle,
    render::{render_compare, CompareView},
};

pub const MIN_COMPARE_SELECTION: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct ComparePresenter {
    records: Option<Vec<CompanyRecord>>,
}

impl ComparePresenter {
    /// `None` when the selection is too small to be worth a request.
    pub fn request(&self, selected: Vec<CompanyId>) -> Option<Vec<CompanyId>> {
        (selected.len() >= MIN_COMPARE_SELECTION).then_some(selected)
    }

    pub fn show(&mut self, records: Vec<CompanyRecord>) {
        self.records = Some(records);
    }

    pub fn view(&self, dates: &DateStyle) -> CompareView {
        match &self.records {
            Some(records) => render_compare(records, dates),
            None => CompareView::Idle,
        }
    }
}
