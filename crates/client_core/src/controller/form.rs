use shared::{
    domain::{CompanyId, CompanyRecord},
    protocol::CompanyPayload,
    schema::{field_def, FieldKind, COMPANY_FIELDS},
};
use tracing::warn;

use crate::{effects::ApiCall, format::iso_date};

const CREATE_TITLE: &str = "Company information";
const CREATE_SUBMIT: &str = "Register";
const EDIT_TITLE: &str = "Edit company information";
const EDIT_SUBMIT: &str = "Update";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(CompanyId),
}

/// Registration form state: the current mode plus one string per schema
/// field.
#[derive(Debug, Clone)]
pub struct FormController {
    mode: FormMode,
    values: CompanyPayload,
    revision: u64,
}

impl Default for FormController {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            values: blank_values(),
            revision: 0,
        }
    }
}

fn blank_values() -> CompanyPayload {
    COMPANY_FIELDS
        .iter()
        .map(|def| (def.key.to_string(), String::new()))
        .collect()
}

impl FormController {
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Bumped whenever the controller replaces the field values wholesale,
    /// so hosts holding an edit buffer know to resync.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => CREATE_TITLE,
            FormMode::Edit(_) => EDIT_TITLE,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => CREATE_SUBMIT,
            FormMode::Edit(_) => EDIT_SUBMIT,
        }
    }

    pub fn reset(&mut self) {
        self.values = blank_values();
        self.mode = FormMode::Create;
        self.revision += 1;
    }

    /// Returns false for keys that are not form fields.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        if field_def(key).is_none() {
            warn!(key, "ignoring value for unknown form field");
            return false;
        }
        self.values.insert(key.to_string(), value.into());
        true
    }

    /// Fills the form from a fetched record and enters edit mode. Record
    /// keys without a form field are ignored; fields without a record key
    /// stay blank.
    pub fn load(&mut self, record: &CompanyRecord) {
        let mut values = blank_values();
        for def in COMPANY_FIELDS {
            let Some(raw) = record.text(def.key) else {
                continue;
            };
            let value = match def.kind {
                FieldKind::Date => iso_date(&raw).unwrap_or(raw),
                FieldKind::Text | FieldKind::Number | FieldKind::MultiLine => raw,
            };
            values.insert(def.key.to_string(), value);
        }
        self.values = values;
        self.mode = FormMode::Edit(record.id.clone());
        self.revision += 1;
    }

    pub fn payload(&self) -> CompanyPayload {
        self.values.clone()
    }

    pub fn submission(&self) -> ApiCall {
        match &self.mode {
            FormMode::Create => ApiCall::CreateCompany(self.payload()),
            FormMode::Edit(id) => ApiCall::UpdateCompany(id.clone(), self.payload()),
        }
    }
}
