use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CompanyId, CompanyRecord};

/// Flat key -> string body sent on create and update.
pub type CompanyPayload = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCompaniesResponse {
    pub success: bool,
    #[serde(default)]
    pub companies: Vec<CompanyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub ids: Vec<String>,
}

impl CompareRequest {
    pub fn from_ids(ids: &[CompanyId]) -> Self {
        Self {
            ids: ids.iter().map(|id| id.0.clone()).collect(),
        }
    }
}

pub fn companies_route() -> &'static str {
    "/api/companies"
}

pub fn compare_route() -> &'static str {
    "/api/compare"
}
