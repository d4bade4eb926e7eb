use shared::{
    domain::{CompanyId, CompanyRecord},
    protocol::CompanyPayload,
};
use tracing::debug;

use crate::{api::CompanyApi, error::GatewayError};

/// Side effects requested by the controller. Hosts execute them and feed
/// the outcome back through [`crate::Controller::complete`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Call(ApiCall),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListCompanies,
    GetCompany(CompanyId),
    CreateCompany(CompanyPayload),
    UpdateCompany(CompanyId, CompanyPayload),
    DeleteCompany(CompanyId),
    CompareCompanies(Vec<CompanyId>),
}

impl ApiCall {
    pub fn name(&self) -> &'static str {
        match self {
            ApiCall::ListCompanies => "list_companies",
            ApiCall::GetCompany(_) => "get_company",
            ApiCall::CreateCompany(_) => "create_company",
            ApiCall::UpdateCompany(..) => "update_company",
            ApiCall::DeleteCompany(_) => "delete_company",
            ApiCall::CompareCompanies(_) => "compare_companies",
        }
    }
}

#[derive(Debug)]
pub enum Completion {
    Listed(Result<Vec<CompanyRecord>, GatewayError>),
    Loaded(Result<CompanyRecord, GatewayError>),
    Saved(Result<Option<String>, GatewayError>),
    Deleted {
        id: CompanyId,
        result: Result<Option<String>, GatewayError>,
    },
    Compared(Result<Vec<CompanyRecord>, GatewayError>),
}

pub async fn perform<A>(api: &A, call: ApiCall) -> Completion
where
    A: CompanyApi + ?Sized,
{
    debug!(call = call.name(), "performing api call");
    match call {
        ApiCall::ListCompanies => Completion::Listed(api.list_companies().await),
        ApiCall::GetCompany(id) => Completion::Loaded(api.get_company(&id).await),
        ApiCall::CreateCompany(payload) => Completion::Saved(api.create_company(&payload).await),
        ApiCall::UpdateCompany(id, payload) => {
            Completion::Saved(api.update_company(&id, &payload).await)
        }
        ApiCall::DeleteCompany(id) => {
            let result = api.delete_company(&id).await;
            Completion::Deleted { id, result }
        }
        ApiCall::CompareCompanies(ids) => Completion::Compared(api.compare_companies(&ids).await),
    }
}
