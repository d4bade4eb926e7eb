use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{CompanyId, CompanyRecord},
    protocol::{
        companies_route, compare_route, CompanyPayload, CompanyResponse, CompareRequest,
        ListCompaniesResponse, MutationResponse,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::error::GatewayError;

/// Calling convention for the company backend. Every call resolves to the
/// payload of a `success: true` envelope or a [`GatewayError`].
#[async_trait]
pub trait CompanyApi: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, GatewayError>;
    async fn get_company(&self, id: &CompanyId) -> Result<CompanyRecord, GatewayError>;
    async fn create_company(
        &self,
        payload: &CompanyPayload,
    ) -> Result<Option<String>, GatewayError>;
    async fn update_company(
        &self,
        id: &CompanyId,
        payload: &CompanyPayload,
    ) -> Result<Option<String>, GatewayError>;
    async fn delete_company(&self, id: &CompanyId) -> Result<Option<String>, GatewayError>;
    async fn compare_companies(
        &self,
        ids: &[CompanyId],
    ) -> Result<Vec<CompanyRecord>, GatewayError>;
}

#[async_trait]
impl<T> CompanyApi for Arc<T>
where
    T: CompanyApi + ?Sized,
{
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, GatewayError> {
        (**self).list_companies().await
    }

    async fn get_company(&self, id: &CompanyId) -> Result<CompanyRecord, GatewayError> {
        (**self).get_company(id).await
    }

    async fn create_company(
        &self,
        payload: &CompanyPayload,
    ) -> Result<Option<String>, GatewayError> {
        (**self).create_company(payload).await
    }

    async fn update_company(
        &self,
        id: &CompanyId,
        payload: &CompanyPayload,
    ) -> Result<Option<String>, GatewayError> {
        (**self).update_company(id, payload).await
    }

    async fn delete_company(&self, id: &CompanyId) -> Result<Option<String>, GatewayError> {
        (**self).delete_company(id).await
    }

    async fn compare_companies(
        &self,
        ids: &[CompanyId],
    ) -> Result<Vec<CompanyRecord>, GatewayError> {
        (**self).compare_companies(ids).await
    }
}

#[derive(Clone)]
pub struct HttpCompanyApi {
    http: Client,
    base_url: Url,
}

impl HttpCompanyApi {
    pub fn new(server_url: &str) -> Result<Self, GatewayError> {
        Ok(Self::with_client(Client::new(), Url::parse(server_url)?))
    }

    pub fn with_client(http: Client, mut base_url: Url) -> Self {
        // Routes are joined relative to the base so a path prefix survives.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> Result<Url, GatewayError> {
        Ok(self.base_url.join(route.trim_start_matches('/'))?)
    }

    /// `/api/companies/{id}` with the id percent-encoded as one path segment.
    fn company_endpoint(&self, id: &CompanyId) -> Result<Url, GatewayError> {
        let mut url = self.endpoint(companies_route())?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(id.as_str());
        Ok(url)
    }

    async fn send<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(%method, %url, "dispatching company api request");
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|err| {
            warn!("company api transport failure: {err}");
            GatewayError::Transport(err)
        })?;
        decode_envelope(response).await
    }
}

/// Status codes are ignored; failures travel in the envelope.
async fn decode_envelope<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| {
        warn!(%status, "undecodable company api response: {err}");
        GatewayError::Decode(err)
    })
}

fn check(success: bool, message: Option<String>) -> Result<Option<String>, GatewayError> {
    if success {
        Ok(message)
    } else {
        warn!(
            message = message.as_deref().unwrap_or_default(),
            "company api rejected request"
        );
        Err(GatewayError::rejected(message))
    }
}

#[async_trait]
impl CompanyApi for HttpCompanyApi {
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, GatewayError> {
        let body: ListCompaniesResponse = self
            .send::<(), _>(Method::GET, self.endpoint(companies_route())?, None)
            .await?;
        check(body.success, body.message)?;
        Ok(body.companies)
    }

    async fn get_company(&self, id: &CompanyId) -> Result<CompanyRecord, GatewayError> {
        let body: CompanyResponse = self
            .send::<(), _>(Method::GET, self.company_endpoint(id)?, None)
            .await?;
        check(body.success, body.message)?;
        body.company.ok_or(GatewayError::MissingRecord)
    }

    async fn create_company(
        &self,
        payload: &CompanyPayload,
    ) -> Result<Option<String>, GatewayError> {
        let body: MutationResponse = self
            .send(Method::POST, self.endpoint(companies_route())?, Some(payload))
            .await?;
        check(body.success, body.message)
    }

    async fn update_company(
        &self,
        id: &CompanyId,
        payload: &CompanyPayload,
    ) -> Result<Option<String>, GatewayError> {
        let body: MutationResponse = self
            .send(Method::PUT, self.company_endpoint(id)?, Some(payload))
            .await?;
        check(body.success, body.message)
    }

    async fn delete_company(&self, id: &CompanyId) -> Result<Option<String>, GatewayError> {
        let body: MutationResponse = self
            .send::<(), _>(Method::DELETE, self.company_endpoint(id)?, None)
            .await?;
        check(body.success, body.message)
    }

    async fn compare_companies(
        &self,
        ids: &[CompanyId],
    ) -> Result<Vec<CompanyRecord>, GatewayError> {
        let request = CompareRequest::from_ids(ids);
        let body: ListCompaniesResponse = self
            .send(Method::POST, self.endpoint(compare_route())?, Some(&request))
            .await?;
        check(body.success, body.message)?;
        Ok(body.companies)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
