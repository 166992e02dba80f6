//! Authenticated access to the remote expense service.

use api_types::{
    expense::ExpenseRecord,
    tips::{TipRequest, TipResponse},
};
use reqwest::Url;
use serde::Deserialize;

use crate::error::RemoteError;

/// The remote surface the controller and the tip advisor depend on.
///
/// Every call may fail due to connectivity loss or auth expiry; callers
/// must treat a failure as "state unchanged remotely" and must not block
/// local operations on its outcome.
#[allow(async_fn_in_trait)]
pub trait ExpenseApi {
    async fn create_expense(&self, token: &str, record: &ExpenseRecord)
    -> Result<(), RemoteError>;
    async fn list_expenses(&self, token: &str) -> Result<Vec<ExpenseRecord>, RemoteError>;
    async fn delete_expense(&self, token: &str, id: &str) -> Result<(), RemoteError>;
    async fn request_tip(
        &self,
        token: &str,
        expenses: &[ExpenseRecord],
    ) -> Result<TipResponse, RemoteError>;
}

impl<A: ExpenseApi> ExpenseApi for &A {
    async fn create_expense(
        &self,
        token: &str,
        record: &ExpenseRecord,
    ) -> Result<(), RemoteError> {
        (**self).create_expense(token, record).await
    }

    async fn list_expenses(&self, token: &str) -> Result<Vec<ExpenseRecord>, RemoteError> {
        (**self).list_expenses(token).await
    }

    async fn delete_expense(&self, token: &str, id: &str) -> Result<(), RemoteError> {
        (**self).delete_expense(token, id).await
    }

    async fn request_tip(
        &self,
        token: &str,
        expenses: &[ExpenseRecord],
    ) -> Result<TipResponse, RemoteError> {
        (**self).request_tip(token, expenses).await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP client for the expense service.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: Url,
    http: reqwest::Client,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| RemoteError::Server(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|err| RemoteError::Server(format!("invalid base_url: {err}")))
    }

    async fn error_from(res: reqwest::Response) -> RemoteError {
        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        match status.as_u16() {
            401 => RemoteError::Unauthorized,
            403 => RemoteError::Forbidden,
            404 => RemoteError::NotFound,
            400 | 422 => RemoteError::Validation(body),
            _ => RemoteError::Server(body),
        }
    }
}

impl ExpenseApi for RemoteClient {
    async fn create_expense(
        &self,
        token: &str,
        record: &ExpenseRecord,
    ) -> Result<(), RemoteError> {
        let endpoint = self.endpoint("api/expenses")?;

        let res = self
            .http
            .post(endpoint)
            .bearer_auth(token)
            .json(record)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(Self::error_from(res).await)
    }

    async fn list_expenses(&self, token: &str) -> Result<Vec<ExpenseRecord>, RemoteError> {
        let endpoint = self.endpoint("api/expenses")?;

        let res = self
            .http
            .get(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<Vec<ExpenseRecord>>()
                .await
                .map_err(RemoteError::Transport);
        }
        Err(Self::error_from(res).await)
    }

    async fn delete_expense(&self, token: &str, id: &str) -> Result<(), RemoteError> {
        let endpoint = self.endpoint(&format!("api/expenses/{id}"))?;

        let res = self
            .http
            .delete(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(Self::error_from(res).await)
    }

    async fn request_tip(
        &self,
        token: &str,
        expenses: &[ExpenseRecord],
    ) -> Result<TipResponse, RemoteError> {
        let endpoint = self.endpoint("api/tips")?;

        let payload = TipRequest {
            expenses: expenses.to_vec(),
        };

        let res = self
            .http
            .post(endpoint)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<TipResponse>()
                .await
                .map_err(RemoteError::Transport);
        }
        Err(Self::error_from(res).await)
    }
}
