//! Request execution: bearer attachment, the single refresh-and-replay on
//! `401`, and response-to-failure mapping.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uni_auth::CredentialProvider;
use uni_forms::FormController;
use uni_records::{Listing, normalize, normalize_record};

use crate::error::ApiFailure;
use crate::query::ListQuery;
use crate::{ApiClient, ApiListing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    Bearer,
    Anonymous,
}

impl<C: CredentialProvider> ApiClient<C> {
    /// Send one request and return the parsed body.
    ///
    /// Authenticated requests that come back `401` are replayed once with a
    /// refreshed token. Anonymous requests are never replayed.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &ListQuery,
        body: Option<&Value>,
        auth: Auth,
    ) -> Result<Value, ApiFailure> {
        let url = format!("{}{}", self.config.endpoint(path), query.to_query_string());
        let token = match auth {
            Auth::Bearer => self.credentials.access_token(),
            Auth::Anonymous => None,
        };

        let response = self.send(&method, &url, body, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED || auth == Auth::Anonymous {
            return read_response(response).await;
        }

        let rejected = read_response(response).await.err().unwrap_or_else(|| {
            ApiFailure::from_response(StatusCode::UNAUTHORIZED.as_u16(), None)
        });
        tracing::debug!(endpoint = %url, "access token rejected, refreshing");

        let fresh = match self.credentials.refresh().await {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!(%error, "token refresh failed, clearing session");
                self.credentials.clear();
                return Err(rejected);
            }
        };

        let replay = self.send(&method, &url, body, Some(&fresh)).await?;
        if replay.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(endpoint = %url, "refreshed token rejected, clearing session");
            self.credentials.clear();
        }
        read_response(replay).await
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiFailure> {
        tracing::debug!(%method, endpoint = %url, "api request");
        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(|error| {
            tracing::warn!(%method, endpoint = %url, %error, "request did not complete");
            ApiFailure::transport(&error)
        })
    }

    // -- verbs -------------------------------------------------------------

    pub(crate) async fn get(&self, path: &str, query: &ListQuery) -> Result<Value, ApiFailure> {
        self.execute(Method::GET, path, query, None, Auth::Bearer)
            .await
    }

    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiFailure> {
        self.execute(Method::POST, path, &ListQuery::new(), Some(body), Auth::Bearer)
            .await
    }

    pub(crate) async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiFailure> {
        self.execute(Method::PUT, path, &ListQuery::new(), Some(body), Auth::Bearer)
            .await
    }

    pub(crate) async fn patch(&self, path: &str, body: &Value) -> Result<Value, ApiFailure> {
        self.execute(Method::PATCH, path, &ListQuery::new(), Some(body), Auth::Bearer)
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiFailure> {
        self.execute(Method::DELETE, path, &ListQuery::new(), None, Auth::Bearer)
            .await
            .map(drop)
    }

    // -- typed helpers -----------------------------------------------------

    /// GET a list endpoint and decode every item.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ApiListing<T> {
        let body = self.get(path, query).await?;
        let listing: Listing<T> = normalize(&body).into_listing();
        tracing::debug!(endpoint = path, count = listing.items.len(), total = listing.total, "listed");
        Ok(listing)
    }

    /// GET a detail endpoint and decode the record.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiFailure> {
        let body = self.get(path, &ListQuery::new()).await?;
        decode_record(&body)
    }

    /// GET a statistics endpoint; the `{success, data}` wrapper is removed.
    pub(crate) async fn statistics(&self, path: &str) -> Result<Value, ApiFailure> {
        let body = self.get(path, &ListQuery::new()).await?;
        Ok(normalize_record(&body).unwrap_or(body))
    }

    /// Validate `form` and POST its create body.
    pub(crate) async fn create_from<F, T>(&self, path: &str, form: &F) -> Result<T, ApiFailure>
    where
        F: FormController,
        T: DeserializeOwned,
    {
        let body = form.submit()?;
        decode_record(&self.post(path, &body).await?)
    }

    /// Validate `form` and PUT its full body.
    pub(crate) async fn replace_from<F, T>(&self, path: &str, form: &F) -> Result<T, ApiFailure>
    where
        F: FormController,
        T: DeserializeOwned,
    {
        let body = form.submit()?;
        decode_record(&self.put(path, &body).await?)
    }

    /// Validate `form` and PATCH only the fields that changed.
    pub(crate) async fn patch_from<F, T>(&self, path: &str, form: &F) -> Result<T, ApiFailure>
    where
        F: FormController,
        T: DeserializeOwned,
    {
        let body = form.submit_changes()?;
        decode_record(&self.patch(path, &body).await?)
    }

    /// PUT, then PATCH with `fallback` when the server refuses the PUT.
    ///
    /// Transport failures are returned as-is. When both verbs are refused,
    /// the PUT failure is returned.
    pub(crate) async fn put_or_patch(
        &self,
        path: &str,
        full: &Value,
        fallback: &Value,
    ) -> Result<Value, ApiFailure> {
        let put_failure = match self.put(path, full).await {
            Ok(body) => return Ok(body),
            Err(failure) if failure.is_network_error || failure.is_unauthorized() => {
                return Err(failure);
            }
            Err(failure) => failure,
        };
        tracing::debug!(endpoint = path, status = ?put_failure.status, "PUT refused, trying PATCH");
        self.patch(path, fallback).await.map_err(|patch_failure| {
            tracing::warn!(endpoint = path, error = %patch_failure, "PATCH fallback refused too");
            put_failure
        })
    }
}

/// Turn a response into its JSON body, or the failure it describes.
///
/// Error statuses and `success: false` bodies become failures. An empty
/// success body reads as `null`.
pub(crate) async fn read_response(response: reqwest::Response) -> Result<Value, ApiFailure> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|error| ApiFailure::transport(&error))?;
    let body = if text.trim().is_empty() {
        None
    } else {
        serde_json::from_str::<Value>(&text).ok()
    };

    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), "api error response");
        return Err(ApiFailure::from_response(status.as_u16(), body.as_ref()));
    }

    match body {
        Some(body) if body.get("success") == Some(&Value::Bool(false)) => {
            Err(ApiFailure::from_response(status.as_u16(), Some(&body)))
        }
        Some(body) => Ok(body),
        None if text.trim().is_empty() => Ok(Value::Null),
        None => Err(ApiFailure::unexpected(format!(
            "response body is not JSON (status {})",
            status.as_u16()
        ))),
    }
}

/// Decode a detail or mutation body as `T`.
pub(crate) fn decode_record<T: DeserializeOwned>(body: &Value) -> Result<T, ApiFailure> {
    let record = normalize_record(body)
        .ok_or_else(|| ApiFailure::unexpected("response holds no record"))?;
    serde_json::from_value(record).map_err(|e| ApiFailure::unexpected(e.to_string()))
}
