use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::token::TokenStore;
use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Typed client for the booking backend. One method per backend operation;
/// a single request attempt per call — retry belongs to the caller.
///
/// The bearer token is read from the store at request time, never cached
/// here, so a login/logout elsewhere takes effect on the next call.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    /// CSRF cookie value captured from responses, echoed back on mutations.
    csrf: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, store: Arc<dyn TokenStore>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            csrf: RwLock::new(None),
        })
    }

    pub fn store(&self) -> Arc<dyn TokenStore> {
        self.store.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builder with the bearer token attached when one is stored.
    pub(crate) async fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let mut rb = self.http.request(method, self.url(path));
        if let Some(tokens) = self.store.load_tokens().await? {
            rb = rb.bearer_auth(tokens.access);
        }
        Ok(rb)
    }

    /// Builder for calls that must be authenticated.
    pub(crate) async fn authed(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let tokens = self
            .store
            .load_tokens()
            .await?
            .ok_or(ApiError::NotAuthenticated)?;
        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(tokens.access))
    }

    pub(crate) fn csrf_token(&self) -> Option<String> {
        self.csrf.read().ok().and_then(|guard| guard.clone())
    }

    fn capture_csrf(&self, response: &Response) {
        for value in response.headers().get_all(header::SET_COOKIE) {
            if let Some(token) = value.to_str().ok().and_then(csrf_from_set_cookie) {
                if let Ok(mut guard) = self.csrf.write() {
                    *guard = Some(token.to_string());
                }
            }
        }
    }

    /// Send a request and parse its JSON body.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, rb: RequestBuilder) -> ApiResult<T> {
        let response = rb.send().await?;
        self.capture_csrf(&response);

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: extract_detail(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request where the body, if any, is discarded.
    pub(crate) async fn execute_unit(&self, rb: RequestBuilder) -> ApiResult<()> {
        let response = rb.send().await?;
        self.capture_csrf(&response);

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: extract_detail(status, &body),
            });
        }
        Ok(())
    }

    // Generic collection helpers used by the admin screens.

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let rb = self.request(Method::GET, path).await?;
        self.execute(rb).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let rb = self.authed(Method::POST, path).await?.json(body);
        self.execute(rb).await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let rb = self.authed(Method::PUT, path).await?.json(body);
        self.execute(rb).await
    }

    pub async fn delete_resource(&self, path: &str) -> ApiResult<()> {
        let rb = self.authed(Method::DELETE, path).await?;
        self.execute_unit(rb).await
    }
}

/// Pull the server's `detail` field out of an error body, falling back to
/// the raw body, then to the canonical status reason.
fn extract_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

fn csrf_from_set_cookie(raw: &str) -> Option<&str> {
    let rest = raw.trim_start().strip_prefix("csrftoken=")?;
    Some(rest.split(';').next().unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_extraction_prefers_detail_field() {
        let detail = extract_detail(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "passenger count must be positive"}"#,
        );
        assert_eq!(detail, "passenger count must be positive");
    }

    #[test]
    fn test_detail_extraction_falls_back_to_body_then_reason() {
        assert_eq!(
            extract_detail(StatusCode::BAD_GATEWAY, "upstream died"),
            "upstream died"
        );
        assert_eq!(extract_detail(StatusCode::NOT_FOUND, "  "), "Not Found");
    }

    #[test]
    fn test_csrf_cookie_parsing() {
        assert_eq!(
            csrf_from_set_cookie("csrftoken=abc123; Path=/; SameSite=Lax"),
            Some("abc123")
        );
        assert_eq!(csrf_from_set_cookie("sessionid=zzz; Path=/"), None);
    }
}
