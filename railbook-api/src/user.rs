//! `/user/*` operations: token issuance, registration, profile.

use crate::client::ApiClient;
use crate::error::ApiResult;
use railbook_shared::{AuthTokens, UserProfile};
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

impl ApiClient {
    /// Exchange credentials for tokens, then fetch and persist the profile.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserProfile> {
        let rb = self
            .request(Method::POST, "/user/token/")
            .await?
            .json(&LoginRequest { email, password });
        let tokens: AuthTokens = self.execute(rb).await?;
        self.store().save_tokens(&tokens).await?;

        let profile = self.me().await?;
        self.store().save_profile(&profile).await?;
        tracing::info!(user_id = profile.id, "logged in");
        Ok(profile)
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<UserProfile> {
        let rb = self.request(Method::POST, "/user/register/").await?.json(req);
        self.execute(rb).await
    }

    /// Exchange the stored refresh token for a new access token.
    /// Exposed but not wired into the request pipeline; a 401 on a normal
    /// call surfaces as a logged-out session instead.
    pub async fn refresh_token(&self) -> ApiResult<AuthTokens> {
        let stored = self
            .store()
            .load_tokens()
            .await?
            .ok_or(crate::error::ApiError::NotAuthenticated)?;
        let rb = self
            .request(Method::POST, "/user/token/refresh/")
            .await?
            .json(&RefreshRequest {
                refresh: &stored.refresh,
            });
        let tokens: AuthTokens = self.execute(rb).await?;
        self.store().save_tokens(&tokens).await?;
        Ok(tokens)
    }

    pub async fn me(&self) -> ApiResult<UserProfile> {
        let rb = self.authed(Method::GET, "/user/me/").await?;
        self.execute(rb).await
    }

    /// Server-side invalidation is best-effort; local state is cleared
    /// regardless of the server's answer.
    pub async fn logout(&self) -> ApiResult<()> {
        match self.authed(Method::POST, "/user/logout/").await {
            Ok(rb) => {
                if let Err(err) = self.execute_unit(rb).await {
                    tracing::warn!("server-side logout failed: {err}");
                }
            }
            Err(_) => {
                // No token stored, nothing to invalidate remotely.
            }
        }
        self.store().clear().await?;
        Ok(())
    }
}
