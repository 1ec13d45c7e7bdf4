#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use std::time;

use eyre::{Context, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use crate::config::{ApiConfig, user_agent};
use crate::models::{
    AuthUser, LoginRequest, LoginResponse, Model, ResetPasswordRequest, ResetPasswordResponse,
};

/// Client for the REST half of the backend. Every call takes the bearer
/// token explicitly; the header is only attached when a token is given.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: time::Duration,
    client: reqwest::Client,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },
}

#[derive(Default, Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: time::Duration::from_secs(crate::config::constants::HTTP_TIMEOUT_SECS),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> time::Duration {
        self.timeout
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let req = self
            .request(Method::POST, "/auth/login", None)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            });
        let res = req.send().await.wrap_err("sending login request")?;
        parse_json(res).await.wrap_err("logging in")
    }

    pub async fn me(&self, token: Option<&str>) -> Result<AuthUser> {
        let res = self
            .request(Method::GET, "/auth/me", token)
            .send()
            .await
            .wrap_err("fetching current user")?;
        parse_json(res).await.wrap_err("fetching current user")
    }

    pub async fn list_models(&self, token: Option<&str>) -> Result<Vec<Model>> {
        let res = self
            .request(Method::GET, "/models", token)
            .send()
            .await
            .wrap_err("listing models")?;
        // The backend encodes an empty list as null
        let models: Option<Vec<Model>> = parse_json(res).await.wrap_err("listing models")?;
        Ok(models.unwrap_or_default())
    }

    pub async fn reset_password(
        &self,
        token: Option<&str>,
        req: &ResetPasswordRequest,
    ) -> Result<ResetPasswordResponse> {
        let res = self
            .request(Method::POST, "/auth/reset-password", token)
            .json(req)
            .send()
            .await
            .wrap_err("sending reset password request")?;
        parse_json(res).await.wrap_err("resetting password")
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("User-Agent", user_agent())
            .timeout(self.timeout);

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            req = req.bearer_auth(token);
        }
        req
    }
}

impl From<&ApiConfig> for ApiClient {
    fn from(value: &ApiConfig) -> Self {
        ApiClient::new(&value.base_url).with_timeout(value.timeout())
    }
}

async fn parse_json<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        log::error!("Error response ({}): {}", status.as_u16(), body);
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        }
        .into());
    }

    let body = res.text().await.wrap_err("reading response body")?;
    let value = serde_json::from_str::<T>(&body).wrap_err(format!("parsing response: {}", body))?;
    Ok(value)
}
