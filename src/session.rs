#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use eyre::{Context, Result, bail};

use crate::api::ApiClient;
use crate::models::{AuthUser, LoginResponse, ResetPasswordRequest, ResetPasswordResponse};
use crate::storage::{ArcStorage, TOKEN_KEY};

/// The authenticated user and the bearer token backing it. The token is
/// mirrored to storage so a restart can pick the session up again.
pub struct Session {
    api: ApiClient,
    storage: ArcStorage,
    token: Option<String>,
    current_user: Option<AuthUser>,
    must_change_password: bool,
}

impl Session {
    pub fn new(api: ApiClient, storage: ArcStorage) -> Self {
        Self {
            api,
            storage,
            token: None,
            current_user: None,
            must_change_password: false,
        }
    }

    /// Loads the persisted token. The user is only known after
    /// [`Session::fetch_current_user`].
    pub async fn restore(&mut self) -> Result<()> {
        self.token = self
            .storage
            .get(TOKEN_KEY)
            .await
            .wrap_err("loading session token")?
            .filter(|t| !t.is_empty());
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn current_user(&self) -> Option<&AuthUser> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.current_user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn must_change_password(&self) -> bool {
        self.must_change_password
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse> {
        let res = self.api.login(username, password).await?;
        self.token = Some(res.token.clone());
        self.current_user = Some(res.user.clone());
        self.must_change_password = res.must_change_password;
        self.storage
            .set(TOKEN_KEY, &res.token)
            .await
            .wrap_err("saving session token")?;
        log::info!("Logged in as {}", res.user.username);
        Ok(res)
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.clear().await
    }

    /// Asks the backend who the token belongs to. Any failure ends the
    /// session.
    pub async fn fetch_current_user(&mut self) -> Result<()> {
        let Some(token) = self.token.clone() else {
            return Ok(());
        };

        match self.api.me(Some(&token)).await {
            Ok(user) => {
                self.must_change_password = user.must_change_password;
                self.current_user = Some(user);
                Ok(())
            }
            Err(err) => {
                log::warn!("Session is no longer valid: {:#}", err);
                self.clear().await
            }
        }
    }

    /// Changes the password of the current user. A mismatched confirmation
    /// is rejected before anything is sent.
    pub async fn reset_password(
        &mut self,
        old_password: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<ResetPasswordResponse> {
        if new_password.is_empty() {
            bail!("new password must not be empty");
        }
        if new_password != new_password_confirm {
            bail!("new password and confirmation do not match");
        }

        let req = ResetPasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
            new_password_confirm: new_password_confirm.to_string(),
        };
        let res = self.api.reset_password(self.token(), &req).await?;

        self.must_change_password = res.must_change_password;
        if let Some(user) = self.current_user.as_mut() {
            user.must_change_password = res.must_change_password;
        }
        Ok(res)
    }

    async fn clear(&mut self) -> Result<()> {
        self.token = None;
        self.current_user = None;
        self.must_change_password = false;
        self.storage
            .remove(TOKEN_KEY)
            .await
            .wrap_err("removing session token")
    }
}
