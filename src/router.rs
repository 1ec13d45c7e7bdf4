#[cfg(test)]
#[path = "router_test.rs"]
mod tests;

use std::fmt::Display;
use std::str::FromStr;

use eyre::{Result, bail};

use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Chat(String),
    Settings,
    Login,
    ResetPassword,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Chat(_) => "chat",
            Route::Settings => "settings",
            Route::Login => "login",
            Route::ResetPassword => "reset-password",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Chat(id) => format!("/chat/{}", id),
            Route::Settings => "/settings".to_string(),
            Route::Login => "/login".to_string(),
            Route::ResetPassword => "/reset-password".to_string(),
        }
    }

    pub fn conversation_id(&self) -> Option<&str> {
        match self {
            Route::Chat(id) => Some(id),
            _ => None,
        }
    }
}

impl FromStr for Route {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let path = s.split(['?', '#']).next().unwrap_or_default().trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        let route = match path {
            "/" => Route::Home,
            "/settings" => Route::Settings,
            "/login" => Route::Login,
            "/reset-password" => Route::ResetPassword,
            other => match other.strip_prefix("/chat/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Chat(id.to_string()),
                _ => bail!("unknown route: {}", s),
            },
        };
        Ok(route)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Decides where a navigation to `to` actually lands. The login page is
/// public; everything else needs a user, and a mandated password change
/// pins the user to the reset page.
pub async fn guard(session: &mut Session, to: Route) -> Result<Route> {
    if to == Route::Login {
        if session.is_authenticated() && !session.must_change_password() {
            return Ok(Route::Home);
        }
        return Ok(to);
    }

    if !session.is_authenticated() {
        session.fetch_current_user().await?;
    }
    if !session.is_authenticated() {
        return Ok(Route::Login);
    }

    if session.must_change_password() && to != Route::ResetPassword {
        return Ok(Route::ResetPassword);
    }
    Ok(to)
}
