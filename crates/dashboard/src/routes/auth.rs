//! Authentication route handlers.
//!
//! Username/password forms. Outcomes are shown as flash messages on the
//! next render of `/`.

use axum::{Form, Router, extract::State, response::Redirect, routing::post};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user, set_flash, set_page};
use crate::models::{CurrentUser, Flash, Page};
use crate::services::{AuthError, AuthService, check_password_length};
use crate::state::AppState;

const FILL_ALL_FIELDS: &str = "Please fill in all fields";

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
}

/// Username and password, as posted by both forms.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsForm {
    fn is_incomplete(&self) -> bool {
        self.username.is_empty() || self.password.is_empty()
    }
}

// Password deliberately left out.
impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Log in.
///
/// POST /auth/login
#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, AppError> {
    if form.is_incomplete() {
        set_flash(&session, Flash::warning(FILL_ALL_FIELDS)).await?;
        return Ok(Redirect::to("/"));
    }

    let auth = AuthService::new(state.pool());
    match auth.check_user(&form.username, &form.password).await? {
        Some(user) => {
            // New session ID on privilege change
            session.cycle_id().await?;

            let current = CurrentUser::from(user);
            set_current_user(&session, &current).await?;
            set_sentry_user(current.id, current.username.as_str());
            set_page(&session, Page::Overview).await?;
            set_flash(&session, Flash::success("Login successful!")).await?;

            tracing::info!(user_id = %current.id, "User logged in");
        }
        None => {
            tracing::warn!("Login failed");
            set_flash(&session, Flash::error("Invalid credentials")).await?;
        }
    }

    Ok(Redirect::to("/"))
}

/// Create an account.
///
/// POST /auth/signup
#[instrument(skip_all, fields(username = %form.username))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, AppError> {
    if form.is_incomplete() {
        set_flash(&session, Flash::warning(FILL_ALL_FIELDS)).await?;
        return Ok(Redirect::to("/"));
    }

    if let Err(AuthError::WeakPassword(message)) = check_password_length(&form.password) {
        set_flash(&session, Flash::warning(message)).await?;
        return Ok(Redirect::to("/"));
    }

    let flash = match AuthService::new(state.pool())
        .create_user(&form.username, &form.password)
        .await
    {
        Ok(_) => {
            set_page(&session, Page::Login).await?;
            Flash::success("Account created successfully!")
        }
        Err(AuthError::UserAlreadyExists) => {
            tracing::warn!("Signup rejected: username taken");
            Flash::error("Username already exists")
        }
        Err(AuthError::InvalidUsername(e)) => Flash::warning(capitalise(&e.to_string())),
        Err(e) => return Err(e.into()),
    };

    set_flash(&session, flash).await?;
    Ok(Redirect::to("/"))
}

/// Log out and return to the login page.
///
/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    set_page(&session, Page::Login).await?;
    Ok(Redirect::to("/"))
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_form() {
        let form = CredentialsForm {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(form.is_incomplete());

        let form = CredentialsForm {
            username: "alice".to_string(),
            password: "secret1".to_string(),
        };
        assert!(!form.is_incomplete());
    }

    #[test]
    fn test_debug_redacts_password() {
        let form = CredentialsForm {
            username: "alice".to_string(),
            password: "hunter22".to_string(),
        };
        let debug = format!("{form:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_capitalise() {
        assert_eq!(
            capitalise("username cannot be empty"),
            "Username cannot be empty"
        );
        assert_eq!(capitalise(""), "");
    }
}
