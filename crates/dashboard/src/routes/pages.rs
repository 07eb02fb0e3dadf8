//! Page router: renders whichever view the session's page flag selects.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user};
use crate::filters;
use crate::middleware::{
    OptionalAuth, clear_current_user, current_page, load_transcript, seed_page_once, set_page,
    take_flash,
};
use crate::models::{ChatExchange, CurrentUser, Flash, Page, TranscriptEntry};
use crate::services::ChatService;
use crate::state::AppState;

use super::overview::{FilterQuery, OverviewTemplate};

/// Query parameters for `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub page: Option<String>,
    #[serde(flatten)]
    pub filter: FilterQuery,
}

/// Form input for `POST /navigate`.
#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub page: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub flash: Option<Flash>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub flash: Option<Flash>,
}

/// Chatbot page template.
#[derive(Template, WebTemplate)]
#[template(path = "chatbot.html")]
pub struct ChatbotTemplate {
    pub user: CurrentUser,
    pub active: &'static str,
    pub flash: Option<Flash>,
    pub transcript: Vec<TranscriptEntry>,
    pub assistant_enabled: bool,
}

/// History page template.
#[derive(Template, WebTemplate)]
#[template(path = "history.html")]
pub struct HistoryTemplate {
    pub user: CurrentUser,
    pub active: &'static str,
    pub flash: Option<Flash>,
    pub exchanges: Vec<ChatExchange>,
}

/// Render the current page.
///
/// GET /
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<IndexQuery>,
) -> Result<Response, AppError> {
    seed_page_once(&session, query.page.as_deref()).await?;

    let requested = current_page(&session).await?;
    let mut page = Page::resolve(requested, user.is_some());

    if page == Page::Logout {
        clear_current_user(&session).await?;
        clear_sentry_user();
        tracing::info!("User logged out");
        page = Page::Login;
    }

    if requested != Some(page) {
        set_page(&session, page).await?;
    }

    let flash = take_flash(&session).await?;

    let response = match (page, user) {
        (Page::Overview, Some(user)) => {
            OverviewTemplate::build(user, flash, &query.filter).into_response()
        }
        (Page::Chatbot, Some(user)) => ChatbotTemplate {
            user,
            active: Page::Chatbot.name(),
            flash,
            transcript: load_transcript(&session).await?.entries().to_vec(),
            assistant_enabled: state.groq().is_some(),
        }
        .into_response(),
        (Page::History, Some(user)) => {
            let exchanges = ChatService::new(state.pool(), state.groq())
                .history(user.id)
                .await?;
            HistoryTemplate {
                user,
                active: Page::History.name(),
                flash,
                exchanges,
            }
            .into_response()
        }
        (Page::Signup, _) => SignupTemplate { flash }.into_response(),
        _ => LoginTemplate { flash }.into_response(),
    };

    Ok(response)
}

/// Switch the page flag.
///
/// Unknown page names are ignored.
///
/// POST /navigate
#[instrument(skip_all, fields(page = %form.page))]
pub async fn navigate(
    session: Session,
    Form(form): Form<NavigateForm>,
) -> Result<Redirect, AppError> {
    if let Some(page) = Page::from_name(&form.page) {
        set_page(&session, page).await?;
    }
    Ok(Redirect::to("/"))
}
