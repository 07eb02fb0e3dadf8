//! Chat route handlers.

use axum::{Form, Router, extract::State, response::Redirect, routing::post};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{RequireAuth, load_transcript, set_flash, set_page, store_transcript};
use crate::models::{Flash, Page};
use crate::services::{CHAT_UNAVAILABLE_MESSAGE, ChatError, ChatService};
use crate::state::AppState;

/// Build the chat router.
pub fn router() -> Router<AppState> {
    Router::new().route("/chat/messages", post(send_message))
}

/// Form input for sending a message.
#[derive(Debug, Deserialize)]
pub struct SendMessageForm {
    #[serde(default)]
    pub message: String,
}

/// Send a message to the assistant.
///
/// Any relay failure collapses into one generic flash message; the detail
/// goes to the log.
///
/// POST /chat/messages
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn send_message(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SendMessageForm>,
) -> Result<Redirect, AppError> {
    set_page(&session, Page::Chatbot).await?;

    let mut transcript = load_transcript(&session).await?;
    let service = ChatService::new(state.pool(), state.groq());

    match service.send(user.id, &mut transcript, &form.message).await {
        Ok(_) => store_transcript(&session, &transcript).await?,
        Err(ChatError::EmptyMessage) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Chat relay failed");
            set_flash(&session, Flash::error(CHAT_UNAVAILABLE_MESSAGE)).await?;
        }
    }

    Ok(Redirect::to("/"))
}
