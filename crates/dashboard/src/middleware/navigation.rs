//! Session helpers for the page flag, flash messages and chat transcript.
//!
//! A click stores state here and redirects to `/`; the next render reads it.

use tower_sessions::Session;

use crate::models::{Flash, Page, Transcript, session_keys};

type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// Read the stored page flag.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current_page(session: &Session) -> SessionResult<Option<Page>> {
    session.get::<Page>(session_keys::PAGE).await
}

/// Store the page flag.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_page(session: &Session, page: Page) -> SessionResult<()> {
    session.insert(session_keys::PAGE, page).await
}

/// Seed the page flag from a `?page=` value on the first request of a session.
///
/// Later calls are no-ops. Unknown page names are ignored.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn seed_page_once(session: &Session, requested: Option<&str>) -> SessionResult<()> {
    if session
        .get::<bool>(session_keys::PAGE_INITIALISED)
        .await?
        .unwrap_or(false)
    {
        return Ok(());
    }

    if let Some(page) = requested.and_then(Page::from_name) {
        set_page(session, page).await?;
    }
    session.insert(session_keys::PAGE_INITIALISED, true).await
}

/// Queue a one-shot message for the next render.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(session: &Session, flash: Flash) -> SessionResult<()> {
    session.insert(session_keys::FLASH, flash).await
}

/// Take the pending flash message, if any.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take_flash(session: &Session) -> SessionResult<Option<Flash>> {
    session.remove::<Flash>(session_keys::FLASH).await
}

/// Load the chat transcript (empty if none yet).
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_transcript(session: &Session) -> SessionResult<Transcript> {
    Ok(session
        .get::<Transcript>(session_keys::TRANSCRIPT)
        .await?
        .unwrap_or_default())
}

/// Store the chat transcript.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn store_transcript(session: &Session, transcript: &Transcript) -> SessionResult<()> {
    session.insert(session_keys::TRANSCRIPT, transcript).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_seed_page_only_first_time() {
        let session = session();

        seed_page_once(&session, Some("signup")).await.unwrap();
        assert_eq!(current_page(&session).await.unwrap(), Some(Page::Signup));

        seed_page_once(&session, Some("history")).await.unwrap();
        assert_eq!(current_page(&session).await.unwrap(), Some(Page::Signup));
    }

    #[tokio::test]
    async fn test_seed_page_ignores_unknown_names() {
        let session = session();
        seed_page_once(&session, Some("admin")).await.unwrap();
        assert_eq!(current_page(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_flash_is_one_shot() {
        let session = session();
        set_flash(&session, Flash::success("Saved")).await.unwrap();

        assert_eq!(
            take_flash(&session).await.unwrap(),
            Some(Flash::success("Saved"))
        );
        assert_eq!(take_flash(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_transcript_defaults_to_empty() {
        let session = session();
        assert!(load_transcript(&session).await.unwrap().is_empty());

        let mut transcript = Transcript::new();
        transcript.push_exchange("q", "a");
        store_transcript(&session, &transcript).await.unwrap();
        assert_eq!(load_transcript(&session).await.unwrap(), transcript);
    }
}
