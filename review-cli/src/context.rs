//! Client construction
//!
//! Builds the [`ReviewClient`] every command talks through, with the saved
//! session restored from disk and the login prompt wired to session expiry.

use anyhow::{Context, Result};
use colored::*;
use review_client::{FileTokenStore, ReviewClient, Session, SessionListener};
use std::sync::Arc;

use crate::config::Config;

/// Sends the user back to `review auth login` when the backend drops the session
pub struct LoginRedirect;

impl SessionListener for LoginRedirect {
    fn on_session_expired(&self) {
        eprintln!(
            "{}",
            "Your session has expired or is not valid.".yellow().bold()
        );
        eprintln!("  Run {} to sign in again.", "review auth login".cyan());
    }
}

/// Build a client over the session saved in the configured token file
pub fn connect(config: &Config) -> Result<ReviewClient> {
    let store = FileTokenStore::new(&config.token_file);
    let session = Session::restore(store)
        .with_context(|| format!("Failed to read token file {:?}", config.token_file))?
        .with_listener(Arc::new(LoginRedirect));

    Ok(ReviewClient::new(&config.api_url, Arc::new(session)))
}
