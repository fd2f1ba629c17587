//! Authentication API endpoints

use review_core::domain::user::{Token, User};
use review_core::dto::auth::{LoginForm, RegistrationForm};
use tracing::info;

use crate::ReviewClient;
use crate::error::Result;

impl ReviewClient {
    // =============================================================================
    // Authentication
    // =============================================================================

    /// Register a new account
    ///
    /// The form is validated first (email format, password length, password
    /// confirmation); an invalid form is rejected without contacting the
    /// backend. Registering does not sign the session in.
    ///
    /// # Example
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use review_client::{ReviewClient, Session};
    /// # use review_core::dto::auth::RegistrationForm;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ReviewClient::new("http://localhost:8000/api/v1", Arc::new(Session::in_memory()));
    /// let user = client.register(RegistrationForm {
    ///     email: "ana@example.com".to_string(),
    ///     username: "ana".to_string(),
    ///     full_name: None,
    ///     password: "correct-horse".to_string(),
    ///     confirm_password: "correct-horse".to_string(),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn register(&self, form: RegistrationForm) -> Result<User> {
        let req = form.into_request()?;
        let response = self.post("/auth/register").json(&req).send().await?;

        let user: User = self.handle_response(response).await?;
        info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Log in with username and password
    ///
    /// Credentials are sent form-encoded. On success the issued token is
    /// stored in the client's session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Token> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.post("/auth/login").form(&form).send().await?;

        let token: Token = self.handle_response(response).await?;
        self.session.sign_in(&token.access_token)?;
        Ok(token)
    }

    /// Forget the session's token
    ///
    /// The backend keeps no server-side session, so this is local only.
    pub fn logout(&self) -> Result<()> {
        self.session.sign_out()
    }

    /// Get the account the current token belongs to
    pub async fn current_user(&self) -> Result<User> {
        let response = self.get("/auth/me").send().await?;

        self.handle_response(response).await
    }
}
