//! Auth command handlers
//!
//! Registration, login, logout and the current account.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use review_client::ReviewClient;
use review_core::domain::user::User;
use review_core::dto::auth::RegistrationForm;

use crate::config::Config;
use crate::context::connect;

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create a new account
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Username used to log in
        #[arg(short, long)]
        username: String,

        /// Full name shown on the dashboard
        #[arg(short, long)]
        full_name: Option<String>,

        /// Password (at least 8 characters)
        #[arg(long, env = "REVIEW_PASSWORD", hide_env_values = true)]
        password: String,

        /// Password again
        #[arg(long, env = "REVIEW_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm_password: String,
    },
    /// Log in and save the session token
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(long, env = "REVIEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session token
    Logout,
    /// Show the signed-in account
    Whoami,
}

/// Handle auth commands
///
/// # Arguments
/// * `command` - The auth command to execute
/// * `config` - The CLI configuration
pub async fn handle_auth_command(command: AuthCommands, config: &Config) -> Result<()> {
    let client = connect(config)?;

    match command {
        AuthCommands::Register {
            email,
            username,
            full_name,
            password,
            confirm_password,
        } => {
            let form = RegistrationForm {
                email,
                username,
                full_name,
                password,
                confirm_password,
            };
            register(&client, form).await
        }
        AuthCommands::Login { username, password } => login(&client, &username, &password).await,
        AuthCommands::Logout => logout(&client),
        AuthCommands::Whoami => whoami(&client).await,
    }
}

/// Register a new account
async fn register(client: &ReviewClient, form: RegistrationForm) -> Result<()> {
    let user = client.register(form).await?;

    println!("{}", "✓ Account created!".green().bold());
    print_user(&user);
    println!();
    println!(
        "Run {} to sign in.",
        format!("review auth login --username {}", user.username).cyan()
    );

    Ok(())
}

/// Log in and persist the token
async fn login(client: &ReviewClient, username: &str, password: &str) -> Result<()> {
    client.login(username, password).await?;
    let user = client.current_user().await?;

    println!(
        "{}",
        format!("✓ Welcome back, {}!", user.display_name())
            .green()
            .bold()
    );

    Ok(())
}

/// Drop the saved token
fn logout(client: &ReviewClient) -> Result<()> {
    client.logout()?;
    println!("{}", "✓ Logged out.".green());
    Ok(())
}

/// Show the current account
async fn whoami(client: &ReviewClient) -> Result<()> {
    if !client.session().is_authenticated() {
        println!("{}", "Not logged in.".yellow());
        println!("  Run {} to sign in.", "review auth login".cyan());
        return Ok(());
    }

    let user = client.current_user().await?;
    print_user(&user);

    Ok(())
}

/// Print account details
fn print_user(user: &User) {
    println!("  ID:       {}", user.id.to_string().cyan());
    println!("  Username: {}", user.username.bold());
    println!("  Email:    {}", user.email);
    if let Some(name) = &user.full_name {
        println!("  Name:     {}", name);
    }
    if user.is_premium {
        println!("  Plan:     {}", "premium".magenta());
    }
    if !user.is_active {
        println!("  Status:   {}", "inactive".red());
    }
}
